/// Scalar root finding: bisection and Newton-Raphson
///  ```
///  use RustedRoots::numerical::scalar_roots::solve_newton;
///  let result = solve_newton("x^2 - 2", 1.0, 1e-10, 50).unwrap();
///  println!("root = {}", result.root);
///  for step in &result.steps {
///      print!("{}", step);
///  }
///  ```
pub mod scalar_roots;
