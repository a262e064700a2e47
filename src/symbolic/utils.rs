//! Small numeric helpers shared by the symbolic layer, the solvers and the plots.

/// `num_values` evenly spaced points from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    match num_values {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num_values as f64 - 1.0);
            (0..num_values).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// Central difference approximation of f'(x)
pub fn central_difference<F>(f: F, x: f64, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + h) - f(x - h)) / (2.0 * h)
}

pub fn numerical_derivative<F>(f: F, x_values: &[f64], h: f64) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    x_values
        .iter()
        .map(|&x| central_difference(&f, x, h))
        .collect()
}

/// root mean square distance between two equally long samples
pub fn norm(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len());
    if x.is_empty() {
        return 0.0;
    }
    let sum = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>();
    (sum / x.len() as f64).sqrt()
}
