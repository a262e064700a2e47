//! Fixed-size probes proposing new inputs after a failed solve.
use crate::numerical::scalar_roots::bisection::same_sign;
use crate::numerical::scalar_roots::function::NonlinearFunction;
use crate::numerical::scalar_roots::newton::SINGULAR_DERIVATIVE;
use log::debug;

/// candidate brackets, tried in this order
pub const PROBE_INTERVALS: [(f64, f64); 6] = [
    (-10.0, 10.0),
    (-5.0, 5.0),
    (-2.0, 2.0),
    (0.0, 2.0),
    (1.0, 3.0),
    (-3.0, -1.0),
];

/// fixed seeds tried after the two neighbours of the failed iterate
pub const PROBE_SEEDS: [f64; 4] = [1.0, -1.0, 2.0, -2.0];

pub const MAX_SUGGESTIONS: usize = 3;

/// Up to three probe intervals on which f is finite and changes sign.
pub fn suggest_intervals<F: NonlinearFunction + ?Sized>(function: &F) -> Vec<(f64, f64)> {
    let found: Vec<(f64, f64)> = PROBE_INTERVALS
        .iter()
        .copied()
        .filter(|&(a, b)| {
            let (fa, fb) = (function.evaluate(a), function.evaluate(b));
            fa.is_finite() && fb.is_finite() && !same_sign(fa, fb)
        })
        .take(MAX_SUGGESTIONS)
        .collect();
    debug!("interval suggestions for {}: {:?}", function.name(), found);
    found
}

/// Up to three starting points near or instead of `x_old` where Newton can take a step.
pub fn suggest_initial_guesses<F: NonlinearFunction + ?Sized>(function: &F, x_old: f64) -> Vec<f64> {
    let candidates = [x_old + 0.5, x_old - 0.5]
        .into_iter()
        .chain(PROBE_SEEDS.iter().copied());
    let mut found: Vec<f64> = Vec::with_capacity(MAX_SUGGESTIONS);
    for seed in candidates {
        if found.len() == MAX_SUGGESTIONS {
            break;
        }
        if seed == x_old || found.contains(&seed) {
            continue;
        }
        let fx = function.evaluate(seed);
        let dfx = function.derivative_or_estimate(seed);
        if fx.is_finite() && dfx.is_finite() && dfx.abs() >= SINGULAR_DERIVATIVE {
            found.push(seed);
        }
    }
    debug!("initial guess suggestions for {}: {:?}", function.name(), found);
    found
}
