//! Dynamic window sampling.
//!
//! The reachable velocity space one lookahead horizon ahead of the current
//! twist, clamped to the configured kinematic limits.

/// Evenly spaced samples over `[lo, hi]`, endpoints included.
///
/// The last sample is pinned to `hi` so accumulated rounding never pushes
/// a sample past the limit.
fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![lo];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { hi } else { lo + step * i as f64 })
        .collect()
}

/// Reachable samples along one velocity axis.
///
/// The window is `[x − a·τ, x + a·τ]` clamped to `[min, max]`. If the
/// current velocity is infeasible (the window lies entirely past a limit)
/// the full configured range is sampled instead, keeping the search space
/// non-empty.
pub fn axis_samples(current: f64, min: f64, max: f64, accel: f64, horizon: f64, n: usize) -> Vec<f64> {
    let reach = accel * horizon;
    if current - reach > max || current + reach < min {
        return linspace(min, max, n);
    }
    linspace((current - reach).max(min), (current + reach).min(max), n)
}

/// Rectangular grid of reachable (ω, v) pairs.
#[derive(Debug, Clone)]
pub struct VelocityWindow {
    /// Linear velocity samples
    pub linear: Vec<f64>,
    /// Angular velocity samples
    pub angular: Vec<f64>,
}

/// Limits and sampling resolution for the window.
#[derive(Debug, Clone)]
pub struct WindowLimits {
    pub min_linear: f64,
    pub max_linear: f64,
    pub min_angular: f64,
    pub max_angular: f64,
    /// Acceleration bound applied to both axes (m/s² and rad/s²)
    pub max_acc: f64,
    pub linear_samples: usize,
    pub angular_samples: usize,
}

impl VelocityWindow {
    /// Sample the window around the current twist.
    pub fn sample(linear: f64, angular: f64, horizon: f64, limits: &WindowLimits) -> Self {
        Self {
            linear: axis_samples(
                linear,
                limits.min_linear,
                limits.max_linear,
                limits.max_acc,
                horizon,
                limits.linear_samples,
            ),
            angular: axis_samples(
                angular,
                limits.min_angular,
                limits.max_angular,
                limits.max_acc,
                horizon,
                limits.angular_samples,
            ),
        }
    }
}
