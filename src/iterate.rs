//! Bounded fixed-point iteration.
//!
//! Both inverse solves (Cartesian -> geodetic latitude, grid northing ->
//! latitude) run through [`fixed_point`], which never loops more than the
//! configured cap and reports exhaustion as a value instead of a stale estimate.

/// Tolerance and hard iteration cap for one iterative solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationLimits {
    /// Convergence threshold, in the unit of the solve's residual.
    pub tolerance: f64,
    /// Maximum number of steps before giving up.
    pub max_iterations: usize,
}

impl IterationLimits {
    pub const fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }
}

/// Outcome of a single step.
pub(crate) enum Step {
    /// The residual is inside tolerance; the solve finishes with this value.
    Converged(f64),
    /// Keep going from this estimate.
    Continue(f64),
}

/// Outcome of the whole solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FixedPoint {
    Converged { value: f64, iterations: usize },
    Exhausted { last: f64, iterations: usize },
}

/// Run `step` from `initial` until it reports convergence or `max_iterations`
/// steps have been taken.
pub(crate) fn fixed_point<F>(initial: f64, max_iterations: usize, mut step: F) -> FixedPoint
where
    F: FnMut(f64) -> Step,
{
    let mut current = initial;
    for i in 0..max_iterations {
        match step(current) {
            Step::Converged(value) => {
                return FixedPoint::Converged {
                    value,
                    iterations: i + 1,
                }
            }
            Step::Continue(next) => current = next,
        }
    }
    FixedPoint::Exhausted {
        last: current,
        iterations: max_iterations,
    }
}
