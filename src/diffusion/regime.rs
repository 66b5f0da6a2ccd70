//! Diffusion regimes and their boundaries
//!
//! Fragments are classified by their occupied-pore count `N` against three
//! boundaries, checked in this order:
//!
//! | Test            | Regime                    | D                  |
//! |-----------------|---------------------------|--------------------|
//! | `N < N_lim3`    | Ogston–Zimm               | `D0·g`             |
//! | `N < N_lim2`    | Rouse / reptation-equil.  | `Db / N²`          |
//! | `N > N_lim1`    | Reptation plateau         | `Db · ε^(3/2)`     |
//! | otherwise       | Accelerated reptation     | `Db · ε · N^(-1/2)`|
//!
//! with `N_lim1 = 1/ε`, `N_lim2 = ε^(-2/3)` and `N_lim3` the Zimm/Rouse
//! crossover found numerically by [`zimm_rouse_crossover`].

use std::fmt;

use crate::error::{GelError, Result};

/// One of the four transport regimes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffusionRegime {
    OgstonZimm,
    RouseEquilibrium,
    ReptationPlateau,
    ReptationAccelerated,
}

impl DiffusionRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffusionRegime::OgstonZimm => "Ogston-Zimm",
            DiffusionRegime::RouseEquilibrium => "Rouse/reptation-equilibrium",
            DiffusionRegime::ReptationPlateau => "reptation-plateau",
            DiffusionRegime::ReptationAccelerated => "accelerated-reptation",
        }
    }
}

impl fmt::Display for DiffusionRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regime boundaries, all in the same unit (occupied pores or bp)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeBoundaries {
    /// Accelerated → plateau (`N_lim1`)
    pub accel_to_plateau: f64,
    /// Equilibrium → accelerated (`N_lim2`)
    pub equil_to_accel: f64,
    /// Ogston–Zimm → Rouse (`N_lim3`)
    pub zimm_to_rouse: f64,
}

impl RegimeBoundaries {
    /// Boundaries from the reduced field and the crossover pore count
    pub fn from_reduced_field(epsilon: f64, zimm_to_rouse: f64) -> Self {
        Self {
            accel_to_plateau: epsilon.recip(),
            equil_to_accel: epsilon.powf(-2.0 / 3.0),
            zimm_to_rouse,
        }
    }

    /// Total over every `n`: exactly one branch applies
    pub fn classify(&self, n: f64) -> DiffusionRegime {
        if n < self.zimm_to_rouse {
            DiffusionRegime::OgstonZimm
        } else if n < self.equil_to_accel {
            DiffusionRegime::RouseEquilibrium
        } else if n > self.accel_to_plateau {
            DiffusionRegime::ReptationPlateau
        } else {
            DiffusionRegime::ReptationAccelerated
        }
    }

    /// Apply `f` to every boundary
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            accel_to_plateau: f(self.accel_to_plateau),
            equil_to_accel: f(self.equil_to_accel),
            zimm_to_rouse: f(self.zimm_to_rouse),
        }
    }
}

// =================================================================================================
// Root finding
// =================================================================================================

/// Outcome of the crossover search
#[derive(Debug, Clone, PartialEq)]
pub enum RootOutcome {
    Converged {
        /// Root \[bp\]
        root: f64,
        iterations: usize,
    },
    Failed {
        reason: String,
    },
}

impl RootOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, RootOutcome::Converged { .. })
    }

    /// The root, or [`GelError::RegimeBoundary`]
    pub fn into_result(self) -> Result<f64> {
        match self {
            RootOutcome::Converged { root, .. } => Ok(root),
            RootOutcome::Failed { reason } => Err(GelError::RegimeBoundary(reason)),
        }
    }
}

/// Search window for the crossover \[bp\]
const MIN_BP: f64 = 1.0;
const MAX_BP: f64 = 1e9;

const NEWTON_MAX_ITERATIONS: usize = 100;
const BISECTION_MAX_ITERATIONS: usize = 200;
const TOLERANCE: f64 = 1e-12;

/// Find `Nbp` where `log_ratio(Nbp) = ln(D_Zimm / D_Rouse)` vanishes
///
/// Newton iterations on `u = ln(Nbp)` start at `guess_bp`; the derivative is
/// a central difference. If Newton leaves the search window, stalls on a
/// flat derivative or runs out of iterations, the guess is bracketed by
/// geometric expansion inside [1, 1e9] bp and bisected.
pub fn zimm_rouse_crossover(log_ratio: impl Fn(f64) -> f64, guess_bp: f64) -> RootOutcome {
    if !(guess_bp.is_finite() && guess_bp > 0.0) {
        return RootOutcome::Failed {
            reason: format!("initial guess {} bp is not a positive length", guess_bp),
        };
    }

    let h = |u: f64| log_ratio(u.exp());
    let (lo, hi) = (MIN_BP.ln(), MAX_BP.ln());

    // Newton on u = ln(Nbp)
    let mut u = guess_bp.ln().clamp(lo, hi);
    for iteration in 1..=NEWTON_MAX_ITERATIONS {
        let value = h(u);
        if !value.is_finite() {
            break;
        }
        if value.abs() < TOLERANCE {
            return RootOutcome::Converged {
                root: u.exp(),
                iterations: iteration,
            };
        }
        let step = 1e-6 * u.abs().max(1.0);
        let slope = (h(u + step) - h(u - step)) / (2.0 * step);
        if !slope.is_finite() || slope.abs() < 1e-14 {
            break;
        }
        let next = u - value / slope;
        if !(lo..=hi).contains(&next) {
            break;
        }
        if (next - u).abs() < TOLERANCE * u.abs().max(1.0) {
            return RootOutcome::Converged {
                root: next.exp(),
                iterations: iteration,
            };
        }
        u = next;
    }

    bracket_and_bisect(&h, guess_bp.ln().clamp(lo, hi), lo, hi)
}

fn bracket_and_bisect(h: &impl Fn(f64) -> f64, start: f64, lo: f64, hi: f64) -> RootOutcome {
    let f0 = h(start);
    if !f0.is_finite() {
        return RootOutcome::Failed {
            reason: "crossover function is not finite at the initial guess".to_string(),
        };
    }

    // expand outwards by doubling the log-distance until the sign changes
    let mut width = 0.1;
    let bracket = loop {
        let (a, b) = ((start - width).max(lo), (start + width).min(hi));
        let (fa, fb) = (h(a), h(b));
        if fa.is_finite() && fa.signum() != f0.signum() {
            break Some((a, start, fa));
        }
        if fb.is_finite() && fb.signum() != f0.signum() {
            break Some((start, b, f0));
        }
        if a <= lo && b >= hi {
            break None;
        }
        width *= 2.0;
    };

    let Some((mut a, mut b, mut fa)) = bracket else {
        return RootOutcome::Failed {
            reason: format!(
                "no sign change of ln(D_Zimm/D_Rouse) between {} and {} bp",
                MIN_BP, MAX_BP
            ),
        };
    };

    for iteration in 1..=BISECTION_MAX_ITERATIONS {
        let mid = 0.5 * (a + b);
        let fm = h(mid);
        if !fm.is_finite() {
            return RootOutcome::Failed {
                reason: format!("crossover function not finite at {} bp", mid.exp()),
            };
        }
        if fm == 0.0 || (b - a) < TOLERANCE * mid.abs().max(1.0) {
            return RootOutcome::Converged {
                root: mid.exp(),
                iterations: iteration,
            };
        }
        if fm.signum() == fa.signum() {
            a = mid;
            fa = fm;
        } else {
            b = mid;
        }
    }

    RootOutcome::Failed {
        reason: "bisection did not converge".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn boundaries() -> RegimeBoundaries {
        RegimeBoundaries {
            zimm_to_rouse: 1.0,
            equil_to_accel: 10.0,
            accel_to_plateau: 100.0,
        }
    }

    #[test]
    fn test_classify_ties() {
        let b = boundaries();
        assert_eq!(b.classify(0.5), DiffusionRegime::OgstonZimm);
        assert_eq!(b.classify(1.0), DiffusionRegime::RouseEquilibrium);
        assert_eq!(b.classify(10.0), DiffusionRegime::ReptationAccelerated);
        assert_eq!(b.classify(100.0), DiffusionRegime::ReptationAccelerated);
        assert_eq!(b.classify(100.5), DiffusionRegime::ReptationPlateau);
    }

    #[test]
    fn test_reduced_field_boundaries() {
        let b = RegimeBoundaries::from_reduced_field(0.001, 2.0);
        assert_relative_eq!(b.accel_to_plateau, 1000.0, max_relative = 1e-12);
        assert_relative_eq!(b.equil_to_accel, 100.0, max_relative = 1e-9);
    }

    #[test]
    fn test_newton_finds_power_law_root() {
        // ln(ratio) = 0.5·ln(N/3100)
        let outcome = zimm_rouse_crossover(|n| 0.5 * (n / 3100.0).ln(), 2000.0);
        match outcome {
            RootOutcome::Converged { root, .. } => assert_relative_eq!(root, 3100.0, max_relative = 1e-8),
            RootOutcome::Failed { reason } => panic!("{}", reason),
        }
    }

    #[test]
    fn test_flat_start_falls_back_to_bisection() {
        // flat below 1000 bp, so Newton has no slope at the guess
        let f = |n: f64| if n < 1000.0 { -1.0 } else { (n / 5000.0).ln() };
        let root = zimm_rouse_crossover(f, 10.0).into_result().unwrap();
        assert_relative_eq!(root, 5000.0, max_relative = 1e-6);
    }

    #[test]
    fn test_no_root_fails() {
        let outcome = zimm_rouse_crossover(|_| 1.0, 2000.0);
        assert!(!outcome.is_converged());
        assert!(matches!(outcome.into_result(), Err(GelError::RegimeBoundary(_))));
    }

    #[test]
    fn test_bad_guess_fails() {
        assert!(!zimm_rouse_crossover(|n| n.ln(), -5.0).is_converged());
    }
}
