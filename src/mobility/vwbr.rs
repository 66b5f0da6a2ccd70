//! The vWBR mobility relation
//!
//! ```text
//! μ(L) = 1 / ( 1/μS + (1/μL − 1/μS) · (1 − exp(−L/γ)) )
//! ```
//!
//! - **μS**: mobility limit for L → 0 \[cm²/(V·s)\]
//! - **μL**: mobility limit for L → ∞ \[cm²/(V·s)\]
//! - **γ**: crossover length \[bp\]
//!
//! For μS ≥ μL > 0 the curve is non-increasing in L.

/// A (μS, μL, γ) triple
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VwbrParams {
    /// Short-fragment mobility \[cm²/(V·s)\]
    pub mu_s: f64,
    /// Long-fragment mobility \[cm²/(V·s)\]
    pub mu_l: f64,
    /// Crossover length \[bp\]
    pub gamma: f64,
}

impl VwbrParams {
    pub fn new(mu_s: f64, mu_l: f64, gamma: f64) -> Self {
        Self { mu_s, mu_l, gamma }
    }

    /// Mobility of a fragment of `length` bp
    pub fn mobility(&self, length: f64) -> f64 {
        vwbr_mobility(length, self.mu_s, self.mu_l, self.gamma)
    }

    pub fn mobilities(&self, lengths: &[f64]) -> Vec<f64> {
        lengths.iter().map(|&l| self.mobility(l)).collect()
    }

    /// `true` when μS ≥ μL > 0 and γ > 0
    pub fn is_physical(&self) -> bool {
        self.mu_l > 0.0 && self.mu_s >= self.mu_l && self.gamma > 0.0
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.mu_s, self.mu_l, self.gamma]
    }

    pub fn from_slice(p: &[f64]) -> Option<Self> {
        match p {
            [mu_s, mu_l, gamma] => Some(Self::new(*mu_s, *mu_l, *gamma)),
            _ => None,
        }
    }
}

/// Free-function form of the relation, used inside the least-squares residual
#[inline]
pub fn vwbr_mobility(length: f64, mu_s: f64, mu_l: f64, gamma: f64) -> f64 {
    let saturation = -(-length / gamma).exp_m1();
    1.0 / (1.0 / mu_s + (1.0 / mu_l - 1.0 / mu_s) * saturation)
}
