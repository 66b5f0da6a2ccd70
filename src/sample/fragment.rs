//! Solute identities
//!
//! A [`Sample`](crate::sample::Sample) treats its solutes as opaque values;
//! the gel only needs their length in base pairs, which is what the
//! [`Fragment`] trait exposes.

use std::fmt;

/// Anything that migrates through the gel as a band of known length
pub trait Fragment {
    /// Length in base pairs
    fn length_bp(&self) -> f64;

    /// Short human-readable identifier used in tables and exports
    fn label(&self) -> String {
        format!("{} bp", self.length_bp())
    }
}

/// A double-stranded DNA fragment, identified by length and an optional name
///
/// Two fragments are the same solute when both the length and the name
/// match, so two unnamed fragments of equal length merge in a sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DnaFragment {
    length: u64,
    name: Option<String>,
}

impl DnaFragment {
    pub fn new(length: u64) -> Self {
        Self { length, name: None }
    }

    pub fn named(length: u64, name: impl Into<String>) -> Self {
        Self {
            length,
            name: Some(name.into()),
        }
    }

    /// Unnamed fragments for every length, in order
    pub fn from_lengths(lengths: &[u64]) -> Vec<DnaFragment> {
        lengths.iter().map(|&l| DnaFragment::new(l)).collect()
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Fragment for DnaFragment {
    fn length_bp(&self) -> f64 {
        self.length as f64
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DnaFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({} bp)", name, self.length),
            None => write!(f, "{} bp", self.length),
        }
    }
}

impl From<u64> for DnaFragment {
    fn from(length: u64) -> Self {
        DnaFragment::new(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        assert_eq!(DnaFragment::new(500).label(), "500 bp");
        assert_eq!(DnaFragment::named(48502, "lambda").label(), "lambda (48502 bp)");
    }

    #[test]
    fn test_identity_includes_name() {
        assert_eq!(DnaFragment::new(500), DnaFragment::from(500));
        assert_ne!(DnaFragment::new(500), DnaFragment::named(500, "insert"));
    }
}
