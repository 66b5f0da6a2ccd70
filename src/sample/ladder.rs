//! Preset DNA ladders
//!
//! Sizes and mass fractions of commercial size markers. A ladder sample is
//! built by scaling the fractions to a loaded quantity.

use crate::error::{GelError, Result};
use crate::sample::{DnaFragment, Sample};
use crate::units::{Dimension, Quantity};

/// Default quantity loaded for a ladder \[ng\]
pub const DEFAULT_LADDER_QUANTITY_NG: f64 = 500.0;

/// Default volume loaded for a ladder \[µl\]
pub const DEFAULT_LADDER_VOLUME_UL: f64 = 12.0;

/// Band sizes \[bp\] and the fraction of the total mass in each band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderPreset {
    pub name: &'static str,
    pub sizes: &'static [u64],
    pub fractions: &'static [f64],
}

pub const LADDERS: &[LadderPreset] = &[
    LadderPreset {
        name: "1kb_GeneRuler",
        sizes: &[10000, 8000, 6000, 5000, 4000, 3500, 3000, 2500, 2000, 1500, 1000, 750, 500, 250],
        fractions: &[
            0.06, 0.06, 0.14, 0.06, 0.06, 0.06, 0.14, 0.05, 0.05, 0.05, 0.12, 0.05, 0.05, 0.05,
        ],
    },
    LadderPreset {
        name: "1kb+_GeneRuler",
        sizes: &[20000, 10000, 7000, 5000, 4000, 3000, 2000, 1500, 1000, 700, 500, 400, 300, 200, 75],
        fractions: &[
            0.04, 0.04, 0.04, 0.15, 0.04, 0.04, 0.04, 0.16, 0.05, 0.05, 0.15, 0.05, 0.05, 0.05, 0.05,
        ],
    },
    LadderPreset {
        name: "Mix_GeneRuler",
        sizes: &[
            10000, 8000, 6000, 5000, 4000, 3500, 3000, 2500, 2000, 1500, 1200, 1000, 900, 800, 700, 600, 500,
            400, 300, 200, 100,
        ],
        fractions: &[
            0.036, 0.036, 0.036, 0.036, 0.036, 0.036, 0.12, 0.032, 0.032, 0.032, 0.032, 0.12, 0.034, 0.034,
            0.034, 0.034, 0.12, 0.04, 0.04, 0.04, 0.04,
        ],
    },
    LadderPreset {
        name: "High_Range_GeneRuler",
        sizes: &[48502, 24508, 20555, 17000, 15258, 13825, 12119, 10171],
        fractions: &[0.16, 0.176, 0.16, 0.118, 0.118, 0.1, 0.094, 0.074],
    },
];

impl LadderPreset {
    /// Look up a preset by name
    pub fn find(name: &str) -> Result<&'static LadderPreset> {
        LADDERS.iter().find(|l| l.name == name).ok_or_else(|| {
            let known: Vec<&str> = LADDERS.iter().map(|l| l.name).collect();
            GelError::invalid(format!("unknown ladder '{}', choose from: {}", name, known.join(", ")))
        })
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        LADDERS.iter().map(|l| l.name)
    }
}

/// Build a ladder sample: `quantity` split by the preset's fractions in `volume`
///
/// # Errors
///
/// - `InvalidInput` for an unknown ladder name
/// - `Dimensionality` if `quantity` is not a mass or `volume` not a volume
pub fn ladder_from_info(name: &str, quantity: &Quantity, volume: &Quantity) -> Result<Sample<DnaFragment>> {
    let preset = LadderPreset::find(name)?;
    quantity.expect_dimension(Dimension::MASS, "ladder quantity")?;
    volume.expect_dimension(Dimension::VOLUME, "ladder volume")?;

    let quantity = quantity.to("ng")?;
    let volume = volume.to("ul")?;
    let quantities = preset.fractions.iter().map(|f| quantity.scale(*f)).collect();
    Sample::new(DnaFragment::from_lengths(preset.sizes), quantities, volume)
}

/// [`ladder_from_info`] with 500 ng in 12 µl
pub fn ladder(name: &str) -> Result<Sample<DnaFragment>> {
    ladder_from_info(
        name,
        &Quantity::new(DEFAULT_LADDER_QUANTITY_NG, "ng")?,
        &Quantity::new(DEFAULT_LADDER_VOLUME_UL, "ul")?,
    )
}
