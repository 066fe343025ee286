//! # Design Response Spectrum
//!
//! Normalized spectral acceleration ratios Sa/g as a function of natural
//! period T and site class, for horizontal and vertical action.
//!
//! Two horizontal rule sets are in circulation for this code edition and
//! neither is authoritative, so both are available as a [`SpectrumProfile`]:
//!
//! | Profile  | Site | Plateau       | Mid segment  | Tail (T > 6 s) |
//! |----------|------|---------------|--------------|----------------|
//! | `Banded` | A/B  | 2.5, T ≤ 0.4  | 1/T          | 6/T²           |
//! | `Banded` | C    | 2.5, T ≤ 0.6  | 1.5/T        | 9/T²           |
//! | `Banded` | D    | 2.5, T ≤ 0.8  | 2/T          | 12/T²          |
//! | `Soil`   | A/B, C | 2.5, T ≤ 0.4 | 1/T         | none           |
//! | `Soil`   | D    | 3.0, T ≤ 0.6  | 1.8/T        | none           |
//!
//! Every branch is continuous at its boundaries and non-increasing past the
//! plateau.
//!
//! ## Example
//!
//! ```rust
//! use seismic_core::reference::SiteClass;
//! use seismic_core::spectrum::{horizontal_ratio, SpectrumProfile};
//!
//! let sa = horizontal_ratio(0.5, SiteClass::AB, SpectrumProfile::Banded).unwrap();
//! assert!((sa - 2.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::reference::SiteClass;

/// Period (s) beyond which the banded spectrum switches to its 1/T² tail
pub const LONG_PERIOD_S: f64 = 6.0;

/// Period (s) at or below which vertical damping correction is site-dependent
pub const VERTICAL_SHORT_PERIOD_S: f64 = 0.10;

/// Horizontal spectrum rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpectrumProfile {
    /// Site-class spectrum with a long-period 1/T² tail
    #[default]
    Banded,
    /// Soil-label spectrum without a long-period tail
    Soil,
}

impl SpectrumProfile {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SpectrumProfile::Banded => "Site class (banded, with long-period tail)",
            SpectrumProfile::Soil => "Soil type (simplified)",
        }
    }
}

/// Piecewise coefficients of one horizontal spectrum branch.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Branch {
    plateau: f64,
    corner_s: f64,
    mid_coefficient: f64,
    tail_coefficient: Option<f64>,
}

impl Branch {
    fn evaluate(&self, period_s: f64) -> f64 {
        if period_s <= self.corner_s {
            return self.plateau;
        }
        match self.tail_coefficient {
            Some(tail) if period_s > LONG_PERIOD_S => tail / period_s.powi(2),
            _ => self.mid_coefficient / period_s,
        }
    }
}

fn branch(site: SiteClass, profile: SpectrumProfile) -> Branch {
    match (profile, site) {
        (SpectrumProfile::Banded, SiteClass::AB) => Branch {
            plateau: 2.5,
            corner_s: 0.4,
            mid_coefficient: 1.0,
            tail_coefficient: Some(6.0),
        },
        (SpectrumProfile::Banded, SiteClass::C) => Branch {
            plateau: 2.5,
            corner_s: 0.6,
            mid_coefficient: 1.5,
            tail_coefficient: Some(9.0),
        },
        (SpectrumProfile::Banded, SiteClass::D) => Branch {
            plateau: 2.5,
            corner_s: 0.8,
            mid_coefficient: 2.0,
            tail_coefficient: Some(12.0),
        },
        (SpectrumProfile::Soil, SiteClass::AB | SiteClass::C) => Branch {
            plateau: 2.5,
            corner_s: 0.4,
            mid_coefficient: 1.0,
            tail_coefficient: None,
        },
        (SpectrumProfile::Soil, SiteClass::D) => Branch {
            plateau: 3.0,
            corner_s: 0.6,
            mid_coefficient: 1.8,
            tail_coefficient: None,
        },
    }
}

fn validate_period(period_s: f64) -> CalcResult<()> {
    if !(period_s > 0.0) || !period_s.is_finite() {
        return Err(CalcError::domain(
            "period_s",
            period_s.to_string(),
            "Natural period must be positive and finite",
        ));
    }
    Ok(())
}

/// Horizontal spectral acceleration ratio Sa/g.
///
/// # Errors
///
/// `Domain` if `period_s` is not a positive finite number.
pub fn horizontal_ratio(period_s: f64, site: SiteClass, profile: SpectrumProfile) -> CalcResult<f64> {
    validate_period(period_s)?;
    Ok(branch(site, profile).evaluate(period_s))
}

/// Short-period vertical damping correction δᵥ for a site class
fn vertical_short_period_delta(site: SiteClass) -> f64 {
    match site {
        SiteClass::AB => 0.80,
        SiteClass::C => 0.82,
        SiteClass::D => 0.85,
    }
}

/// Site amplification numerator of γᵥ = k/T
fn vertical_site_coefficient(site: SiteClass) -> f64 {
    match site {
        SiteClass::AB => 1.0,
        SiteClass::C => 1.5,
        SiteClass::D => 2.0,
    }
}

/// Vertical amplification δᵥ(T) × γᵥ(T, site).
///
/// δᵥ = 0.67 for T > 0.10 s, otherwise a site-dependent constant;
/// γᵥ = k/T with k = 1.0, 1.5, 2.0 for A/B, C, D.
pub fn vertical_ratio(period_s: f64, site: SiteClass) -> CalcResult<f64> {
    validate_period(period_s)?;
    let delta = if period_s > VERTICAL_SHORT_PERIOD_S {
        0.67
    } else {
        vertical_short_period_delta(site)
    };
    let gamma = vertical_site_coefficient(site) / period_s;
    Ok(delta * gamma)
}
