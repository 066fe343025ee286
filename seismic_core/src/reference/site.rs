//! Site Classes
//!
//! Site class selects the response spectrum branch and the vertical
//! amplification constants. The soil-label variant of the calculator uses
//! Hard/Medium/Soft; those map one-to-one onto A/B, C and D.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Shear wave velocity (m/s) at or above which a site is hard (A/B)
pub const HARD_SITE_MIN_VS: f64 = 760.0;

/// Shear wave velocity (m/s) at or above which a site is medium (C)
pub const MEDIUM_SITE_MIN_VS: f64 = 360.0;

/// Site class per IS 1893:2025
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteClass {
    /// Rock / hard soil
    #[serde(rename = "A/B", alias = "AB", alias = "Hard")]
    AB,
    /// Medium or stiff soil
    #[serde(alias = "Medium")]
    C,
    /// Soft soil
    #[serde(alias = "Soft")]
    D,
}

impl SiteClass {
    /// All site classes for UI selection
    pub const ALL: [SiteClass; 3] = [SiteClass::AB, SiteClass::C, SiteClass::D];

    /// Classify a site from its average shear wave velocity Vs (m/s).
    pub fn from_shear_wave_velocity(vs_m_per_s: f64) -> CalcResult<Self> {
        if !(vs_m_per_s > 0.0) {
            return Err(CalcError::domain(
                "shear_wave_velocity",
                vs_m_per_s.to_string(),
                "Shear wave velocity must be positive",
            ));
        }
        Ok(if vs_m_per_s >= HARD_SITE_MIN_VS {
            SiteClass::AB
        } else if vs_m_per_s >= MEDIUM_SITE_MIN_VS {
            SiteClass::C
        } else {
            SiteClass::D
        })
    }

    /// Code label (e.g., "A/B")
    pub fn code(&self) -> &'static str {
        match self {
            SiteClass::AB => "A/B",
            SiteClass::C => "C",
            SiteClass::D => "D",
        }
    }

    /// Soil label used by the soil-based spectrum
    pub fn soil_label(&self) -> &'static str {
        match self {
            SiteClass::AB => "Hard",
            SiteClass::C => "Medium",
            SiteClass::D => "Soft",
        }
    }

    /// Parse from code or soil labels
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "A/B" | "AB" | "A" | "B" | "HARD" => Ok(SiteClass::AB),
            "C" | "MEDIUM" => Ok(SiteClass::C),
            "D" | "SOFT" => Ok(SiteClass::D),
            _ => Err(CalcError::key_not_found("site classes", s)),
        }
    }
}

impl fmt::Display for SiteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Site {} ({})", self.code(), self.soil_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(SiteClass::from_shear_wave_velocity(760.0).unwrap(), SiteClass::AB);
        assert_eq!(SiteClass::from_shear_wave_velocity(759.9).unwrap(), SiteClass::C);
        assert_eq!(SiteClass::from_shear_wave_velocity(360.0).unwrap(), SiteClass::C);
        assert_eq!(SiteClass::from_shear_wave_velocity(200.0).unwrap(), SiteClass::D);
    }

    #[test]
    fn test_non_positive_velocity() {
        assert!(SiteClass::from_shear_wave_velocity(0.0).is_err());
        assert!(SiteClass::from_shear_wave_velocity(f64::NAN).is_err());
    }

    #[test]
    fn test_soil_label_aliases() {
        let hard: SiteClass = serde_json::from_str("\"Hard\"").unwrap();
        let soft: SiteClass = serde_json::from_str("\"Soft\"").unwrap();
        assert_eq!(hard, SiteClass::AB);
        assert_eq!(soft, SiteClass::D);
        assert_eq!(serde_json::to_string(&SiteClass::AB).unwrap(), "\"A/B\"");
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(SiteClass::from_str_flexible("medium").unwrap(), SiteClass::C);
        assert!(SiteClass::from_str_flexible("E").is_err());
    }
}
