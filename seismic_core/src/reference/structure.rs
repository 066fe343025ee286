//! Structure Types
//!
//! Each lateral system carries a response reduction factor R and the
//! coefficient c of the empirical period formula T = c·H^0.75.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Lateral load resisting system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureType {
    /// Reinforced concrete ordinary moment resisting frame
    #[serde(rename = "RC-OMRF")]
    RcOmrf,
    /// Reinforced concrete special moment resisting frame
    #[serde(rename = "RC-SMRF")]
    RcSmrf,
    /// Steel moment resisting frame
    #[serde(rename = "Steel-MRF")]
    SteelMrf,
    /// Structural wall system
    #[serde(rename = "Shear-Wall")]
    ShearWall,
}

impl StructureType {
    /// All structure types for UI selection
    pub const ALL: [StructureType; 4] = [
        StructureType::RcOmrf,
        StructureType::RcSmrf,
        StructureType::SteelMrf,
        StructureType::ShearWall,
    ];

    /// Response reduction factor R
    pub fn response_reduction(&self) -> f64 {
        match self {
            StructureType::RcOmrf => 3.0,
            StructureType::RcSmrf => 5.0,
            StructureType::SteelMrf => 4.0,
            StructureType::ShearWall => 4.0,
        }
    }

    /// Period coefficient c in T = c·H^0.75
    pub fn period_coefficient(&self) -> f64 {
        match self {
            StructureType::RcOmrf => 0.075,
            StructureType::RcSmrf => 0.075,
            StructureType::SteelMrf => 0.085,
            StructureType::ShearWall => 0.09,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            StructureType::RcOmrf => "RC OMRF",
            StructureType::RcSmrf => "RC SMRF",
            StructureType::SteelMrf => "Steel MRF",
            StructureType::ShearWall => "Shear Wall",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace([' ', '_'], "-").as_str() {
            "RC-OMRF" | "OMRF" => Ok(StructureType::RcOmrf),
            "RC-SMRF" | "SMRF" => Ok(StructureType::RcSmrf),
            "STEEL-MRF" | "SMF" => Ok(StructureType::SteelMrf),
            "SHEAR-WALL" | "WALL" => Ok(StructureType::ShearWall),
            _ => Err(CalcError::key_not_found("structure types", s)),
        }
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        assert_eq!(StructureType::RcOmrf.response_reduction(), 3.0);
        assert_eq!(StructureType::SteelMrf.period_coefficient(), 0.085);
        assert_eq!(StructureType::ShearWall.period_coefficient(), 0.09);
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(StructureType::from_str_flexible("rc smrf").unwrap(), StructureType::RcSmrf);
        assert_eq!(StructureType::from_str_flexible("Shear_Wall").unwrap(), StructureType::ShearWall);
        assert!(StructureType::from_str_flexible("timber").is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&StructureType::SteelMrf).unwrap();
        assert_eq!(json, "\"Steel-MRF\"");
        let roundtrip: StructureType = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, StructureType::SteelMrf);
    }
}
