//! # Storey Force Distribution
//!
//! Distributes a base shear over the height of the building and accumulates
//! storey shear from the top down.
//!
//! ## Weighting Rules
//!
//! - Horizontal: Qᵢ = V_B · WᵢHᵢ² / Σ WⱼHⱼ²
//! - Vertical:   Qᵢ = V_v · Wᵢ / Σ Wⱼ
//!
//! Storey shear at level i is Σ_{k ≥ i} Q_k, so the base storey carries the
//! full base shear and shear never increases going up.
//!
//! ## Example
//!
//! ```rust
//! use seismic_core::calculations::storey::{distribute, Action, Storey};
//!
//! let storeys: Vec<Storey> = (1..=5).map(|i| Storey::new(2000.0, 3.0 * i as f64)).collect();
//! let forces = distribute(1000.0, &storeys, Action::Horizontal).unwrap();
//!
//! assert!((forces[4].force_kn - 1000.0 * 225.0 / 495.0).abs() < 1e-9);
//! assert!((forces[0].storey_shear_kn - 1000.0).abs() < 1e-9);
//! ```

use log::trace;
use serde::{Deserialize, Serialize};

use crate::calculations::base_shear::{BaseShearResult, Direction};
use crate::calculations::combination::combine_rss;
use crate::errors::{CalcError, CalcResult};

/// One floor level: lumped seismic weight and height above the base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Storey {
    /// Seismic weight Wᵢ lumped at the floor (kN)
    pub weight_kn: f64,

    /// Height of the floor above the base Hᵢ (m)
    pub height_m: f64,
}

impl Storey {
    pub fn new(weight_kn: f64, height_m: f64) -> Self {
        Storey { weight_kn, height_m }
    }

    /// Horizontal load factor WᵢHᵢ²
    pub fn load_factor(&self) -> f64 {
        self.weight_kn * self.height_m.powi(2)
    }

    /// Build storeys from parallel weight and height arrays (base to top).
    pub fn from_arrays(weights_kn: &[f64], heights_m: &[f64]) -> CalcResult<Vec<Storey>> {
        if weights_kn.len() != heights_m.len() {
            return Err(CalcError::validation(
                "storeys",
                format!(
                    "{} weights but {} heights",
                    weights_kn.len(),
                    heights_m.len()
                ),
            ));
        }
        let storeys: Vec<Storey> = weights_kn
            .iter()
            .zip(heights_m)
            .map(|(&w, &h)| Storey::new(w, h))
            .collect();
        validate_storeys(&storeys)?;
        Ok(storeys)
    }
}

/// Check the storey sequence: non-empty, weights ≥ 0, heights > 0 and
/// strictly increasing from base to top.
pub fn validate_storeys(storeys: &[Storey]) -> CalcResult<()> {
    if storeys.is_empty() {
        return Err(CalcError::validation("storeys", "At least one storey is required"));
    }
    for (i, storey) in storeys.iter().enumerate() {
        let level = i + 1;
        if !(storey.weight_kn >= 0.0) || !storey.weight_kn.is_finite() {
            return Err(CalcError::validation(
                format!("storeys[{level}].weight_kn"),
                format!("Weight {} must be non-negative", storey.weight_kn),
            ));
        }
        if !(storey.height_m > 0.0) || !storey.height_m.is_finite() {
            return Err(CalcError::validation(
                format!("storeys[{level}].height_m"),
                format!("Height {} must be positive", storey.height_m),
            ));
        }
    }
    if let Some(i) = storeys
        .windows(2)
        .position(|pair| pair[1].height_m <= pair[0].height_m)
    {
        return Err(CalcError::validation(
            format!("storeys[{}].height_m", i + 2),
            format!(
                "Height {} m must exceed the storey below ({} m)",
                storeys[i + 1].height_m,
                storeys[i].height_m
            ),
        ));
    }
    Ok(())
}

/// Type of action being distributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Height-squared weighting
    Horizontal,
    /// Weight-only weighting
    Vertical,
}

impl Action {
    fn weighting(&self, storey: &Storey) -> f64 {
        match self {
            Action::Horizontal => storey.load_factor(),
            Action::Vertical => storey.weight_kn,
        }
    }
}

/// Force and cumulative shear at one storey
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreyForce {
    /// Storey index, 1 at the base
    pub level: usize,
    /// Design force Qᵢ applied at the floor (kN)
    pub force_kn: f64,
    /// Shear carried below the floor Σ_{k ≥ i} Q_k (kN)
    pub storey_shear_kn: f64,
}

/// Reverse running sum: element i is the sum of `values[i..]`.
pub fn shear_from_top(values: &[f64]) -> Vec<f64> {
    let mut shears: Vec<f64> = values
        .iter()
        .rev()
        .scan(0.0, |acc, &q| {
            *acc += q;
            Some(*acc)
        })
        .collect();
    shears.reverse();
    shears
}

/// Distribute `base_shear_kn` over `storeys` with the weighting of `action`.
///
/// # Errors
///
/// * `Validation` - storey sequence breaks an invariant
/// * `Domain` - every weighting factor is zero, or the base shear is
///   negative or not finite
pub fn distribute(base_shear_kn: f64, storeys: &[Storey], action: Action) -> CalcResult<Vec<StoreyForce>> {
    validate_storeys(storeys)?;
    if !(base_shear_kn >= 0.0) || !base_shear_kn.is_finite() {
        return Err(CalcError::domain(
            "base_shear_kn",
            base_shear_kn.to_string(),
            "Base shear must be non-negative and finite",
        ));
    }

    let factors: Vec<f64> = storeys.iter().map(|s| action.weighting(s)).collect();
    let total: f64 = factors.iter().sum();
    if !(total > 0.0) {
        return Err(CalcError::domain(
            match action {
                Action::Horizontal => "sum(W·H²)",
                Action::Vertical => "sum(W)",
            },
            total.to_string(),
            "Storey weights are all zero; base shear cannot be distributed",
        ));
    }

    let forces: Vec<f64> = factors.iter().map(|f| base_shear_kn * f / total).collect();
    let shears = shear_from_top(&forces);
    trace!("{:?} distribution: forces {:?}, shears {:?}", action, forces, shears);

    Ok(forces
        .into_iter()
        .zip(shears)
        .enumerate()
        .map(|(i, (force_kn, storey_shear_kn))| StoreyForce {
            level: i + 1,
            force_kn,
            storey_shear_kn,
        })
        .collect())
}

/// One row of the storey force table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreyForceRow {
    pub level: usize,
    pub weight_kn: f64,
    pub height_m: f64,
    /// WᵢHᵢ²
    pub load_factor: f64,
    pub horizontal_force_kn: f64,
    pub horizontal_shear_kn: f64,
    pub vertical_force_kn: f64,
    pub vertical_shear_kn: f64,
    /// √(V_H² + V_V²), present when combination was requested
    pub combined_shear_kn: Option<f64>,
}

/// Storey-wise distribution for one plan direction, rows base to top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreyForceTable {
    pub direction: Direction,
    pub horizontal_base_shear_kn: f64,
    pub vertical_base_shear_kn: f64,
    pub rows: Vec<StoreyForceRow>,
}

impl StoreyForceTable {
    /// Distribute the horizontal (for `direction`) and vertical base shears
    /// of `result` over `storeys`.
    pub fn build(
        result: &BaseShearResult,
        storeys: &[Storey],
        direction: Direction,
        combine_vertical: bool,
    ) -> CalcResult<Self> {
        let horizontal_base_shear_kn = result.direction(direction).base_shear_kn;
        let vertical_base_shear_kn = result.vertical.base_shear_kn;

        let horizontal = distribute(horizontal_base_shear_kn, storeys, Action::Horizontal)?;
        let vertical = distribute(vertical_base_shear_kn, storeys, Action::Vertical)?;

        let combined = if combine_vertical {
            let h: Vec<f64> = horizontal.iter().map(|f| f.storey_shear_kn).collect();
            let v: Vec<f64> = vertical.iter().map(|f| f.storey_shear_kn).collect();
            Some(combine_rss(&h, &v)?)
        } else {
            None
        };

        let rows = storeys
            .iter()
            .zip(horizontal.iter().zip(&vertical))
            .enumerate()
            .map(|(i, (storey, (h, v)))| StoreyForceRow {
                level: i + 1,
                weight_kn: storey.weight_kn,
                height_m: storey.height_m,
                load_factor: storey.load_factor(),
                horizontal_force_kn: h.force_kn,
                horizontal_shear_kn: h.storey_shear_kn,
                vertical_force_kn: v.force_kn,
                vertical_shear_kn: v.storey_shear_kn,
                combined_shear_kn: combined.as_ref().map(|c| c[i]),
            })
            .collect();

        Ok(StoreyForceTable {
            direction,
            horizontal_base_shear_kn,
            vertical_base_shear_kn,
            rows,
        })
    }

    /// Sum of WᵢHᵢ² over all storeys
    pub fn total_load_factor(&self) -> f64 {
        self.rows.iter().map(|r| r.load_factor).sum()
    }

    /// Shear at the base storey (equals the horizontal base shear)
    pub fn base_storey_shear_kn(&self) -> f64 {
        self.rows.first().map_or(0.0, |r| r.horizontal_shear_kn)
    }
}
