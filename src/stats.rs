// src/stats.rs

use serde::{Deserialize, Serialize};

use crate::models::Doctor;

/// Aggregates over the derived prestation of a set of doctors.
///
/// An empty set yields all zeroes, never NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestationStats {
    pub moyenne: f64,
    pub min: f64,
    pub max: f64,
    pub total: f64,
}

impl PrestationStats {
    pub const ZERO: PrestationStats = PrestationStats {
        moyenne: 0.0,
        min: 0.0,
        max: 0.0,
        total: 0.0,
    };
}

impl Default for PrestationStats {
    fn default() -> Self {
        Self::ZERO
    }
}

pub fn compute(doctors: &[Doctor]) -> PrestationStats {
    if doctors.is_empty() {
        return PrestationStats::ZERO;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut total = 0.0;
    for doc in doctors {
        let p = doc.prestation();
        min = min.min(p);
        max = max.max(p);
        total += p;
    }

    PrestationStats {
        moyenne: total / doctors.len() as f64,
        min,
        max,
        total,
    }
}
