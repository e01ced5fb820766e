// src/models/mod.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A practitioner row from the `medecins` table.
///
/// `numMed` is store-generated; `prestation` is derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub num_med: i64,
    pub nom: String,
    pub nb_jours: i32,
    pub taux_journalier: f64,
}

impl Doctor {
    /// Days worked times daily rate.
    pub fn prestation(&self) -> f64 {
        f64::from(self.nb_jours) * self.taux_journalier
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: bool,
}
