// src/routes/doctors.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::{query, query_as, query_scalar};

use super::{bad_request, conflict, internal_error, not_found};
use crate::models::{Deleted, Doctor};
use crate::stats::{self, PrestationStats};
use crate::AppState;

/// Full-field body for both create and update; there is no partial patch.
/// A client-supplied `numMed` on create is ignored, the store assigns it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorBody {
    pub nom: String,
    pub nb_jours: i32,
    pub taux_journalier: f64,
}

fn validate(body: &DoctorBody) -> Result<(), (StatusCode, String)> {
    if body.nom.trim().is_empty() {
        return Err(bad_request("nom is required"));
    }
    if body.nb_jours < 0 {
        return Err(bad_request("nbJours must be >= 0"));
    }
    if body.taux_journalier.is_nan() || body.taux_journalier < 0.0 {
        return Err(bad_request("tauxJournalier must be >= 0"));
    }
    Ok(())
}

pub async fn list_doctors(
    State(state): State<AppState>,
) -> Result<Json<Vec<Doctor>>, (StatusCode, String)> {
    let rows = query_as::<_, Doctor>(r#"SELECT * FROM medecins ORDER BY num_med"#)
        .fetch_all(&state.pool)
        .await
        .map_err(internal_error)?;
    Ok(Json(rows))
}

pub async fn doctor_stats(
    State(state): State<AppState>,
) -> Result<Json<PrestationStats>, (StatusCode, String)> {
    let rows = query_as::<_, Doctor>(r#"SELECT * FROM medecins"#)
        .fetch_all(&state.pool)
        .await
        .map_err(internal_error)?;
    Ok(Json(stats::compute(&rows)))
}

pub async fn create_doctor(
    State(state): State<AppState>,
    Json(body): Json<DoctorBody>,
) -> Result<(StatusCode, Json<Doctor>), (StatusCode, String)> {
    validate(&body)?;

    // Name uniqueness is an application-level policy; numMed uniqueness is
    // the primary key's job.
    let dupes: i64 = query_scalar(r#"SELECT COUNT(*) FROM medecins WHERE nom = $1"#)
        .bind(&body.nom)
        .fetch_one(&state.pool)
        .await
        .map_err(internal_error)?;
    if dupes > 0 {
        return Err(conflict("a doctor with this name already exists"));
    }

    let row = query_as::<_, Doctor>(
        r#"
        INSERT INTO medecins(nom, nb_jours, taux_journalier)
        VALUES ($1,$2,$3)
        RETURNING num_med, nom, nb_jours, taux_journalier
        "#,
    )
    .bind(&body.nom)
    .bind(body.nb_jours)
    .bind(body.taux_journalier)
    .fetch_one(&state.pool)
    .await
    .map_err(internal_error)?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update_doctor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<DoctorBody>,
) -> Result<Json<Doctor>, (StatusCode, String)> {
    validate(&body)?;

    let row = query_as::<_, Doctor>(
        r#"
        UPDATE medecins SET
            nom = $2,
            nb_jours = $3,
            taux_journalier = $4
        WHERE num_med = $1
        RETURNING num_med, nom, nb_jours, taux_journalier
        "#,
    )
    .bind(id)
    .bind(&body.nom)
    .bind(body.nb_jours)
    .bind(body.taux_journalier)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?;

    match row {
        Some(row) => Ok(Json(row)),
        None => Err(not_found("doctor not found")),
    }
}

pub async fn delete_doctor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, (StatusCode, String)> {
    let res = query(r#"DELETE FROM medecins WHERE num_med = $1"#)
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(internal_error)?;
    if res.rows_affected() == 0 {
        return Err(not_found("doctor not found"));
    }
    Ok(Json(Deleted { deleted: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(nom: &str, nb_jours: i32, taux_journalier: f64) -> DoctorBody {
        DoctorBody {
            nom: nom.to_string(),
            nb_jours,
            taux_journalier,
        }
    }

    #[test]
    fn accepts_well_formed_fields() {
        assert!(validate(&body("Dr A", 10, 5000.0)).is_ok());
        assert!(validate(&body("Dr B", 0, 0.0)).is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let (status, _) = validate(&body("", 10, 5000.0)).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = validate(&body("   ", 10, 5000.0)).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rejects_negative_days() {
        let (status, msg) = validate(&body("Dr A", -1, 5000.0)).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(msg.contains("nbJours"));
    }

    #[test]
    fn rejects_negative_or_nan_rate() {
        let (status, _) = validate(&body("Dr A", 1, -0.5)).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = validate(&body("Dr A", 1, f64::NAN)).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn body_deserializes_camel_case_and_ignores_num_med() {
        let b: DoctorBody = serde_json::from_str(
            r#"{"numMed": 7, "nom": "Dr A", "nbJours": 10, "tauxJournalier": 5000}"#,
        )
        .unwrap();
        assert_eq!(b.nom, "Dr A");
        assert_eq!(b.nb_jours, 10);
        assert_eq!(b.taux_journalier, 5000.0);
    }
}
