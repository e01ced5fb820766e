// src/client.rs

use reqwest::StatusCode;
use serde::Serialize;

use crate::models::{Deleted, Doctor};
use crate::stats::PrestationStats;

/// Typed client for the registry HTTP surface.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
    http: reqwest::Client,
}

/// Create/update payload; `numMed` is assigned by the store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorInput {
    pub nom: String,
    pub nb_jours: i32,
    pub taux_journalier: f64,
}

/// The dashboard needs 409 and 404 kept apart from everything else; the
/// rest collapses into a generic API or transport failure.
#[derive(Debug)]
pub enum ClientError {
    DuplicateName,
    NotFound,
    Api { status: StatusCode, message: String },
    Transport(reqwest::Error),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::DuplicateName => write!(f, "a doctor with this name already exists"),
            ClientError::NotFound => write!(f, "doctor not found"),
            ClientError::Api { status, message } => write!(f, "API error {status}: {message}"),
            ClientError::Transport(e) => write!(f, "transport error: {e}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e)
    }
}

impl RegistryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status == StatusCode::CONFLICT {
            Err(ClientError::DuplicateName)
        } else if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound)
        } else if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            Err(ClientError::Api { status, message })
        } else {
            Ok(resp)
        }
    }

    pub async fn list(&self) -> Result<Vec<Doctor>, ClientError> {
        let resp = self.http.get(self.url("/doctors")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn stats(&self) -> Result<PrestationStats, ClientError> {
        let resp = self.http.get(self.url("/doctors/stats")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn create(&self, input: &DoctorInput) -> Result<Doctor, ClientError> {
        let resp = self
            .http
            .post(self.url("/doctors"))
            .json(input)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn update(&self, num_med: i64, input: &DoctorInput) -> Result<Doctor, ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("/doctors/{num_med}")))
            .json(input)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn delete(&self, num_med: i64) -> Result<Deleted, ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/doctors/{num_med}")))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = RegistryClient::new("http://localhost:8080/");
        assert_eq!(client.url("/doctors"), "http://localhost:8080/doctors");
        assert_eq!(client.url("/doctors/3"), "http://localhost:8080/doctors/3");
    }

    #[test]
    fn input_serializes_camel_case() {
        let input = DoctorInput {
            nom: "Dr A".into(),
            nb_jours: 10,
            taux_journalier: 5000.0,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"nom": "Dr A", "nbJours": 10, "tauxJournalier": 5000.0})
        );
    }
}
