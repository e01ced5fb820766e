// src/dashboard.rs

use std::time::{Duration, Instant};

use crate::client::{ClientError, DoctorInput, RegistryClient};
use crate::models::Doctor;
use crate::stats::{self, PrestationStats};

/// Notices auto-dismiss after this long unless dismissed explicitly.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    posted: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            posted: Instant::now(),
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.posted) >= NOTICE_TTL
    }
}

/// Ephemeral form state for the create and edit flows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorForm {
    pub nom: String,
    pub nb_jours: i32,
    pub taux_journalier: f64,
}

impl DoctorForm {
    pub fn prefill(doctor: &Doctor) -> Self {
        Self {
            nom: doctor.nom.clone(),
            nb_jours: doctor.nb_jours,
            taux_journalier: doctor.taux_journalier,
        }
    }

    fn input(&self) -> DoctorInput {
        DoctorInput {
            nom: self.nom.clone(),
            nb_jours: self.nb_jours,
            taux_journalier: self.taux_journalier,
        }
    }
}

/// One slice of the prestation pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub name: &'static str,
    pub value: f64,
}

/// Client-side view of the registry.
///
/// The loaded list is the single source of truth: after every successful
/// mutation the whole list is re-fetched and the stats recomputed from it.
/// A re-fetch racing another simply overwrites, last write wins.
pub struct Dashboard {
    client: RegistryClient,
    pub doctors: Vec<Doctor>,
    pub stats: PrestationStats,
    pub notices: Vec<Notice>,
    pub form: DoctorForm,
    pub edit: Option<(i64, DoctorForm)>,
    pub pending_delete: Option<i64>,
}

impl Dashboard {
    pub fn new(client: RegistryClient) -> Self {
        Self {
            client,
            doctors: Vec::new(),
            stats: PrestationStats::ZERO,
            notices: Vec::new(),
            form: DoctorForm::default(),
            edit: None,
            pending_delete: None,
        }
    }

    /// Replace the loaded list and recompute the derived stats.
    pub fn apply_list(&mut self, doctors: Vec<Doctor>) {
        self.stats = stats::compute(&doctors);
        self.doctors = doctors;
    }

    pub async fn refresh(&mut self) {
        match self.client.list().await {
            Ok(doctors) => self.apply_list(doctors),
            Err(e) => self.push_error(format!("failed to load doctors: {e}")),
        }
    }

    pub async fn submit_create(&mut self) {
        match self.client.create(&self.form.input()).await {
            Ok(_) => {
                self.form = DoctorForm::default();
                self.push_success("doctor added");
                self.refresh().await;
            }
            Err(ClientError::DuplicateName) => {
                self.push_error("a doctor with this name already exists");
            }
            Err(e) => self.push_error(format!("failed to add doctor: {e}")),
        }
    }

    /// Open the edit flow pre-filled from the selected row.
    pub fn open_edit(&mut self, doctor: &Doctor) {
        self.edit = Some((doctor.num_med, DoctorForm::prefill(doctor)));
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub async fn submit_edit(&mut self) {
        let Some((num_med, form)) = self.edit.clone() else {
            return;
        };
        match self.client.update(num_med, &form.input()).await {
            Ok(_) => {
                self.edit = None;
                self.push_success("doctor updated");
                self.refresh().await;
            }
            Err(e) => self.push_error(format!("failed to update doctor: {e}")),
        }
    }

    /// Deletion is two-step: nothing reaches the server until confirmed.
    pub fn request_delete(&mut self, num_med: i64) {
        self.pending_delete = Some(num_med);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) {
        let Some(num_med) = self.pending_delete.take() else {
            return;
        };
        match self.client.delete(num_med).await {
            Ok(_) => {
                self.push_success("doctor deleted");
                self.refresh().await;
            }
            Err(e) => self.push_error(format!("failed to delete doctor: {e}")),
        }
    }

    pub fn push_success(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::new(NoticeKind::Success, message));
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::new(NoticeKind::Error, message));
    }

    pub fn dismiss_notice(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }

    pub fn prune_notices(&mut self, now: Instant) {
        self.notices.retain(|n| !n.expired(now));
    }

    /// Slices for the prestation pie chart, in render order.
    pub fn chart_data(&self) -> Vec<ChartSlice> {
        vec![
            ChartSlice { name: "Moyenne", value: self.stats.moyenne },
            ChartSlice { name: "Minimale", value: self.stats.min },
            ChartSlice { name: "Maximale", value: self.stats.max },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard::new(RegistryClient::new("http://localhost:8080"))
    }

    fn doc(num_med: i64, nom: &str, nb_jours: i32, taux_journalier: f64) -> Doctor {
        Doctor {
            num_med,
            nom: nom.to_string(),
            nb_jours,
            taux_journalier,
        }
    }

    #[test]
    fn apply_list_recomputes_stats() {
        let mut dash = dashboard();
        dash.apply_list(vec![doc(1, "Dr A", 10, 5000.0), doc(2, "Dr B", 5, 2000.0)]);
        assert_eq!(dash.stats.total, 60_000.0);
        assert_eq!(dash.stats.moyenne, 30_000.0);
        assert_eq!(dash.stats.min, 10_000.0);
        assert_eq!(dash.stats.max, 50_000.0);

        dash.apply_list(Vec::new());
        assert_eq!(dash.stats, PrestationStats::ZERO);
    }

    #[test]
    fn edit_prefills_from_selected_row() {
        let mut dash = dashboard();
        let selected = doc(3, "Dr C", 7, 1500.0);
        dash.open_edit(&selected);

        let (num_med, form) = dash.edit.clone().unwrap();
        assert_eq!(num_med, 3);
        assert_eq!(form.nom, "Dr C");
        assert_eq!(form.nb_jours, 7);
        assert_eq!(form.taux_journalier, 1500.0);

        dash.cancel_edit();
        assert!(dash.edit.is_none());
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut dash = dashboard();
        dash.request_delete(4);
        assert_eq!(dash.pending_delete, Some(4));

        dash.cancel_delete();
        assert!(dash.pending_delete.is_none());
    }

    #[tokio::test]
    async fn confirm_without_pending_delete_is_a_no_op() {
        let mut dash = dashboard();
        dash.confirm_delete().await;
        assert!(dash.notices.is_empty());
    }

    #[test]
    fn notices_expire_after_ttl() {
        let mut dash = dashboard();
        dash.push_success("doctor added");
        let posted = dash.notices[0].posted;

        dash.prune_notices(posted + Duration::from_secs(1));
        assert_eq!(dash.notices.len(), 1);

        dash.prune_notices(posted + NOTICE_TTL);
        assert!(dash.notices.is_empty());
    }

    #[test]
    fn notices_can_be_dismissed_explicitly() {
        let mut dash = dashboard();
        dash.push_error("failed to load doctors");
        dash.push_success("doctor added");
        dash.dismiss_notice(0);
        assert_eq!(dash.notices.len(), 1);
        assert_eq!(dash.notices[0].kind, NoticeKind::Success);

        // out-of-range index is ignored
        dash.dismiss_notice(5);
        assert_eq!(dash.notices.len(), 1);
    }

    #[test]
    fn chart_slices_follow_the_stats() {
        let mut dash = dashboard();
        dash.apply_list(vec![doc(1, "Dr A", 10, 5000.0), doc(2, "Dr B", 5, 2000.0)]);
        let slices = dash.chart_data();
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0], ChartSlice { name: "Moyenne", value: 30_000.0 });
        assert_eq!(slices[1], ChartSlice { name: "Minimale", value: 10_000.0 });
        assert_eq!(slices[2], ChartSlice { name: "Maximale", value: 50_000.0 });
    }
}
