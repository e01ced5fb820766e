// src/lib.rs

use sqlx::{Pool, Postgres};

pub mod client;
pub mod dashboard;
pub mod db;
pub mod models;
pub mod routes;
pub mod stats;

#[derive(Clone)]
pub struct AppState {
    pub pool: Pool<Postgres>,
}
