//! Labtrack Laboratory Management Server
//!
//! REST JSON API for a small teaching and research lab: equipment checkout,
//! whole-lab and per-device reservations, fault reports, purchase proposals
//! and a remark box, all kept in a shared spreadsheet workbook.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
