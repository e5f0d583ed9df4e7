use std::sync::Arc;

use rivals_db::{HeroStore, VillainStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Relational store backing `/sql`.
    pub heroes: Arc<dyn HeroStore>,
    /// Document store backing `/mongo`.
    pub villains: Arc<dyn VillainStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
