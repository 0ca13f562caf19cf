//! HTTP server exposing the catalog as JSON.
//!
//! This module provides:
//! - The axum router and handlers (`routes`, `handlers`)
//! - Configuration types (`config`)
//!
//! Handlers only parse query parameters and wrap results. Everything else
//! happens behind the [`Catalog`] trait.

pub mod config;
pub mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::Result;
use crate::traits::Catalog;

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(catalog: Arc<dyn Catalog>, addr: SocketAddr) -> Result<()> {
    let app = create_router(AppState::new(catalog));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "animangad listening");
    axum::serve(listener, app).await?;
    Ok(())
}
