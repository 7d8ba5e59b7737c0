//! Meetbrief HTTP server
//!
//! Actix-web REST API over the transcript-to-summary workflow

pub mod error;
pub mod routes;
pub mod state;
pub mod types;
pub mod workflow;

#[cfg(test)]
mod testing;

use actix_web::{web, App, HttpServer};
use meetbrief_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use state::AppState;
pub use workflow::{Submission, Workflow};

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!("Summarization model: {}", state.workflow.model());
    info!("Listening on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
