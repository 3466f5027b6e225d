//! Serving the router until shutdown

use std::io;
use tokio::net::TcpListener;

use super::{router, AppState};

/// Serve the API on `listener` until Ctrl+C.
pub async fn serve(listener: TcpListener, state: AppState) -> io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await
        }
    }
}
