//! Listener binding and the serve loop.

use crate::ServerConfig;
use axum::Router;
use quill_error::{QuillResult, ServerError, ServerErrorKind};
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Bind the configured address and serve `router` until Ctrl-C.
///
/// # Errors
///
/// Returns a server error if the address cannot be bound or the serve loop fails.
#[instrument(skip_all, fields(addr = %config.bind_addr()))]
pub async fn serve(router: Router, config: &ServerConfig) -> QuillResult<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            addr: addr.clone(),
            reason: e.to_string(),
        })
    })?;

    info!("Quill server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("Quill server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
