//! OS signal handling.
//!
//! Ctrl+C drives the same shutdown path as the operator `stop` command.

/// Wait for Ctrl+C. Never resolves if the handler cannot be installed.
pub async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Interrupt signal received");
}
