use std::future;

use tokio::signal;

/// Resolves once the process is asked to stop (Ctrl+C, or SIGTERM on unix).
///
/// A signal source that cannot be installed is logged and never fires.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(err) = signal::ctrl_c().await {
      tracing::error!(error = %err, "failed to install Ctrl+C handler");
      future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
      }
      Err(err) => {
        tracing::error!(error = %err, "failed to install SIGTERM handler");
        future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = future::pending::<()>();

  tokio::select! {
    () = ctrl_c => tracing::info!("Ctrl+C received, shutting down"),
    () = terminate => tracing::info!("SIGTERM received, shutting down"),
  }
}
