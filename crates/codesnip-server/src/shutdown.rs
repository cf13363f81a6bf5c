//! Serve lifecycle: run until a shutdown signal, then drain for a bounded
//! grace period before giving up on whatever is still in flight.

use std::future::IntoFuture;
use std::io;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

/// Serve `app` on `listener` until `signal` resolves, then give in-flight
/// requests up to `grace` before aborting them.
///
/// Returns once the server has stopped, either cleanly, by abort after the
/// grace period, or because the server itself failed.
pub async fn serve<F>(listener: TcpListener, app: Router, signal: F, grace: Duration) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut task = tokio::spawn(server.into_future());

    tokio::select! {
        joined = &mut task => {
            return joined.map_err(io::Error::other)?;
        }
        () = signal => {}
    }

    tracing::info!(grace = ?grace, "shutting down server");
    let _ = stop_tx.send(());

    match tokio::time::timeout(grace, &mut task).await {
        Ok(joined) => {
            joined.map_err(io::Error::other)??;
            tracing::info!("server gracefully stopped");
        }
        Err(_) => {
            task.abort();
            tracing::warn!("grace period elapsed, abandoning in-flight requests");
        }
    }

    Ok(())
}
