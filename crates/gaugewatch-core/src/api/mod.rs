//! HTTP API implementation
//!
//! A single route, `POST /`, checks a JSON reading against the configured
//! thresholds.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::thresholds::ThresholdChecker;

/// HTTP API server
pub struct HttpServer {
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(checker: Arc<ThresholdChecker>) -> Self {
        Self {
            state: AppState { checker },
        }
    }

    /// Bind `addr` and serve until `shutdown` resolves
    pub async fn serve<F>(self, addr: &str, shutdown: F) -> Result<()>
    where
        F: Future<Output = std::io::Result<()>> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| Error::internal(format!("failed to bind {addr}: {e}")))?;

        info!("HTTP server listening on {}", addr);

        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// A failed shutdown signal still stops the server, but is returned as
    /// [`Error::ShutdownSignal`] instead of a clean stop.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = std::io::Result<()>> + Send + 'static,
    {
        let app = create_router(self.state);
        let (failure_tx, mut failure_rx) = oneshot::channel();

        let signal = async move {
            if let Err(e) = shutdown.await {
                error!(error = %e, "Shutdown signal failed");
                let _ = failure_tx.send(e);
            }
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await?;

        if let Ok(e) = failure_rx.try_recv() {
            return Err(Error::ShutdownSignal(e));
        }

        info!("HTTP server stopped");
        Ok(())
    }
}
