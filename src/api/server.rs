//! HTTP server wrapping the router and its bind address.

use std::net::SocketAddr;

use axum::Router;
use log::{info, warn};
use tokio::net::TcpListener;

use super::routes::{create_router, AppState, Endpoint};

pub struct HttpServer {
    addr: SocketAddr,
    router: Router,
}

impl HttpServer {
    pub fn new(addr: SocketAddr, store: AppState) -> Self {
        Self {
            addr,
            router: create_router(store),
        }
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serves until Ctrl+C or SIGTERM.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        info!("Serving climate API on http://{}", local_addr);
        for endpoint in Endpoint::ALL {
            info!("  GET {}", endpoint.path());
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
