//! Server execution logic.

use std::{future::Future, net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{domain::OnlineRegistry, usecase::MessageRouter};

use super::{
    handler::{health_check, online_status, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(router, registry).with_static_dir(Some("public".into()));
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// MessageRouter（接続ごとのコマンド振り分け）
    router: Arc<MessageRouter>,
    /// OnlineRegistry（オンライン数の参照用）
    registry: Arc<dyn OnlineRegistry>,
    /// 静的ファイルの配信ディレクトリ
    static_dir: Option<PathBuf>,
}

impl Server {
    pub fn new(router: Arc<MessageRouter>, registry: Arc<dyn OnlineRegistry>) -> Self {
        Self {
            router,
            registry,
            static_dir: None,
        }
    }

    /// Serve files from `dir` for every path no route claims
    pub fn with_static_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.static_dir = dir;
        self
    }

    /// Build the axum application
    pub fn app(&self) -> Router {
        let app_state = Arc::new(AppState {
            router: self.router.clone(),
            registry: self.registry.clone(),
        });

        let app = Router::new()
            // WebSocket エンドポイント
            .route("/im", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/online", get(online_status))
            .with_state(app_state);

        let app = match &self.static_dir {
            Some(dir) => app.fallback_service(ServeDir::new(dir)),
            None => app,
        };

        app.layer(TraceLayer::new_for_http())
    }

    /// Run the WebSocket chat server
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "WebSocket chat server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/im", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: tokio::net::TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.app();
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
    }
}
