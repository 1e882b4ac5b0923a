use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::dispatch::app::App;
use crate::dispatch::terminal::Terminal;
use crate::http::connection::Connection;

/// A dispatcher bound to its terminal finalizer, ready to serve.
pub struct Server {
    app: Arc<App>,
    terminal: Arc<Terminal>,
}

impl Server {
    pub fn new(app: impl Into<Arc<App>>, terminal: Terminal) -> Self {
        Self {
            app: app.into(),
            terminal: Arc::new(terminal),
        }
    }

    /// The bound request-handling entry point.
    ///
    /// Lets an already-constructed server be mounted inside another
    /// registry: `outer.nest("/legacy", server.handler())`.
    pub fn handler(&self) -> Arc<App> {
        Arc::clone(&self.app)
    }

    /// Binds to the configured address and serves connections until the
    /// task is cancelled.
    pub async fn run(&self, cfg: &Config) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&cfg.listen_addr).await?;
        info!("Listening on {}", cfg.listen_addr);

        loop {
            let (socket, peer) = listener.accept().await?;
            info!("Accepted connection from {}", peer);

            let app = Arc::clone(&self.app);
            let terminal = Arc::clone(&self.terminal);
            tokio::spawn(async move {
                let mut conn = Connection::new(socket, app, terminal);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {}", peer, e);
                }
            });
        }
    }
}
