use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Session;
use crate::routes::Router;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, cfg).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let router = Arc::new(Router::new(cfg.files.directory.clone()));

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let (source, sink) = socket.into_split();
        let session = Session::new(source, sink, Arc::clone(&router), &cfg.server);

        tokio::spawn(async move {
            match session.run().await {
                Ok(exchanges) => {
                    tracing::debug!(%peer, exchanges, "Connection closed");
                }
                Err(e) => {
                    tracing::warn!("Connection error from {}: {:#}", peer, e);
                }
            }
        });
    }
}
