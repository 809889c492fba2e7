use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::server::multiplexer::Multiplexer;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    info!("Serving {}", cfg.root_dir.display());

    let mut mux = Multiplexer::new(listener, cfg);
    mux.run().await
}
