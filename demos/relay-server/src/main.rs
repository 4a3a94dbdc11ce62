//! Runnable relay server.
//!
//! Binds to `PARLOR_ADDR` (or `0.0.0.0:PORT`, defaulting to port 4000)
//! and relays snapshots until killed. Log verbosity follows `RUST_LOG`.

use parlor::prelude::*;
use tracing_subscriber::EnvFilter;

fn bind_addr() -> String {
    if let Ok(addr) = std::env::var("PARLOR_ADDR") {
        return addr;
    }
    let port = std::env::var("PORT").unwrap_or_else(|_| "4000".to_string());
    format!("0.0.0.0:{port}")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = bind_addr();
    let server = RelayServerBuilder::new().bind(&addr).build().await?;
    tracing::info!(addr = %server.local_addr()?, "parlor relay listening");

    server.run().await?;
    Ok(())
}
