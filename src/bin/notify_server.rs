//! Proposal answer notification server
//!
//! Receives the answer POSTed by the game page and emails it on through an
//! SMTP relay. Configured from the environment (see `ServerConfig`).

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use dino_valentine::notify::server::{ServerConfig, serve};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;
    serve(config).await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
