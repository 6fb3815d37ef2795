//! Training server binary.
//!
//! Runs the HTTP server hosting live training games over WebSocket.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rail_core::log();
    rail_core::kys();
    rail_server::run().await
}
