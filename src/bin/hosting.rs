//! Hosting server binary.
//!
//! Runs the HTTP server for live hand cricket rooms.
//! Supports WebSocket connections for real-time play.

use handcricket::*;

#[tokio::main]
async fn main() {
    log();
    kys();
    hosting::Server::run().await.unwrap();
}
