//! Seeker Backend Binary
//!
//! Serves sessions and talent profiles on BIND_ADDR (e.g. 0.0.0.0:8888).

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    seeker_core::log();
    seeker_core::kys();
    seeker_server::run().await
}
