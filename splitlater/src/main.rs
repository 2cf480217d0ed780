#![warn(clippy::uninlined_format_args)]

mod bootstrap;
mod handler;
mod session_store;

#[tokio::main]
async fn main() {
    bootstrap::run().await;
}
