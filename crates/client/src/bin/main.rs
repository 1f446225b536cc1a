//! Binary entry point for the rootgrep-client CLI.

use rootgrep_client::cmd::App;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = App::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
