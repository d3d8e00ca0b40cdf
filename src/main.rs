use std::process::ExitCode;

use nature_vision_mcp::{cli, infra};

#[tokio::main]
async fn main() -> ExitCode {
    infra::logging::init();
    cli::run().await
}
