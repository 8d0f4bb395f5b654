use clamsweep::{Cli, handlers::run_sweep};
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    run_sweep(&cli).await
}
