use anyhow::Result;
use clap::Parser;
use newsdesk_cli::{
    AppConfig, ServeOptions,
    cli::{Cli, Commands},
    run_once, run_serve,
};
use newsdesk_core::Credentials;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    if let Err(e) = newsdesk_telemetry::init_with_default_level("newsdesk", default_level) {
        eprintln!("Failed to initialize telemetry: {}", e);
    }

    let credentials = Credentials::from_env();
    for name in credentials.missing() {
        tracing::warn!(variable = name, "API key is not set; requests that need it will fail");
    }

    let config = |output: PathBuf| {
        AppConfig::new(credentials.clone(), output)
            .with_model(cli.model.clone())
            .with_temperature(cli.temperature)
    };

    match cli.command {
        Commands::Serve { port, ref output, ref topic, max_body_size } => {
            let options = ServeOptions { port, default_topic: topic.clone(), max_body_size };
            run_serve(&config(output.clone()), &options).await
        }
        Commands::Run { ref topic, ref output } => {
            run_once(&config(output.clone()), topic).await.map(|_| ())
        }
    }
}
