//! FJAP CLI - Main entry point

use clap::Parser;
use fjap_cli::{commands, ApiClient, Cli, Commands};
use fjap_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Verbose mode logs requests at debug level, otherwise only warnings
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("fjap-cli")
        .build();

    // LOG_* variables override the defaults above
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn execute_command(cli: &Cli) -> fjap_cli::Result<()> {
    let client = ApiClient::new(cli.server_url.clone(), cli.token.clone())?;
    let format = cli.format;

    match &cli.command {
        Commands::Classes { command } => commands::classes::run(&client, command, format).await,
        Commands::Subjects { command } => commands::subjects::run(&client, command, format).await,
        Commands::Semesters { command } => commands::semesters::run(&client, command, format).await,
        Commands::Levels { command } => commands::levels::run(&client, command, format).await,
        Commands::Grades { command } => commands::grades::run(&client, command, format).await,
        Commands::Students { command } => commands::students::run(&client, command, format).await,
        Commands::MarkReport {
            student_id,
            semester,
            year,
            subject,
        } => {
            commands::mark_report::run(
                &client,
                *student_id,
                semester.as_deref(),
                *year,
                *subject,
                format,
            )
            .await
        },
        Commands::Health => commands::service::health(&client).await,
        Commands::Whoami => commands::service::whoami(&client, format).await,
    }
}
