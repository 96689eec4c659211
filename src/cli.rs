use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{ApiClient, SubmitOptions};
use crate::config::{Config, OutputFormat};
use crate::error::ProfilensError;
use crate::output::{print_report, PollProgress};
use crate::poller::{PollState, PollingController};
use crate::presenter;
use crate::report::AnalysisReport;

#[derive(Parser)]
#[command(name = "profilens")]
#[command(author, version, about = "GitHub Profile Analysis Client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Write the raw report as JSON to this path
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,

    /// Path to a config file (default: ./profilens.{toml,json,yaml})
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a profile analysis and wait for the report
    Analyze {
        /// GitHub username to analyze
        username: String,

        /// Analysis service base URL
        #[arg(short, long, env = "PROFILENS_SERVER")]
        server: Option<String>,

        /// LLM model the service should use
        #[arg(short, long)]
        model: Option<String>,

        /// Delay between status checks, in milliseconds
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Analyze {
                username,
                server,
                model,
                interval,
            } => {
                self.execute_analyze(username, server.as_deref(), model.as_deref(), *interval)
                    .await
            }
        }
    }

    async fn execute_analyze(
        &self,
        username: &str,
        server: Option<&str>,
        model: Option<&str>,
        interval: Option<u64>,
    ) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        let base_url = server.unwrap_or(&config.server.base_url);
        let model = model.unwrap_or(&config.server.model);
        let interval = Duration::from_millis(interval.unwrap_or(config.server.poll_interval_ms));

        info!("Submitting analysis for {username} to {base_url}");

        let api = ApiClient::new(base_url)?;
        let mut controller = PollingController::new(api, interval);
        let options = SubmitOptions {
            model: model.to_string(),
        };

        let mut updates = controller.subscribe();
        controller.start(username, &options).await?;

        let progress = PollProgress::start(presenter::status_message(PollState::Starting));
        let outcome = loop {
            let snapshot = updates.borrow_and_update().clone();
            if snapshot.state.is_terminal() {
                break snapshot;
            }
            progress.update(presenter::status_message(snapshot.state));
            if updates.changed().await.is_err() {
                break controller.snapshot();
            }
        };

        match outcome.state {
            PollState::Finished => {
                progress.finish_success(presenter::status_message(PollState::Finished));
                let report = outcome.data.ok_or_else(|| {
                    ProfilensError::MalformedResponse(
                        "finished without a report in the job slot".to_string(),
                    )
                })?;
                self.emit_report(&report, &config)
            }
            PollState::Failed => {
                progress.finish_failure(presenter::status_message(PollState::Failed));
                let message = outcome
                    .error
                    .unwrap_or_else(|| "analysis failed without detail".to_string());
                Err(ProfilensError::JobFailed(message).into())
            }
            _ => {
                progress.finish_failure(presenter::status_message(PollState::PollingError));
                let message = outcome
                    .error
                    .unwrap_or_else(|| "polling stopped unexpectedly".to_string());
                Err(ProfilensError::StatusCheck(message).into())
            }
        }
    }

    fn emit_report(&self, report: &AnalysisReport, config: &Config) -> Result<()> {
        let pretty = self.pretty || config.output.pretty;

        if let Some(output_path) = &self.output {
            let json_output = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            std::fs::write(output_path, json_output)?;
            info!("Report written to: {}", output_path.display());
            return Ok(());
        }

        match config.output.format {
            OutputFormat::Summary => print_report(report),
            OutputFormat::Json => {
                let json_output = if pretty {
                    serde_json::to_string_pretty(report)?
                } else {
                    serde_json::to_string(report)?
                };
                println!("{json_output}");
            }
        }

        Ok(())
    }
}
