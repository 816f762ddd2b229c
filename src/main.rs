use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tfwait::actions;
use tfwait::config::{AppConfig, ConfigOverrides};
use tfwait::platform::terraform::TerraformClient;
use tfwait::shutdown::cancel_on_shutdown;
use tfwait::workflow::wait_for_convergence;

#[derive(Parser)]
#[command(
    name = "tfwait",
    about = "Wait for Terraform Cloud workspace runs to finish"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Terraform Cloud organization
    #[arg(short, long)]
    organization: Option<String>,

    /// Comma-separated workspace names
    #[arg(short, long)]
    workspaces: Option<String>,

    /// API token (prefer TFWAIT_TOKEN to keep it out of the process list)
    #[arg(long)]
    token: Option<String>,

    /// Keep waiting until planned runs have been applied
    #[arg(long)]
    wait_for_apply: bool,

    /// Delay between polls, in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Give up after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Terraform Cloud / Enterprise base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            organization: self.organization.clone(),
            workspaces: self.workspaces.clone(),
            token: self.token.clone(),
            wait_for_apply: self.wait_for_apply.then_some(true),
            poll_interval_ms: self.poll_interval_ms,
            timeout_secs: self.timeout_secs,
            api_url: self.api_url.clone(),
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Progress goes to stdout, so keep logs on stderr
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref(), cli.overrides())?;
    let workspaces = config.workspace_refs();

    tracing::info!(
        organization = %config.organization,
        workspaces = %config.workspaces,
        wait_for_apply = config.wait_for_apply,
        "Waiting for Terraform workspaces"
    );

    let client = TerraformClient::new(&config.api_url, &config.token)?;

    let cancel = CancellationToken::new();
    cancel_on_shutdown(cancel.clone());

    let ticks = wait_for_convergence(&client, &workspaces, &config.wait_options(), &cancel).await?;
    cancel.cancel();

    tracing::debug!(ticks, "Finished waiting");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{e:#}");
            if actions::is_github_actions() {
                println!("{}", actions::error_command(&message));
            }
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}
