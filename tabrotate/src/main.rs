//! Oracle data source owner and credential rotation for Tableau Server.
//!
//! Signs in to one site, lists every user and published data source, and
//! rewrites the first connection of each Oracle data source with new
//! database credentials (password embedded). With `--function both` the
//! data sources are also reassigned to a new owner first.
//!
//! # Security Guarantees
//! - Passwords are prompted with hidden input, never taken as flags
//! - Credentials and session tokens are never logged
//! - The session is signed out before exit

use clap::{Args, Parser, ValueEnum};
use std::process::ExitCode;
use std::time::Duration;
use tabrotate_core::{
    RestSession, Result, RunConfig, TableauServer, UpdateMode,
    config::{DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT, MAX_PAGE_SIZE},
    error::redact_server_url,
    init_logging,
    security::{TerminalPrompter, collect_credentials},
    workflow::{self, RunRequest},
};
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "tabrotate")]
#[command(about = "Change owner and update connection details across ALL Oracle data sources within a site on Tableau Server")]
#[command(version)]
#[command(long_about = "
tabrotate - bulk Oracle data source maintenance for Tableau Server

Signs in to a single site and, for every data source of type 'oracle':
- optionally reassigns ownership to a named site user (--function both)
- rewrites the first connection's username and password and embeds the
  password on the server (--function both | conn)

Non-Oracle data sources are never modified.

CREDENTIALS:
All usernames and passwords are prompted interactively after start-up.
Passwords are read with echo disabled.

EXAMPLES:
  tabrotate -t https://tableau.example.com -s finance -f conn
  tabrotate --tabserver https://tableau.example.com --site finance --function both
  TABLEAU_SERVER=https://tableau.example.com tabrotate -s '' -f conn
")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Target Tableau Server URL
    #[arg(
        short = 't',
        long,
        env = "TABLEAU_SERVER",
        help = "Target Tableau Server URL"
    )]
    tabserver: String,

    /// Target site
    #[arg(
        short = 's',
        long,
        env = "TABLEAU_SITE",
        help = "Target site for updating data source owner and connection credentials"
    )]
    site: String,

    /// What to update
    #[arg(
        short = 'f',
        long,
        value_enum,
        help = "Change BOTH data source owner and connection credentials, or just CONNection credentials"
    )]
    function: Function,

    /// Pin the REST API version
    #[arg(
        long,
        value_name = "MAJOR.MINOR",
        help = "REST API version to use instead of asking the server"
    )]
    api_version: Option<String>,

    /// Page size for list requests
    #[arg(
        long,
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE_SIZE)),
        help = "Number of users/data sources requested per page"
    )]
    page_size: u32,

    /// HTTP timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        help = "Per-request HTTP timeout in seconds"
    )]
    timeout: u64,
}

#[derive(Args)]
struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    verbose: u8,

    /// Suppress diagnostics
    #[arg(short, long, help = "Suppress all diagnostics except errors")]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Function {
    /// Owner and connection credentials
    Both,
    /// Connection credentials only
    Conn,
}

impl From<Function> for UpdateMode {
    fn from(function: Function) -> Self {
        match function {
            Function::Both => Self::Both,
            Function::Conn => Self::Conn,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.global.verbose, cli.global.quiet) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_owner_resolution() => {
            println!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

/// Builds the run configuration from parsed flags.
fn build_config(cli: &Cli) -> Result<RunConfig> {
    let mut config = RunConfig::new(&cli.tabserver, cli.site.clone(), cli.function.into())?
        .with_page_size(cli.page_size)?
        .with_timeout(Duration::from_secs(cli.timeout));

    if let Some(version) = &cli.api_version {
        config = config.with_api_version(version.clone())?;
    }

    Ok(config)
}

/// Prompts for credentials, signs in, runs the update and signs out.
async fn execute(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    let credentials = collect_credentials(&mut TerminalPrompter, config.mode)?;

    println!(
        "\n>>>> Attempting Login to {} site within Tableau Server at {} .....",
        config.site,
        redact_server_url(config.server.as_str())
    );

    let mut server = TableauServer::new(&config)?;
    if config.api_version.is_none() {
        server.use_server_version().await;
    }

    let session = server.sign_in(&credentials.server, &config.site).await?;
    println!(">>>> SUCCESS");
    debug!(
        "Signed in as {} on site {} using REST API {}",
        session.user_id(),
        session.site_id(),
        session.api_version()
    );

    let request = RunRequest {
        mode: config.mode,
        new_owner: credentials.new_owner.as_deref(),
        connection: &credentials.connection,
        page_size: config.page_size,
    };

    workflow::run_session(
        session,
        request,
        |stage| println!("{stage}"),
        RestSession::sign_out,
    )
    .await?;
    Ok(())
}
