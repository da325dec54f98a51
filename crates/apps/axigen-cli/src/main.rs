//! axigen - command-line host for the Axigen connector
//!
//! Drives the connector the way an automation platform would: validates
//! credentials, lists operations, runs actions and steps the new-email
//! trigger against a JSON-file store.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use axigen::client::DEFAULT_TIMEOUT_SECS;
use axigen::{
    ActionOutput, AxigenCredentials, DropdownSource, JsonFileStore, Piece, PieceContext, Props,
    Transport, UreqTransport,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, error, info};
use serde_json::{Value, json};

#[derive(Debug, Parser)]
#[command(author, version, about = "Run Axigen connector operations from the shell")]
struct Cli {
    #[command(flatten)]
    common: CommonOpts,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Args)]
struct CommonOpts {
    /// Credentials JSON file (defaults to the config directory, then env vars)
    #[arg(long, value_name = "PATH", global = true)]
    credentials: Option<PathBuf>,
    /// Request timeout
    #[arg(
        long,
        value_name = "SECONDS",
        env = "AXIGEN_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        global = true
    )]
    timeout: u64,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the credentials can log in
    Validate,
    /// List actions and triggers with their inputs
    Operations,
    /// List folders available for folder inputs
    Folders,
    /// Run an action
    Run(RunArgs),
    /// Drive the new-email trigger
    Trigger(TriggerArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Action name, e.g. moveMail
    action: String,
    /// Action inputs as a JSON object
    #[arg(long, default_value = "{}")]
    props: String,
    /// Where to write binary output such as attachments
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TriggerStep {
    Enable,
    Disable,
    Poll,
    Test,
}

#[derive(Debug, Args)]
struct TriggerArgs {
    #[arg(value_enum)]
    step: TriggerStep,
    /// Folder to watch
    #[arg(long)]
    folder: String,
    /// Trigger instance name; each instance keeps its own state
    #[arg(long, default_value = "default")]
    instance: String,
    /// State file (defaults to the config state directory)
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,
}

const TRIGGER_NAME: &str = "newEmailReceived";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(err) = try_main() {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let piece = Piece::axigen();
    match cli.command {
        Command::Operations => print_json(&json!(piece.operations())),
        Command::Validate => handle_validate(&piece, &cli.common),
        Command::Folders => handle_folders(&piece, &cli.common),
        Command::Run(args) => handle_run(&piece, &cli.common, args),
        Command::Trigger(args) => handle_trigger(&piece, &cli.common, args),
    }
}

fn load_credentials(opts: &CommonOpts) -> Result<AxigenCredentials> {
    match &opts.credentials {
        Some(path) => AxigenCredentials::from_file(path)
            .with_context(|| format!("Failed to load credentials from {}", path.display())),
        None => AxigenCredentials::load().map_err(|e| {
            let hint = AxigenCredentials::default_credentials_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the config directory".to_string());
            anyhow!(
                "{:#}\nPlace credentials at {} or set AXIGEN_SERVER, AXIGEN_USERNAME and AXIGEN_PASSWORD",
                e,
                hint
            )
        }),
    }
}

fn transport(opts: &CommonOpts) -> Arc<dyn Transport> {
    debug!("Using a {}s request timeout", opts.timeout);
    Arc::new(UreqTransport::with_timeout(Duration::from_secs(opts.timeout)))
}

fn context(opts: &CommonOpts) -> Result<PieceContext> {
    Ok(PieceContext::new(load_credentials(opts)?, transport(opts)))
}

fn handle_validate(piece: &Piece, opts: &CommonOpts) -> Result<()> {
    let credentials = load_credentials(opts)?;
    let validation = piece.validate_auth(&credentials, transport(opts));
    print_json(&serde_json::to_value(&validation)?)?;

    if validation.valid {
        Ok(())
    } else {
        Err(anyhow!("Credentials rejected by {}", credentials.server))
    }
}

fn handle_folders(piece: &Piece, opts: &CommonOpts) -> Result<()> {
    let credentials = load_credentials(opts).ok();
    let state = piece.dropdown_options(DropdownSource::Folders, credentials.as_ref(), transport(opts));
    print_json(&serde_json::to_value(&state)?)
}

fn handle_run(piece: &Piece, opts: &CommonOpts, args: RunArgs) -> Result<()> {
    let props: Props = serde_json::from_str(&args.props).context("--props must be a JSON object")?;
    let ctx = context(opts)?;

    let output = piece
        .run_action(&args.action, &ctx, &props)
        .with_context(|| format!("Action {} failed", args.action))?;

    match (output, args.output) {
        (ActionOutput::Binary { data, .. }, Some(path)) => {
            fs::write(&path, &data).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} bytes to {}", data.len(), path.display());
            Ok(())
        }
        (ActionOutput::Binary { data, .. }, None) => {
            io::stdout().write_all(&data).context("Failed to write to stdout")
        }
        (ActionOutput::Text(text), Some(path)) => {
            fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))
        }
        (output, _) => print_json(&output.to_json()),
    }
}

fn handle_trigger(piece: &Piece, opts: &CommonOpts, args: TriggerArgs) -> Result<()> {
    let store = match args.store {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::for_instance(&args.instance)?,
    };
    debug!("Trigger state in {}", store.path().display());

    let ctx = context(opts)?;
    let mut props = Props::new();
    props.insert("folderId".to_string(), Value::String(args.folder));

    match args.step {
        TriggerStep::Enable => {
            piece.enable_trigger(TRIGGER_NAME, &ctx, &props, &store)?;
            info!("Trigger {} enabled", args.instance);
            Ok(())
        }
        TriggerStep::Disable => {
            piece.disable_trigger(TRIGGER_NAME, &ctx, &props, &store)?;
            info!("Trigger {} disabled", args.instance);
            Ok(())
        }
        TriggerStep::Poll => {
            let items = piece.poll_trigger(TRIGGER_NAME, &ctx, &props, &store)?;
            info!("{} new emails", items.len());
            print_json(&Value::Array(items))
        }
        TriggerStep::Test => {
            let items = piece.test_trigger(TRIGGER_NAME, &ctx, &props, &store)?;
            print_json(&Value::Array(items))
        }
    }
}

fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    writeln!(io::stdout(), "{}", rendered).context("Failed to write to stdout")
}
