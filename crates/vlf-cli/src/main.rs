//! VLF Compress CLI — headless driver for the compression core.
//!
//! # Configuration
//!
//! The settings record lives at the fixed per-user location unless
//! `--config` points elsewhere. On first run `vlf setup` must complete
//! before anything else; every other command is refused until it does.
//!
//! # Logging
//!
//! Diagnostics go to stderr so stdout stays clean for command output.
//! Filter precedence: `--debug` > `--verbose` > `RUST_LOG` > `warn`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vlf_app::{
    expand_tilde, App, AppCommand, AppError, AppResponse, EngineLocation, EngineStats, Mode,
    OperationOutcome, Settings, SettingsStore, SetupTarget,
};

/// VLF Compress — subprocess-backed file compression
#[derive(Parser, Debug)]
#[command(name = "vlf")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file path (defaults to the per-user location)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Explicit engine binary path
    #[arg(long, value_name = "PATH", global = true, conflicts_with = "resources")]
    engine: Option<PathBuf>,

    /// Packaged resources directory holding the bundled engine
    #[arg(long, value_name = "DIR", global = true)]
    resources: Option<PathBuf>,

    /// Engine invocation timeout in seconds (unbounded when omitted)
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file and print the statistics
    Compress {
        /// Input file
        file: PathBuf,

        /// Explicit output path (derived under the output directory when
        /// omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Decompress a previously encoded file
    Decompress {
        /// Input file
        file: PathBuf,

        /// Explicit output path (derived under the output directory when
        /// omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Run first-time setup
    Setup {
        /// Accept the recommended per-user directories
        #[arg(long, conflicts_with_all = ["input_dir", "output_dir"])]
        defaults: bool,

        /// Custom input directory
        #[arg(long, value_name = "DIR", requires = "output_dir")]
        input_dir: Option<PathBuf>,

        /// Custom output directory
        #[arg(long, value_name = "DIR", requires = "input_dir")]
        output_dir: Option<PathBuf>,
    },

    /// Print the configuration record
    Settings,

    /// Reveal a file in the file manager, or open the output directory
    Reveal {
        /// File to reveal (the output directory when omitted)
        file: Option<PathBuf>,
    },
}

/// Stderr filter precedence: `--debug` > `--verbose` > `RUST_LOG` > `warn`.
fn init_tracing(debug: bool, verbose: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn engine_location(args: &Args) -> EngineLocation {
    if let Some(binary) = &args.engine {
        EngineLocation::explicit(binary)
    } else if let Some(resources) = &args.resources {
        EngineLocation::packaged(resources)
    } else {
        EngineLocation::Dev
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug, args.verbose);

    let mut builder = App::builder().with_engine_location(engine_location(&args));
    if let Some(path) = args.config {
        builder = builder.with_store(SettingsStore::new(expand_tilde(&path)));
    }
    if let Some(secs) = args.timeout {
        builder = builder.with_timeout(Duration::from_secs(secs));
    }
    let mut app = builder.build();

    let result = dispatch_command(&mut app, args.command).await;
    match result {
        Err(e)
            if app.in_setup()
                && matches!(
                    e.downcast_ref::<AppError>(),
                    Some(AppError::PermissionDenied { .. })
                ) =>
        {
            Err(e.context("first-time setup has not completed (run 'vlf setup')"))
        }
        other => other,
    }
}

async fn dispatch_command(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Compress { file, output } => {
            run_operation(app, Mode::Forward, file, output).await
        }
        Command::Decompress { file, output } => {
            run_operation(app, Mode::Inverse, file, output).await
        }
        Command::Setup {
            defaults,
            input_dir,
            output_dir,
        } => run_setup(app, defaults, input_dir, output_dir).await,
        Command::Settings => show_settings(app).await,
        Command::Reveal { file } => {
            app.dispatch(AppCommand::Reveal { path: file }).await?;
            Ok(())
        }
    }
}

/// Selects the file (and save path, when given), runs the operation, and
/// renders the outcome. A failed operation is a process failure with the
/// engine's diagnostic as the message.
async fn run_operation(
    app: &mut App,
    mode: Mode,
    file: PathBuf,
    output: Option<PathBuf>,
) -> Result<()> {
    app.dispatch(AppCommand::SelectFile {
        mode,
        path: Some(file),
    })
    .await?;
    if output.is_some() {
        app.dispatch(AppCommand::SelectSavePath { mode, path: output })
            .await?;
    }

    let response = app.dispatch(AppCommand::Run { mode }).await?;
    let AppResponse::Outcome(outcome) = response else {
        anyhow::bail!("unexpected response to a run command");
    };

    match outcome {
        OperationOutcome::Succeeded(stats) => {
            print_stats(mode, &stats);
            Ok(())
        }
        OperationOutcome::Failed(detail) => anyhow::bail!("{}", detail.message),
    }
}

async fn run_setup(
    app: &mut App,
    defaults: bool,
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    if !app.in_setup() {
        println!("Setup already complete");
        return Ok(());
    }

    // A quoted `~/...` argument reaches us unexpanded by the shell.
    let input_dir = input_dir.map(|d| expand_tilde(&d));
    let output_dir = output_dir.map(|d| expand_tilde(&d));

    // Directories travel through the same dialog events a frontend would
    // send, so the flow validates them.
    for (target, dir) in [
        (SetupTarget::Input, input_dir.clone()),
        (SetupTarget::Output, output_dir.clone()),
    ] {
        if dir.is_some() {
            app.dispatch(AppCommand::SelectDirectory { target, path: dir })
                .await?;
        }
    }

    let response = app
        .dispatch(AppCommand::CompleteSetup {
            use_default: defaults || input_dir.is_none(),
            input_dir: None,
            output_dir: None,
        })
        .await?;

    match response {
        AppResponse::Settings(settings) => {
            println!("Setup complete");
            print_settings(&settings);
            Ok(())
        }
        other => anyhow::bail!("unexpected setup response: {other:?}"),
    }
}

async fn show_settings(app: &mut App) -> Result<()> {
    let response = app.dispatch(AppCommand::ReadConfig).await?;
    if let AppResponse::Settings(settings) = response {
        print_settings(&settings);
    }
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("  Input directory:  {}", settings.input_dir.display());
    println!("  Output directory: {}", settings.output_dir.display());
}

/// Prints the statistics block for a finished operation.
fn print_stats(mode: Mode, stats: &EngineStats) {
    match mode {
        Mode::Forward => {
            println!("Compression complete");
            if let Some(original) = stats.original_display() {
                println!("  Original:   {original}");
            }
            println!("  Compressed: {}", stats.compressed_display());
            println!("  Encoded:    {}", stats.encoded_display());
            println!("  Ratio:      {}", stats.ratio_display());
            if let Some(saved) = stats.saved_display() {
                println!("  Saved:      {saved}");
            }
            println!("  Output:     {}", stats.output_file);
        }
        Mode::Inverse => {
            println!("Decompression complete");
            println!("  Encoded:      {}", stats.encoded_display());
            println!("  Compressed:   {}", stats.compressed_display());
            if let Some(decompressed) = stats.decompressed_display() {
                println!("  Decompressed: {decompressed}");
            }
            println!("  Ratio:        {}", stats.ratio_display());
            println!("  Output:       {}", stats.output_file);
        }
    }
}
