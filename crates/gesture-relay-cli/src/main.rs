//! gesture-relay CLI: drives the gesture engine from JSON-lines commands.

mod session;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use gesture_relay_engine::config::{BackendKind, Config};
use gesture_relay_engine::{setup, CommandDispatcher, EngineContext, SettingsOpener};
use gesture_relay_input::mock::{MockBackend, MockCompletion};
use gesture_relay_input::GestureBackend;
use gesture_relay_types::Command;
use tokio::io::BufReader;

use crate::session::Session;

#[derive(Parser)]
#[command(
    name = "gesture-relay",
    about = "Synthesize touch gestures from remote input commands",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read JSON-lines commands from stdin and execute them.
    Run,

    /// Print the gesture a command would produce, without dispatching it.
    Compose {
        /// Command as JSON, e.g. '{"command":"tap","x":10,"y":20}'.
        command: String,
    },

    /// Print the effective configuration.
    Config,
}

/// Logs how to grant access to the virtual input device.
struct LogSettingsOpener {
    backend: BackendKind,
}

impl SettingsOpener for LogSettingsOpener {
    fn open_settings(&self) {
        match self.backend {
            BackendKind::Uinput => tracing::warn!(
                "gesture injection needs write access to /dev/uinput; \
                 add your user to the `input` group or install a udev rule"
            ),
            BackendKind::Mock => tracing::info!("mock backend is always enabled"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = setup::load_config(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.engine.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run(config))?;
        }
        Commands::Compose { command } => {
            let command: Command =
                serde_json::from_str(&command).context("failed to decode command")?;
            let context = Arc::new(EngineContext::new());
            context.attach(config.display.bounds());
            let dispatcher = CommandDispatcher::new(
                context,
                Arc::new(MockBackend::new()),
                config.gestures,
                Arc::new(LogSettingsOpener {
                    backend: BackendKind::Mock,
                }),
            );
            let gesture = dispatcher.compose(&command)?;
            println!("{}", serde_json::to_string_pretty(&gesture)?);
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

async fn run(config: Config) -> anyhow::Result<()> {
    let backend = build_backend(&config)?;
    let context = Arc::new(EngineContext::new());
    let dispatcher = Arc::new(CommandDispatcher::new(
        Arc::clone(&context),
        backend,
        config.gestures,
        Arc::new(LogSettingsOpener {
            backend: config.backend.kind,
        }),
    ));

    context.attach(config.display.bounds());
    tracing::info!(
        backend = ?config.backend.kind,
        width = config.display.width,
        height = config.display.height,
        "gesture-relay ready"
    );

    let session = Session::new(Arc::clone(&dispatcher));
    let stdin = BufReader::new(tokio::io::stdin());
    tokio::select! {
        result = session.serve(stdin, tokio::io::stdout()) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupted"),
    }

    dispatcher.shutdown().await?;
    tracing::info!("gesture-relay stopped");
    Ok(())
}

fn build_backend(config: &Config) -> anyhow::Result<Arc<dyn GestureBackend>> {
    match config.backend.kind {
        BackendKind::Mock => Ok(Arc::new(MockBackend::with_completion(MockCompletion::Timed))),
        BackendKind::Uinput => build_uinput(config),
    }
}

#[cfg(feature = "linux")]
fn build_uinput(config: &Config) -> anyhow::Result<Arc<dyn GestureBackend>> {
    use std::time::Duration;

    use gesture_relay_input::linux::{TouchscreenConfig, UinputTouchscreen};

    let touchscreen = UinputTouchscreen::new(&TouchscreenConfig {
        name: config.backend.device_name.clone(),
        width: config.display.width,
        height: config.display.height,
        frame_interval: Duration::from_millis(config.backend.frame_interval_ms),
    })
    .context("failed to create virtual touchscreen")?;
    Ok(Arc::new(touchscreen))
}

#[cfg(not(feature = "linux"))]
fn build_uinput(_config: &Config) -> anyhow::Result<Arc<dyn GestureBackend>> {
    anyhow::bail!("the uinput backend requires the `linux` feature")
}
