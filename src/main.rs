use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use image_toolkit_lib::constants::{CONFIG_FILE_NAME, TEST_MODE_ENV};
use image_toolkit_lib::{
    image_tool_registry, load_settings_from, EnvCredentials, HookEvent, IdleNotifier,
    ImageToolkit, Mode, ToolRegistry, ToolkitSettings,
};

#[derive(Parser)]
#[command(name = "image-toolkit", version)]
#[command(about = "Gemini image generation, editing and analysis tools", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (defaults to ./image-toolkit.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Report what would happen without calling the API or writing images
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an image from a text prompt
    Generate {
        /// Text description of the image to generate
        #[arg(long)]
        prompt: String,

        /// Custom output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Custom filename
        #[arg(long)]
        filename: Option<String>,
    },

    /// Edit an existing image
    Edit {
        /// File path or data URL of the image to edit
        #[arg(long)]
        image: String,

        /// Edit instruction
        #[arg(long)]
        prompt: String,

        /// Custom output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Custom filename
        #[arg(long)]
        filename: Option<String>,
    },

    /// Ask a question about an image
    Analyze {
        /// File path or data URL of the image to analyze
        #[arg(long)]
        image: String,

        /// What to analyze about the image
        #[arg(long)]
        question: String,
    },

    /// Print the registered tool definitions as JSON
    Tools,

    /// Invoke a tool by name with JSON parameters, as a host would
    Call {
        /// Tool name (generate, edit, analyze)
        tool: String,

        /// JSON object of tool parameters
        #[arg(default_value = "{}")]
        params: String,
    },

    /// Deliver a host lifecycle event to the idle notifier
    Notify {
        /// Event type, e.g. session.idle
        event_type: String,

        /// Enable the notifier for this run regardless of settings
        #[arg(long)]
        enable: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive("info".parse().expect("valid log directive"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--mock` wins; otherwise `GEMINI_TEST_MODE=true` selects mock mode.
fn resolve_mode(cli_mock: bool) -> Mode {
    let env_mock = std::env::var(TEST_MODE_ENV).is_ok_and(|value| value == "true");
    if cli_mock || env_mock {
        Mode::Mock
    } else {
        Mode::Live
    }
}

fn path_param(path: Option<PathBuf>) -> Value {
    path.map(|p| Value::String(p.to_string_lossy().into_owned()))
        .unwrap_or(Value::Null)
}

fn build_registry(settings: &ToolkitSettings, mode: Mode) -> Result<ToolRegistry> {
    let toolkit = ImageToolkit::from_settings(settings, Arc::new(EnvCredentials::new()))
        .context("failed to set up image toolkit")?;
    Ok(image_tool_registry(Arc::new(toolkit), mode))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let settings = load_settings_from(&config_path)?;
    let mode = resolve_mode(cli.mock);
    debug!(?mode, config = %config_path.display(), "starting");

    let (tool, params) = match cli.command {
        Commands::Notify { event_type, enable } => {
            let mut notifier_config = settings.notifier.clone();
            notifier_config.enabled |= enable;
            let notifier = IdleNotifier::new(notifier_config);
            let event = HookEvent::from_type(&event_type);
            let subscribed = notifier.event_types().contains(&event.event_type());
            info!(
                event = event.event_type(),
                enabled = notifier.is_enabled(),
                subscribed,
                "delivering event"
            );
            if subscribed {
                notifier.on_event(&event);
            }
            return Ok(());
        }
        Commands::Tools => {
            let registry = build_registry(&settings, mode)?;
            println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
            return Ok(());
        }
        Commands::Generate {
            prompt,
            output_dir,
            filename,
        } => (
            "generate".to_string(),
            json!({
                "prompt": prompt,
                "outputDir": path_param(output_dir),
                "filename": filename,
            }),
        ),
        Commands::Edit {
            image,
            prompt,
            output_dir,
            filename,
        } => (
            "edit".to_string(),
            json!({
                "image": image,
                "prompt": prompt,
                "outputDir": path_param(output_dir),
                "filename": filename,
            }),
        ),
        Commands::Analyze { image, question } => (
            "analyze".to_string(),
            json!({ "image": image, "question": question }),
        ),
        Commands::Call { tool, params } => {
            let params: Value =
                serde_json::from_str(&params).context("tool parameters must be a JSON object")?;
            (tool, params)
        }
    };

    let registry = build_registry(&settings, mode)?;
    let output = registry.invoke(&tool, params).await;
    println!("{output}");
    Ok(())
}
