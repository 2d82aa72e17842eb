use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use glance_app::logging::{LogFormat, init_logging};
use glance_app::once::drive_once;
use glance_app::{AppController, PipelineContext};
use glance_config::{Config, ProfileStore};
use tokio::signal;

#[derive(Parser)]
#[command(name = "glance", about = "Photo to text to generative reply")]
struct Cli {
    /// Profile to load from the user config directory
    #[arg(long, default_value = "main", global = true)]
    profile: String,

    /// Load this config file instead of a profile
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Auto, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Interactive terminal session (default)
    Interactive,
    /// Run one attempt on an image file and exit
    Once {
        #[arg(long)]
        image: PathBuf,
    },
    /// Manage profiles in the user config directory
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Copy the main profile under a new name
    Add { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.log_format, "info");

    match cli.command.unwrap_or(Mode::Interactive) {
        Mode::Interactive => {
            let config = load_config(&cli.profile, cli.config.as_deref())?;
            let controller = build_controller(&config)?;
            run_interactive(&controller, config).await
        }
        Mode::Once { image } => {
            let config = load_config(&cli.profile, cli.config.as_deref())?;
            let controller = build_controller(&config)?;
            run_once(&controller, image).await
        }
        Mode::Profile { action } => run_profile(action),
    }
}

fn load_config(profile: &str, path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => profile_store()?.load(profile)?,
    };
    config.apply_env_overrides()?;
    Ok(config)
}

fn profile_store() -> anyhow::Result<ProfileStore> {
    let store = ProfileStore::user_default()?;
    store.init().context("Failed to initialize profiles")?;
    Ok(store)
}

fn build_controller(config: &Config) -> anyhow::Result<AppController> {
    let ctx = PipelineContext::from_config(config).context("Failed to build pipeline")?;
    Ok(AppController::new(ctx))
}

fn run_profile(action: ProfileAction) -> anyhow::Result<()> {
    let store = profile_store()?;
    match action {
        ProfileAction::Add { name } => {
            let path = store.add_from_main(&name)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn run_interactive(controller: &AppController, config: Config) -> anyhow::Result<()> {
    let mut tasks = controller.spawn_tasks(config.ui);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Session ended"),
                Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::warn!("Task exited with error during shutdown: {e:#}");
        }
    }

    Ok(())
}

async fn run_once(controller: &AppController, image: PathBuf) -> anyhow::Result<()> {
    let mut tasks = controller.spawn_backend();
    let (app_to_ui_rx, ui_to_app_tx) = controller.frontend();

    let result = tokio::select! {
        _ = signal::ctrl_c() => Err(anyhow::anyhow!("interrupted")),
        result = drive_once(app_to_ui_rx, ui_to_app_tx, image, |update| {
            println!("{}", update.text);
        }) => result,
    };

    controller.shutdown();
    while tasks.join_next().await.is_some() {}

    result.map(|_| ())
}
