//! Style editor command-line entry point.
//!
//! Wires the settings file, the durable state store and the built-in engines
//! into an [`AppState`], then runs one bridge command per invocation.  State
//! (flags and the working style) persists between invocations in the state
//! file, the way a browser keeps it in local storage between page loads.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config(config_dir)        -- config.toml, defaults on first run
//!  └─ TomlStateStore::open(...)      -- state.toml
//!  └─ AppState::with_builtin_engines
//!  └─ state.start()                  -- demangler, formatter if enabled
//!  └─ one ui_bridge command          -- JSON or plain text on stdout
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use style_editor::application::ports::StateStore;
use style_editor::infrastructure::storage::config::{config_dir, load_config};
use style_editor::infrastructure::storage::local_store::TomlStateStore;
use style_editor::infrastructure::ui_bridge::{self as bridge, AppState, CommandResult};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Demangle C++ symbols and format them with an editable clang-format style.
#[derive(Debug, Parser)]
#[command(name = "style-editor", version)]
struct Cli {
    /// Directory holding `config.toml` and the state file.
    ///
    /// Defaults to the platform config directory.
    #[arg(long, env = "STYLE_EDITOR_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Demangle symbols given as arguments, or read from stdin.
    Demangle {
        /// Input lines; stdin is read when none are given.
        symbols: Vec<String>,
    },
    /// Show or change the feature flags.
    Flags {
        /// Format demangled output with the working style.
        #[arg(long)]
        format: Option<bool>,
        /// Allow editing the working style.
        #[arg(long)]
        expert: Option<bool>,
    },
    /// Show engine load state.
    Status,
    /// Inspect or edit the working style.
    #[command(subcommand)]
    Style(StyleCommand),
}

#[derive(Debug, Subcommand)]
enum StyleCommand {
    /// Print the style tree, or the subtree at PATH.
    Show {
        #[arg(default_value = "")]
        path: String,
    },
    /// Set a scalar, optional, enum or text list from text.
    Set { path: String, value: String },
    /// Enable an optional, with an initial value if given.
    Enable { path: String, value: Option<String> },
    /// Disable an optional.
    Disable { path: String },
    /// Rename an enum member.
    Rename { path: String, member: String },
    /// Replace a text list; items are separated by newlines.
    Lines { path: String, text: String },
    /// Resize a list.
    Resize { path: String, len: usize },
    /// Replace the style with a preset.
    Preset { name: String },
    /// List the presets.
    Presets,
    /// Print the style in its persisted text form.
    Export,
    /// Replace the style with one read from FILE.
    Import { file: PathBuf },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Configuration ─────────────────────────────────────────────────────────
    let dir = config_dir(cli.config_dir.clone())?;
    let config = load_config(&dir).with_context(|| format!("loading settings from {}", dir.display()))?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `RUST_LOG` wins; otherwise the configured level.  Logs go to stderr so
    // stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let state_file = config.state_file_path(&dir);
    debug!(config_dir = %dir.display(), state_file = %state_file.display(), "starting");
    let store: Arc<dyn StateStore> =
        Arc::new(TomlStateStore::open(&state_file).with_context(|| format!("opening {}", state_file.display()))?);

    let state = AppState::with_builtin_engines(config, store);
    state.start().await;

    run(state, cli.command).await
}

async fn run(state: Arc<AppState>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Demangle { symbols } => {
            let input = if symbols.is_empty() {
                let mut buf = String::new();
                tokio::io::stdin().read_to_string(&mut buf).await?;
                buf.trim_end_matches('\n').to_string()
            } else {
                symbols.join("\n")
            };

            let mut output = state.subscribe_output();
            let result = bridge::demangle(Arc::clone(&state), input).await;
            let rendered = into_data(result)?;
            let lines = if rendered.queued {
                info!("waiting for engines");
                output.changed().await?;
                output.borrow_and_update().clone()
            } else {
                rendered.lines
            };
            for line in lines {
                println!("{line}");
            }
            Ok(())
        }
        Command::Flags { format, expert } => {
            if let Some(enabled) = format {
                into_data(bridge::set_format_enabled(Arc::clone(&state), enabled).await)?;
            }
            if let Some(enabled) = expert {
                into_data(bridge::set_expert_mode(Arc::clone(&state), enabled).await)?;
            }
            print_json(bridge::get_flags(state).await)
        }
        Command::Status => print_json(bridge::get_module_status(state).await),
        Command::Style(style) => run_style(state, style).await,
    }
}

async fn run_style(state: Arc<AppState>, command: StyleCommand) -> anyhow::Result<()> {
    match command {
        StyleCommand::Show { path } => print_json(bridge::get_style_tree(state, path).await),
        StyleCommand::Set { path, value } => print_json(bridge::set_value(state, path, value).await),
        StyleCommand::Enable { path, value } => print_json(bridge::toggle_optional(state, path, true, value).await),
        StyleCommand::Disable { path } => print_json(bridge::toggle_optional(state, path, false, None).await),
        StyleCommand::Rename { path, member } => print_json(bridge::rename_enum(state, path, member).await),
        StyleCommand::Lines { path, text } => print_json(bridge::set_list_text(state, path, text).await),
        StyleCommand::Resize { path, len } => print_json(bridge::resize_list(state, path, len).await),
        StyleCommand::Preset { name } => print_json(bridge::load_preset(state, name).await),
        StyleCommand::Presets => print_json(bridge::list_presets(state).await),
        StyleCommand::Export => {
            print!("{}", into_data(bridge::export_style(state).await)?);
            Ok(())
        }
        StyleCommand::Import { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            print_json(bridge::import_style(state, text).await)
        }
    }
}

/// Unwraps a successful result, turning a failed one into an error exit.
fn into_data<T: Serialize>(result: CommandResult<T>) -> anyhow::Result<T> {
    match (result.success, result.data) {
        (true, Some(data)) => Ok(data),
        _ => bail!(result.error.unwrap_or_else(|| "command failed".to_string())),
    }
}

fn print_json<T: Serialize>(result: CommandResult<T>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&result)?);
    if !result.success {
        bail!(result.error.unwrap_or_else(|| "command failed".to_string()));
    }
    Ok(())
}
