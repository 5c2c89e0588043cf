//! liftplan - Interactive workout plan widget

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use liftplan::plan::{demo_plan, Plan};
use liftplan::state::BoundsPolicy;
use liftplan::ticker::TokioDriver;
use liftplan::tui::{App, Theme, ThemeName};
use liftplan::{host, text, PlanView, WidgetConfig};

/// Log file for the TUI, which owns the terminal
const LOG_PATH: &str = "liftplan.log";

#[derive(Parser)]
#[command(name = "liftplan")]
#[command(author, version, about = "Workout plan with per-exercise rest timers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive plan
    Tui {
        #[command(flatten)]
        source: PlanSource,

        /// Color theme
        #[arg(short, long, value_enum, default_value_t = ThemeName::Palette)]
        theme: ThemeName,

        /// Ignore out-of-range positions instead of failing
        #[arg(long)]
        lenient: bool,

        /// Keep timers ticking while the terminal is unfocused
        #[arg(long)]
        tick_when_hidden: bool,

        /// Where to write logs while the TUI is open
        #[arg(long, default_value = LOG_PATH)]
        log: PathBuf,
    },

    /// Print the plan summary
    Show {
        #[command(flatten)]
        source: PlanSource,
    },

    /// Print the built-in demo plan as JSON
    Demo,
}

#[derive(Args)]
struct PlanSource {
    /// Plan JSON file (built-in demo plan when omitted)
    #[arg(short, long, env = "LIFTPLAN_PLAN")]
    plan: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(log_file(&cli.command).as_deref())?;

    match cli.command {
        Some(Commands::Tui {
            source,
            theme,
            lenient,
            tick_when_hidden,
            ..
        }) => {
            let config = WidgetConfig {
                bounds: if lenient {
                    BoundsPolicy::Lenient
                } else {
                    BoundsPolicy::default()
                },
                pause_when_hidden: !tick_when_hidden,
            };
            run_tui(config, Theme::named(theme), source.plan)?;
        }

        Some(Commands::Show { source }) => {
            let plan = load_plan(source.plan.as_deref()).await?;
            let (driver, _ticks) = TokioDriver::new();
            let mut view = PlanView::new(WidgetConfig::default(), driver);
            view.deliver(Arc::new(plan));
            print!("{}", text::render(&view.frame()));
        }

        Some(Commands::Demo) => {
            println!("{}", serde_json::to_string_pretty(&demo_plan())?);
        }

        None => {
            // Default: show TUI
            let path = std::env::var_os("LIFTPLAN_PLAN").map(PathBuf::from);
            run_tui(WidgetConfig::default(), Theme::default(), path)?;
        }
    }

    Ok(())
}

/// The TUI logs to a file; everything else logs to stderr
fn log_file(command: &Option<Commands>) -> Option<PathBuf> {
    match command {
        Some(Commands::Tui { log, .. }) => Some(log.clone()),
        None => Some(PathBuf::from(LOG_PATH)),
        Some(_) => None,
    }
}

fn init_logging(file: Option<&Path>) -> Result<()> {
    match file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => tracing_subscriber::fmt().with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn run_tui(config: WidgetConfig, theme: Theme, path: Option<PathBuf>) -> Result<()> {
    let (sender, receiver) = host::channel();

    // Host side: the plan shows up whenever loading finishes
    tokio::spawn(async move {
        match load_plan(path.as_deref()).await {
            Ok(plan) => {
                sender.deliver(plan);
            }
            Err(e) => error!("Failed to load plan: {:#}", e),
        }
    });

    let mut app = App::new(config, theme, receiver);
    app.run()
}

async fn load_plan(path: Option<&Path>) -> Result<Plan> {
    let Some(path) = path else {
        info!("No plan file given, using demo plan");
        return Ok(demo_plan());
    };
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let plan = Plan::from_json(&json).with_context(|| format!("parsing {}", path.display()))?;
    info!("Loaded plan '{}' from {}", plan.name, path.display());
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_for(args: &[&str]) -> Option<PathBuf> {
        let cli = Cli::try_parse_from(args).unwrap();
        log_file(&cli.command)
    }

    #[test]
    fn test_tui_logs_to_file() {
        assert_eq!(log_for(&["liftplan", "tui"]), Some(PathBuf::from(LOG_PATH)));
        assert_eq!(log_for(&["liftplan"]), Some(PathBuf::from(LOG_PATH)));
    }

    #[test]
    fn test_tui_log_path_override() {
        assert_eq!(
            log_for(&["liftplan", "tui", "--log", "/tmp/rest.log"]),
            Some(PathBuf::from("/tmp/rest.log"))
        );
    }

    #[test]
    fn test_other_commands_log_to_stderr() {
        assert_eq!(log_for(&["liftplan", "show"]), None);
        assert_eq!(log_for(&["liftplan", "demo"]), None);
    }
}
