//! Waypost CLI - guided decision and startup checklists.

mod command;
mod render;
mod shell;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use waypost_core::ToolKind;
use waypost_progress::ProgressTracker;
use waypost_storage::{ExportConfig, Exporter, JsonFileExporter};

#[derive(Parser)]
#[command(name = "waypost")]
#[command(about = "Guided decision and startup checklists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory for exported JSON files
    #[arg(long, default_value = ".waypost")]
    export_dir: std::path::PathBuf,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Log filter, used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in tools
    Tools,
    /// Print every block, module, card and step of a tool
    Show {
        /// Tool name (decision or startup)
        tool: ToolKind,
    },
    /// Write a tool's structure as JSON
    Export {
        /// Tool name (decision or startup)
        tool: ToolKind,
    },
    /// Start an interactive session
    Run {
        /// Tool name (decision or startup)
        tool: ToolKind,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = ExportConfig {
        dir: cli.export_dir,
        pretty: !cli.compact,
    };

    match cli.command {
        Commands::Tools => {
            for tool in ToolKind::ALL {
                let structure = tool.structure()?;
                println!(
                    "{:<10} {} ({} blocks, {} cards)",
                    tool.as_str(),
                    tool.title(),
                    structure.blocks().len(),
                    structure.card_count()
                );
            }
        }
        Commands::Show { tool } => {
            let structure = tool.structure()?;
            println!("{}", tool.title());
            print!("{}", render::structure_tree(&structure));
        }
        Commands::Export { tool } => {
            let structure = tool.structure()?;
            let mut exporter = JsonFileExporter::new(config).await?;
            let path = exporter.export_structure(tool, &structure).await?;
            println!("Exported {} to {}", tool, path.display());
        }
        Commands::Run { tool } => {
            let tracker = ProgressTracker::new(tool.structure()?);
            info!("Session {} started ({})", tracker.session(), tool);

            let exporter = JsonFileExporter::new(config).await?;
            let mut shell = shell::Shell::new(tool, tracker, exporter);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            shell.run(stdin, &mut stdout).await?;

            info!(
                "Session finished at {:.0}%",
                shell.tracker().overall_progress()
            );
        }
    }

    Ok(())
}
