use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod engine;
mod html;
mod server;
mod types;

use engine::{CalendarCursor, CalendarEngine};
use types::{MonthRelation, WEEKDAY_NAMES};

#[derive(Parser, Debug)]
#[command(name = "dallyeok")]
#[command(about = "Render the HahaMath monthly activity calendar as a web view")]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output directory for generated files
    #[arg(short, long, default_value = ".", global = true)]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Generate a static HTML page for the current month (no server)
    Build,

    /// Print a month's grid to the terminal
    Show {
        /// Year to display (defaults to the current month)
        #[arg(short, long, requires = "month")]
        year: Option<i32>,

        /// Month to display, 1-12
        #[arg(short, long, requires = "year")]
        month: Option<u32>,

        /// Shift the displayed month by this many months
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        shift: i32,
    },
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level))
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("tower_http=warn".parse().unwrap());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_max_level(Level::TRACE)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level);

    match args.command {
        // Default to serve if no command specified
        None => {
            server::serve(8080).await?;
        }
        Some(Commands::Serve { port }) => {
            server::serve(port).await?;
        }
        Some(Commands::Build) => {
            let engine = CalendarEngine::new();
            let cells = engine.grid(&mut rand::rng());
            let html_path = args.output.join("index.html");
            html::generate_html(&engine.month_label(), &cells, &html_path)?;
            info!(path = %html_path.display(), "HTML saved");
        }
        Some(Commands::Show { year, month, shift }) => {
            let mut engine = CalendarEngine::new();
            if let (Some(year), Some(month)) = (year, month) {
                anyhow::ensure!(
                    (1..=12).contains(&month),
                    "month must be between 1 and 12, got {month}"
                );
                engine.set_cursor(CalendarCursor::new(year, month - 1)?);
            }
            if shift != 0 {
                engine.shift(shift)?;
            }
            print_grid(&engine);
        }
    }

    Ok(())
}

/// Print the month grid as plain text, one row per week.
///
/// Today is bracketed, days belonging to the previous/next month are
/// parenthesized.
fn print_grid(engine: &CalendarEngine) {
    let cells = engine.grid(&mut rand::rng());

    println!("{}", engine.month_label());
    println!("{}", WEEKDAY_NAMES.map(|n| format!("  {n} ")).join(""));

    for week in cells.chunks(7) {
        let row: String = week
            .iter()
            .map(|cell| {
                if cell.is_today {
                    format!("[{:>2}] ", cell.day)
                } else if cell.relation != MonthRelation::Current {
                    format!("({:>2}) ", cell.day)
                } else {
                    format!(" {:>2}  ", cell.day)
                }
            })
            .collect();
        println!("{}", row.trim_end());
    }
}
