mod availability;
mod config;
mod display;
mod error;
mod grid;
mod parser;
mod web;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use availability::parse_all_respondents;
use config::ScheduleConfig;
use display::{print_tutor_summary, write_grid_to_file, write_tutors_to_file};
use grid::GridLayout;
use parser::load_survey_rows;

/// Schedule Helper - builds the weekly tutoring grid and reads tutor availability from survey responses
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file overriding the default days, shifts and grid dimensions
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the schedule grid and the tutor availability sheet
    Generate {
        /// Survey response sheet exported as CSV
        #[arg(short, long)]
        survey: PathBuf,

        /// Directory receiving grid.csv and tutors.csv
        #[arg(short, long, default_value = "output")]
        out_dir: PathBuf,
    },
    /// Generate only the blank schedule grid
    Grid {
        /// Directory receiving grid.csv
        #[arg(short, long, default_value = "output")]
        out_dir: PathBuf,
    },
    /// Serve the grid and uploaded survey results over HTTP
    Web {
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

fn load_layout(config_path: Option<&Path>) -> Result<GridLayout, Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => ScheduleConfig::load(path)?,
        None => ScheduleConfig::default(),
    };
    Ok(GridLayout::new(config)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let layout = load_layout(args.config.as_deref())?;

    match args.command {
        Command::Generate { survey, out_dir } => {
            write_grid_to_file(&layout, out_dir.join("grid.csv"))?;

            let rows = load_survey_rows(&survey)?;
            let tutors = parse_all_respondents(&rows);
            write_tutors_to_file(&tutors, out_dir.join("tutors.csv"))?;

            print_tutor_summary(&tutors);
            info!(out_dir = %out_dir.display(), "Schedule generated");
        }
        Command::Grid { out_dir } => {
            write_grid_to_file(&layout, out_dir.join("grid.csv"))?;
        }
        Command::Web { port } => {
            let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
            info!("Access the site at http://localhost:{}", port);
            web::start_server(port, layout, password).await?;
        }
    }

    Ok(())
}
