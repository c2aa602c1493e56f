use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic snake on a square grid, played in the terminal")]
struct Cli {
    /// JSON file with game settings; command-line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log (the terminal is busy drawing the game)
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(speed) = self.speed {
            config.initial_speed_ms = speed;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!("starting with {config:?}");

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    info!("bye");
    Ok(())
}
