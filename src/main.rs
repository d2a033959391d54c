//! Terminal host for the Game of Life simulation engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life_sim::{
    config::{CliOverrides, Settings},
    life::Board,
    sim::{ChannelObserver, Session},
    snapshot::{
        self, create_example_patterns, gosper_glider_gun,
        io::{load_snapshot_from_file, save_snapshot_to_file},
        load_board_from_file, Snapshot,
    },
    utils::{BoardFormatter, ColorOutput},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "game_of_life_sim")]
#[command(about = "Conway's Game of Life on a bounded board")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a continuous simulation in the terminal
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Board height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Seconds between generations (overrides config)
        #[arg(short, long)]
        delay: Option<f32>,

        /// Start from a 0/1 text pattern instead of a random board
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Start from a flat JSON snapshot (square boards)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Start from the built-in Gosper glider gun
        #[arg(long)]
        gun: bool,

        /// Stop after this many generations
        #[arg(short, long, default_value_t = 50)]
        generations: u64,
    },

    /// Advance a pattern a fixed number of generations and print the result
    Step {
        /// 0/1 text pattern file
        #[arg(short, long)]
        pattern: PathBuf,

        /// Number of generations to advance
        #[arg(short, long, default_value_t = 1)]
        generations: u64,

        /// Print every intermediate generation
        #[arg(long)]
        show_evolution: bool,

        /// Write the final state as a flat JSON snapshot (square boards only)
        #[arg(long)]
        save_snapshot: Option<PathBuf>,
    },

    /// Print a pattern or snapshot with statistics
    Show {
        /// 0/1 text pattern file
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Flat JSON snapshot file
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// The built-in Gosper glider gun
        #[arg(long)]
        gun: bool,
    },

    /// Create the default configuration and example pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            width,
            height,
            delay,
            pattern,
            snapshot,
            gun,
            generations,
        } => run_command(
            config,
            width,
            height,
            delay,
            pattern,
            snapshot,
            gun,
            generations,
        ),
        Commands::Step {
            pattern,
            generations,
            show_evolution,
            save_snapshot,
        } => step_command(pattern, generations, show_evolution, save_snapshot),
        Commands::Show {
            pattern,
            snapshot,
            gun,
        } => show_command(pattern, snapshot, gun),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn board_from_snapshot(snapshot: &Snapshot) -> Result<Board> {
    let decoded = snapshot::decode(snapshot)?;
    Ok(Board::from_cells(decoded.width, decoded.height, decoded.cells)?)
}

fn run_command(
    config_path: PathBuf,
    width: Option<usize>,
    height: Option<usize>,
    delay: Option<f32>,
    pattern: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
    gun: bool,
    generations: u64,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        width,
        height,
        random_fill: None,
        step_delay_secs: delay,
    });
    settings.validate().context("configuration validation failed")?;

    let (observer, notifications) = ChannelObserver::channel();
    let mut session = Session::with_observer(&settings, observer);

    if gun {
        session.restore(&gosper_glider_gun())?;
        println!("{}", ColorOutput::info("loaded Gosper glider gun"));
    } else if let Some(path) = snapshot_path {
        session.restore(&load_snapshot_from_file(&path)?)?;
        println!(
            "{}",
            ColorOutput::info(&format!("loaded snapshot {}", path.display()))
        );
    } else if let Some(path) = pattern {
        session.adopt(load_board_from_file(&path)?);
        println!(
            "{}",
            ColorOutput::info(&format!("loaded pattern {}", path.display()))
        );
    } else {
        session.create(settings.board.width, settings.board.height)?;
        println!(
            "{}",
            ColorOutput::info(&format!(
                "created random {}x{} board",
                settings.board.width, settings.board.height
            ))
        );
    }

    session.toggle()?;
    for generation in notifications.iter() {
        let frame = session.with_board(|board| Ok(BoardFormatter::compact(board)))?;
        println!("generation {}", generation);
        print!("{}", frame);

        if generation >= generations {
            break;
        }
    }
    if session.is_running() {
        session.toggle()?;
    }

    let stats = session.with_board(|board| Ok(BoardFormatter::stats_line(board)))?;
    println!("{}", ColorOutput::success(&format!("stopped: {}", stats)));
    Ok(())
}

fn step_command(
    pattern: PathBuf,
    generations: u64,
    show_evolution: bool,
    save_snapshot: Option<PathBuf>,
) -> Result<()> {
    let mut board = load_board_from_file(&pattern)?;

    println!("initial state:");
    print!("{}", BoardFormatter::compact(&board));

    for _ in 0..generations {
        board.step();
        if show_evolution {
            println!("generation {}:", board.generation());
            print!("{}", BoardFormatter::compact(&board));
        }
    }

    if !show_evolution {
        println!("after {} generation(s):", generations);
        print!("{}", BoardFormatter::compact(&board));
    }
    println!("{}", BoardFormatter::stats_line(&board));

    if let Some(path) = save_snapshot {
        if board.width() != board.height() {
            anyhow::bail!(
                "flat snapshots are square-only; a {}x{} board cannot round-trip",
                board.width(),
                board.height()
            );
        }
        save_snapshot_to_file(&snapshot::encode(&board), &path)?;
        println!(
            "{}",
            ColorOutput::success(&format!("snapshot saved to {}", path.display()))
        );
    }

    Ok(())
}

fn show_command(
    pattern: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
    gun: bool,
) -> Result<()> {
    let board = if let Some(path) = pattern {
        load_board_from_file(&path)?
    } else if let Some(path) = snapshot_path {
        board_from_snapshot(&load_snapshot_from_file(&path)?)?
    } else if gun {
        board_from_snapshot(&gosper_glider_gun())?
    } else {
        anyhow::bail!("choose one of --pattern, --snapshot or --gun");
    };

    print!("{}", BoardFormatter::with_coords(&board));
    println!("{}", BoardFormatter::stats_line(&board));
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("failed to create default configuration")?;
        println!("created: {}", config_path.display());
    } else {
        println!("skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&patterns_dir).context("failed to create example patterns")?;
    save_snapshot_to_file(
        &gosper_glider_gun(),
        &patterns_dir.join("gosper_glider_gun.json"),
    )
    .context("failed to write Gosper glider gun snapshot")?;
    println!("created example patterns in: {}", patterns_dir.display());

    println!("{}", ColorOutput::success("setup complete"));
    println!("\nnext steps:");
    println!("1. edit {}", config_path.display());
    println!("2. cargo run -- run --config {}", config_path.display());
    println!("3. cargo run -- step --pattern patterns/blinker.txt --show-evolution");

    Ok(())
}
