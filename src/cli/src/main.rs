use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{OptionExt, eyre};
use env_logger::TimestampPrecision;
use log::LevelFilter;
use twophase::{Cube, Solver, SolverConfig, init_solver};

/// Solves the 3x3x3 cube with Kociemba's two-phase algorithm
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The solver configuration file to use, in TOML format.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// The longest solution to search for. Overrides the configuration file.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    log_level: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a cube given by its 54 facelets in U R F D L B order, or by the
    /// moves that scramble it.
    Solve {
        /// The facelets, e.g. "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB".
        #[arg(required_unless_present = "moves")]
        facelets: Option<String>,
        /// A scramble to apply to a solved cube instead, e.g. "R U' F2".
        #[arg(long, short, conflicts_with = "facelets")]
        moves: Option<String>,
    },
    /// Print a scramble that produces a uniformly random cube.
    Scramble,
    /// Print the facelets of the cube an algorithm produces.
    Show {
        /// The algorithm to apply to a solved cube, e.g. "R U' F2".
        moves: String,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let mut config = match &cli.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }

    match cli.command {
        Commands::Solve { facelets, moves } => {
            let cube = match (facelets, moves) {
                (Some(facelets), _) => facelets.parse::<Cube>()?,
                (None, moves) => {
                    let moves = moves.ok_or_eyre("Either facelets or --moves is required")?;
                    *Cube::identity().apply_moves(&moves)?
                }
            };
            let solver = Solver::from_config(init_solver(), &config);
            match solver.solve(&cube) {
                Some(solution) => println!("{solution}"),
                None => return Err(eyre!("No solution within {} moves", config.max_depth)),
            }
        }
        Commands::Scramble => {
            let solver = Solver::from_config(init_solver(), &config);
            let scramble = solver
                .scramble(&mut fastrand::Rng::new())
                .ok_or_else(|| eyre!("No scramble within {} moves", config.max_depth))?;
            println!("{scramble}");
        }
        Commands::Show { moves } => {
            println!("{}", Cube::identity().apply_moves(&moves)?);
        }
    }

    Ok(())
}
