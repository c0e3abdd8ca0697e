//! Smolder command-line interface.
//!
//! Decode an image into a heat grid, relax it to a steady state, and
//! render the result:
//! ```sh
//! smolder plate.png
//! smolder plate.png -o cooked.png --workers 4
//! smolder plate.png --serial --max-iterations 100
//! ```

use std::path::PathBuf;

use clap::Parser;

use smolder_engine::{solve, solve_distributed, RunConfig, RunReport};

#[derive(Parser)]
#[command(name = "smolder")]
#[command(about = "Steady-state heat diffusion over an image-defined grid")]
#[command(version)]
struct Cli {
    /// Input image: red = heat source, green = initial temperature,
    /// blue = conduction factor.
    input: PathBuf,

    /// Output image path.
    #[arg(short, long, default_value = "result.png")]
    output: PathBuf,

    /// Worker thread count (default: auto-detect).
    #[arg(short, long)]
    workers: Option<usize>,

    /// Additive bias applied to every neighbor-average target.
    #[arg(long)]
    noise: Option<f32>,

    /// Convergence threshold (mean absolute change per cell).
    #[arg(long)]
    threshold: Option<f32>,

    /// Hard cap on the number of iterations.
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Run on the calling thread without partitioning.
    #[arg(long)]
    serial: bool,
}

impl Cli {
    fn config(&self) -> RunConfig {
        let defaults = RunConfig::default();
        RunConfig {
            noise: self.noise.unwrap_or(defaults.noise),
            threshold: self.threshold.unwrap_or(defaults.threshold),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            workers: self.workers,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.config();
    config.validate()?;

    let grid = smolder_raster::decode(&cli.input)?;
    log::info!(
        "loaded {}x{} grid from {}",
        grid.width(),
        grid.height(),
        cli.input.display()
    );
    if !grid.has_zero_margin() {
        log::warn!(
            "input edge has conductive cells; ring wraparound at the top and \
             bottom rows may bleed into the result"
        );
    }

    let (grid, state) = if cli.serial {
        let mut grid = grid;
        let state = solve(&mut grid, &config)?;
        (grid, state)
    } else {
        log::info!("running with {} workers", config.resolved_workers());
        let outcome = solve_distributed(grid, &config)?;
        (outcome.grid, outcome.state)
    };

    let report = RunReport::from_run(&grid, state);
    println!(
        "iteration #{}, mean adjustment = {} / 256, t_min = {}, t_max = {}",
        report.iterations,
        report.metric * 256.0,
        report.min_temperature,
        report.max_temperature
    );

    // The run's result is already printed; a failed write still exits
    // nonzero but loses nothing upstream of the encoder.
    smolder_raster::encode(&cli.output, &grid)?;
    log::info!("wrote {}", cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_land_in_the_config() {
        let cli = Cli::parse_from([
            "smolder",
            "in.png",
            "--workers",
            "3",
            "--noise",
            "0.5",
            "--max-iterations",
            "7",
        ]);
        let config = cli.config();
        assert_eq!(config.workers, Some(3));
        assert_eq!(config.noise, 0.5);
        assert_eq!(config.max_iterations, 7);
        // Untouched fields keep their defaults.
        assert_eq!(config.threshold, RunConfig::default().threshold);
    }

    #[test]
    fn defaults_mirror_the_run_config() {
        let cli = Cli::parse_from(["smolder", "in.png"]);
        assert!(!cli.serial);
        assert_eq!(cli.output, PathBuf::from("result.png"));
        assert_eq!(cli.config().max_iterations, 5000);
    }
}
