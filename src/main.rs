//! Cell Culture CLI - Run a population in the terminal.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use cell_culture::{
    compute::{Population, PopulationStats, RuleSelector},
    render::{NullRenderer, Renderer, TerminalRenderer},
    schema::{Dimensions, ExecutionMode, SimulationConfig},
    simulation::Simulation,
};

/// Bounded Game of Life with pluggable rules.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of generations to run.
    #[arg(short, long, value_name = "COUNT")]
    generations: Option<u64>,
    /// Interior grid size expressed as WIDTHxHEIGHT (for example 80x24).
    #[arg(short, long, value_name = "WIDTHxHEIGHT")]
    size: Option<Dimensions>,
    /// Seed file to load instead of a random fill.
    #[arg(short, long, value_name = "SEED")]
    file: Option<PathBuf>,
    /// Rule for even generations: conway, von_neumann or erik.
    #[arg(long, alias = "er", value_name = "RULE")]
    even_rule: Option<String>,
    /// Rule for odd generations. Defaults to the even rule.
    #[arg(long, alias = "or", value_name = "RULE")]
    odd_rule: Option<String>,
    /// JSON configuration file. Flags given here override its values.
    #[arg(short, long, value_name = "JSON")]
    config: Option<PathBuf>,
    /// Fixed seed for the random fill.
    #[arg(long, value_name = "NUMBER")]
    rng_seed: Option<u64>,
    /// Evaluate and commit generations in parallel.
    #[arg(long)]
    parallel: bool,
    /// Milliseconds to pause between rendered generations.
    #[arg(long, value_name = "MILLISECONDS")]
    delay_ms: Option<u64>,
    /// Skip terminal drawing and only print the final statistics.
    #[arg(long)]
    headless: bool,
    /// Print the default configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Resolve the effective configuration: defaults, then the JSON file,
    /// then flags.
    fn resolve(&self) -> anyhow::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SimulationConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(size) = self.size {
            config.width = size.width;
            config.height = size.height;
        }
        if let Some(file) = &self.file {
            config.seed_file = Some(file.clone());
        }
        if let Some(rule) = &self.even_rule {
            config.even_rule = rule.clone();
        }
        if let Some(rule) = &self.odd_rule {
            config.odd_rule = Some(rule.clone());
        }
        if let Some(seed) = self.rng_seed {
            config.random.rng_seed = Some(seed);
        }
        if self.parallel {
            config.execution = ExecutionMode::Parallel;
        }
        if let Some(delay) = self.delay_ms {
            config.frame_delay_ms = delay;
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<SimulationConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

fn run<R: Renderer>(
    population: Population,
    renderer: R,
    config: &SimulationConfig,
    delay: Duration,
) -> anyhow::Result<PopulationStats> {
    let mut simulation =
        Simulation::new(population, renderer, config.generations).with_frame_delay(delay);
    simulation.run().context("Rendering failed")
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let cli = Cli::parse();
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&SimulationConfig::default())?);
        return Ok(());
    }

    let config = cli.resolve()?;
    let selector = RuleSelector::new(config.aging);
    let population =
        Population::initiate(&config, &selector).context("Failed to initiate population")?;

    let stats = if cli.headless {
        run(population, NullRenderer, &config, Duration::ZERO)?
    } else {
        let delay = Duration::from_millis(config.frame_delay_ms);
        run(population, TerminalRenderer::stdout(), &config, delay)?
    };

    println!();
    println!("Final state:");
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "cell-culture",
            "-g",
            "7",
            "-s",
            "10x4",
            "--even-rule",
            "erik",
            "--odd-rule",
            "von_neumann",
            "--rng-seed",
            "3",
            "--parallel",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.generations, 7);
        assert_eq!(config.dimensions(), Dimensions::new(10, 4));
        assert_eq!(config.even_rule, "erik");
        assert_eq!(config.odd_rule.as_deref(), Some("von_neumann"));
        assert_eq!(config.random.rng_seed, Some(3));
        assert_eq!(config.execution, ExecutionMode::Parallel);
    }

    #[test]
    fn test_short_rule_aliases() {
        let cli = Cli::parse_from(["cell-culture", "--er", "erik", "--or", "von_neumann"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.even_rule, "erik");
        assert_eq!(config.odd_rule.as_deref(), Some("von_neumann"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"generations": 40, "width": 12, "frame_delay_ms": 5}"#)
            .unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["cell-culture", "-c", path, "-g", "2"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.generations, 2);
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 24);
        assert_eq!(config.frame_delay_ms, 5);
    }

    #[test]
    fn test_bad_size_rejected() {
        assert!(Cli::try_parse_from(["cell-culture", "-s", "10by4"]).is_err());
        assert!(Cli::try_parse_from(["cell-culture", "-s", "0x4"]).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::parse_from(["cell-culture", "-c", "/nonexistent/config.json"]);
        assert!(cli.resolve().is_err());
    }
}
