//! lamina-cli: Compute laminations of the circle from the command line.
//!
//! Loads a lamination description (base, branch specs, initial leaves),
//! builds the inverse branches and prints successive pullback generations.
//! Also parses single fractions and checks that every generation maps
//! forward onto its parent.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use lamina_branch::BranchBuilder;
use lamina_core::{CircularFraction, Polygon};
use lamina_pullback::engine::{maps_onto, Lamination};
use lamina_pullback::{LaminationConfig, LaminationSetup};
use tracing::{debug, info};

/// Laminations of the circle under base-b digit shifts.
#[derive(Parser, Debug)]
#[command(name = "lamina-cli")]
#[command(version, about = "Pull back polygons through the inverse branches of the digit shift")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print pullback generations of a lamination.
    Run(RunArgs),
    /// Parse one fraction and print its canonical form.
    Parse(ParseArgs),
    /// Check that every generation maps forward onto the one before it.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct DescriptionArgs {
    /// Lamination description (default: <config dir>/lamina/lamination.toml,
    /// or the binary rabbit when that file does not exist).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of generations, counting the initial leaves.
    #[arg(short, long)]
    generations: Option<usize>,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    description: DescriptionArgs,

    /// Output format: text, rational or json.
    #[arg(short, long, default_value = "text")]
    output: String,
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// Base of the expansion.
    #[arg(short, long)]
    base: u32,

    /// Fraction text, e.g. `1_010` or `3,11_7`.
    text: String,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    description: DescriptionArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Rational,
    Json,
}

fn parse_output(s: &str) -> Result<OutputFormat> {
    match s {
        "text" => Ok(OutputFormat::Text),
        "rational" => Ok(OutputFormat::Rational),
        "json" => Ok(OutputFormat::Json),
        other => bail!("Unknown output format: {other} (expected text, rational or json)"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Parse(args) => parse(args),
        Commands::Check(args) => check(args),
    }
}

/// Load the description named on the command line, or the default one.
fn load_setup(args: &DescriptionArgs) -> Result<LaminationSetup> {
    let path = args.config.clone().unwrap_or_else(LaminationConfig::default_path);
    let mut setup = if args.config.is_some() || path.exists() {
        LaminationSetup::open(&path).with_context(|| format!("Failed to load description: {}", path.display()))?
    } else {
        debug!(path = %path.display(), "no description file, using the binary rabbit");
        LaminationConfig::default().resolve()?
    };

    if let Some(generations) = args.generations {
        setup.generations = generations;
    }
    info!(
        base = setup.base,
        specs = setup.specs.len(),
        leaves = setup.leaves.len(),
        generations = setup.generations,
        "loaded lamination description"
    );
    Ok(setup)
}

fn lamination(setup: LaminationSetup) -> Lamination {
    let branches = BranchBuilder::new(setup.base).build(setup.specs);
    Lamination::new(setup.leaves, branches)
}

fn run(args: RunArgs) -> Result<()> {
    let format = parse_output(&args.output)?;
    let setup = load_setup(&args.description)?;
    let generations = setup.generations;
    let lamination = lamination(setup);

    let mut reports = Vec::new();
    for (index, leaves) in lamination.iter().take(generations).enumerate() {
        match format {
            OutputFormat::Text => print_generation(index, &leaves, Polygon::to_string),
            OutputFormat::Rational => print_generation(index, &leaves, Polygon::rational_string),
            OutputFormat::Json => reports.push(serde_json::json!({
                "generation": index,
                "leaves": leaves,
            })),
        }
    }

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

fn print_generation(index: usize, leaves: &[Polygon], render: fn(&Polygon) -> String) {
    println!("generation {index} ({} leaves)", leaves.len());
    for leaf in leaves {
        println!("  {}", render(leaf));
    }
}

fn parse(args: ParseArgs) -> Result<()> {
    let fraction = CircularFraction::parse(args.base, &args.text)
        .with_context(|| format!("Failed to parse {:?} in base {}", args.text, args.base))?;

    println!("canonical: {fraction}");
    println!("rational:  {}", fraction.rational_string());
    println!("approx:    {}", fraction.to_f64());
    Ok(())
}

fn check(args: CheckArgs) -> Result<()> {
    let setup = load_setup(&args.description)?;
    let generations = setup.generations;
    let mut current = lamination(setup);

    for _ in 1..generations {
        let next = current.advance();
        if !maps_onto(next.leaves(), current.leaves()) {
            bail!(
                "Generation {} does not map forward onto generation {}",
                next.generation(),
                current.generation()
            );
        }
        println!("generation {}: ok ({} leaves)", next.generation(), next.leaves().len());
        current = next;
    }
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Pass `format = "json"` for structured JSON output. Any other value
/// defaults to human-readable text. `RUST_LOG` overrides `level_str`.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_formats() {
        assert_eq!(parse_output("text").unwrap(), OutputFormat::Text);
        assert_eq!(parse_output("rational").unwrap(), OutputFormat::Rational);
        assert_eq!(parse_output("json").unwrap(), OutputFormat::Json);
        assert!(parse_output("yaml").is_err());
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::parse_from(["lamina-cli", "run", "--generations", "5", "--output", "json"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.description.generations, Some(5));
        assert_eq!(args.output, "json");
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn global_log_flags_after_subcommand() {
        let cli = Cli::parse_from(["lamina-cli", "parse", "--base", "2", "1_010", "--log-format", "json"]);
        assert_eq!(cli.log_format, "json");
        let Commands::Parse(args) = cli.command else {
            panic!("expected parse");
        };
        assert_eq!(args.base, 2);
        assert_eq!(args.text, "1_010");
    }

    #[test]
    fn default_lamination_prints_rabbit() {
        let setup = LaminationConfig::default().resolve().unwrap();
        let generations: Vec<_> = lamination(setup).iter().take(3).map(|g| g.len()).collect();
        assert_eq!(generations, vec![1, 2, 4]);
    }
}
