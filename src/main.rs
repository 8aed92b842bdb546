//! Patient Cost CLI
//!
//! Computes the patient and insurance shares for a single procedure or a CSV of claims

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use patient_cost::{
    claim::load_claims, plan::DeductibleStatus, report, Calculator, CalculatorConfig, CostInputs,
};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "patient_cost", version, about = "Patient out-of-pocket cost calculator")]
struct Cli {
    /// JSON config file ({"validation": ..., "rounding": ...})
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reject negative amounts and coinsurance outside 0-100%
    #[arg(long, global = true)]
    strict: bool,

    /// Round half-cent ties to even instead of away from zero
    #[arg(long, global = true)]
    half_even: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the cost share for one procedure
    #[command(allow_negative_numbers = true)]
    Calc(CalcArgs),
    /// Compute cost shares for every claim in a CSV file
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
struct CalcArgs {
    #[arg(long)]
    procedure_cost: f64,

    /// Deductible still owed (overrides --deductible/--paid-so-far)
    #[arg(long, conflicts_with_all = ["deductible", "paid_so_far"])]
    remaining_deductible: Option<f64>,

    /// Annual deductible
    #[arg(long, default_value_t = 0.0)]
    deductible: f64,

    /// Amount already paid toward the annual deductible
    #[arg(long, default_value_t = 0.0)]
    paid_so_far: f64,

    /// Coinsurance percentage
    #[arg(long, default_value_t = 0.0)]
    coinsurance: f64,

    #[arg(long, default_value_t = 0.0)]
    copay: f64,

    /// Out-of-pocket maximum
    #[arg(long)]
    oop_max: f64,

    /// Show each allocation step
    #[arg(long)]
    breakdown: bool,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Claims CSV file
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

fn load_config(cli: &Cli) -> Result<CalculatorConfig> {
    let config = match &cli.config {
        Some(path) => CalculatorConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => CalculatorConfig::default(),
    };

    let config = config.with_overrides(cli.strict, cli.half_even);
    log::debug!("Using config {:?}", config);
    Ok(config)
}

impl CalcArgs {
    /// Deductible as entered, unless the remainder was given directly
    fn deductible_status(&self) -> Option<DeductibleStatus> {
        match self.remaining_deductible {
            Some(_) => None,
            None => Some(DeductibleStatus::new(self.deductible, self.paid_so_far)),
        }
    }

    fn cost_inputs(&self) -> CostInputs {
        let remaining = match self.deductible_status() {
            Some(status) => status.remaining(),
            None => self.remaining_deductible.unwrap_or_default(),
        };
        CostInputs::new(
            self.procedure_cost,
            remaining,
            self.coinsurance,
            self.copay,
            self.oop_max,
        )
    }
}

fn run_calc(calculator: &Calculator, args: &CalcArgs) -> Result<()> {
    if let Some(status) = args.deductible_status() {
        calculator
            .config()
            .validation
            .check_deductible(&status)
            .context("Invalid deductible")?;
    }

    let inputs = args.cost_inputs();
    let breakdown = calculator
        .breakdown(&inputs)
        .context("Invalid calculation inputs")?;
    let share = breakdown.share(calculator.config().rounding);

    if args.breakdown {
        println!("{}", report::render_breakdown(&breakdown));
    }
    println!("Patient Pays: {}", report::format_currency(share.patient_cost));
    println!("Insurance Covers: {}", report::format_currency(share.insurance_covers));
    Ok(())
}

fn run_batch(calculator: &Calculator, args: &BatchArgs) -> Result<()> {
    let claims = load_claims(&args.input)
        .with_context(|| format!("Failed to load claims from {}", args.input.display()))?;
    log::info!("Loaded {} claims from {}", claims.len(), args.input.display());

    let outcomes = calculator.run_batch(&claims);

    match args.format {
        OutputFormat::Text => {
            for outcome in &outcomes {
                println!("{}", report::render_outcome(outcome));
            }
        }
        OutputFormat::Csv => report::write_csv(&outcomes, io::stdout().lock())?,
        OutputFormat::Json => println!("{}", report::to_json(&outcomes)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let calculator = Calculator::new(load_config(&cli)?);

    match &cli.command {
        Command::Calc(args) => run_calc(&calculator, args),
        Command::Batch(args) => run_batch(&calculator, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patient_cost::{RoundingMode, ValidationMode};

    fn calc_args(args: &[&str]) -> CalcArgs {
        let cli = Cli::try_parse_from(args).expect("arguments should parse");
        match cli.command {
            Command::Calc(calc) => calc,
            other => panic!("expected calc, got {other:?}"),
        }
    }

    #[test]
    fn test_remaining_deductible_used_directly() {
        let args = calc_args(&[
            "patient_cost", "calc", "--procedure-cost", "1000", "--remaining-deductible", "500",
            "--coinsurance", "20", "--oop-max", "10000",
        ]);
        assert_eq!(args.deductible_status(), None);
        assert_eq!(args.cost_inputs(), CostInputs::new(1000.0, 500.0, 20.0, 0.0, 10_000.0));
    }

    #[test]
    fn test_remaining_deductible_derived_from_plan() {
        let args = calc_args(&[
            "patient_cost", "calc", "--procedure-cost", "1000", "--deductible", "1500",
            "--paid-so-far", "1000", "--coinsurance", "20", "--oop-max", "10000",
        ]);
        assert_eq!(args.deductible_status(), Some(DeductibleStatus::new(1500.0, 1000.0)));
        assert_eq!(args.cost_inputs().remaining_deductible, 500.0);
    }

    #[test]
    fn test_remaining_deductible_conflicts_with_plan() {
        let result = Cli::try_parse_from([
            "patient_cost", "calc", "--procedure-cost", "1000", "--remaining-deductible", "500",
            "--deductible", "1500", "--oop-max", "10000",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_paid_so_far_parses_and_strict_rejects() {
        let args = calc_args(&[
            "patient_cost", "calc", "--procedure-cost", "1000", "--deductible", "1000",
            "--paid-so-far", "-500", "--oop-max", "10000",
        ]);
        let calculator = Calculator::new(CalculatorConfig::strict());
        assert!(run_calc(&calculator, &args).is_err());
        assert!(run_calc(&Calculator::default(), &args).is_ok());
    }

    #[test]
    fn test_global_flags_override_config() {
        let cli = Cli::try_parse_from([
            "patient_cost", "--strict", "--half-even", "calc", "--procedure-cost", "1", "--oop-max", "1",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.validation, ValidationMode::Strict);
        assert_eq!(config.rounding, RoundingMode::HalfEven);
    }
}
