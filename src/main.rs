//! Invest Projection CLI
//!
//! Command-line interface for running investment projections

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use invest_projection::{
    export::{export_csv, write_report, DEFAULT_PAGE_ROWS},
    input::{format_currency, parse_input_number, sanitize_input},
    PeriodType, ProjectionError, ProjectionResult, RateType, ScenarioRunner, SimulationParameters,
};
use serde::Serialize;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RateUnit {
    Monthly,
    Annual,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PeriodUnit {
    Months,
    Years,
}

#[derive(Parser, Debug)]
#[command(name = "invest_projection", version, about = "Compound-interest projection with regressive IR withholding")]
struct Cli {
    /// JSON file with simulation parameters (flags override its fields)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Initial deposit, pt-BR format accepted (e.g. 5.000,00)
    #[arg(long)]
    initial: Option<String>,

    /// Monthly contribution
    #[arg(long)]
    monthly: Option<String>,

    /// Interest rate in percent (e.g. 11,5)
    #[arg(long)]
    rate: Option<String>,

    #[arg(long, value_enum)]
    rate_type: Option<RateUnit>,

    /// Investment horizon
    #[arg(long)]
    period: Option<String>,

    #[arg(long, value_enum)]
    period_type: Option<PeriodUnit>,

    /// Write the monthly table as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full paginated report instead of the short table
    #[arg(long)]
    report: bool,

    /// Print result and summary as JSON
    #[arg(long)]
    json: bool,

    /// Months shown in the console table
    #[arg(long, default_value_t = 12)]
    rows: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    params: &'a SimulationParameters,
    summary: Option<invest_projection::SummaryData>,
    result: &'a ProjectionResult,
}

fn main() -> Result<()> {
    env_logger::init();
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let params = build_params(&cli)?;
    log::debug!("parameters: {:?}", params);

    let runner = ScenarioRunner::new();
    let result = match runner.run(&params) {
        Ok(result) => result,
        Err(ProjectionError::Invalid(errors)) => {
            for error in &errors.errors {
                eprintln!("  {}", error);
            }
            bail!("{} invalid field(s)", errors.errors.len());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(path) = &cli.csv {
        export_csv(path, &result).with_context(|| format!("writing {}", path.display()))?;
    }

    if cli.json {
        let output = JsonOutput {
            params: &params,
            summary: result.summary(),
            result: &result,
        };
        serde_json::to_writer_pretty(io::stdout().lock(), &output)?;
        println!();
        return Ok(());
    }

    if cli.report {
        write_report(io::stdout().lock(), &result, DEFAULT_PAGE_ROWS)?;
        return Ok(());
    }

    print_table(&result, cli.rows);
    Ok(())
}

fn build_params(cli: &Cli) -> Result<SimulationParameters> {
    let mut params: SimulationParameters = match &cli.params {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimulationParameters::default(),
    };

    if let Some(v) = &cli.initial {
        params.initial_value = parse_flag(v);
    }
    if let Some(v) = &cli.monthly {
        params.monthly_value = parse_flag(v);
    }
    if let Some(v) = &cli.rate {
        params.interest_rate = parse_flag(v);
    }
    if let Some(v) = &cli.period {
        params.period = parse_flag(v);
    }
    if let Some(unit) = cli.rate_type {
        params.rate_type = match unit {
            RateUnit::Monthly => RateType::Monthly,
            RateUnit::Annual => RateType::Annual,
        };
    }
    if let Some(unit) = cli.period_type {
        params.period_type = match unit {
            PeriodUnit::Months => PeriodType::Months,
            PeriodUnit::Years => PeriodType::Years,
        };
    }

    Ok(params)
}

/// Flags go through the same mask as the form input
fn parse_flag(raw: &str) -> f64 {
    parse_input_number(&sanitize_input(raw))
}

fn print_table(result: &ProjectionResult, rows: usize) {
    println!("Projection Results ({} months):", result.len());
    println!(
        "{:>5} {:>16} {:>18} {:>18} {:>6} {:>16} {:>18}",
        "Month", "Interest", "Contributed", "Gross", "IR %", "Tax", "Net"
    );
    println!("{}", "-".repeat(103));

    for row in result.iter().take(rows) {
        println!(
            "{:>5} {:>16} {:>18} {:>18} {:>6.1} {:>16} {:>18}",
            row.month,
            format_currency(row.interest_this_period),
            format_currency(row.total_contributed),
            format_currency(row.gross_balance),
            row.tax_rate,
            format_currency(row.tax_withheld),
            format_currency(row.net_balance),
        );
    }

    if result.len() > rows {
        println!("... ({} more months)", result.len() - rows);
    }

    if let Some(summary) = result.summary() {
        println!("\nSummary:");
        println!("  Total Contributed: {}", format_currency(summary.total_contributed));
        println!("  Gross Interest:    {}", format_currency(summary.total_interest));
        println!("  Tax (IR):          {}", format_currency(summary.total_tax));
        println!("  Net Profit:        {}", format_currency(summary.net_profit()));
        println!("  Final Gross:       {}", format_currency(summary.final_gross_balance));
        println!("  Final Net:         {}", format_currency(summary.final_net_balance));
    }
}
