use anyhow::{Context, Result};
use benchfit::benchmark::{group_families, parse_set};
use benchfit::cli::{Cli, OutputFormat};
use benchfit::core::{FitOptions, MeasurementRecord, ResponseVariable};
use benchfit::expression::parse_list;
use benchfit::service::{FitRequest, FitResponse};
use clap::Parser;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn read_records(path: &Path) -> Result<Vec<MeasurementRecord>> {
    if path.as_os_str() == "-" {
        return parse_set(io::stdin().lock()).context("failed to read stdin");
    }
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse_set(BufReader::new(file)).with_context(|| format!("failed to read {}", path.display()))
}

fn size_range(records: &[MeasurementRecord]) -> (f64, f64) {
    records
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.size), hi.max(r.size))
        })
}

fn print_text(family: &str, count: usize, response: &FitResponse, show_band: bool) {
    println!(
        "{family}: {count} records, R² = {:.6}, centered R² = {:.6}, MSE = {:.6e}",
        response.r_squared, response.centered_r_squared, response.mse
    );
    let width = response
        .result_model
        .iter()
        .map(|c| c.expression.len())
        .max()
        .unwrap_or(0);
    for coef in &response.result_model {
        println!(
            "  {:<width$}  {:>16.6} ± {:.6}",
            coef.expression, coef.beta, coef.half_width
        );
    }
    if show_band {
        println!("  {:>14}  {:>16}  {:>14}", "X", "Yhat", "ConfWidth");
        for point in &response.result_line {
            println!(
                "  {:>14.4}  {:>16.6}  {:>14.6}",
                point.x, point.y_hat, point.half_width
            );
        }
    }
    println!();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let options = FitOptions::builder()
        .confidence_level(args.confidence)
        .solver(args.solver.into())
        .build()
        .context("invalid --confidence")?;
    let expressions =
        parse_list(&args.xtransform, &options.variable_name).context("invalid --xtransform")?;
    let response: ResponseVariable = args.yvar.parse().context("invalid --yvar")?;
    let steps = args.nlinesteps.unwrap_or(options.default_steps);

    let mut records = Vec::new();
    for path in &args.files {
        records.extend(read_records(path)?);
    }
    let families = group_families(records);
    tracing::debug!(families = families.len(), "parsed benchmark input");
    if families.is_empty() {
        anyhow::bail!("no sized benchmark results found in input");
    }

    let mut results = BTreeMap::new();
    for (family, records) in families {
        let (min, max) = size_range(&records);
        let count = records.len();
        let request = FitRequest {
            response,
            lower: args.xlb.unwrap_or(min),
            upper: args.xub.unwrap_or(max),
            expressions: expressions.clone(),
            steps,
            records,
        };
        match request.execute(&options) {
            Ok(fit) => {
                tracing::info!(family = %family, records = count, r_squared = fit.r_squared, "fit family");
                if args.format == OutputFormat::Text {
                    print_text(&family, count, &fit, args.nlinesteps.is_some());
                }
                results.insert(family, fit);
            }
            Err(e) => {
                tracing::warn!(family = %family, error = %e, "fit failed");
                eprintln!("{family}: {e}");
            }
        }
    }

    if results.is_empty() {
        anyhow::bail!("no benchmark family could be fit");
    }
    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    Ok(())
}
