//! CLI argument parsing for benchfit

use crate::core::SolverType;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for fit results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable coefficient tables (default)
    Text,
    /// JSON object keyed by benchmark family
    Json,
}

/// Least-squares solver selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SolverArg {
    /// Column-scaled singular value decomposition
    Svd,
    /// Cholesky factorization of the normal equations
    Normal,
}

impl From<SolverArg> for SolverType {
    fn from(arg: SolverArg) -> Self {
        match arg {
            SolverArg::Svd => SolverType::Svd,
            SolverArg::Normal => SolverType::NormalEquations,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "benchfit")]
#[command(version)]
#[command(about = "Fit scaling models to Go benchmark output", long_about = None)]
pub struct Cli {
    /// Comma-separated basis expressions in N (e.g. "N * log(N), N, 1")
    #[arg(short = 'x', long = "xtransform", value_name = "EXPRS", default_value = "N, 1")]
    pub xtransform: String,

    /// Measured quantity to fit (NsPerOp, AllocedBytesPerOp, AllocsPerOp, MBPerS)
    #[arg(short = 'y', long = "yvar", value_name = "VAR", default_value = "NsPerOp")]
    pub yvar: String,

    /// Number of grid points for the prediction band (text output omits the band when unset)
    #[arg(short = 'n', long = "nlinesteps", value_name = "STEPS")]
    pub nlinesteps: Option<usize>,

    /// Lower bound of the prediction grid (default: smallest size in the family)
    #[arg(long = "xlb", value_name = "X", allow_negative_numbers = true)]
    pub xlb: Option<f64>,

    /// Upper bound of the prediction grid (default: largest size in the family)
    #[arg(long = "xub", value_name = "X", allow_negative_numbers = true)]
    pub xub: Option<f64>,

    /// Confidence level for coefficient and band half-widths
    #[arg(short = 'c', long = "confidence", value_name = "LEVEL", default_value_t = 0.95)]
    pub confidence: f64,

    /// Least-squares solver
    #[arg(long = "solver", value_enum, default_value = "svd")]
    pub solver: SolverArg,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Files containing `go test -bench` output ("-" reads stdin)
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["benchfit", "bench.txt"]);
        assert_eq!(cli.xtransform, "N, 1");
        assert_eq!(cli.yvar, "NsPerOp");
        assert_eq!(cli.nlinesteps, None);
        assert_eq!(cli.confidence, 0.95);
        assert_eq!(cli.solver, SolverArg::Svd);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.verbose);
        assert_eq!(cli.files, vec![PathBuf::from("bench.txt")]);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::parse_from([
            "benchfit",
            "--xtransform",
            "N * log(N), 1",
            "--yvar",
            "AllocsPerOp",
            "--nlinesteps",
            "20",
            "--xlb",
            "-5",
            "--xub",
            "100",
            "--confidence",
            "0.99",
            "--solver",
            "normal",
            "--format",
            "json",
            "-v",
            "a.txt",
            "b.txt",
        ]);
        assert_eq!(cli.xtransform, "N * log(N), 1");
        assert_eq!(cli.nlinesteps, Some(20));
        assert_eq!(cli.xlb, Some(-5.0));
        assert_eq!(cli.xub, Some(100.0));
        assert_eq!(SolverType::from(cli.solver), SolverType::NormalEquations);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert_eq!(cli.files.len(), 2);
    }

    #[test]
    fn test_files_required() {
        assert!(Cli::try_parse_from(["benchfit"]).is_err());
    }
}
