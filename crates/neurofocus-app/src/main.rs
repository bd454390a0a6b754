//! Neurofocus command line
//!
//! Classifies concentration from EEG band power, either from precomputed
//! mean alpha/beta power or from a raw single-channel recording.
//!
//! # Usage
//!
//! ```bash
//! # Classify precomputed band power
//! neurofocus classify --alpha 1.0 --beta 4.2
//!
//! # Clean, measure and classify a recording (one sample per line)
//! neurofocus --config neurofocus.toml analyze --input window.txt
//!
//! # Show the threshold ladder and result codes
//! neurofocus --rank-scheme distinct thresholds
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use neurofocus_core::types::RankScheme;
use neurofocus_native::{ClassifierConfig, ConcentrationPipeline};

/// Neurofocus concentration classifier
#[derive(Parser, Debug)]
#[command(name = "neurofocus")]
#[command(author, version, about = "EEG concentration-level classifier", long_about = None)]
struct Cli {
    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// TOML config file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the config's rank scheme
    #[arg(long, value_enum)]
    rank_scheme: Option<SchemeArg>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify precomputed mean band power
    Classify {
        /// Mean alpha band power (must be non-zero)
        #[arg(long, allow_negative_numbers = true)]
        alpha: f64,

        /// Mean beta band power
        #[arg(long, allow_negative_numbers = true)]
        beta: f64,
    },

    /// Clean a raw recording, extract band power and classify it
    Analyze {
        /// Text file of samples separated by whitespace or newlines
        #[arg(short, long)]
        input: PathBuf,

        /// Sample rate in Hz (overrides the config)
        #[arg(long)]
        sample_rate: Option<f64>,
    },

    /// Print the threshold table
    Thresholds,
}

/// Rank scheme as accepted on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SchemeArg {
    /// NONE and LOW both report 0
    Observed,
    /// Every level reports its own code
    Distinct,
}

impl From<SchemeArg> for RankScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Observed => Self::Observed,
            SchemeArg::Distinct => Self::Distinct,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable lines
    Text,
    /// One JSON document
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Neurofocus v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_deref(), cli.rank_scheme)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Classify { alpha, beta } => classify(&mut out, &config, alpha, beta, cli.format),
        Commands::Analyze { input, sample_rate } => {
            analyze(&mut out, config, &input, sample_rate, cli.format)
        }
        Commands::Thresholds => print_thresholds(&mut out, &config, cli.format),
    }
}

/// Load the config file (or defaults) and apply command-line overrides
fn load_config(path: Option<&Path>, scheme: Option<SchemeArg>) -> anyhow::Result<ClassifierConfig> {
    let mut config = match path {
        Some(path) => ClassifierConfig::read(path)?,
        None => ClassifierConfig::default(),
    };

    if let Some(scheme) = scheme {
        config.rank_scheme = scheme.into();
    }
    config.validate()?;

    info!("Rank scheme: {}", config.rank_scheme.name());
    Ok(config)
}

/// Classify precomputed band power
fn classify(
    out: &mut impl Write,
    config: &ClassifierConfig,
    alpha: f64,
    beta: f64,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let classifier = config.build_classifier()?;
    let result = classifier
        .classify_detailed(alpha, beta)
        .context("Cannot classify band power")?;

    match format {
        OutputFormat::Text => writeln!(out, "{}", result.rank)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&result)?)?,
    }

    Ok(())
}

/// Run the full pipeline over a recording
fn analyze(
    out: &mut impl Write,
    mut config: ClassifierConfig,
    input: &Path,
    sample_rate: Option<f64>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if let Some(rate) = sample_rate {
        config.preprocessing.sample_rate_hz = rate;
    }

    let samples = read_samples(input)?;
    info!("Read {} samples from {}", samples.len(), input.display());

    let mut pipeline = ConcentrationPipeline::from_config(&config)?;
    let analysis = pipeline
        .process_window(&samples)
        .with_context(|| format!("Cannot analyze {}", input.display()))?;

    match format {
        OutputFormat::Text => {
            let c = analysis.classification;
            writeln!(out, "level: {}", c.level.name())?;
            writeln!(out, "rank: {}", c.rank)?;
            writeln!(out, "ratio: {:.4}", c.ratio)?;
            writeln!(out, "alpha_power: {:.6e}", analysis.band_powers.alpha)?;
            writeln!(out, "beta_power: {:.6e}", analysis.band_powers.beta)?;
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&analysis)?)?,
    }

    Ok(())
}

/// Print the threshold ladder, most severe first
fn print_thresholds(
    out: &mut impl Write,
    config: &ClassifierConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let table = config.build_table()?;

    match format {
        OutputFormat::Text => {
            writeln!(out, "rank scheme: {}", table.scheme().name())?;
            for tier in table.iter() {
                writeln!(out, "{:<12} rank {}  ratio >= {}", tier.level.name(), tier.rank, tier.min_ratio)?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&table)?)?,
    }

    Ok(())
}

/// Read whitespace-separated samples from a text file
fn read_samples(path: &Path) -> anyhow::Result<Vec<f64>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_samples(&text)
}

/// Parse whitespace-separated samples; `#` starts a comment
fn parse_samples(text: &str) -> anyhow::Result<Vec<f64>> {
    let mut samples = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let data = line.split('#').next().unwrap_or_default();
        for token in data.split_whitespace() {
            let value: f64 = token
                .parse()
                .with_context(|| format!("Line {}: invalid sample {token:?}", line_no + 1))?;
            samples.push(value);
        }
    }

    anyhow::ensure!(!samples.is_empty(), "No samples found");
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_parses_classify() {
        let cli = Cli::parse_from(["neurofocus", "classify", "--alpha", "1.0", "--beta", "4.5"]);
        assert!(matches!(cli.command, Commands::Classify { alpha, beta } if alpha == 1.0 && beta == 4.5));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.rank_scheme.is_none());
    }

    #[test]
    fn test_cli_parses_global_options() {
        let cli = Cli::parse_from([
            "neurofocus",
            "--rank-scheme",
            "distinct",
            "--format",
            "json",
            "thresholds",
        ]);
        assert_eq!(cli.rank_scheme, Some(SchemeArg::Distinct));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Thresholds));
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_samples() {
        let samples = parse_samples("1.0 2.5\n# header\n-3e-1  4 # trailing\n\n").unwrap();
        assert_eq!(samples, vec![1.0, 2.5, -0.3, 4.0]);
    }

    #[test]
    fn test_parse_samples_rejects_garbage() {
        let err = parse_samples("1.0\nabc\n").unwrap_err();
        assert!(err.to_string().contains("Line 2"));
        assert!(parse_samples("# only comments\n").is_err());
    }

    #[test]
    fn test_load_config_applies_scheme_override() {
        let config = load_config(None, Some(SchemeArg::Distinct)).unwrap();
        assert_eq!(config.rank_scheme, RankScheme::Distinct);

        let config = load_config(None, None).unwrap();
        assert_eq!(config.rank_scheme, RankScheme::Observed);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[thresholds]\nlow = 1.0").unwrap();

        let config = load_config(Some(file.path()), Some(SchemeArg::Distinct)).unwrap();
        let classifier = config.build_classifier().unwrap();
        assert_eq!(classifier.classify(1.0, 2.0).unwrap(), 1);
    }

    fn run(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn beta_dominated_recording() -> tempfile::NamedTempFile {
        use std::f64::consts::PI;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        for i in 0..1024 {
            let t = f64::from(i) / 250.0;
            let sample = 0.3 * (2.0 * PI * 10.0 * t).sin() + (2.0 * PI * 20.0 * t).sin();
            writeln!(file, "{sample}").unwrap();
        }
        file
    }

    #[test]
    fn test_classify_prints_rank() {
        let config = ClassifierConfig::default();
        let text = run(|out| classify(out, &config, 1.0, 4.5, OutputFormat::Text));
        assert_eq!(text, "3\n");

        let json = run(|out| classify(out, &config, 1.0, 4.5, OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rank"], 3);
        assert_eq!(value["level"], "REALLY_HIGH");
    }

    #[test]
    fn test_classify_zero_alpha_fails() {
        let config = ClassifierConfig::default();
        let mut out = Vec::new();
        assert!(classify(&mut out, &config, 0.0, 1.0, OutputFormat::Text).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_thresholds_print_scheme_and_ladder() {
        let text = run(|out| print_thresholds(out, &ClassifierConfig::default(), OutputFormat::Text));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "rank scheme: observed");
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("REALLY_HIGH") && lines[1].contains("rank 3"));
        assert!(lines[1].ends_with("ratio >= 4.5"));
        assert!(lines[5].starts_with("NONE") && lines[5].contains("rank 0"));

        let config = load_config(None, Some(SchemeArg::Distinct)).unwrap();
        let text = run(|out| print_thresholds(out, &config, OutputFormat::Text));
        assert!(text.starts_with("rank scheme: distinct\n"));
        assert!(text.lines().nth(1).unwrap().contains("rank 4"));
    }

    #[test]
    fn test_analyze_prints_classification() {
        let file = beta_dominated_recording();
        let text = run(|out| {
            analyze(out, ClassifierConfig::default(), file.path(), Some(250.0), OutputFormat::Text)
        });

        assert!(text.contains("level: REALLY_HIGH\n"));
        assert!(text.contains("rank: 3\n"));
        assert!(text.contains("ratio: "));
    }

    #[test]
    fn test_analyze_json_output() {
        let file = beta_dominated_recording();
        let json = run(|out| {
            analyze(out, ClassifierConfig::default(), file.path(), None, OutputFormat::Json)
        });

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["classification"]["rank"], 3);
        assert!(value["band_powers"]["beta"].as_f64().unwrap() > value["band_powers"]["alpha"].as_f64().unwrap());
    }

    #[test]
    fn test_scheme_override_warns_once() {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

        impl Write for CapturedLogs {
            fn write(&mut self, data: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(data);
                Ok(data.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rank_scheme = \"distinct\"\n[thresholds]\nlow = 1.0").unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || {
            load_config(Some(file.path()), Some(SchemeArg::Observed))
        })
        .unwrap();
        assert_eq!(config.rank_scheme, RankScheme::Observed);

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text.matches("share result code 0").count(), 1);
    }
}
