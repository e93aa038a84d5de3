use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use course_quiz::config::LOG_FILE_ENV;
use course_quiz::{load_bank, Config, Runner};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a question bank as a quiz in the terminal
    Run(RunArgs),
    /// Validate question banks and report authoring defects
    Check {
        /// JSON question banks to validate
        #[arg(required = true)]
        banks: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// JSON file to load the questions from
    bank: PathBuf,

    /// Number of questions to draw
    #[arg(short = 'n', long)]
    questions: Option<usize>,

    /// Draw questions in random order, balanced across categories
    #[arg(long)]
    shuffle: bool,

    /// Time limit in seconds
    #[arg(long)]
    time_limit: Option<u64>,

    /// Percentage needed to pass
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pass_threshold: Option<u8>,

    /// Seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the quiz)
    #[arg(long, env = LOG_FILE_ENV)]
    log_file: Option<PathBuf>,
}

impl From<RunArgs> for Config {
    fn from(args: RunArgs) -> Self {
        Self {
            bank_path: args.bank,
            questions: args.questions,
            shuffle: args.shuffle,
            time_limit: args.time_limit,
            pass_threshold: args.pass_threshold,
            seed: args.seed,
            log_file: args.log_file,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Run(args) => run(args.into()),
        Command::Check { banks } => check(&banks),
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "course-quiz failed");
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> anyhow::Result<ExitCode> {
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    let runner = Runner::from_config(&config)
        .with_context(|| format!("cannot start quiz from {}", config.bank_path.display()))?;
    runner.run()?;

    Ok(ExitCode::SUCCESS)
}

fn check(banks: &[PathBuf]) -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    let failures = check_banks(banks, &mut io::stdout().lock())?;

    info!(checked = banks.len(), failures, "check complete");
    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Validate each bank, writing one report line per bank to `out`.
/// Returns how many failed.
fn check_banks(banks: &[PathBuf], out: &mut impl Write) -> io::Result<usize> {
    let mut failures = 0;
    for path in banks {
        match load_bank(path) {
            Ok(bank) => writeln!(
                out,
                "ok     {} ({} questions, \"{}\")",
                path.display(),
                bank.len(),
                bank.exam.exam_title
            )?,
            Err(err) => {
                failures += 1;
                writeln!(out, "error  {}", err)?;
            }
        }
    }
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    fn demo_bank() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/manual-handling.json")
    }

    #[test]
    fn test_check_reports_each_bank() {
        let broken = std::env::temp_dir().join(format!("course-quiz-broken-{}.json", std::process::id()));
        fs::write(&broken, r#"[{"id": 1, "question": "A", "options": ["a"], "correctAnswer": 0}]"#).unwrap();

        let banks = vec![demo_bank(), broken.clone(), PathBuf::from("no/such/bank.json")];
        let mut out = Vec::new();
        let failures = check_banks(&banks, &mut out).unwrap();
        fs::remove_file(&broken).unwrap();

        let report = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(failures, 2);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ok "));
        assert!(lines[0].contains("6 questions"));
        assert!(lines[1].starts_with("error "));
        assert!(lines[1].contains("course-quiz-broken"));
        assert!(lines[2].starts_with("error "));
        assert!(lines[2].contains("bank.json"));
    }

    #[test]
    fn test_check_clean_bank_has_no_failures() {
        let mut out = Vec::new();
        assert_eq!(check_banks(&[demo_bank()], &mut out).unwrap(), 0);
        assert!(String::from_utf8(out).unwrap().starts_with("ok "));
    }

    #[test]
    fn test_cli_parses_check() {
        let cli = Cli::try_parse_from(["course-quiz", "check", "a.json", "b.json"]).unwrap();
        assert!(matches!(cli.command, Command::Check { banks } if banks.len() == 2));
        assert!(Cli::try_parse_from(["course-quiz", "check"]).is_err());
    }
}
