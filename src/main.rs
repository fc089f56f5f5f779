// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use answer_checker::app_config::{self, Config};
use answer_checker::backend::{EvaluationBackend, HttpBackend};
use answer_checker::prompt::Prompter;
use answer_checker::review;
use answer_checker::submission::{Attachment, FormVariant, SubmissionForm};
use answer_checker::view::SubmissionView;

/// CLI Wrapper for FormVariant to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFormVariant {
    Paired,
    Single,
}

impl From<CliFormVariant> for FormVariant {
    fn from(cli_variant: CliFormVariant) -> Self {
        match cli_variant {
            CliFormVariant::Paired => FormVariant::Paired,
            CliFormVariant::Single => FormVariant::Single,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit an answer paper for evaluation (default command)
    #[command(alias = "submit")]
    Evaluate(EvaluateArgs),

    /// Generate shell completions for answer-checker
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct EvaluateArgs {
    /// Student name
    #[arg(short = 'n', long)]
    student_name: Option<String>,

    /// Subject of the paper
    #[arg(short, long)]
    subject: Option<String>,

    /// Answer script PDF
    #[arg(short, long, value_name = "PDF")]
    answer_script: Option<PathBuf>,

    /// Solution set PDF (paired form only)
    #[arg(short = 'k', long, value_name = "PDF")]
    solution_set: Option<PathBuf>,

    /// Form variant to use
    #[arg(short, long, value_enum)]
    variant: Option<CliFormVariant>,

    /// Evaluation endpoint, overrides the configuration
    #[arg(short, long, value_name = "URL")]
    endpoint: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Prompt for fields missing from the command line
    #[arg(short, long)]
    interactive: bool,

    /// Save the review PDF after evaluation, optionally into DIR
    #[arg(short, long, value_name = "DIR", num_args = 0..=1)]
    download_review: Option<Option<PathBuf>>,
}

/// answer-checker - submit answer papers to the grading service
#[derive(Parser, Debug)]
#[command(name = "answer-checker")]
#[command(version)]
#[command(about = "Answer paper submission client")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "answer-checker sends a student's answer paper to the grading service and shows the score.

EXAMPLES:
    answer-checker -n Alice -s Math -a answers.pdf -k solutions.pdf
    answer-checker -v single -n Alice -s Math -a answers.pdf -d
    answer-checker -i                                   # Prompt for every field
    answer-checker -e http://grader:5000/evaluate -i    # Use another backend
    answer-checker completions bash > answer-checker.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

FORM VARIANTS:
    paired - answer script and solution set (default)
    single - answer script only; the result echoes name and subject")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    evaluate: EvaluateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Prefix and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("✖", "1;31"),
            Level::Warn => ("⚠", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (prefix, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, prefix, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize the logger once with the widest filter, the effective level is set below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "answer-checker", &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Evaluate(args)) => run_evaluate(args).await,
        None => run_evaluate(cli.evaluate).await,
    }
}

async fn run_evaluate(options: EvaluateArgs) -> Result<ExitCode> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    debug!("Using {} form against {}", config.variant, config.endpoint);

    let form = build_form(&options)?;
    let mut view = SubmissionView::with_form(config.variant, form);

    if options.interactive {
        Prompter::terminal()
            .fill_missing(view.form_mut(), config.variant)
            .context("Failed to read form input")?;
    }

    let backend = HttpBackend::from_config(&config)?;

    let submission = match view.begin_submission() {
        Ok(submission) => submission,
        Err(e) => {
            warn!("{}", e);
            println!("{}", view.render());
            return Ok(ExitCode::FAILURE);
        }
    };

    info!("Submitting {} for evaluation to {}", submission.student_name, backend.endpoint());
    let spinner = busy_spinner(view.variant().busy_label());
    let outcome = backend.evaluate(&submission).await;
    spinner.finish_and_clear();
    view.finish_submission(outcome);

    println!("{}", view.render());

    let Some(result) = view.result() else {
        return Ok(ExitCode::FAILURE);
    };

    if let Some(dir) = &options.download_review {
        let dir = dir.clone().unwrap_or_else(|| config.review_dir());
        let client = backend.client();
        match review::download_review(client, backend.endpoint_url(), result, &dir).await {
            Ok(Some(path)) => println!("Review PDF saved to {}", path.display()),
            Ok(None) => warn!("The evaluation result has no review PDF"),
            Err(e) => {
                error!("{}", e);
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Load or create the configuration, then apply command line overrides
fn load_config(options: &EvaluateArgs) -> Result<Config> {
    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(variant) = &options.variant {
        config.variant = variant.clone().into();
    }

    if let Some(endpoint) = &options.endpoint {
        config.endpoint = endpoint.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    Ok(config)
}

/// Form prefilled from the command line
fn build_form(options: &EvaluateArgs) -> Result<SubmissionForm> {
    let mut form = SubmissionForm::new(
        options.student_name.clone().unwrap_or_default(),
        options.subject.clone().unwrap_or_default(),
    );

    if let Some(path) = &options.answer_script {
        form.answer_script = Some(
            Attachment::from_path(path)
                .with_context(|| format!("Cannot attach answer script {}", path.display()))?,
        );
    }

    if let Some(path) = &options.solution_set {
        form.solution_set = Some(
            Attachment::from_path(path)
                .with_context(|| format!("Cannot attach solution set {}", path.display()))?,
        );
    }

    Ok(form)
}

/// Spinner shown while the request is in flight
fn busy_spinner(label: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(label.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
