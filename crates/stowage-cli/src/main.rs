//! Stowage CLI: run a local file through the upload acceptance pipeline.
//!
//! Configuration comes from `--config` (JSON with the usual upload keys) or, when
//! absent, from `STOWAGE_*` environment variables.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use stowage_cli::render::{render, ErrorFormat};
use stowage_cli::{init_tracing, stage_copy};
use stowage_core::{ErrorMetadata, FileDescriptor, MessageCatalog, UploadConfig};
use stowage_processing::image::guess_mime_type;
use stowage_processing::{describe_temp_file, UploadPipeline, UploadValidator};

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

#[derive(Parser)]
#[command(name = "stowage", about = "Validate uploads and move them into place")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a file and store it in the upload directory
    Upload {
        #[command(flatten)]
        input: InputArgs,
        /// Upload directory, overriding the configuration
        #[arg(long)]
        upload_dir: Option<PathBuf>,
        /// Move the file instead of storing a copy
        #[arg(long = "move")]
        move_source: bool,
    },
    /// Validate a file without storing it
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// File to upload
    file: PathBuf,
    /// JSON upload configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON map of custom messages keyed by rule
    #[arg(long)]
    messages: Option<PathBuf>,
    /// Client filename (defaults to the file's own name)
    #[arg(long)]
    name: Option<String>,
    /// MIME type (guessed from the extension for images)
    #[arg(long)]
    mime: Option<String>,
    /// How to print validation errors
    #[arg(long, value_enum, default_value = "text")]
    format: ErrorFormat,
    #[arg(long, default_value = "")]
    start_tag: String,
    #[arg(long, default_value = "")]
    end_tag: String,
    /// Print a JSON report instead of rendered errors
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    stored: bool,
    file_name: &'a str,
    path: Option<&'a Path>,
    errors: &'a [String],
}

impl InputArgs {
    fn load(&self) -> anyhow::Result<(UploadConfig, MessageCatalog)> {
        let config = match &self.config {
            Some(path) => UploadConfig::from_json_file(path)
                .with_context(|| format!("Load configuration {}", path.display()))?,
            None => UploadConfig::from_env().context("Load configuration from environment")?,
        };

        let messages = match &self.messages {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Read messages {}", path.display()))?;
                MessageCatalog::from_json_str(&json)
                    .with_context(|| format!("Parse messages {}", path.display()))?
            }
            None => MessageCatalog::new(),
        };

        Ok((config, messages))
    }

    fn client_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }

    fn mime_type(&self) -> String {
        self.mime
            .clone()
            .or_else(|| guess_mime_type(&self.file).map(str::to_string))
            .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string())
    }

    fn print(&self, report: &Report<'_>) -> anyhow::Result<()> {
        if self.json {
            let out = serde_json::to_string_pretty(report).context("Serialize report")?;
            println!("{}", out);
        } else if report.errors.is_empty() {
            match report.path {
                Some(path) => println!("{}", path.display()),
                None => println!("{}: accepted", report.file_name),
            }
        } else {
            println!(
                "{}",
                render(report.errors, self.format, &self.start_tag, &self.end_tag)
            );
        }
        Ok(())
    }
}

async fn describe(input: &InputArgs, temp_path: &Path) -> anyhow::Result<FileDescriptor> {
    let file = describe_temp_file(input.client_name(), input.mime_type(), temp_path)
        .await
        .with_context(|| format!("Read {}", input.file.display()))?;
    Ok(file)
}

async fn upload(
    input: InputArgs,
    upload_dir: Option<PathBuf>,
    move_source: bool,
) -> anyhow::Result<ExitCode> {
    let (mut config, messages) = input.load()?;
    if let Some(dir) = upload_dir {
        config.upload_dir = Some(dir);
    }

    // Keep the staged copy alive until the pipeline has moved it
    let staged = if move_source {
        None
    } else {
        Some(stage_copy(&input.file).context("Stage upload")?)
    };
    let temp_path = staged.as_deref().unwrap_or(&input.file);

    let file = describe(&input, temp_path).await?;
    let outcome = match UploadPipeline::new(config, messages).run(file).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(
                error_code = e.error_code(),
                log_level = ?e.log_level(),
                "Upload aborted"
            );
            return Err(e.into());
        }
    };

    let errors = outcome.errors();
    input.print(&Report {
        stored: outcome.is_stored(),
        file_name: &outcome.file_name,
        path: outcome.stored_path(),
        errors: &errors,
    })?;

    Ok(if outcome.is_stored() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn check(input: InputArgs) -> anyhow::Result<ExitCode> {
    let (config, messages) = input.load()?;
    let file = describe(&input, &input.file).await?;

    let result = UploadValidator::new(&config, &messages).validate(&file);
    let accepted = result.is_accepted();
    let errors = result.into_messages();

    input.print(&Report {
        stored: false,
        file_name: &file.name,
        path: None,
        errors: &errors,
    })?;

    Ok(if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            input,
            upload_dir,
            move_source,
        } => upload(input, upload_dir, move_source).await,
        Commands::Check { input } => check(input).await,
    }
}
