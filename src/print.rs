use crate::config::PrintConfig;
use crate::engine::preview::{render_plain_text, Preview};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A rendered quotation ready to hand to the printer.
#[derive(Debug, Clone)]
pub struct PrintJob {
    pub quotation_number: String,
    pub text: String,
}

impl PrintJob {
    pub fn from_preview(preview: &Preview, page_width: usize) -> Self {
        Self {
            quotation_number: preview.quotation_number.clone(),
            text: render_plain_text(preview, page_width),
        }
    }
}

/// Outcome of a print job, sent back to the UI loop.
#[derive(Debug)]
pub enum PrintOutcome {
    Printed(PathBuf),
    Failed(String),
}

pub struct Printer {
    output_dir: PathBuf,
    command: Option<String>,
}

impl Printer {
    pub fn new(output_dir: impl Into<PathBuf>, command: Option<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            command,
        }
    }

    pub fn from_config(config: &PrintConfig) -> Self {
        Self::new(
            config.output_dir.clone(),
            config.command().map(str::to_string),
        )
    }

    /// Write the job to disk and, when a print command is configured, pass
    /// the file to it. Returns the path of the written file.
    pub async fn submit(&self, job: &PrintJob) -> Result<PathBuf> {
        if job.text.trim().is_empty() {
            anyhow::bail!("nothing to print");
        }

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("failed to create {}", self.output_dir.display()))?;

        let path = self
            .output_dir
            .join(format!("{}.txt", file_stem(&job.quotation_number)));
        tokio::fs::write(&path, &job.text)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;

        let Some(command) = &self.command else {
            tracing::info!(path = %path.display(), "quotation written");
            return Ok(path);
        };

        run_print_command(command, &path).await?;
        tracing::info!(path = %path.display(), command = %command, "quotation sent to printer");
        Ok(path)
    }
}

async fn run_print_command(command: &str, path: &Path) -> Result<()> {
    let mut parts = command.split_whitespace();
    let program = parts.next().context("print command is empty")?;
    let status = tokio::process::Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .await
        .with_context(|| format!("failed to run print command `{}`", command))?;

    if !status.success() {
        anyhow::bail!("print command `{}` exited with {}", command, status);
    }
    Ok(())
}

/// File name for a quotation number: anything outside `[A-Za-z0-9_-]`
/// becomes `_`; an empty number falls back to `quotation`.
fn file_stem(quotation_number: &str) -> String {
    let stem: String = quotation_number
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "quotation".to_string()
    } else {
        stem
    }
}
