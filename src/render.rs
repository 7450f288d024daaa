//! External render pipeline - pdflatex then ImageMagick convert
//!
//! Both tools run as subprocesses under a bounded wait. Everything lives
//! in a throwaway temp directory that gets removed on every exit path.
//! On failure the LaTeX source is logged so the markup can be debugged
//! offline.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::config::Settings;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {status}: {stderr}")]
    Failed {
        tool: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("{tool} timed out after {timeout_secs}s")]
    Timeout {
        tool: &'static str,
        timeout_secs: u64,
    },
    #[error("render io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Compile a LaTeX document to a PNG at `out_path`
pub async fn render_png(
    latex: &str,
    out_path: &Path,
    settings: &Settings,
) -> Result<(), RenderError> {
    let tmp_dir = std::env::temp_dir().join(format!(
        "math-slop-{}",
        chrono::Utc::now().timestamp_millis()
    ));
    std::fs::create_dir_all(&tmp_dir)?;
    debug!("Render temp dir: {:?}", tmp_dir);

    let result = run_pipeline(latex, out_path, settings, &tmp_dir).await;

    if let Err(e) = std::fs::remove_dir_all(&tmp_dir) {
        debug!("Failed to remove temp dir {:?}: {}", tmp_dir, e);
    }

    if let Err(ref e) = result {
        error!("Render failed: {}", e);
        // Dump the markup for offline debugging
        info!("LaTeX source:\n{}", latex);
    }

    result
}

async fn run_pipeline(
    latex: &str,
    out_path: &Path,
    settings: &Settings,
    tmp_dir: &Path,
) -> Result<(), RenderError> {
    let tex_file = tmp_dir.join("formula.tex");
    let pdf_file = tmp_dir.join("formula.pdf");
    std::fs::write(&tex_file, latex)?;

    run_tool(
        "pdflatex",
        &settings.pdflatex_bin,
        &[
            "-interaction=nonstopmode".to_string(),
            format!("-output-directory={}", tmp_dir.display()),
            tex_file.display().to_string(),
        ],
        settings.render_timeout_secs,
    )
    .await?;

    run_tool(
        "convert",
        &settings.convert_bin,
        &[
            "-density".to_string(),
            settings.density.to_string(),
            pdf_file.display().to_string(),
            "-quality".to_string(),
            "100".to_string(),
            "-resize".to_string(),
            "1200x".to_string(),
            out_path.display().to_string(),
        ],
        settings.render_timeout_secs,
    )
    .await?;

    match image::open(out_path) {
        Ok(img) => info!("Generated {}x{} PNG at {:?}", img.width(), img.height(), out_path),
        Err(e) => warn!("Output PNG at {:?} did not load cleanly: {}", out_path, e),
    }

    Ok(())
}

/// Run one tool to completion under the timeout, capturing its output
async fn run_tool(
    tool: &'static str,
    bin: &str,
    args: &[String],
    timeout_secs: u64,
) -> Result<(), RenderError> {
    debug!("Running {} ({}) {:?}", tool, bin, args);

    let mut command = Command::new(bin);
    command
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(Duration::from_secs(timeout_secs), command.output())
        .await
    {
        Err(_) => return Err(RenderError::Timeout { tool, timeout_secs }),
        Ok(Err(source)) => return Err(RenderError::Spawn { tool, source }),
        Ok(Ok(output)) => output,
    };

    if !output.status.success() {
        return Err(RenderError::Failed {
            tool,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(())
}

/// Default artifact path when the caller gives none
pub fn default_output_path(extension: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "math-slop-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        extension
    ))
}
