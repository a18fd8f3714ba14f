//! Styled HTML to PDF.
//!
//! Layout is delegated to an external HTML renderer. The [`Typesetter`] trait
//! is the seam: [`Wkhtmltopdf`] shells out to the `wkhtmltopdf` binary, tests
//! plug in their own implementation.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Lays out a complete HTML document into a paginated PDF.
pub trait Typesetter {
    /// Write the PDF for `html` to `output`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer is unavailable or rejects the input.
    fn typeset(&self, html: &str, output: &Path) -> Result<()>;
}

/// Typesetter backed by the `wkhtmltopdf` command-line tool.
#[derive(Debug, Clone)]
pub struct Wkhtmltopdf {
    program: PathBuf,
}

impl Default for Wkhtmltopdf {
    fn default() -> Self {
        Self::new("wkhtmltopdf")
    }
}

impl Wkhtmltopdf {
    /// Use the renderer at `program` (a bare name is looked up on `PATH`).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Typesetter for Wkhtmltopdf {
    fn typeset(&self, html: &str, output: &Path) -> Result<()> {
        debug!(program = %self.program.display(), output = %output.display(), "typeset");
        // HTML comes in on stdin ("-"), the PDF goes straight to `output`.
        let mut child = Command::new(&self.program)
            .args(["--quiet", "--encoding", "utf-8", "-"])
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                if err.kind() == std::io::ErrorKind::NotFound {
                    anyhow::anyhow!(
                        "{} not found (is wkhtmltopdf installed?)",
                        self.program.display()
                    )
                } else {
                    anyhow::Error::new(err)
                        .context(format!("failed to start {}", self.program.display()))
                }
            })?;

        if let Some(mut stdin) = child.stdin.take()
            && let Err(err) = stdin.write_all(html.as_bytes())
            // An early exit closes the pipe; the exit status below explains why.
            && err.kind() != std::io::ErrorKind::BrokenPipe
        {
            return Err(err).context("failed to send HTML to renderer");
        }

        let result = child
            .wait_with_output()
            .context("renderer did not finish")?;
        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                bail!("{} exited with {}", self.program.display(), result.status);
            }
            bail!(
                "{} exited with {}: {stderr}",
                self.program.display(),
                result.status
            );
        }
        if !output.is_file() {
            bail!("renderer produced no file at {}", output.display());
        }
        Ok(())
    }
}
