//! Tesseract backend driving the `tesseract` executable.
//!
//! The normalized image is encoded as PNG and piped to `tesseract stdin stdout`, so no
//! temporary files are involved. Stdin is fed from a helper thread while stdout and stderr are
//! drained concurrently, which keeps large images from deadlocking on full pipe buffers.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use wait_timeout::ChildExt;

use super::engine::RecognitionEngine;
use super::error::OcrError;
use super::validation::{parse_tesseract_major_version, validate_language_code, validate_tesseract_version};
use crate::Result;
use crate::core::config::OcrConfig;
use crate::core::languages::LanguageSet;
use crate::preprocessing::NormalizedImage;

/// Default executable name, resolved through `PATH`.
pub const DEFAULT_TESSERACT_COMMAND: &str = "tesseract";

/// Default upper bound for a single recognition call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default page segmentation mode (fully automatic, no OSD).
pub const DEFAULT_PSM: u8 = 3;

/// Recognition engine that shells out to the Tesseract command-line tool.
#[derive(Debug, Clone)]
pub struct TesseractCliEngine {
    command: PathBuf,
    tessdata_dir: Option<PathBuf>,
    psm: u8,
    timeout: Duration,
}

impl Default for TesseractCliEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TESSERACT_COMMAND)
    }
}

struct ProcessOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl TesseractCliEngine {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            tessdata_dir: None,
            psm: DEFAULT_PSM,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Build an engine from the `[ocr]` configuration section.
    pub fn from_config(config: &OcrConfig) -> Self {
        let mut engine = Self::new(&config.tesseract_cmd)
            .with_psm(config.psm)
            .with_timeout(Duration::from_secs(config.timeout_secs));
        if let Some(dir) = &config.tessdata_dir {
            engine = engine.with_tessdata_dir(dir);
        }
        engine
    }

    pub fn with_tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tessdata_dir = Some(dir.into());
        self
    }

    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = psm;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn command(&self) -> &Path {
        &self.command
    }

    pub fn tessdata_dir(&self) -> Option<&Path> {
        self.tessdata_dir.as_deref()
    }

    pub fn psm(&self) -> u8 {
        self.psm
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Arguments for one recognition call, image on stdin and text on stdout.
    pub fn recognition_args(&self, language_spec: &str) -> Vec<String> {
        let mut args = vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            language_spec.to_string(),
            "--psm".to_string(),
            self.psm.to_string(),
        ];
        if let Some(dir) = &self.tessdata_dir {
            args.push("--tessdata-dir".to_string());
            args.push(dir.display().to_string());
        }
        args
    }

    /// The first line of `tesseract --version`, e.g. `tesseract 5.3.0`.
    pub fn version(&self) -> std::result::Result<String, OcrError> {
        let output = self.run(&["--version".to_string()], None)?;
        // Tesseract 4 prints its version banner on stderr, 5 on stdout
        let banner = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        let banner = String::from_utf8_lossy(&banner);
        banner
            .lines()
            .next()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .ok_or_else(|| OcrError::InvalidOutput("tesseract --version printed nothing".to_string()))
    }

    /// Check that the executable runs and is recent enough.
    pub fn probe(&self) -> std::result::Result<String, OcrError> {
        let version = self.version()?;
        let major = parse_tesseract_major_version(&version)
            .ok_or_else(|| OcrError::InvalidOutput(format!("Unrecognised version banner '{}'", version)))?;
        validate_tesseract_version(major)?;
        Ok(version)
    }

    /// Language models installed for this executable (`tesseract --list-langs`).
    pub fn available_languages(&self) -> std::result::Result<Vec<String>, OcrError> {
        let mut args = vec!["--list-langs".to_string()];
        if let Some(dir) = &self.tessdata_dir {
            args.push("--tessdata-dir".to_string());
            args.push(dir.display().to_string());
        }
        let output = self.run(&args, None)?;
        if !output.status.success() {
            return Err(failure(&output));
        }
        let listing = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        Ok(parse_language_listing(&String::from_utf8_lossy(&listing)))
    }

    fn spawn(&self, args: &[String]) -> std::result::Result<Child, OcrError> {
        Command::new(&self.command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => OcrError::BackendUnavailable(format!(
                    "Tesseract executable '{}' not found. Install Tesseract or set `ocr.tesseract_cmd`",
                    self.command.display()
                )),
                _ => OcrError::BackendUnavailable(format!(
                    "Failed to execute '{}': {}",
                    self.command.display(),
                    e
                )),
            })
    }

    fn run(&self, args: &[String], input: Option<Vec<u8>>) -> std::result::Result<ProcessOutput, OcrError> {
        let mut child = self.spawn(args)?;

        let stdin = child.stdin.take();
        let writer = thread::spawn(move || -> std::io::Result<()> {
            if let (Some(mut stdin), Some(input)) = (stdin, input) {
                stdin.write_all(&input)?;
                stdin.flush()?;
            }
            Ok(())
        });
        let stdout_reader = drain(child.stdout.take());
        let stderr_reader = drain(child.stderr.take());

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                // Kill errors only mean the process already exited
                let _ = child.kill();
                let _ = child.wait();
                return Err(OcrError::Timeout(self.timeout));
            }
            Err(e) => {
                return Err(OcrError::ProcessFailed(format!("Failed to wait for tesseract: {}", e)));
            }
        };

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) if status.success() => {
                return Err(OcrError::ProcessFailed(format!("Failed to send image to tesseract: {}", e)));
            }
            // The process failure below carries the useful message
            Ok(Err(e)) => tracing::debug!("tesseract closed stdin early: {}", e),
            Err(_) => return Err(OcrError::ProcessFailed("stdin writer thread panicked".to_string())),
        }

        Ok(ProcessOutput { status, stdout, stderr })
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        buffer
    })
}

fn failure(output: &ProcessOutput) -> OcrError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        OcrError::ProcessFailed(format!("tesseract exited with {}", output.status))
    } else {
        OcrError::ProcessFailed(format!("tesseract exited with {}: {}", output.status, stderr))
    }
}

/// Parse `tesseract --list-langs` output, skipping the header line.
pub fn parse_language_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("List of available languages"))
        .map(str::to_string)
        .collect()
}

impl RecognitionEngine for TesseractCliEngine {
    fn name(&self) -> &str {
        "tesseract-cli"
    }

    fn recognize(&self, image: &NormalizedImage, languages: &LanguageSet) -> Result<String> {
        let language_spec = languages.tesseract_spec();
        validate_language_code(&language_spec)?;

        let png = image
            .to_png_bytes()
            .map_err(|e| OcrError::ImageEncoding(e.to_string()))?;

        tracing::debug!(
            command = %self.command.display(),
            languages = %language_spec,
            psm = self.psm,
            bytes = png.len(),
            "invoking tesseract"
        );

        let output = self.run(&self.recognition_args(&language_spec), Some(png))?;
        if !output.status.success() {
            return Err(failure(&output).into());
        }

        let text = String::from_utf8(output.stdout)
            .map_err(|e| OcrError::InvalidOutput(format!("tesseract produced invalid UTF-8: {}", e)))?;

        tracing::debug!(characters = text.chars().count(), "tesseract finished");
        Ok(text)
    }
}
