//! Result exports: files, clipboard text, snapshots and sharing
//!
//! Clipboard, native share and raster snapshots are platform facilities.
//! Each sits behind a trait. The clipboard defaults to the system one; the
//! others shell out to a configurable command.

use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{info, warn};

use crate::core::result_view::ResultView;
use crate::types::{SurveyError, SurveyResult, Theme, TypeResult};
use crate::{EXPORT_HTML_FILE, EXPORT_JSON_FILE, EXPORT_PNG_FILE};

// =============================================================================
// PLATFORM SEAMS
// =============================================================================

/// System clipboard
pub trait Clipboard {
    fn write_text(&self, text: &str) -> SurveyResult<()>;
}

/// Payload handed to a native share sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareData {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Native share facility
pub trait NativeShare {
    fn share(&self, data: &ShareData) -> SurveyResult<()>;
}

/// Turns an HTML snapshot into a raster image
pub trait SnapshotRenderer {
    fn render(&self, html_path: &Path, png_path: &Path) -> SurveyResult<()>;
}

/// Split a configured command line into program and arguments, honouring
/// shell quoting
fn parse_command(command_line: &str) -> Result<(String, Vec<String>), String> {
    let argv = shell_words::split(command_line.trim())
        .map_err(|e| format!("cannot parse command '{}': {}", command_line, e))?;
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| "no command configured".to_string())?;
    Ok((program.clone(), args.to_vec()))
}

/// The desktop clipboard. The handle is opened on first use and kept so
/// X11 selections stay owned while the process runs.
#[derive(Default)]
pub struct SystemClipboard {
    handle: RefCell<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> SurveyResult<()> {
        let mut handle = self.handle.borrow_mut();
        if handle.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| SurveyError::ExportError(format!("clipboard unavailable: {}", e)))?;
            *handle = Some(clipboard);
        }
        match handle.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| SurveyError::ExportError(format!("clipboard write failed: {}", e))),
            None => Err(SurveyError::ExportError("clipboard unavailable".to_string())),
        }
    }
}

/// Clipboard fed through a command's stdin, for setups the system
/// clipboard cannot reach (`wl-copy`, `xclip -selection clipboard`...)
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    command_line: String,
}

impl CommandClipboard {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self { command_line: command_line.into() }
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&self, text: &str) -> SurveyResult<()> {
        let (program, args) = parse_command(&self.command_line).map_err(SurveyError::ExportError)?;

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SurveyError::ExportError(format!("cannot run {}: {}", program, e)))?;

        // stdin is closed before waiting so the command sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        let status = child
            .wait()
            .map_err(|e| SurveyError::ExportError(format!("clipboard command failed: {}", e)))?;
        written.map_err(|e| SurveyError::ExportError(format!("clipboard write failed: {}", e)))?;
        if !status.success() {
            return Err(SurveyError::ExportError(format!("{} exited with {}", program, status)));
        }
        Ok(())
    }
}

/// Share by running a command with the URL appended (`xdg-open`, `open`...)
#[derive(Debug, Clone)]
pub struct CommandShare {
    command_line: String,
}

impl CommandShare {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self { command_line: command_line.into() }
    }
}

impl NativeShare for CommandShare {
    fn share(&self, data: &ShareData) -> SurveyResult<()> {
        let (program, args) = parse_command(&self.command_line).map_err(SurveyError::ShareError)?;

        let status = Command::new(&program)
            .args(&args)
            .arg(&data.url)
            .env("SHARE_TITLE", &data.title)
            .env("SHARE_TEXT", &data.text)
            .status()
            .map_err(|e| SurveyError::ShareError(format!("cannot run {}: {}", program, e)))?;

        if !status.success() {
            return Err(SurveyError::ShareError(format!("{} exited with {}", program, status)));
        }
        Ok(())
    }
}

/// HTML-to-image converter invoked as `<command> <input.html> <output.png>`
#[derive(Debug, Clone)]
pub struct CommandSnapshotRenderer {
    command_line: String,
}

impl CommandSnapshotRenderer {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self { command_line: command_line.into() }
    }
}

impl Default for CommandSnapshotRenderer {
    fn default() -> Self {
        Self::new("wkhtmltoimage --quiet")
    }
}

impl SnapshotRenderer for CommandSnapshotRenderer {
    fn render(&self, html_path: &Path, png_path: &Path) -> SurveyResult<()> {
        let (program, args) = parse_command(&self.command_line).map_err(SurveyError::ExportError)?;

        let status = Command::new(&program)
            .args(&args)
            .arg(html_path)
            .arg(png_path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| SurveyError::ExportError(format!("cannot run {}: {}", program, e)))?;

        if !status.success() {
            return Err(SurveyError::ExportError(format!("{} exited with {}", program, status)));
        }
        Ok(())
    }
}

// =============================================================================
// FILE EXPORTS
// =============================================================================

/// Writes `result.json`, `result.html` and `result.png` into one directory
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    theme: Theme,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>, theme: Theme) -> Self {
        Self {
            output_dir: output_dir.into(),
            theme,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_file(&self, name: &str, contents: &[u8]) -> SurveyResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| SurveyError::ExportError(format!("cannot create {}: {}", self.output_dir.display(), e)))?;
        let path = self.output_dir.join(name);
        std::fs::write(&path, contents)
            .map_err(|e| SurveyError::ExportError(format!("cannot write {}: {}", path.display(), e)))?;
        info!("Exported {}", path.display());
        Ok(path)
    }

    /// Raw result, pretty-printed
    pub fn save_json(&self, result: &TypeResult) -> SurveyResult<PathBuf> {
        let json = serde_json::to_string_pretty(result)
            .map_err(|e| SurveyError::ExportError(format!("cannot serialize result: {}", e)))?;
        self.write_file(EXPORT_JSON_FILE, json.as_bytes())
    }

    /// Standalone HTML snapshot of the rendered result
    pub fn save_html(&self, view: &ResultView<'_>) -> SurveyResult<PathBuf> {
        self.write_file(EXPORT_HTML_FILE, view.to_html(self.theme).as_bytes())
    }

    /// Raster snapshot, produced from an intermediate HTML file
    pub fn save_image(&self, view: &ResultView<'_>, renderer: &dyn SnapshotRenderer) -> SurveyResult<PathBuf> {
        let html_path = self.write_file(".result-snapshot.html", view.to_html(self.theme).as_bytes())?;
        let png_path = self.output_dir.join(EXPORT_PNG_FILE);

        let rendered = renderer.render(&html_path, &png_path);
        if let Err(e) = std::fs::remove_file(&html_path) {
            warn!("Could not remove {}: {}", html_path.display(), e);
        }
        rendered?;

        if !png_path.exists() {
            return Err(SurveyError::ExportError(format!(
                "renderer produced no {}",
                png_path.display()
            )));
        }
        info!("Exported {}", png_path.display());
        Ok(png_path)
    }
}

/// Copy the plain-text rendering of a result
pub fn copy_text(view: &ResultView<'_>, clipboard: &dyn Clipboard) -> SurveyResult<()> {
    clipboard.write_text(&view.plain_text())
}

// =============================================================================
// SHARING
// =============================================================================

/// What `share` ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Native share accepted the link
    Shared,
    /// Link copied to the clipboard; tell the user
    Copied(String),
    /// Nothing worked; already logged
    Failed(String),
}

/// Share a result link: native share when available, else the clipboard.
///
/// Never fails: cancellation or capability errors are logged and reported
/// through the outcome.
pub fn share(
    title: &str,
    url: &str,
    native: Option<&dyn NativeShare>,
    clipboard: &dyn Clipboard,
) -> ShareOutcome {
    if let Some(native) = native {
        let data = ShareData {
            title: title.to_string(),
            text: title.to_string(),
            url: url.to_string(),
        };
        return match native.share(&data) {
            Ok(()) => ShareOutcome::Shared,
            Err(e) => {
                warn!("Error sharing: {}", e);
                ShareOutcome::Failed(e.message().to_string())
            }
        };
    }

    match clipboard.write_text(url) {
        Ok(()) => ShareOutcome::Copied(url.to_string()),
        Err(e) => {
            warn!("Clipboard write failed: {}", e);
            ShareOutcome::Failed(e.message().to_string())
        }
    }
}
