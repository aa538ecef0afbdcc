use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClipboardError {
    /// Copy program missing or could not be started
    #[error("clipboard unavailable ({0})")]
    Unavailable(String),
    /// Copy program ran but refused the text
    #[error("clipboard write rejected ({0})")]
    Rejected(String),
}

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard backed by an external copy program reading from stdin
/// (pbcopy, wl-copy, xclip, ...)
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Build from a shell-style command line like "xclip -selection clipboard"
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Use the configured command if any, otherwise guess from the platform
    pub fn from_config(command: Option<&str>) -> Self {
        command
            .and_then(Self::from_command_line)
            .unwrap_or_else(Self::detect)
    }

    pub fn detect() -> Self {
        let line = if cfg!(target_os = "macos") {
            "pbcopy"
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            "wl-copy"
        } else {
            "xclip -selection clipboard"
        };
        // Non-empty literal always parses
        Self::from_command_line(line).unwrap_or(Self {
            program: line.to_string(),
            args: Vec::new(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        // stderr is not captured: copy programs like xclip fork a child that
        // holds inherited pipes open until the selection is taken over
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ClipboardError::Unavailable(format!("{}: {}", self.program, e)))?;

        // Dropping stdin closes the pipe so the program sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        let status = child
            .wait()
            .map_err(|e| ClipboardError::Rejected(e.to_string()))?;
        written.map_err(|e| ClipboardError::Rejected(e.to_string()))?;

        if !status.success() {
            return Err(ClipboardError::Rejected(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        Ok(())
    }
}
