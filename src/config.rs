use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::service::Tone;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/email/generate";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config read error: {0}")]
    Read(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub compose: ComposeConfig,
    pub clipboard: ClipboardConfig,
    pub log: LogConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// URL the draft is POSTed to
    pub endpoint: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Tone selected at startup
    pub default_tone: Tone,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Copy command reading from stdin, e.g. "wl-copy" (auto-detected if unset)
    pub command: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file path; "~" is expanded
    pub file: Option<String>,
    /// Filter directive used when RUST_LOG is unset
    pub filter: String,
}

/// Colors for the composer; hex (#RRGGBB) or named
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub bg: String,
    pub bg_panel: String,
    pub bg_element: String,
    pub fg: String,
    pub fg_muted: String,
    pub fg_subtle: String,

    pub border: String,
    pub border_active: String,

    pub primary: String,
    pub secondary: String,

    pub success: String,
    pub error: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: "replytui=info".to_string(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            bg: "#0f172a".to_string(),
            bg_panel: "#1e293b".to_string(),
            bg_element: "#334155".to_string(),
            fg: "#f1f5f9".to_string(),
            fg_muted: "#64748b".to_string(),
            fg_subtle: "#cbd5e1".to_string(),

            border: "#475569".to_string(),
            border_active: "#3b82f6".to_string(),

            primary: "#60a5fa".to_string(), // blue
            secondary: "#c084fc".to_string(), // purple

            success: "#4ade80".to_string(),
            error: "#f87171".to_string(),
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("replytui/config.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/replytui/config.toml"))
    }

    /// Load from the default location; a missing file means defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::parse(&std::fs::read_to_string(&path)?)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Where the log file goes
    pub fn log_path(&self) -> PathBuf {
        match &self.log.file {
            Some(file) => PathBuf::from(shellexpand::tilde(file).into_owned()),
            None => dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("replytui/replytui.log"),
        }
    }
}

impl ThemeConfig {
    pub fn bg(&self) -> ratatui::style::Color {
        parse_color(&self.bg)
    }
    pub fn bg_panel(&self) -> ratatui::style::Color {
        parse_color(&self.bg_panel)
    }
    pub fn bg_element(&self) -> ratatui::style::Color {
        parse_color(&self.bg_element)
    }
    pub fn fg(&self) -> ratatui::style::Color {
        parse_color(&self.fg)
    }
    pub fn fg_muted(&self) -> ratatui::style::Color {
        parse_color(&self.fg_muted)
    }
    pub fn fg_subtle(&self) -> ratatui::style::Color {
        parse_color(&self.fg_subtle)
    }
    pub fn border(&self) -> ratatui::style::Color {
        parse_color(&self.border)
    }
    pub fn border_active(&self) -> ratatui::style::Color {
        parse_color(&self.border_active)
    }
    pub fn primary(&self) -> ratatui::style::Color {
        parse_color(&self.primary)
    }
    pub fn secondary(&self) -> ratatui::style::Color {
        parse_color(&self.secondary)
    }
    pub fn success(&self) -> ratatui::style::Color {
        parse_color(&self.success)
    }
    pub fn error(&self) -> ratatui::style::Color {
        parse_color(&self.error)
    }
}

/// Parse color string to ratatui Color
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    // Try hex first (#RRGGBB)
    if s.starts_with('#') && s.len() == 7 && s.is_ascii() {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&s[1..3], 16),
            u8::from_str_radix(&s[3..5], 16),
            u8::from_str_radix(&s[5..7], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }

    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => Color::White,
    }
}
