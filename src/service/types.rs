use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tone the generated reply should be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Formal,
    Casual,
    Urgent,
}

impl Tone {
    /// Every tone in selector order
    pub const ALL: [Tone; 5] = [
        Tone::Professional,
        Tone::Friendly,
        Tone::Formal,
        Tone::Casual,
        Tone::Urgent,
    ];

    /// Wire value sent to the service
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Urgent => "urgent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Formal => "Formal",
            Tone::Casual => "Casual",
            Tone::Urgent => "Urgent",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tone::Professional => "💼",
            Tone::Friendly => "😊",
            Tone::Formal => "🎩",
            Tone::Casual => "👕",
            Tone::Urgent => "⚡",
        }
    }

    fn index(self) -> usize {
        Tone::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    /// Next tone in the selector, wrapping around
    pub fn next(self) -> Tone {
        Tone::ALL[(self.index() + 1) % Tone::ALL.len()]
    }

    /// Previous tone in the selector, wrapping around
    pub fn prev(self) -> Tone {
        let len = Tone::ALL.len();
        Tone::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tone: {}", s))
    }
}

/// Body POSTed to the reply generation endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub email_content: String,
    pub tone: Tone,
}
