use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::Focus;
use crate::composer::Status;
use crate::config::ThemeConfig;

/// Feedback line for the last attempt, colored by kind
pub fn render_status(f: &mut Frame, area: Rect, status: Option<&Status>, theme: &ThemeConfig) {
    let line = match status {
        Some(Status::Error(msg)) => Line::from(vec![
            Span::styled("✗ ", Style::default().fg(theme.error())),
            Span::styled(msg.as_str(), Style::default().fg(theme.error())),
        ]),
        Some(Status::Info(msg)) => Line::from(vec![
            Span::styled("✓ ", Style::default().fg(theme.success())),
            Span::styled(msg.as_str(), Style::default().fg(theme.success())),
        ]),
        None => Line::default(),
    };
    let paragraph = Paragraph::new(line)
        .centered()
        .style(Style::default().bg(theme.bg()));
    f.render_widget(paragraph, area);
}

pub fn render_help(f: &mut Frame, area: Rect, focus: Focus, has_reply: bool, theme: &ThemeConfig) {
    let key_style = Style::default().fg(theme.primary());
    let text_style = Style::default().fg(theme.fg_subtle());

    let mut help_text = match focus {
        Focus::Editor => vec![
            Span::styled("type", key_style),
            Span::styled(" edit  ", text_style),
            Span::styled("C-e", key_style),
            Span::styled(" $EDITOR  ", text_style),
        ],
        Focus::Tones => vec![
            Span::styled("h/l", key_style),
            Span::styled(" tone  ", text_style),
            Span::styled("1-5", key_style),
            Span::styled(" pick  ", text_style),
            Span::styled("Enter", key_style),
            Span::styled(" generate  ", text_style),
        ],
        Focus::Reply => vec![
            Span::styled("j/k", key_style),
            Span::styled(" scroll  ", text_style),
            Span::styled("y", key_style),
            Span::styled(" copy  ", text_style),
        ],
    };

    help_text.extend([
        Span::styled("Tab", key_style),
        Span::styled(" focus  ", text_style),
        Span::styled("C-g", key_style),
        Span::styled(" generate  ", text_style),
    ]);
    if has_reply {
        help_text.extend([
            Span::styled("C-y", key_style),
            Span::styled(" copy  ", text_style),
        ]);
    }
    help_text.extend([
        Span::styled("C-q", key_style),
        Span::styled(" quit", text_style),
    ]);

    let paragraph =
        Paragraph::new(Line::from(help_text)).style(Style::default().bg(theme.bg_panel()));
    f.render_widget(paragraph, area);
}
