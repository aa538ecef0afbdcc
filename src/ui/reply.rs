use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::Pane;
use crate::config::ThemeConfig;

/// Read-only view of the generated reply
pub fn render_reply(
    f: &mut Frame,
    area: Rect,
    reply: &str,
    scroll: u16,
    focused: bool,
    theme: &ThemeConfig,
) {
    let block = Pane::new("✨ Generated Email Reply  (Ctrl+Y copy)", focused, theme).block();
    let lines: Vec<Line> = reply.split('\n').map(Line::raw).collect();
    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(theme.fg()))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}
