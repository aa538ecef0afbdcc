use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::Pane;
use crate::app::{App, Focus};
use crate::config::ThemeConfig;
use crate::service::Tone;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const PLACEHOLDER: &str = "Paste the email you need to reply to here...";

pub fn render_header(f: &mut Frame, area: Rect, theme: &ThemeConfig) {
    let lines = vec![
        Line::from(vec![
            Span::raw("✉  "),
            Span::styled(
                "AI Email ",
                Style::default()
                    .fg(theme.primary())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Assistant",
                Style::default()
                    .fg(theme.secondary())
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "Craft perfect email replies with AI-powered assistance",
            Style::default().fg(theme.fg_muted()),
        )),
    ];
    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.bg()));
    f.render_widget(header, area);
}

/// Draft editor and tone selector on the left, action panel on the right
pub fn render_compose(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.config.theme;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(67), Constraint::Percentage(33)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Editor
            Constraint::Length(3), // Tones
        ])
        .split(columns[0]);

    render_editor(f, left[0], app, theme);
    render_tones(f, left[1], app, theme);
    render_action_panel(f, columns[1], app, theme);
}

fn render_editor(f: &mut Frame, area: Rect, app: &App, theme: &ThemeConfig) {
    let composer = &app.composer;
    let focused = app.focus == Focus::Editor;
    let block = Pane::new("📧 Original Email Content", focused, theme).block();
    let inner = block.inner(area);

    let content = composer.email_content();
    let paragraph = if content.is_empty() && !focused {
        Paragraph::new(Span::styled(
            PLACEHOLDER,
            Style::default().fg(theme.fg_muted()),
        ))
    } else {
        let text_style = if composer.is_loading() {
            Style::default().fg(theme.fg_muted())
        } else {
            Style::default().fg(theme.fg())
        };
        let mut lines: Vec<Line> = content
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
            .collect();
        if focused && !composer.is_loading() {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled("_", Style::default().fg(theme.primary())));
            }
        }
        // Keep the end of the draft (where typing happens) in view
        let height = wrapped_height(content, inner.width.saturating_sub(1));
        let scroll = height.saturating_sub(inner.height);
        Paragraph::new(lines).scroll((scroll, 0))
    };

    f.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}

fn render_tones(f: &mut Frame, area: Rect, app: &App, theme: &ThemeConfig) {
    let composer = &app.composer;
    let block = Pane::new("Select Tone", app.focus == Focus::Tones, theme).block();

    let mut spans = Vec::new();
    for (i, tone) in Tone::ALL.into_iter().enumerate() {
        let selected = tone == composer.tone();
        let mut style = if selected {
            Style::default()
                .fg(theme.fg())
                .bg(theme.bg_element())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_subtle())
        };
        if composer.is_loading() {
            style = style.fg(theme.fg_muted());
        }
        spans.push(Span::styled(
            format!(" {} {} {} ", i + 1, tone.icon(), tone.label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_action_panel(f: &mut Frame, area: Rect, app: &App, theme: &ThemeConfig) {
    let composer = &app.composer;
    let block = Pane::new("Generate Reply", false, theme).block();
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Button
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Tone
            Constraint::Length(1), // Length
            Constraint::Min(0),
        ])
        .split(inner);

    let (label, button_style) = if composer.is_loading() {
        (
            format!("{} Generating...", SPINNER[app.tick % SPINNER.len()]),
            Style::default().fg(theme.fg_muted()).bg(theme.bg_element()),
        )
    } else if composer.can_generate() {
        (
            "🚀 Generate Reply  (Ctrl+G)".to_string(),
            Style::default()
                .fg(theme.fg())
                .bg(theme.border_active())
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "🚀 Generate Reply  (Ctrl+G)".to_string(),
            Style::default().fg(theme.fg_muted()).bg(theme.bg_element()),
        )
    };
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(button_style)
        .wrap(Wrap { trim: true });
    f.render_widget(button, centered_row(rows[0]));

    let label_style = Style::default().fg(theme.fg_muted());
    let tone_line = Line::from(vec![
        Span::styled("Current Tone: ", label_style),
        Span::styled(
            composer.tone().label(),
            Style::default().fg(theme.primary()),
        ),
    ]);
    f.render_widget(Paragraph::new(tone_line), rows[2]);

    let len = composer.content_len();
    let len_style = if len > 0 {
        Style::default().fg(theme.success())
    } else {
        label_style
    };
    let len_line = Line::from(vec![
        Span::styled("Content Length: ", label_style),
        Span::styled(format!("{} chars", len), len_style),
    ]);
    f.render_widget(Paragraph::new(len_line), rows[3]);
}

/// Middle line of a three-line slot
fn centered_row(area: Rect) -> Rect {
    if area.height < 3 {
        return area;
    }
    Rect::new(area.x, area.y + 1, area.width, 1)
}

/// Rows `text` occupies when soft-wrapped at `width` columns
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    text.split('\n')
        .map(|line| line.chars().count().max(1).div_ceil(width))
        .sum::<usize>()
        .try_into()
        .unwrap_or(u16::MAX)
}
