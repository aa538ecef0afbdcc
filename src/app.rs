use ratatui::layout::Rect;
use std::sync::Arc;

use crate::composer::{Action, Composer, Effect};
use crate::config::Config;
use crate::service::Tone;
use crate::ui::wrapped_height;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Editor,
    Tones,
    Reply,
}

pub struct App {
    pub config: Arc<Config>,
    pub composer: Composer,
    pub focus: Focus,
    pub should_quit: bool,
    pub reply_scroll: u16,
    // Last drawn reply pane, bounds scrolling
    pub reply_area: Rect,
    // Advances every loop iteration, drives the spinner
    pub tick: usize,
}

impl App {
    pub fn new(config: Arc<Config>) -> Self {
        let tone = config.compose.default_tone;
        Self {
            config,
            composer: Composer::new(tone),
            focus: Focus::Editor,
            should_quit: false,
            reply_scroll: 0,
            reply_area: Rect::default(),
            tick: 0,
        }
    }

    /// Feed an action through the composer, resetting view bits it invalidates
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        let had_reply = self.composer.has_reply();
        let effect = self.composer.update(action);
        if had_reply != self.composer.has_reply() {
            self.reply_scroll = 0;
            if !self.composer.has_reply() && self.focus == Focus::Reply {
                self.focus = Focus::Editor;
            }
        }
        effect
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Tab order; the reply pane only takes focus when there is a reply
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Editor => Focus::Tones,
            Focus::Tones if self.composer.has_reply() => Focus::Reply,
            Focus::Tones | Focus::Reply => Focus::Editor,
        };
    }

    pub fn push_char(&mut self, c: char) {
        let mut text = self.composer.email_content().to_string();
        text.push(c);
        self.dispatch(Action::SetEmailContent(text));
    }

    pub fn push_str(&mut self, s: &str) {
        let mut text = self.composer.email_content().to_string();
        text.push_str(s);
        self.dispatch(Action::SetEmailContent(text));
    }

    pub fn pop_char(&mut self) {
        let mut text = self.composer.email_content().to_string();
        if text.pop().is_some() {
            self.dispatch(Action::SetEmailContent(text));
        }
    }

    pub fn select_tone(&mut self, tone: Tone) {
        self.dispatch(Action::SetTone(tone));
    }

    pub fn next_tone(&mut self) {
        self.select_tone(self.composer.tone().next());
    }

    pub fn prev_tone(&mut self) {
        self.select_tone(self.composer.tone().prev());
    }

    pub fn reply_scroll_down(&mut self) {
        self.reply_scroll = self
            .reply_scroll
            .saturating_add(3)
            .min(self.max_reply_scroll());
    }

    /// Furthest scroll that still keeps the last reply line on screen
    pub fn max_reply_scroll(&self) -> u16 {
        // -2 for borders
        let width = self.reply_area.width.saturating_sub(2);
        let height = self.reply_area.height.saturating_sub(2);
        wrapped_height(self.composer.generated_reply(), width).saturating_sub(height)
    }

    pub fn reply_scroll_up(&mut self) {
        self.reply_scroll = self.reply_scroll.saturating_sub(3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Arc::new(Config::default()))
    }

    #[test]
    fn test_typing_builds_content() {
        let mut app = app();
        for c in "Hi!".chars() {
            app.push_char(c);
        }
        app.pop_char();
        app.push_str("\nThanks");
        assert_eq!(app.composer.email_content(), "Hi\nThanks");
    }

    #[test]
    fn test_focus_skips_reply_until_generated() {
        let mut app = app();
        app.next_focus();
        assert_eq!(app.focus, Focus::Tones);
        app.next_focus();
        assert_eq!(app.focus, Focus::Editor);

        app.push_str("hello");
        app.dispatch(Action::Generate);
        app.dispatch(Action::GenerateFinished(Ok("reply".to_string())));
        app.focus = Focus::Tones;
        app.next_focus();
        assert_eq!(app.focus, Focus::Reply);
    }

    #[test]
    fn test_new_attempt_drops_reply_focus() {
        let mut app = app();
        app.push_str("hello");
        app.dispatch(Action::Generate);
        app.dispatch(Action::GenerateFinished(Ok("reply".to_string())));
        app.focus = Focus::Reply;
        app.reply_scroll_down();
        app.dispatch(Action::Generate);
        assert_eq!(app.focus, Focus::Editor);
        assert_eq!(app.reply_scroll, 0);
    }

    #[test]
    fn test_reply_scroll_stops_at_last_line() {
        let mut app = app();
        app.push_str("hello");
        app.dispatch(Action::Generate);
        let reply = (1..=10).map(|i| format!("line {}", i)).collect::<Vec<_>>();
        app.dispatch(Action::GenerateFinished(Ok(reply.join("\n"))));
        // 4 visible rows inside the borders
        app.reply_area = Rect::new(0, 0, 40, 6);

        for _ in 0..10 {
            app.reply_scroll_down();
        }
        assert_eq!(app.reply_scroll, 6);
        app.reply_scroll_up();
        assert_eq!(app.reply_scroll, 3);
    }

    #[test]
    fn test_short_reply_does_not_scroll() {
        let mut app = app();
        app.push_str("hello");
        app.dispatch(Action::Generate);
        app.dispatch(Action::GenerateFinished(Ok("Thanks!".to_string())));
        app.reply_area = Rect::new(0, 0, 40, 6);
        app.reply_scroll_down();
        assert_eq!(app.reply_scroll, 0);
    }

    #[test]
    fn test_tone_keys_locked_while_loading() {
        let mut app = app();
        app.next_tone();
        assert_eq!(app.composer.tone(), Tone::Friendly);
        app.push_str("hello");
        app.dispatch(Action::Generate);
        app.next_tone();
        app.push_char('x');
        assert_eq!(app.composer.tone(), Tone::Friendly);
        assert_eq!(app.composer.email_content(), "hello");
    }

    #[test]
    fn test_default_tone_from_config() {
        let config = Config::parse("[compose]\ndefault_tone = \"formal\"").unwrap();
        let app = App::new(Arc::new(config));
        assert_eq!(app.composer.tone(), Tone::Formal);
    }
}
