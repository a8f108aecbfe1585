//! Render model for the terminal UI
//!
//! `TuiView` receives the session's render requests and keeps the latest
//! state of every widget; the screens draw from it on each frame.

use crate::session::{NextLabel, OptionDecoration, View};

/// Latest rendered state of the quiz widgets
#[derive(Debug, Clone)]
pub struct TuiView {
    pub question: String,
    pub options: Vec<String>,
    pub enabled: Vec<bool>,
    pub decorations: Vec<OptionDecoration>,
    /// Fraction of the run reached, 0.0 to 1.0
    pub progress: f64,
    pub seconds_remaining: u32,
    /// Remaining countdown as a fraction of the budget
    pub countdown_fraction: f64,
    pub score: u32,
    pub high_score: u32,
    /// Final score and message of the last finished run
    pub result: Option<(u32, String)>,
    pub can_go_back: bool,
    pub next_label: NextLabel,
}

impl TuiView {
    pub fn new() -> Self {
        Self {
            question: String::new(),
            options: Vec::new(),
            enabled: Vec::new(),
            decorations: Vec::new(),
            progress: 0.0,
            seconds_remaining: 0,
            countdown_fraction: 0.0,
            score: 0,
            high_score: 0,
            result: None,
            can_go_back: false,
            next_label: NextLabel::Next,
        }
    }

    /// Whether any option can still be picked
    pub fn accepts_answers(&self) -> bool {
        self.enabled.iter().any(|e| *e)
    }
}

impl Default for TuiView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for TuiView {
    fn render_question(
        &mut self,
        text: &str,
        options: &[String],
        enabled: &[bool],
        decorations: &[OptionDecoration],
    ) {
        self.question = text.to_string();
        self.options = options.to_vec();
        self.enabled = enabled.to_vec();
        self.decorations = decorations.to_vec();
        self.result = None;
    }

    fn render_progress(&mut self, fraction_complete: f64) {
        self.progress = fraction_complete.clamp(0.0, 1.0);
    }

    fn render_countdown(&mut self, seconds_remaining: u32, fraction_remaining: f64) {
        self.seconds_remaining = seconds_remaining;
        self.countdown_fraction = fraction_remaining.clamp(0.0, 1.0);
    }

    fn render_score(&mut self, score: u32) {
        self.score = score;
    }

    fn render_result(&mut self, final_score: u32, message: &str) {
        self.result = Some((final_score, message.to_string()));
    }

    fn render_high_score(&mut self, high_score: u32) {
        self.high_score = high_score;
    }

    fn set_navigation_state(&mut self, can_go_back: bool, next_label: NextLabel) {
        self.can_go_back = can_go_back;
        self.next_label = next_label;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_requests_update_model() {
        let mut view = TuiView::new();
        let options: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();

        view.render_question("Q?", &options, &[true; 4], &[OptionDecoration::Plain; 4]);
        view.render_countdown(15, 1.0);
        view.set_navigation_state(true, NextLabel::Finish);
        assert_eq!(view.question, "Q?");
        assert!(view.accepts_answers());
        assert_eq!(view.seconds_remaining, 15);
        assert!(view.can_go_back);
        assert_eq!(view.next_label, NextLabel::Finish);

        view.render_question("Q?", &options, &[false; 4], &[OptionDecoration::Plain; 4]);
        assert!(!view.accepts_answers());

        view.render_result(40, "Great job! You know your stuff.");
        assert_eq!(view.result, Some((40, "Great job! You know your stuff.".to_string())));
    }
}
