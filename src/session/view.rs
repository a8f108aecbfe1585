//! Render surface consumed by the quiz session
//!
//! The session never draws anything itself. It pushes render requests
//! through this trait and the front end decides how they look.

/// Per-option decoration shown next to an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionDecoration {
    /// No marking
    #[default]
    Plain,
    /// The correct option, disclosed after answering or timing out
    Correct,
    /// The option the user picked, when it was wrong
    Wrong,
}

/// Label of the forward navigation control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLabel {
    Next,
    Finish,
}

impl NextLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::Finish => "Finish",
        }
    }
}

/// Render surface driven by `QuizSession`
pub trait View {
    /// Show a question with its options. `enabled` and `decorations` have one
    /// entry per option.
    fn render_question(
        &mut self,
        text: &str,
        options: &[String],
        enabled: &[bool],
        decorations: &[OptionDecoration],
    );

    /// Position within the run, `(index + 1) / len`
    fn render_progress(&mut self, fraction_complete: f64);

    /// Countdown state; `fraction_remaining` is `remaining / budget`
    fn render_countdown(&mut self, seconds_remaining: u32, fraction_remaining: f64);

    fn render_score(&mut self, score: u32);

    fn render_result(&mut self, final_score: u32, message: &str);

    /// Persisted best score, shown before a run starts
    fn render_high_score(&mut self, high_score: u32);

    fn set_navigation_state(&mut self, can_go_back: bool, next_label: NextLabel);
}
