//! Quiz session state machine
//!
//! `QuizSession` owns all run state: the active question, the answer slots,
//! the score and the per-question countdown. Front ends call its methods in
//! response to key presses and timer ticks; every visible change goes out
//! through the injected `View`, and the best score goes through the injected
//! `KeyValueStore`.
//!
//! Transitions that do not apply in the current state are ignored.

use crate::models::{Question, QuestionBank, QuizResult};
use crate::session::countdown::Countdown;
use crate::session::store::KeyValueStore;
use crate::session::view::{NextLabel, OptionDecoration, View};
use crate::{HIGH_SCORE_KEY, POINTS_PER_CORRECT};
use tracing::{debug, info, warn};

/// State of one question's answer within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerSlot {
    #[default]
    Unanswered,
    /// Option picked by the user
    Selected(usize),
    /// Countdown expired before an answer was picked
    TimedOut,
}

impl AnswerSlot {
    /// Answered or timed out; terminal slots never change again within a run
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unanswered)
    }
}

/// Observable session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// No run started yet
    Idle,
    /// Question at `index` awaiting an answer
    Showing { index: usize },
    /// Question at `index` answered with `choice`
    Answered { index: usize, choice: usize },
    /// Question at `index` ran out of time
    TimedOut { index: usize },
    /// Run complete, result available
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Idle,
    InProgress,
    Finished,
}

/// Single quiz session over a fixed question bank
pub struct QuizSession<V: View, S: KeyValueStore> {
    bank: QuestionBank,
    view: V,
    store: S,
    status: RunStatus,
    current_index: usize,
    score: u32,
    answers: Vec<AnswerSlot>,
    countdown: Countdown,
    high_score: u32,
    last_result: Option<QuizResult>,
}

impl<V: View, S: KeyValueStore> QuizSession<V, S> {
    /// Create a session and show the persisted high score
    pub fn new(bank: QuestionBank, view: V, store: S, seconds_per_question: u32) -> Self {
        let answers = vec![AnswerSlot::Unanswered; bank.len()];
        let mut session = Self {
            bank,
            view,
            store,
            status: RunStatus::Idle,
            current_index: 0,
            score: 0,
            answers,
            countdown: Countdown::new(seconds_per_question),
            high_score: 0,
            last_result: None,
        };
        session.refresh_high_score();
        session
    }

    /// Begin a new run at the first question
    pub fn start(&mut self) {
        self.stop_countdown();
        self.score = 0;
        self.current_index = 0;
        self.answers.fill(AnswerSlot::Unanswered);
        self.last_result = None;
        self.status = RunStatus::InProgress;

        info!(questions = self.bank.len(), "Quiz run started");
        self.view.render_score(self.score);
        self.load_question(0);
    }

    /// Re-read the best score and start a new run
    pub fn restart(&mut self) {
        self.stop_countdown();
        self.refresh_high_score();
        self.start();
    }

    /// Make `index` the active question and render it. Terminal slots are
    /// shown locked with the correct option disclosed; unanswered ones get a
    /// fresh countdown.
    pub fn load_question(&mut self, index: usize) {
        if self.status != RunStatus::InProgress || index >= self.bank.len() {
            debug!(index, "Ignoring load of unavailable question");
            return;
        }

        self.stop_countdown();
        self.current_index = index;

        let len = self.bank.len();
        let next_label = if index + 1 == len {
            NextLabel::Finish
        } else {
            NextLabel::Next
        };
        self.view.set_navigation_state(index > 0, next_label);
        self.render_current_question();
        self.view.render_progress((index + 1) as f64 / len as f64);

        if self.answers[index].is_terminal() {
            self.countdown.clear();
        } else {
            self.countdown.start();
        }
        self.view
            .render_countdown(self.countdown.remaining(), self.countdown.fraction_remaining());
    }

    /// Answer the active question. Returns whether the answer was recorded;
    /// answers to terminal slots, expired countdowns and out-of-range options
    /// are ignored.
    pub fn select_option(&mut self, choice: usize) -> bool {
        let Some(question) = self.active_question() else {
            debug!(choice, "Ignoring answer outside a run");
            return false;
        };
        if choice >= question.options.len() {
            debug!(choice, "Ignoring out-of-range option");
            return false;
        }
        if self.answers[self.current_index].is_terminal() || !self.countdown.is_active() {
            debug!(
                index = self.current_index,
                choice, "Ignoring answer to a closed question"
            );
            return false;
        }
        let correct = question.is_correct(choice);

        self.stop_countdown();
        self.answers[self.current_index] = AnswerSlot::Selected(choice);
        if correct {
            self.score += POINTS_PER_CORRECT;
            self.view.render_score(self.score);
        }
        debug!(index = self.current_index, choice, correct, "Answer recorded");

        self.render_current_question();
        true
    }

    /// Move to the next question, or finish the run from the last one
    pub fn advance(&mut self) {
        if self.status != RunStatus::InProgress {
            debug!("Ignoring advance outside a run");
            return;
        }

        self.stop_countdown();
        if self.current_index + 1 < self.bank.len() {
            self.load_question(self.current_index + 1);
        } else {
            self.finish();
        }
    }

    /// Move back to the previous question; nothing happens on the first
    pub fn retreat(&mut self) {
        if self.status != RunStatus::InProgress || self.current_index == 0 {
            debug!("Ignoring retreat");
            return;
        }

        self.stop_countdown();
        self.load_question(self.current_index - 1);
    }

    /// One elapsed second of the active countdown
    pub fn on_tick(&mut self) {
        if self.status != RunStatus::InProgress {
            return;
        }
        let Some(remaining) = self.countdown.tick() else {
            return;
        };

        self.view
            .render_countdown(remaining, self.countdown.fraction_remaining());

        if remaining == 0 && self.answers[self.current_index] == AnswerSlot::Unanswered {
            self.answers[self.current_index] = AnswerSlot::TimedOut;
            debug!(index = self.current_index, "Question timed out");
            self.render_current_question();
        }
    }

    /// Cancel the active countdown, if any
    pub fn stop_countdown(&mut self) {
        self.countdown.stop();
    }

    /// Re-read the persisted best score and show it
    pub fn refresh_high_score(&mut self) {
        self.high_score = self.read_high_score();
        self.view.render_high_score(self.high_score);
    }

    pub fn phase(&self) -> QuizPhase {
        match self.status {
            RunStatus::Idle => QuizPhase::Idle,
            RunStatus::Finished => QuizPhase::Finished,
            RunStatus::InProgress => {
                let index = self.current_index;
                match self.answers[index] {
                    AnswerSlot::Unanswered => QuizPhase::Showing { index },
                    AnswerSlot::Selected(choice) => QuizPhase::Answered { index, choice },
                    AnswerSlot::TimedOut => QuizPhase::TimedOut { index },
                }
            }
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn answers(&self) -> &[AnswerSlot] {
        &self.answers
    }

    pub fn time_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn countdown_active(&self) -> bool {
        self.countdown.is_active()
    }

    /// Countdown budget each fresh question starts with
    pub fn seconds_per_question(&self) -> u32 {
        self.countdown.budget()
    }

    /// Identifies the most recently started countdown
    pub fn countdown_generation(&self) -> u64 {
        self.countdown.generation()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Result of the most recently finished run
    pub fn last_result(&self) -> Option<&QuizResult> {
        self.last_result.as_ref()
    }

    pub fn questions(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn active_question(&self) -> Option<&Question> {
        if self.status == RunStatus::InProgress {
            self.bank.get(self.current_index)
        } else {
            None
        }
    }

    fn render_current_question(&mut self) {
        let Some(question) = self.bank.get(self.current_index) else {
            return;
        };
        let slot = self.answers[self.current_index];
        let enabled = vec![!slot.is_terminal(); question.options.len()];
        let decorations = decorations_for(question, slot);
        self.view
            .render_question(&question.text, &question.options, &enabled, &decorations);
    }

    fn finish(&mut self) {
        self.stop_countdown();
        self.status = RunStatus::Finished;

        let stored = self.read_high_score();
        let new_high_score = self.score > stored;
        if new_high_score {
            if let Err(e) = self.store.set(HIGH_SCORE_KEY, &self.score.to_string()) {
                warn!(error = %e, "Failed to persist high score");
            }
            self.high_score = self.score;
            self.view.render_high_score(self.high_score);
            info!(score = self.score, previous = stored, "New high score");
        } else {
            self.high_score = stored;
        }

        let result = QuizResult::new(self.score, self.bank.len(), new_high_score);
        info!(result = %result.summary(), "Quiz run finished");
        self.view.render_result(result.score, &result.message());
        self.last_result = Some(result);
    }

    fn read_high_score(&self) -> u32 {
        match self.store.get(HIGH_SCORE_KEY) {
            Ok(Some(value)) => value.trim().parse().unwrap_or_else(|_| {
                warn!(value = %value, "Ignoring unreadable high score");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!(error = %e, "Failed to read high score");
                0
            }
        }
    }
}

/// Decorations for a question in the given slot state
fn decorations_for(question: &Question, slot: AnswerSlot) -> Vec<OptionDecoration> {
    let mut decorations = vec![OptionDecoration::Plain; question.options.len()];
    match slot {
        AnswerSlot::Unanswered => {}
        AnswerSlot::Selected(choice) => {
            decorations[question.correct] = OptionDecoration::Correct;
            if choice != question.correct {
                decorations[choice] = OptionDecoration::Wrong;
            }
        }
        AnswerSlot::TimedOut => {
            decorations[question.correct] = OptionDecoration::Correct;
        }
    }
    decorations
}
