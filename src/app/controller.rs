//! Screen controller for the terminal UI
//!
//! Routes navigation actions and clock time into the quiz session and picks
//! the screen to draw. Kept apart from the terminal so it can be driven in
//! tests.

use crate::app::screens::{QuizScreen, ResultAction, ResultsScreen, StartScreen};
use crate::app::state::{AppState, NavigationAction, StateManager};
use crate::app::ticker::Ticker;
use crate::app::view::TuiView;
use crate::models::QuestionBank;
use crate::session::{KeyValueStore, QuizPhase, QuizSession};
use crate::{OPTIONS_PER_QUESTION, POINTS_PER_CORRECT};
use crossterm::event::KeyEvent;
use ratatui::Frame;
use std::time::{Duration, Instant};

pub struct Controller<S: KeyValueStore> {
    state_manager: StateManager,
    session: QuizSession<TuiView, S>,
    ticker: Ticker,
    start_screen: StartScreen,
    quiz_screen: QuizScreen,
    results_screen: ResultsScreen,
}

impl<S: KeyValueStore> Controller<S> {
    pub fn new(bank: QuestionBank, store: S, seconds_per_question: u32) -> Self {
        let question_count = bank.len();
        let session = QuizSession::new(bank, TuiView::new(), store, seconds_per_question);
        Self {
            state_manager: StateManager::new(),
            ticker: Ticker::default(),
            start_screen: StartScreen::new(question_count, session.seconds_per_question()),
            quiz_screen: QuizScreen::new(),
            results_screen: ResultsScreen::new(question_count as u32 * POINTS_PER_CORRECT),
            session,
        }
    }

    pub fn current_state(&self) -> &AppState {
        self.state_manager.current_state()
    }

    pub fn should_quit(&self) -> bool {
        self.state_manager.should_quit()
    }

    pub fn session(&self) -> &QuizSession<TuiView, S> {
        &self.session
    }

    pub fn cursor(&self) -> usize {
        self.quiz_screen.cursor()
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        self.handle_action(StateManager::key_to_navigation(key), now);
    }

    /// Handle a navigation action
    pub fn handle_action(&mut self, action: NavigationAction, now: Instant) {
        if action == NavigationAction::Quit {
            self.session.stop_countdown();
            self.state_manager.quit();
            return;
        }

        match self.state_manager.current_state().clone() {
            AppState::Start => self.handle_start_action(action),
            AppState::Quiz => self.handle_quiz_action(action),
            AppState::Results => self.handle_results_action(action),
        }

        // A countdown started by this action ticks from now
        self.on_clock(now);
    }

    /// Feed elapsed time into the session countdown
    pub fn on_clock(&mut self, now: Instant) {
        if !self.session.countdown_active() {
            return;
        }
        self.ticker.align(self.session.countdown_generation(), now);
        for _ in 0..self.ticker.due(now) {
            self.session.on_tick();
            if !self.session.countdown_active() {
                break;
            }
        }
    }

    /// How long the event loop may wait before the next tick is due
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        if self.session.countdown_active() {
            self.ticker.until_next(now)
        } else {
            Duration::from_secs(1)
        }
    }

    /// Draw the current screen
    pub fn render(&mut self, f: &mut Frame) {
        let view = self.session.view();
        match self.state_manager.current_state() {
            AppState::Start => self.start_screen.render(f, view),
            AppState::Quiz => self.quiz_screen.render(f, view),
            AppState::Results => self.results_screen.render(f, view),
        }
    }

    fn handle_start_action(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Select => {
                self.session.start();
                self.quiz_screen.set_cursor(0, OPTIONS_PER_QUESTION);
                self.state_manager.transition_to(AppState::Quiz);
            }
            NavigationAction::Back => self.state_manager.quit(),
            _ => {}
        }
    }

    fn handle_quiz_action(&mut self, action: NavigationAction) {
        let option_count = self.session.view().options.len();
        match action {
            NavigationAction::Up => self.quiz_screen.select_previous(option_count),
            NavigationAction::Down => self.quiz_screen.select_next(option_count),
            NavigationAction::Select => {
                self.session.select_option(self.quiz_screen.cursor());
            }
            NavigationAction::Choose(index) => {
                if self.session.select_option(index) {
                    self.quiz_screen.set_cursor(index, option_count);
                }
            }
            NavigationAction::Right | NavigationAction::Next => {
                self.session.advance();
                self.quiz_screen.set_cursor(0, option_count);
            }
            NavigationAction::Left | NavigationAction::Previous => {
                self.session.retreat();
                self.quiz_screen.set_cursor(0, option_count);
            }
            _ => {}
        }

        if self.session.phase() == QuizPhase::Finished {
            self.results_screen.reset_selection();
            self.state_manager.transition_to(AppState::Results);
        }
    }

    fn handle_results_action(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Left | NavigationAction::Previous => {
                self.results_screen.select_previous_action()
            }
            NavigationAction::Right | NavigationAction::Next => {
                self.results_screen.select_next_action()
            }
            NavigationAction::Select => match self.results_screen.selected_action().clone() {
                ResultAction::Restart => {
                    self.session.restart();
                    self.quiz_screen.set_cursor(0, OPTIONS_PER_QUESTION);
                    self.state_manager.transition_to(AppState::Quiz);
                }
                ResultAction::Menu => self.back_to_menu(),
            },
            NavigationAction::Back => self.back_to_menu(),
            _ => {}
        }
    }

    fn back_to_menu(&mut self) {
        self.session.refresh_high_score();
        self.state_manager.transition_to(AppState::Start);
    }
}
