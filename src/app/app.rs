//! Main application controller
//!
//! Manages the TUI, the quiz controller and the render/event loop.

use crate::{
    app::{controller::Controller, tui::Tui},
    config::QuizConfig,
    session::FileStore,
    QuizError, Result,
};
use std::time::Instant;
use tracing::info;

/// TUI application
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Screens and quiz session
    controller: Controller<FileStore>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &QuizConfig) -> Result<Self> {
        let bank = config.question_bank()?;
        let store = FileStore::new()?;
        let tui = Tui::new().map_err(|e| QuizError::TuiError(e.to_string()))?;

        Ok(Self {
            tui,
            controller: Controller::new(bank, store, config.seconds_per_question),
        })
    }

    /// Initialize the terminal
    pub fn init(&mut self) -> Result<()> {
        self.tui
            .init()
            .map_err(|e| QuizError::TuiError(e.to_string()))
    }

    /// Run the main application loop
    pub fn run(&mut self) -> Result<()> {
        info!("Starting terminal UI");
        while !self.controller.should_quit() {
            self.draw()?;

            let timeout = self.controller.poll_timeout(Instant::now());
            if let Some(key) = self.tui.next_key(timeout)? {
                self.controller.handle_key(key, Instant::now());
            }
            self.controller.on_clock(Instant::now());
        }
        self.tui.restore()?;
        Ok(())
    }

    /// Draw the current screen
    fn draw(&mut self) -> Result<()> {
        let controller = &mut self.controller;
        self.tui.draw(|f| controller.render(f))?;
        Ok(())
    }
}
