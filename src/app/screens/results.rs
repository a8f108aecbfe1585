//! Results screen implementation
//!
//! Displays the final score and message of a run, with options to play
//! again or return to the title screen.

use crate::app::view::TuiView;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Results screen component
#[derive(Debug)]
pub struct ResultsScreen {
    selected_action: ResultAction,
    max_score: u32,
}

/// Available actions on the results screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultAction {
    Restart,
    Menu,
}

impl ResultAction {
    /// Get all available actions
    pub fn all() -> Vec<Self> {
        vec![Self::Restart, Self::Menu]
    }

    /// Get display text for the action
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::Restart => "Play Again",
            Self::Menu => "Back to Menu",
        }
    }
}

impl ResultsScreen {
    /// Create a new results screen
    pub fn new(max_score: u32) -> Self {
        Self {
            selected_action: ResultAction::Restart,
            max_score,
        }
    }

    /// Get selected action
    pub fn selected_action(&self) -> &ResultAction {
        &self.selected_action
    }

    /// Put the selection back on the first action
    pub fn reset_selection(&mut self) {
        self.selected_action = ResultAction::Restart;
    }

    /// Select next action
    pub fn select_next_action(&mut self) {
        let actions = ResultAction::all();
        let current_index = actions
            .iter()
            .position(|a| a == &self.selected_action)
            .unwrap_or(0);
        let next_index = (current_index + 1) % actions.len();
        self.selected_action = actions[next_index].clone();
    }

    /// Select previous action
    pub fn select_previous_action(&mut self) {
        let actions = ResultAction::all();
        let current_index = actions
            .iter()
            .position(|a| a == &self.selected_action)
            .unwrap_or(0);
        let prev_index = if current_index == 0 {
            actions.len() - 1
        } else {
            current_index - 1
        };
        self.selected_action = actions[prev_index].clone();
    }

    /// Render the results screen
    pub fn render(&self, f: &mut Frame, view: &TuiView) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(7),    // Score and message
                Constraint::Length(3), // Actions
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_summary(f, chunks[1], view);
        self.render_actions(f, chunks[2]);
        self.render_help(f, chunks[3]);
    }

    /// Render the title section
    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new("Quiz Complete")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );

        f.render_widget(title, area);
    }

    /// Render final score, message and best score
    fn render_summary(&self, f: &mut Frame, area: Rect, view: &TuiView) {
        let (score, message) = match &view.result {
            Some((score, message)) => (*score, message.as_str()),
            None => (view.score, ""),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("Final Score: "),
                Span::styled(
                    format!("{} / {}", score, self.max_score),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(Color::Green))),
            Line::from(""),
            Line::from(format!("High Score: {}", view.high_score)),
        ];

        let summary = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Result"));

        f.render_widget(summary, area);
    }

    /// Render action buttons
    fn render_actions(&self, f: &mut Frame, area: Rect) {
        let actions_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(40), // Fixed width for actions
                Constraint::Min(0),
            ])
            .split(area)[1];

        let action_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(actions_area);

        for (action, chunk) in ResultAction::all().iter().zip(action_chunks.iter()) {
            let selected = *action == self.selected_action;
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let button = Paragraph::new(action.display_text())
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(
                    if selected {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default().fg(Color::White)
                    },
                ));

            f.render_widget(button, *chunk);
        }
    }

    /// Render help text
    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let help_text = vec![Line::from(vec![
            Span::styled("←→", key_style),
            Span::raw(" Choose  "),
            Span::styled("Enter", key_style),
            Span::raw(" Confirm  "),
            Span::styled("Esc", key_style),
            Span::raw(" Menu  "),
            Span::styled("Q", key_style),
            Span::raw(" Quit"),
        ])];

        let help = Paragraph::new(help_text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );

        f.render_widget(help, area);
    }
}
