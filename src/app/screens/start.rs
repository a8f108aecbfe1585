//! Start screen implementation
//!
//! Title, the persisted best score and the prompt to begin a run.

use crate::app::view::TuiView;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Start screen component
#[derive(Debug, Default)]
pub struct StartScreen {
    question_count: usize,
    seconds_per_question: u32,
}

impl StartScreen {
    /// Create a new start screen
    pub fn new(question_count: usize, seconds_per_question: u32) -> Self {
        Self {
            question_count,
            seconds_per_question,
        }
    }

    /// Render the start screen
    pub fn render(&self, f: &mut Frame, view: &TuiView) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Min(7),    // Summary
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_summary(f, chunks[1], view);
        self.render_help(f, chunks[2]);
    }

    /// Render the title section
    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Main title
                Constraint::Length(2), // Subtitle
            ])
            .split(area);

        let title = Paragraph::new("QUIZZER")
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
        f.render_widget(title, title_chunks[0]);

        let subtitle = Paragraph::new("Timed multiple-choice quiz")
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    /// Render the quiz summary and best score
    fn render_summary(&self, f: &mut Frame, area: Rect, view: &TuiView) {
        let text = vec![
            Line::from(""),
            Line::from(format!(
                "{} questions, {} seconds each",
                self.question_count, self.seconds_per_question
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("High Score: "),
                Span::styled(
                    view.high_score.to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to start",
                Style::default().fg(Color::Green),
            )),
        ];

        let summary = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Welcome"));

        f.render_widget(summary, area);
    }

    /// Render the help text
    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let help_text = vec![Line::from(vec![
            Span::styled("Enter", key_style),
            Span::raw(" Start  "),
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
