//! Quiz screen implementation
//!
//! Shows the active question with its options, the countdown, the run
//! progress and the score.

use crate::app::view::TuiView;
use crate::session::OptionDecoration;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Quiz screen component with an option cursor
#[derive(Debug)]
pub struct QuizScreen {
    cursor: usize,
    list_state: ListState,
}

impl QuizScreen {
    /// Create a new quiz screen
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            cursor: 0,
            list_state,
        }
    }

    /// Option under the cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Put the cursor on `index`, clamped to the option count
    pub fn set_cursor(&mut self, index: usize, option_count: usize) {
        self.cursor = index.min(option_count.saturating_sub(1));
        self.list_state.select(Some(self.cursor));
    }

    /// Move the cursor up, wrapping to the last option
    pub fn select_previous(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        self.cursor = if self.cursor > 0 {
            self.cursor - 1
        } else {
            option_count - 1
        };
        self.list_state.select(Some(self.cursor));
    }

    /// Move the cursor down, wrapping to the first option
    pub fn select_next(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % option_count;
        self.list_state.select(Some(self.cursor));
    }

    /// Render the quiz screen
    pub fn render(&mut self, f: &mut Frame, view: &TuiView) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Progress and score
                Constraint::Min(4),    // Question
                Constraint::Length(6), // Options
                Constraint::Length(3), // Countdown
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_header(f, chunks[0], view);
        self.render_question(f, chunks[1], view);
        self.render_options(f, chunks[2], view);
        self.render_countdown(f, chunks[3], view);
        self.render_help(f, chunks[4], view);
    }

    /// Render run progress next to the score
    fn render_header(&self, f: &mut Frame, area: Rect, view: &TuiView) {
        let header_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(16)])
            .split(area);

        let progress = Gauge::default()
            .block(Block::default().title("Progress").borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(view.progress)
            .label(format!("{:.0}%", view.progress * 100.0));
        f.render_widget(progress, header_chunks[0]);

        let score = Paragraph::new(view.score.to_string())
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().title("Score").borders(Borders::ALL));
        f.render_widget(score, header_chunks[1]);
    }

    /// Render the question text
    fn render_question(&self, f: &mut Frame, area: Rect, view: &TuiView) {
        let question = Paragraph::new(view.question.as_str())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title("Question")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(question, area);
    }

    /// Render the options with their decorations
    fn render_options(&mut self, f: &mut Frame, area: Rect, view: &TuiView) {
        let items: Vec<ListItem> = view
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let decoration = view.decorations.get(i).copied().unwrap_or_default();
                let enabled = view.enabled.get(i).copied().unwrap_or(false);
                let (marker, style) = match decoration {
                    OptionDecoration::Correct => ("✓", Style::default().fg(Color::Green)),
                    OptionDecoration::Wrong => ("✗", Style::default().fg(Color::Red)),
                    OptionDecoration::Plain if enabled => (" ", Style::default()),
                    OptionDecoration::Plain => (" ", Style::default().fg(Color::DarkGray)),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} {}. ", marker, i + 1), style),
                    Span::styled(option.clone(), style),
                ]))
            })
            .collect();

        let highlight = if view.accepts_answers() {
            Style::default().bg(Color::Cyan).fg(Color::Black)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Options"))
            .highlight_style(highlight)
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    /// Render the countdown gauge
    fn render_countdown(&self, f: &mut Frame, area: Rect, view: &TuiView) {
        let color = if view.countdown_fraction > 0.5 {
            Color::Green
        } else if view.countdown_fraction > 0.2 {
            Color::Yellow
        } else {
            Color::Red
        };

        let gauge = Gauge::default()
            .block(Block::default().title("Time Left").borders(Borders::ALL))
            .gauge_style(Style::default().fg(color))
            .ratio(view.countdown_fraction)
            .label(format!("{}s", view.seconds_remaining));

        f.render_widget(gauge, area);
    }

    /// Render help text
    fn render_help(&self, f: &mut Frame, area: Rect, view: &TuiView) {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let back_style = if view.can_go_back {
            key_style
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let help_text = vec![Line::from(vec![
            Span::styled("1-4", key_style),
            Span::raw(" Answer  "),
            Span::styled("←", back_style),
            Span::raw(" Back  "),
            Span::styled("→", key_style),
            Span::raw(format!(" {}  ", view.next_label.as_str())),
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

impl Default for QuizScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_wraps() {
        let mut screen = QuizScreen::new();
        screen.select_previous(4);
        assert_eq!(screen.cursor(), 3);
        screen.select_next(4);
        assert_eq!(screen.cursor(), 0);
        screen.select_next(4);
        assert_eq!(screen.cursor(), 1);
    }

    #[test]
    fn test_set_cursor_clamps() {
        let mut screen = QuizScreen::new();
        screen.set_cursor(9, 4);
        assert_eq!(screen.cursor(), 3);
        screen.set_cursor(0, 0);
        assert_eq!(screen.cursor(), 0);
    }
}
