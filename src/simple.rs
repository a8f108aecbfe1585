//! Plain line-mode front end
//!
//! Prints questions to stdout, reads one command per line from stdin and
//! shows the countdown as an `indicatif` bar. Used when the config asks for
//! `interface = "plain"`.

use crate::config::QuizConfig;
use crate::session::{FileStore, KeyValueStore, NextLabel, OptionDecoration, QuizSession, View};
use crate::{Result, TIMER_ARC_LENGTH};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Duration, Instant};
use tracing::info;

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlainCommand {
    /// Pick option `n` (0-based)
    Answer(usize),
    Next,
    Previous,
    Restart,
    Quit,
    Unknown,
}

impl PlainCommand {
    /// Parse a trimmed, case-insensitive input line
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "1" => Self::Answer(0),
            "2" => Self::Answer(1),
            "3" => Self::Answer(2),
            "4" => Self::Answer(3),
            "n" | "next" => Self::Next,
            "p" | "prev" | "previous" => Self::Previous,
            "r" | "restart" => Self::Restart,
            "q" | "quit" => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

/// View printing to a writer, with the countdown on an `indicatif` bar
pub struct PlainView<W: Write> {
    out: W,
    bar: ProgressBar,
    next_label: NextLabel,
}

impl PlainView<io::Stdout> {
    /// View on stdout with a visible countdown bar
    pub fn stdout() -> Self {
        let bar = ProgressBar::new(TIMER_ARC_LENGTH as u64);
        if let Ok(style) = ProgressStyle::with_template("[{bar:30.green/red}] {msg}") {
            bar.set_style(style);
        }
        Self::with_writer(io::stdout(), bar)
    }
}

impl<W: Write> PlainView<W> {
    pub fn with_writer(out: W, bar: ProgressBar) -> Self {
        Self {
            out,
            bar,
            next_label: NextLabel::Next,
        }
    }

    /// Writer the view prints to
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Print a free-form line
    pub fn say(&mut self, text: &str) {
        let out = &mut self.out;
        self.bar.suspend(|| writeln!(out, "{}", text).ok());
    }
}

impl<W: Write> View for PlainView<W> {
    fn render_question(
        &mut self,
        text: &str,
        options: &[String],
        enabled: &[bool],
        decorations: &[OptionDecoration],
    ) {
        let mut lines = vec![String::new(), text.to_string()];
        for (i, option) in options.iter().enumerate() {
            let mark = match decorations.get(i).copied().unwrap_or_default() {
                OptionDecoration::Correct => " (correct)",
                OptionDecoration::Wrong => " (wrong)",
                OptionDecoration::Plain => "",
            };
            lines.push(format!("  {}. {}{}", i + 1, option, mark));
        }
        if enabled.iter().any(|e| *e) {
            lines.push("Answer 1-4, n = next, p = previous, q = quit".to_string());
        } else {
            lines.push(format!(
                "n = {}, p = previous, q = quit",
                self.next_label.as_str().to_lowercase()
            ));
        }

        let out = &mut self.out;
        self.bar.suspend(|| {
            for line in &lines {
                writeln!(out, "{}", line).ok();
            }
        });
    }

    fn render_progress(&mut self, fraction_complete: f64) {
        self.say(&format!("Progress: {:.0}%", fraction_complete * 100.0));
    }

    fn render_countdown(&mut self, seconds_remaining: u32, fraction_remaining: f64) {
        let position = (fraction_remaining.clamp(0.0, 1.0) * TIMER_ARC_LENGTH).round() as u64;
        self.bar.set_position(position);
        if seconds_remaining == 0 {
            self.bar.set_message("time's up");
        } else {
            self.bar.set_message(format!("{}s", seconds_remaining));
        }
    }

    fn render_score(&mut self, score: u32) {
        self.say(&format!("Score: {}", score));
    }

    fn render_result(&mut self, final_score: u32, message: &str) {
        self.say(&format!("\nFinal score: {}\n{}", final_score, message));
        self.say("r = play again, q = quit");
    }

    fn render_high_score(&mut self, high_score: u32) {
        self.say(&format!("High score: {}", high_score));
    }

    fn set_navigation_state(&mut self, _can_go_back: bool, next_label: NextLabel) {
        self.next_label = next_label;
    }
}

/// Apply one command to the session. Returns false when the user quits.
pub fn apply_command<V: View, S: KeyValueStore>(
    session: &mut QuizSession<V, S>,
    command: PlainCommand,
) -> bool {
    match command {
        PlainCommand::Answer(choice) => {
            session.select_option(choice);
        }
        PlainCommand::Next => session.advance(),
        PlainCommand::Previous => session.retreat(),
        PlainCommand::Restart => session.restart(),
        PlainCommand::Quit => {
            session.stop_countdown();
            return false;
        }
        PlainCommand::Unknown => {}
    }
    true
}

/// Run the quiz on stdin/stdout until the user quits or input ends
pub async fn run_plain(config: &QuizConfig) -> Result<()> {
    let bank = config.question_bank()?;
    let store = FileStore::new()?;
    let mut session = QuizSession::new(
        bank,
        PlainView::stdout(),
        store,
        config.seconds_per_question,
    );

    info!("Starting plain mode");
    play(&mut session, BufReader::new(tokio::io::stdin())).await
}

/// Drive `session` from line input, ticking the countdown once per second,
/// until a quit command or end of input
pub async fn play<R, W, S>(session: &mut QuizSession<PlainView<W>, S>, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: KeyValueStore,
{
    let mut lines = input.lines();

    session.view_mut().say("Press Enter to start, q to quit");
    match lines.next_line().await? {
        Some(line) if PlainCommand::parse(&line) != PlainCommand::Quit => session.start(),
        _ => return Ok(()),
    }

    let period = Duration::from_secs(1);
    let mut ticks = interval_at(Instant::now() + period, period);
    let mut generation = session.countdown_generation();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !apply_command(session, PlainCommand::parse(&line)) {
                    break;
                }
            }
            _ = ticks.tick(), if session.countdown_active() => session.on_tick(),
        }

        // A fresh countdown gets a full second before its first tick
        if session.countdown_generation() != generation {
            generation = session.countdown_generation();
            ticks.reset();
        }
    }

    session.stop_countdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionBank;
    use crate::session::{AnswerSlot, MemoryStore, QuizPhase};
    use tokio::io::{duplex, AsyncWriteExt, DuplexStream};
    use tokio::time::sleep;

    fn plain_session() -> QuizSession<PlainView<Vec<u8>>, MemoryStore> {
        QuizSession::new(
            QuestionBank::builtin(),
            PlainView::with_writer(Vec::new(), ProgressBar::hidden()),
            MemoryStore::new(),
            15,
        )
    }

    fn output(session: &QuizSession<PlainView<Vec<u8>>, MemoryStore>) -> String {
        String::from_utf8_lossy(session.view().writer()).into_owned()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(PlainCommand::parse("1"), PlainCommand::Answer(0));
        assert_eq!(PlainCommand::parse(" 4 \n"), PlainCommand::Answer(3));
        assert_eq!(PlainCommand::parse("N"), PlainCommand::Next);
        assert_eq!(PlainCommand::parse("prev"), PlainCommand::Previous);
        assert_eq!(PlainCommand::parse("r"), PlainCommand::Restart);
        assert_eq!(PlainCommand::parse("quit"), PlainCommand::Quit);
        assert_eq!(PlainCommand::parse("5"), PlainCommand::Unknown);
        assert_eq!(PlainCommand::parse(""), PlainCommand::Unknown);
    }

    #[test]
    fn test_question_output() {
        let mut session = plain_session();
        session.start();

        let text = output(&session);
        assert!(text.contains("High score: 0"));
        assert!(text.contains("declare a variable"));
        assert!(text.contains("  3. let myVar;"));
        assert!(text.contains("Answer 1-4"));
    }

    #[test]
    fn test_commands_drive_session() {
        let mut session = plain_session();
        session.start();

        assert!(apply_command(&mut session, PlainCommand::Answer(0)));
        let text = output(&session);
        assert!(text.contains("  1. var myVar; (wrong)"));
        assert!(text.contains("  3. let myVar; (correct)"));

        assert!(apply_command(&mut session, PlainCommand::Next));
        assert_eq!(session.current_index(), 1);
        assert!(apply_command(&mut session, PlainCommand::Previous));
        assert_eq!(session.current_index(), 0);
        assert!(apply_command(&mut session, PlainCommand::Unknown));

        assert!(!apply_command(&mut session, PlainCommand::Quit));
        assert!(!session.countdown_active());
    }

    #[test]
    fn test_finish_and_restart() {
        let mut session = plain_session();
        session.start();
        for _ in 0..5 {
            apply_command(&mut session, PlainCommand::Next);
        }
        assert_eq!(session.phase(), QuizPhase::Finished);
        let text = output(&session);
        assert!(text.contains("Final score: 0"));
        assert!(text.contains("Keep practicing!"));

        apply_command(&mut session, PlainCommand::Restart);
        assert_eq!(session.phase(), QuizPhase::Showing { index: 0 });
    }

    async fn send(input: &mut DuplexStream, line: &str) {
        input.write_all(format!("{}\n", line).as_bytes()).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_times_out_after_budget() {
        let mut session = plain_session();
        let (reader, mut input) = duplex(256);

        let script = async move {
            send(&mut input, "").await;
            sleep(Duration::from_millis(15_500)).await;
            send(&mut input, "3").await;
            send(&mut input, "q").await;
        };
        let (result, ()) = tokio::join!(play(&mut session, BufReader::new(reader)), script);

        result.unwrap();
        assert_eq!(session.answers()[0], AnswerSlot::TimedOut);
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_remaining(), 0);
        assert!(output(&session).contains("  3. let myVar; (correct)"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_gives_next_question_full_budget() {
        let mut session = plain_session();
        let (reader, mut input) = duplex(256);

        let script = async move {
            send(&mut input, "").await;
            // Skip just before the fifth tick
            sleep(Duration::from_millis(4_900)).await;
            send(&mut input, "n").await;
            // 14.5s into the second question's 15s
            sleep(Duration::from_millis(14_500)).await;
            send(&mut input, "1").await;
            send(&mut input, "q").await;
        };
        let (result, ()) = tokio::join!(play(&mut session, BufReader::new(reader)), script);

        result.unwrap();
        assert_eq!(session.answers()[0], AnswerSlot::Unanswered);
        assert_eq!(session.answers()[1], AnswerSlot::Selected(0));
        assert_eq!(session.score(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_stops_at_end_of_input() {
        let mut session = plain_session();
        let (reader, mut input) = duplex(256);

        let script = async move {
            send(&mut input, "").await;
            sleep(Duration::from_millis(2_500)).await;
            drop(input);
        };
        let (result, ()) = tokio::join!(play(&mut session, BufReader::new(reader)), script);

        result.unwrap();
        assert_eq!(session.phase(), QuizPhase::Showing { index: 0 });
        assert_eq!(session.time_remaining(), 13);
        assert!(!session.countdown_active());
    }

    #[tokio::test]
    async fn test_play_quit_before_start() {
        let mut session = plain_session();
        play(&mut session, &b"q\n"[..]).await.unwrap();
        assert_eq!(session.phase(), QuizPhase::Idle);
        assert!(output(&session).contains("Press Enter to start"));
    }
}
