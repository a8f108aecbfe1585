use quizzer::app::TuiView;
use quizzer::config::QuizConfig;
use quizzer::error;
use quizzer::models::QuestionBank;
use quizzer::session::{FileStore, KeyValueStore, MemoryStore, QuizSession};
use quizzer::{QuizError, HIGH_SCORE_KEY};
use std::error::Error;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_user_friendly_messages() {
    let msg = error::user_friendly_message(&QuizError::ConfigError("bad".into()));
    assert!(msg.contains("Check your settings"));

    let msg = error::user_friendly_message(&QuizError::TuiError("no tty".into()));
    assert!(msg.contains("interface = \"plain\""));

    let io = QuizError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
    assert!(error::user_friendly_message(&io).contains("gone"));
    assert!(io.source().is_some());
}

#[test]
fn test_bad_question_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("questions.json");
    fs::write(
        &path,
        r#"[{"id": 1, "question": "Q?", "options": ["a", "b"], "correct": 0}]"#,
    )
    .unwrap();

    let config = QuizConfig::new().with_question_file(Some(path));
    let err = config.question_bank().unwrap_err();
    assert!(matches!(err, QuizError::QuestionBankError(_)));
    assert!(error::user_friendly_message(&err).contains("question file"));
}

#[test]
fn test_corrupt_store_reads_as_no_high_score() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");
    fs::write(&path, "{ not json").unwrap();

    let store = FileStore::at(&path);
    assert!(matches!(
        store.get(HIGH_SCORE_KEY),
        Err(QuizError::PersistenceError(_))
    ));

    let session = QuizSession::new(
        QuestionBank::builtin(),
        TuiView::new(),
        store,
        15,
    );
    assert_eq!(session.high_score(), 0);
}

#[test]
fn test_unparseable_high_score_counts_as_zero() {
    let session = QuizSession::new(
        QuestionBank::builtin(),
        TuiView::new(),
        MemoryStore::with_value(HIGH_SCORE_KEY, "lots"),
        15,
    );
    assert_eq!(session.high_score(), 0);
    assert_eq!(session.view().high_score, 0);
}

#[test]
fn test_unwritable_store_does_not_stop_the_run() {
    let temp_dir = TempDir::new().unwrap();
    // A directory where the store file should be makes every write fail
    let path = temp_dir.path().join("store.json");
    fs::create_dir(&path).unwrap();

    let bank = QuestionBank::builtin();
    let first_correct = bank.questions()[0].correct;
    let mut session = QuizSession::new(bank, TuiView::new(), FileStore::at(&path), 15);
    session.start();
    session.select_option(first_correct);
    for _ in 0..5 {
        session.advance();
    }

    let result = session.last_result().unwrap();
    assert_eq!(result.score, 10);
    assert!(result.new_high_score);
    assert_eq!(session.high_score(), 10);
}

#[test]
fn test_corrupt_store_recovers_after_first_record() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");
    fs::write(&path, "{ not json").unwrap();

    let first_correct = QuestionBank::builtin().questions()[0].correct;
    let mut records = Vec::new();
    for _ in 0..2 {
        let mut session =
            QuizSession::new(QuestionBank::builtin(), TuiView::new(), FileStore::at(&path), 15);
        session.start();
        session.select_option(first_correct);
        for _ in 0..5 {
            session.advance();
        }
        records.push(session.last_result().unwrap().new_high_score);
    }

    // Only the first run beats the (unreadable) record
    assert_eq!(records, vec![true, false]);
    let store = FileStore::at(&path);
    assert_eq!(store.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("10"));
}
