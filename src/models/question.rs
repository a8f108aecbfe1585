//! Question data model and question bank
//!
//! A `QuestionBank` is the validated, immutable list of questions a quiz
//! session runs over. It can come from the built-in set or from a JSON file.

use crate::{QuizError, Result, OPTIONS_PER_QUESTION};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Ordinal identifier
    pub id: u32,
    /// Question text
    #[serde(rename = "question")]
    pub text: String,
    /// Answer options, in display order
    pub options: Vec<String>,
    /// Index of the correct option (0-based)
    pub correct: usize,
}

impl Question {
    /// Create a new question
    pub fn new(id: u32, text: &str, options: [&str; OPTIONS_PER_QUESTION], correct: usize) -> Self {
        Self {
            id,
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
        }
    }

    /// Check whether `choice` is the correct option
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct
    }

    /// Validate the question structure
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(QuizError::QuestionBankError(format!(
                "Question {} has no text",
                self.id
            )));
        }

        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(QuizError::QuestionBankError(format!(
                "Question {} must have exactly {} options, found {}",
                self.id,
                OPTIONS_PER_QUESTION,
                self.options.len()
            )));
        }

        if self.correct >= self.options.len() {
            return Err(QuizError::QuestionBankError(format!(
                "Question {} marks option {} as correct but only has {} options",
                self.id,
                self.correct,
                self.options.len()
            )));
        }

        Ok(())
    }
}

/// Validated, non-empty sequence of questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank from a list of questions, validating every entry
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(QuizError::QuestionBankError(
                "Question bank is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for question in &questions {
            question.validate()?;
            if !seen.insert(question.id) {
                return Err(QuizError::QuestionBankError(format!(
                    "Duplicate question id {}",
                    question.id
                )));
            }
        }

        Ok(Self { questions })
    }

    /// The built-in JavaScript quiz
    pub fn builtin() -> Self {
        Self {
            questions: vec![
                Question::new(
                    1,
                    "What is the correct way to declare a variable in JavaScript (ES6+)?",
                    ["var myVar;", "variable myVar;", "let myVar;", "dim myVar;"],
                    2,
                ),
                Question::new(
                    2,
                    "Which method is used to add an element to the end of an array?",
                    ["push()", "pop()", "unshift()", "shift()"],
                    0,
                ),
                Question::new(
                    3,
                    "How do you start a `setTimeout` function?",
                    [
                        "setTimeout(callback, delay)",
                        "setInterval(callback, delay)",
                        "setDelay(callback)",
                        "doLater(callback)",
                    ],
                    0,
                ),
                Question::new(
                    4,
                    "What does DOM stand for?",
                    [
                        "Data Object Model",
                        "Document Object Model",
                        "Digital Order Module",
                        "Document Oriented Mode",
                    ],
                    1,
                ),
                Question::new(
                    5,
                    "Which of these is NOT a valid JavaScript data type?",
                    ["Undefined", "Boolean", "Float", "Object"],
                    2,
                ),
            ],
        }
    }

    /// Parse a bank from a JSON array of questions
    pub fn from_json(content: &str) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(content).map_err(|e| {
            QuizError::QuestionBankError(format!("Failed to parse questions: {}", e))
        })?;
        Self::new(questions)
    }

    /// Load a bank from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            QuizError::QuestionBankError(format!(
                "Failed to read question file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Reorder the questions once, before any session is built over them
    pub fn shuffled(mut self) -> Self {
        let mut rng = SmallRng::from_entropy();
        self.questions.shuffle(&mut rng);
        self
    }

    /// Number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; a bank holds at least one question
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// All questions in order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
