//! Core types for typing tests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two fields of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSide {
    Front,
    Back,
}

impl CardSide {
    /// Get the side name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "front" => Some(Self::Front),
            "back" => Some(Self::Back),
            _ => None,
        }
    }
}

/// A vocabulary card. Both sides may carry rich-text markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub front: String,
    pub back: String,
}

impl Card {
    pub fn new(id: i64, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
        }
    }

    /// Content of the given side.
    pub fn side(&self, side: CardSide) -> &str {
        match side {
            CardSide::Front => &self.front,
            CardSide::Back => &self.back,
        }
    }
}

/// Which side is shown and which side must be typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingSettings {
    pub prompt_side: CardSide,
    pub answer_side: CardSide,
}

impl Default for TypingSettings {
    fn default() -> Self {
        Self {
            prompt_side: CardSide::Front,
            answer_side: CardSide::Back,
        }
    }
}

impl TypingSettings {
    pub fn new(prompt_side: CardSide, answer_side: CardSide) -> Self {
        Self {
            prompt_side,
            answer_side,
        }
    }

    /// Reject settings that would show the answer as the prompt.
    pub fn validate(&self) -> crate::Result<()> {
        if self.prompt_side == self.answer_side {
            return Err(crate::TestError::InvalidSettings(format!(
                "prompt and answer are both the {} side",
                self.prompt_side.as_str()
            )));
        }
        Ok(())
    }
}

/// Lifecycle state of a test session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    InProgress,
    Finished,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-card state within an in-progress session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Unanswered,
    Checked,
}

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Previous,
}

/// Outcome of the latest check of one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub card_id: i64,
    pub question_index: usize,
    pub is_correct: bool,
    pub user_answer: String,
    pub correct_answer: String,
}

/// Answers recorded during a session with running totals.
///
/// `correct_count + incorrect_count == answers.len()` always holds; the
/// counts are only ever changed through [`SessionResults::upsert`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResults {
    pub answers: Vec<AnswerRecord>,
    pub correct_count: usize,
    pub incorrect_count: usize,
}

impl SessionResults {
    /// Insert a record, or replace the existing record for the same card.
    pub fn upsert(&mut self, record: AnswerRecord) {
        match self.answers.iter().position(|a| a.card_id == record.card_id) {
            Some(idx) => {
                let was_correct = self.answers[idx].is_correct;
                if was_correct != record.is_correct {
                    if record.is_correct {
                        self.correct_count += 1;
                        self.incorrect_count -= 1;
                    } else {
                        self.incorrect_count += 1;
                        self.correct_count -= 1;
                    }
                }
                self.answers[idx] = record;
            }
            None => {
                if record.is_correct {
                    self.correct_count += 1;
                } else {
                    self.incorrect_count += 1;
                }
                self.answers.push(record);
            }
        }
    }

    /// Record for a card, if it has been checked.
    pub fn get(&self, card_id: i64) -> Option<&AnswerRecord> {
        self.answers.iter().find(|a| a.card_id == card_id)
    }
}
