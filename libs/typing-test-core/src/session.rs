//! Typing test session state machine.
//!
//! A session walks an ordered snapshot of cards. Each card is checked at most
//! once per attempt from the user's point of view: re-checking replaces the
//! earlier record instead of adding another one. Moving away from an
//! unanswered card with text in the input field checks that text first.

use crate::diff::DiffResult;
use crate::error::{Result, TestError};
use crate::evaluator::{AnswerEvaluator, HtmlStripper, MarkupStripper};
use crate::types::{
    AnswerRecord, Card, CardStatus, Direction, SessionResults, SessionState, TypingSettings,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of checking the current card. Always carries something to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub card_id: i64,
    pub question_index: usize,
    pub is_correct: bool,
    pub user_answer: String,
    pub correct_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffResult>,
}

impl CheckResult {
    /// Short line announcing the outcome.
    pub fn headline(&self) -> &'static str {
        if self.is_correct {
            "Correct!"
        } else {
            "Not quite right"
        }
    }
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advance {
    /// Result of checking pending input before leaving the card.
    pub auto_check: Option<CheckResult>,
    /// Card shown after the move.
    pub card_index: usize,
    /// Whether moving past the last card finished the session.
    pub finished: bool,
}

impl Advance {
    pub fn auto_checked(&self) -> bool {
        self.auto_check.is_some()
    }
}

/// Position within the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based number of the current card.
    pub card_number: usize,
    pub total_cards: usize,
    pub percent: f64,
}

/// Coarse colour grouping for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

/// Performance message bracket for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Outstanding,
    Excellent,
    Good,
    Fair,
    KeepPracticing,
}

impl PerformanceBand {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Self::Outstanding,
            80..=89 => Self::Excellent,
            70..=79 => Self::Good,
            60..=69 => Self::Fair,
            _ => Self::KeepPracticing,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding! You have mastered this material!",
            Self::Excellent => "Excellent work! You're doing great!",
            Self::Good => "Good job! Keep practicing to improve further.",
            Self::Fair => "Not bad! Review the material and try again.",
            Self::KeepPracticing => "Keep practicing! You'll get better with more practice.",
        }
    }

    pub fn tier(&self) -> ScoreTier {
        match self {
            Self::Outstanding | Self::Excellent => ScoreTier::High,
            Self::Good | Self::Fair => ScoreTier::Medium,
            Self::KeepPracticing => ScoreTier::Low,
        }
    }
}

/// Final score of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub percentage: u32,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub unanswered_count: usize,
    /// Size of the card snapshot, answered or not.
    pub total_cards: usize,
    pub band: PerformanceBand,
}

impl Score {
    fn from_results(results: &SessionResults, total_cards: usize) -> Self {
        let percentage = if total_cards == 0 {
            0
        } else {
            (results.correct_count as f64 / total_cards as f64 * 100.0).round() as u32
        };
        Self {
            percentage,
            correct_count: results.correct_count,
            incorrect_count: results.incorrect_count,
            unanswered_count: total_cards.saturating_sub(results.answers.len()),
            total_cards,
            band: PerformanceBand::from_percentage(percentage),
        }
    }
}

/// A typing test over a fixed snapshot of cards.
#[derive(Debug, Clone)]
pub struct TestSession<M = HtmlStripper> {
    cards: Vec<Card>,
    settings: TypingSettings,
    evaluator: AnswerEvaluator<M>,
    state: SessionState,
    current: usize,
    input: String,
    results: SessionResults,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

/// Create and start a session using the default HTML stripper.
pub fn start_session(cards: Vec<Card>, settings: TypingSettings) -> Result<TestSession> {
    let mut session = TestSession::new(cards, settings, HtmlStripper)?;
    session.start()?;
    Ok(session)
}

impl<M: MarkupStripper> TestSession<M> {
    /// Create a session that has not started yet.
    pub fn new(cards: Vec<Card>, settings: TypingSettings, stripper: M) -> Result<Self> {
        settings.validate()?;
        if cards.is_empty() {
            return Err(TestError::NoCards);
        }
        Ok(Self {
            cards,
            settings,
            evaluator: AnswerEvaluator::new(stripper),
            state: SessionState::NotStarted,
            current: 0,
            input: String::new(),
            results: SessionResults::default(),
            started_at: None,
            finished_at: None,
        })
    }

    pub fn start(&mut self) -> Result<()> {
        self.require(SessionState::NotStarted, "start")?;
        self.state = SessionState::InProgress;
        self.started_at = Some(Utc::now());
        tracing::debug!(total_cards = self.cards.len(), "typing test started");
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn settings(&self) -> TypingSettings {
        self.settings
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_card(&self) -> &Card {
        &self.cards[self.current]
    }

    /// Prompt side of the current card, markup included.
    pub fn current_prompt(&self) -> &str {
        self.current_card().side(self.settings.prompt_side)
    }

    pub fn card_status(&self, index: usize) -> Option<CardStatus> {
        let card = self.cards.get(index)?;
        Some(match self.results.get(card.id) {
            Some(_) => CardStatus::Checked,
            None => CardStatus::Unanswered,
        })
    }

    pub fn current_status(&self) -> CardStatus {
        match self.results.get(self.current_card().id) {
            Some(_) => CardStatus::Checked,
            None => CardStatus::Unanswered,
        }
    }

    /// Latest record for the current card, if it was checked.
    pub fn current_record(&self) -> Option<&AnswerRecord> {
        self.results.get(self.current_card().id)
    }

    pub fn results(&self) -> &SessionResults {
        &self.results
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Mirror the contents of the answer field.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 0
    }

    pub fn progress(&self) -> Progress {
        let total_cards = self.cards.len();
        Progress {
            card_number: self.current + 1,
            total_cards,
            percent: (self.current + 1) as f64 / total_cards as f64 * 100.0,
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Check `text` against the current card's answer side.
    ///
    /// Re-checking a card replaces its record. On error nothing changes.
    pub fn check_answer(&mut self, text: &str) -> Result<CheckResult> {
        self.require(SessionState::InProgress, "check an answer")?;

        let card = &self.cards[self.current];
        let evaluation = self
            .evaluator
            .evaluate(text, card.side(self.settings.answer_side))?;

        let record = AnswerRecord {
            card_id: card.id,
            question_index: self.current,
            is_correct: evaluation.is_correct,
            user_answer: evaluation.user_answer.clone(),
            correct_answer: evaluation.correct_answer.clone(),
        };
        tracing::debug!(
            card_id = record.card_id,
            question_index = record.question_index,
            is_correct = record.is_correct,
            "answer checked"
        );
        self.results.upsert(record);
        self.input = text.to_string();

        Ok(CheckResult {
            card_id: card.id,
            question_index: self.current,
            is_correct: evaluation.is_correct,
            user_answer: evaluation.user_answer,
            correct_answer: evaluation.correct_answer,
            diff: evaluation.diff,
        })
    }

    /// Move to the next or previous card.
    ///
    /// `Previous` on the first card does nothing. `Next` on the last card
    /// finishes the session.
    pub fn advance(&mut self, direction: Direction) -> Result<Advance> {
        self.require(SessionState::InProgress, "move between cards")?;

        if direction == Direction::Previous && self.current == 0 {
            return Ok(Advance {
                auto_check: None,
                card_index: self.current,
                finished: false,
            });
        }

        let auto_check = self.check_pending()?;
        let finished = match direction {
            Direction::Next if self.current + 1 >= self.cards.len() => {
                self.close();
                true
            }
            Direction::Next => {
                self.current += 1;
                false
            }
            Direction::Previous => {
                self.current -= 1;
                false
            }
        };
        if !finished {
            self.input.clear();
        }

        tracing::debug!(
            ?direction,
            card_index = self.current,
            auto_checked = auto_check.is_some(),
            finished,
            "advanced"
        );
        Ok(Advance {
            auto_check,
            card_index: self.current,
            finished,
        })
    }

    /// Finish the test, checking any pending input first.
    pub fn finish(&mut self) -> Result<SessionResults> {
        self.require(SessionState::InProgress, "finish")?;
        self.check_pending()?;
        self.close();
        Ok(self.results.clone())
    }

    /// Start over on the same cards with no recorded answers.
    pub fn retake(&mut self) -> Result<()> {
        self.require(SessionState::Finished, "retake")?;
        self.results = SessionResults::default();
        self.current = 0;
        self.input.clear();
        self.state = SessionState::InProgress;
        self.started_at = Some(Utc::now());
        self.finished_at = None;
        tracing::debug!("typing test retaken");
        Ok(())
    }

    /// Go back over a finished test from the first card, keeping its answers.
    pub fn review(&mut self) -> Result<()> {
        self.require(SessionState::Finished, "review")?;
        self.current = 0;
        self.input.clear();
        self.state = SessionState::InProgress;
        self.finished_at = None;
        tracing::debug!(answers = self.results.answers.len(), "reviewing typing test");
        Ok(())
    }

    pub fn score(&self) -> Result<Score> {
        self.require(SessionState::Finished, "score")?;
        Ok(Score::from_results(&self.results, self.cards.len()))
    }

    fn check_pending(&mut self) -> Result<Option<CheckResult>> {
        if self.current_status() == CardStatus::Checked || self.input.trim().is_empty() {
            return Ok(None);
        }
        let text = self.input.clone();
        self.check_answer(&text).map(Some)
    }

    fn close(&mut self) {
        self.state = SessionState::Finished;
        self.finished_at = Some(Utc::now());
        tracing::debug!(
            correct = self.results.correct_count,
            incorrect = self.results.incorrect_count,
            total_cards = self.cards.len(),
            "typing test finished"
        );
    }

    fn require(&self, expected: SessionState, operation: &'static str) -> Result<()> {
        if self.state == expected {
            return Ok(());
        }
        tracing::warn!(operation, state = %self.state, "operation not allowed in current state");
        Err(TestError::InvalidState {
            operation,
            state: self.state,
        })
    }
}
