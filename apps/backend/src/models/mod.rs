//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from typing-test-core
pub use typing_test_core::{
    Advance, AnswerRecord, Card, CardSide, CardStatus, CheckResult, Direction, Progress, Score,
    ScoreTier, SessionResults, SessionState, TestSession, TypingSettings,
};

// === Request Types ===

/// Start a typing test over a snapshot of cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub cards: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_side: Option<CardSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_side: Option<CardSide>,
}

impl StartSessionRequest {
    /// Requested sides, falling back to front → back
    pub fn settings(&self) -> TypingSettings {
        let defaults = TypingSettings::default();
        TypingSettings {
            prompt_side: self.prompt_side.unwrap_or(defaults.prompt_side),
            answer_side: self.answer_side.unwrap_or(defaults.answer_side),
        }
    }
}

/// Current contents of the answer field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRequest {
    #[serde(default)]
    pub text: String,
}

/// Answer to check against the current card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAnswerRequest {
    pub text: String,
}

/// Navigation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceRequest {
    pub direction: Direction,
}

// === Response Types ===

/// Snapshot of a session as shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub state: SessionState,
    pub card_index: usize,
    pub total_cards: usize,
    pub prompt: String,
    pub card_status: CardStatus,
    pub input: String,
    pub progress: Progress,
    pub can_go_previous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AnswerRecord>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl SessionView {
    pub fn from_session(session_id: Uuid, session: &TestSession) -> Self {
        Self {
            session_id,
            state: session.state(),
            card_index: session.current_index(),
            total_cards: session.total_cards(),
            prompt: session.current_prompt().to_string(),
            card_status: session.current_status(),
            input: session.input().to_string(),
            progress: session.progress(),
            can_go_previous: session.can_go_previous(),
            record: session.current_record().cloned(),
            started_at: session.started_at(),
            finished_at: session.finished_at(),
        }
    }
}

/// Result of checking an answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAnswerResponse {
    #[serde(flatten)]
    pub result: CheckResult,
    pub headline: String,
}

impl From<CheckResult> for CheckAnswerResponse {
    fn from(result: CheckResult) -> Self {
        let headline = result.headline().to_string();
        Self { result, headline }
    }
}

/// Result of moving between cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceResponse {
    pub auto_checked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_check: Option<CheckAnswerResponse>,
    pub card_index: usize,
    pub finished: bool,
    pub session: SessionView,
}

impl AdvanceResponse {
    pub fn new(advance: Advance, session: SessionView) -> Self {
        Self {
            auto_checked: advance.auto_checked(),
            auto_check: advance.auto_check.map(CheckAnswerResponse::from),
            card_index: advance.card_index,
            finished: advance.finished,
            session,
        }
    }
}

/// Final score with its message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub score: Score,
    pub message: String,
    pub tier: ScoreTier,
}

impl From<Score> for ScoreResponse {
    fn from(score: Score) -> Self {
        Self {
            message: score.band.message().to_string(),
            tier: score.band.tier(),
            score,
        }
    }
}
