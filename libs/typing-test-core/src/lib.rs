//! Typing test engine shared by the backend and any other front end.
//!
//! Provides:
//! - Normalization of typographic look-alike characters
//! - Word-level alignment (Wagner–Fischer) of typed vs. expected answers
//! - Highlighted diffs for incorrect answers
//! - Answer evaluation with pluggable markup stripping
//! - The typing test session state machine and scoring

pub mod alignment;
pub mod diff;
pub mod error;
pub mod evaluator;
pub mod normalize;
pub mod session;
pub mod types;

pub use alignment::{align, edit_distance, AlignmentOp};
pub use diff::{present, DiffResult, Token, TokenKind, MISSING_PLACEHOLDER};
pub use error::{Result, TestError};
pub use evaluator::{evaluate, AnswerEvaluator, Evaluation, HtmlStripper, MarkupStripper, PlainText};
pub use normalize::normalize;
pub use session::{
    start_session, Advance, CheckResult, PerformanceBand, Progress, Score, ScoreTier, TestSession,
};
pub use types::{
    AnswerRecord, Card, CardSide, CardStatus, Direction, SessionResults, SessionState,
    TypingSettings,
};
