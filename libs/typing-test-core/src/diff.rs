//! Turns an alignment into annotated token streams for display.

use crate::alignment::AlignmentOp;
use serde::{Deserialize, Serialize};

/// Shown in the typed answer where a word is missing.
pub const MISSING_PLACEHOLDER: &str = "___";

/// How a token should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Word typed correctly.
    Normal,
    /// Typed word that is wrong or superfluous.
    Wrong,
    /// Expected word the user got wrong or left out.
    Expected,
    /// Stand-in for a word the user left out.
    MissingPlaceholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Typed answer and expected answer, side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub user_tokens: Vec<Token>,
    pub correct_tokens: Vec<Token>,
}

impl DiffResult {
    /// Typed answer as plain text, tokens separated by single spaces.
    pub fn user_line(&self) -> String {
        join(&self.user_tokens)
    }

    /// Expected answer as plain text, tokens separated by single spaces.
    pub fn correct_line(&self) -> String {
        join(&self.correct_tokens)
    }

    /// Number of highlighted tokens on the typed side.
    pub fn edit_count(&self) -> usize {
        self.user_tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Normal)
            .count()
    }
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map alignment steps to highlighted tokens for both answers.
pub fn present(ops: &[AlignmentOp]) -> DiffResult {
    let mut user_tokens = Vec::with_capacity(ops.len());
    let mut correct_tokens = Vec::with_capacity(ops.len());

    for op in ops {
        match op {
            AlignmentOp::Match {
                user_word,
                correct_word,
            } => {
                user_tokens.push(Token::new(user_word.as_str(), TokenKind::Normal));
                correct_tokens.push(Token::new(correct_word.as_str(), TokenKind::Normal));
            }
            AlignmentOp::Substitute {
                user_word,
                correct_word,
            } => {
                user_tokens.push(Token::new(user_word.as_str(), TokenKind::Wrong));
                correct_tokens.push(Token::new(correct_word.as_str(), TokenKind::Expected));
            }
            AlignmentOp::Delete { user_word } => {
                user_tokens.push(Token::new(user_word.as_str(), TokenKind::Wrong));
            }
            AlignmentOp::Insert { correct_word } => {
                user_tokens.push(Token::new(MISSING_PLACEHOLDER, TokenKind::MissingPlaceholder));
                correct_tokens.push(Token::new(correct_word.as_str(), TokenKind::Expected));
            }
        }
    }

    DiffResult {
        user_tokens,
        correct_tokens,
    }
}
