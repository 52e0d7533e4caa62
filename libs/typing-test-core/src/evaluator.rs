//! Answer evaluation for typing tests.

use crate::alignment::align;
use crate::diff::{present, DiffResult};
use crate::error::{Result, TestError};
use crate::normalize::{collapse_whitespace, normalize, tokenize};
use serde::{Deserialize, Serialize};

/// Extracts plain text from a card field that may contain markup.
pub trait MarkupStripper: Send + Sync {
    fn strip_markup(&self, text: &str) -> String;
}

impl<F> MarkupStripper for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn strip_markup(&self, text: &str) -> String {
        self(text)
    }
}

/// Card fields are already plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl MarkupStripper for PlainText {
    fn strip_markup(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Drops HTML tags and decodes character entities, keeping text content only.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlStripper;

impl MarkupStripper for HtmlStripper {
    fn strip_markup(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            let opens_tag = c == '<'
                && chars
                    .peek()
                    .is_some_and(|n| n.is_ascii_alphabetic() || matches!(n, '/' | '!' | '?'));
            if opens_tag {
                // A `>` inside a quoted attribute value does not close the tag.
                // An unterminated tag swallows the rest of the text.
                let mut quote = None;
                for t in chars.by_ref() {
                    match (quote, t) {
                        (None, '>') => break,
                        (None, '"' | '\'') => quote = Some(t),
                        (Some(q), _) if q == t => quote = None,
                        _ => {}
                    }
                }
            } else {
                out.push(c);
            }
        }

        html_escape::decode_html_entities(&out).into_owned()
    }
}

/// Outcome of evaluating one typed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub is_correct: bool,
    /// Typed answer, trimmed.
    pub user_answer: String,
    /// Expected answer as plain text, trimmed.
    pub correct_answer: String,
    /// Word-level comparison, present only for incorrect answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffResult>,
}

/// Compares typed answers with card answers.
#[derive(Debug, Clone, Default)]
pub struct AnswerEvaluator<M = HtmlStripper> {
    stripper: M,
}

impl<M: MarkupStripper> AnswerEvaluator<M> {
    pub fn new(stripper: M) -> Self {
        Self { stripper }
    }

    /// Plain text of a card field.
    pub fn plain_text(&self, raw: &str) -> String {
        self.stripper.strip_markup(raw)
    }

    /// Evaluate a typed answer against the (possibly marked-up) expected one.
    ///
    /// Answers match when they are identical after normalization and
    /// whitespace collapsing. Comparison is case-sensitive.
    pub fn evaluate(&self, user_raw: &str, correct_raw: &str) -> Result<Evaluation> {
        let user_answer = user_raw.trim();
        if user_answer.is_empty() {
            return Err(TestError::EmptyAnswer);
        }
        let correct_plain = self.stripper.strip_markup(correct_raw);
        let correct_answer = correct_plain.trim();

        let user_normalized = collapse_whitespace(&normalize(user_answer));
        let correct_normalized = collapse_whitespace(&normalize(correct_answer));

        let is_correct = user_normalized == correct_normalized;
        let diff = if is_correct {
            None
        } else {
            let ops = align(&tokenize(&user_normalized), &tokenize(&correct_normalized));
            Some(present(&ops))
        };

        Ok(Evaluation {
            is_correct,
            user_answer: user_answer.to_string(),
            correct_answer: correct_answer.to_string(),
            diff,
        })
    }
}

/// Evaluate with the default HTML stripper.
pub fn evaluate(user_raw: &str, correct_raw: &str) -> Result<Evaluation> {
    AnswerEvaluator::<HtmlStripper>::default().evaluate(user_raw, correct_raw)
}
