//! Word-level alignment of a typed answer against the expected answer.
//!
//! Uses a Wagner–Fischer edit-distance table with unit costs. When several
//! alignments share the minimal cost, backtracking prefers, in order: a
//! diagonal match, a diagonal substitution, a deletion (extra typed word),
//! and finally an insertion (missing word). Diffs shown to the user depend on
//! this order.

use serde::{Deserialize, Serialize};

/// One step of an alignment between typed words and expected words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlignmentOp {
    /// Typed word equals the expected word.
    Match {
        user_word: String,
        correct_word: String,
    },
    /// Typed word stands in place of a different expected word.
    Substitute {
        user_word: String,
        correct_word: String,
    },
    /// Typed word with no counterpart in the expected answer.
    Delete { user_word: String },
    /// Expected word the user did not type.
    Insert { correct_word: String },
}

impl AlignmentOp {
    /// Whether this step costs one edit.
    pub fn is_edit(&self) -> bool {
        !matches!(self, Self::Match { .. })
    }

    /// The typed word consumed by this step, if any.
    pub fn user_word(&self) -> Option<&str> {
        match self {
            Self::Match { user_word, .. }
            | Self::Substitute { user_word, .. }
            | Self::Delete { user_word } => Some(user_word),
            Self::Insert { .. } => None,
        }
    }

    /// The expected word consumed by this step, if any.
    pub fn correct_word(&self) -> Option<&str> {
        match self {
            Self::Match { correct_word, .. }
            | Self::Substitute { correct_word, .. }
            | Self::Insert { correct_word } => Some(correct_word),
            Self::Delete { .. } => None,
        }
    }
}

/// Full (m+1)×(n+1) distance table, row-major.
struct DistanceTable {
    cols: usize,
    cells: Vec<usize>,
}

impl DistanceTable {
    fn build<U: AsRef<str>, C: AsRef<str>>(user: &[U], correct: &[C]) -> Self {
        let m = user.len();
        let n = correct.len();
        let cols = n + 1;
        let mut cells = vec![0; (m + 1) * cols];

        for i in 0..=m {
            cells[i * cols] = i;
        }
        for j in 0..=n {
            cells[j] = j;
        }

        for i in 1..=m {
            for j in 1..=n {
                cells[i * cols + j] = if user[i - 1].as_ref() == correct[j - 1].as_ref() {
                    cells[(i - 1) * cols + (j - 1)]
                } else {
                    1 + cells[(i - 1) * cols + j] // delete
                        .min(cells[i * cols + (j - 1)]) // insert
                        .min(cells[(i - 1) * cols + (j - 1)]) // substitute
                };
            }
        }

        Self { cols, cells }
    }

    fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }
}

/// Minimum number of word substitutions, insertions and deletions turning
/// `user` into `correct`.
pub fn edit_distance<U: AsRef<str>, C: AsRef<str>>(user: &[U], correct: &[C]) -> usize {
    DistanceTable::build(user, correct).get(user.len(), correct.len())
}

/// Align typed words against expected words.
///
/// The result covers both sequences completely and in order, and contains
/// exactly [`edit_distance`] non-match steps.
pub fn align<U: AsRef<str>, C: AsRef<str>>(user: &[U], correct: &[C]) -> Vec<AlignmentOp> {
    let dp = DistanceTable::build(user, correct);
    let mut ops = Vec::with_capacity(user.len().max(correct.len()));
    let (mut i, mut j) = (user.len(), correct.len());

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && user[i - 1].as_ref() == correct[j - 1].as_ref() {
            ops.push(AlignmentOp::Match {
                user_word: user[i - 1].as_ref().to_string(),
                correct_word: correct[j - 1].as_ref().to_string(),
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && dp.get(i, j) == dp.get(i - 1, j - 1) + 1 {
            ops.push(AlignmentOp::Substitute {
                user_word: user[i - 1].as_ref().to_string(),
                correct_word: correct[j - 1].as_ref().to_string(),
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && dp.get(i, j) == dp.get(i - 1, j) + 1 {
            ops.push(AlignmentOp::Delete {
                user_word: user[i - 1].as_ref().to_string(),
            });
            i -= 1;
        } else {
            // Only reachable with j > 0: in column 0 the delete branch always holds.
            ops.push(AlignmentOp::Insert {
                correct_word: correct[j - 1].as_ref().to_string(),
            });
            j -= 1;
        }
    }

    ops.reverse();
    ops
}
