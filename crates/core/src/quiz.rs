//! Random selection of the next quiz question.
//!
//! Selection is stateless: the caller supplies the ids already asked in the
//! current session, and each call draws uniformly among the remaining
//! questions.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{CategoryId, Question, QuestionId};

/// Category restriction for a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    Any,
    Only(CategoryId),
}

impl CategoryFilter {
    /// Interpret a raw category id from a request. `0` means "all categories".
    #[must_use]
    pub fn from_raw(id: u64) -> Self {
        if id == 0 {
            Self::Any
        } else {
            Self::Only(CategoryId::new(id))
        }
    }

    #[must_use]
    pub fn matches(self, question: &Question) -> bool {
        match self {
            Self::Any => true,
            Self::Only(category) => question.category() == category,
        }
    }
}

/// Uniform random choice of an index.
pub trait Picker: Send + Sync {
    /// Return an index in `0..len`. Never called with `len == 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Picker backed by the thread-local, OS-seeded RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngPicker;

impl Picker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Deterministic picker for reproducible runs and tests.
#[derive(Debug)]
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Picker for SeededPicker {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..len)
    }
}

/// Pick the next question among those not yet asked and inside the category
/// restriction. `None` means the quiz has run out of questions.
#[must_use]
pub fn select_next<'a>(
    questions: &'a [Question],
    excluded: &HashSet<QuestionId>,
    category: CategoryFilter,
    picker: &dyn Picker,
) -> Option<&'a Question> {
    let eligible: Vec<&Question> = questions
        .iter()
        .filter(|q| !excluded.contains(&q.id()) && category.matches(q))
        .collect();

    if eligible.is_empty() {
        return None;
    }

    let index = picker.pick(eligible.len());
    debug_assert!(index < eligible.len(), "picker returned out-of-range index");
    eligible.get(index).copied()
}
