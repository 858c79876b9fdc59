//! Wire shapes for requests and responses.

use serde::{Deserialize, Serialize};

use trivia_core::model::Question;
use trivia_core::{CategoryMap, Page, PageNumber};

use crate::error::ApiError;

/// A question as clients see it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuestionBody {
    pub id: u64,
    pub question: String,
    pub answer: String,
    pub category: u64,
    pub difficulty: u8,
}

impl From<&Question> for QuestionBody {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id().value(),
            question: q.question().to_string(),
            answer: q.answer().to_string(),
            category: q.category().value(),
            difficulty: q.difficulty().value(),
        }
    }
}

fn bodies(page: Page<Question>) -> Page<QuestionBody> {
    page.map(|q| QuestionBody::from(&q))
}

/// `?page=N`; anything unparseable or below 1 reads as the first page.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    page: Option<String>,
}

impl PageParams {
    #[must_use]
    pub fn page_number(&self) -> PageNumber {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map_or(PageNumber::FIRST, PageNumber::new)
    }
}

/// A numeric field clients send either as a number or a numeric string.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum NumberField {
    Int(i64),
    Text(String),
}

impl NumberField {
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` if a text value is not an integer.
    pub fn to_i64(&self, field: &str) -> Result<i64, ApiError> {
        match self {
            Self::Int(v) => Ok(*v),
            Self::Text(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ApiError::BadRequest(format!("{field} must be an integer"))),
        }
    }
}

/// Body of `POST /questions`: a search when `searchTerm` is non-blank,
/// otherwise a new question.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionsPostBody {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<NumberField>,
    pub difficulty: Option<NumberField>,
}

impl QuestionsPostBody {
    /// The trimmed-non-empty search term, if any.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .filter(|term| !term.trim().is_empty())
    }
}

/// Only `id` is read; the display name clients echo back is ignored.
#[derive(Debug, Deserialize)]
pub struct QuizCategoryBody {
    pub id: Option<NumberField>,
}

#[derive(Debug, Deserialize)]
pub struct QuizBody {
    pub previous_questions: Option<Vec<u64>>,
    pub quiz_category: Option<QuizCategoryBody>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

/// Listings that span every category report `current_category` as 0.
#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<QuestionBody>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    pub current_category: u64,
}

impl QuestionListResponse {
    #[must_use]
    pub fn new(page: Page<Question>, categories: CategoryMap) -> Self {
        Self {
            success: true,
            total_questions: page.total,
            questions: bodies(page).items,
            categories,
            current_category: 0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<QuestionBody>,
    pub total_questions: usize,
    pub current_category: u64,
}

impl CategoryQuestionsResponse {
    #[must_use]
    pub fn new(page: Page<Question>, category: u64) -> Self {
        Self {
            success: true,
            total_questions: page.total,
            questions: bodies(page).items,
            current_category: category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<QuestionBody>,
    pub total_questions: usize,
    pub current_category: u64,
}

impl SearchResponse {
    #[must_use]
    pub fn new(page: Page<Question>) -> Self {
        Self {
            success: true,
            total_questions: page.total,
            questions: bodies(page).items,
            current_category: 0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: u64,
    pub questions: Vec<QuestionBody>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: u64,
    pub questions: Vec<QuestionBody>,
    pub total_questions: usize,
}

impl CreatedResponse {
    #[must_use]
    pub fn new(created: u64, page: Page<Question>) -> Self {
        Self {
            success: true,
            created,
            total_questions: page.total,
            questions: bodies(page).items,
        }
    }
}

impl DeletedResponse {
    #[must_use]
    pub fn new(deleted: u64, page: Page<Question>) -> Self {
        Self {
            success: true,
            deleted,
            total_questions: page.total,
            questions: bodies(page).items,
        }
    }
}

/// `question` is `null` once the quiz has run out of questions.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<QuestionBody>,
}
