use std::collections::HashSet;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use tracing::debug;

use services::QuizRequest;
use trivia_core::CategoryFilter;
use trivia_core::model::{CategoryId, Difficulty, QuestionDraft, QuestionId};

use crate::error::ApiError;
use crate::router::AppState;
use crate::types::{
    CategoriesResponse, CategoryQuestionsResponse, CreatedResponse, DeletedResponse,
    NumberField, PageParams, QuestionBody, QuestionListResponse, QuestionsPostBody, QuizBody,
    QuizResponse, SearchResponse,
};

pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.categories.categories().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let page = state.questions.list_questions(params.page_number()).await?;
    if page.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = state.categories.categories().await?;
    Ok(Json(QuestionListResponse::new(page, categories)))
}

pub async fn list_category_questions(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    Query(params): Query<PageParams>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let Path(raw) = path?;
    let category: CategoryId = raw.parse().map_err(|_| ApiError::NotFound)?;

    let page = state
        .questions
        .list_by_category(category, params.page_number())
        .await?;
    if page.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoryQuestionsResponse::new(page, category.value())))
}

pub async fn delete_question(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    Query(params): Query<PageParams>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(raw) = path?;
    let id: QuestionId = raw.parse().map_err(|_| ApiError::NotFound)?;

    state
        .questions
        .delete_question(id)
        .await
        .map_err(ApiError::from_mutation)?;

    // The refreshed listing is part of the mutation's response.
    let page = state
        .questions
        .list_questions(params.page_number())
        .await
        .map_err(ApiError::from_mutation)?;
    Ok(Json(DeletedResponse::new(id.value(), page)))
}

/// `POST /questions` serves both search and creation.
pub async fn search_or_create(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    body: Result<Json<QuestionsPostBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;

    if let Some(term) = body.search_term() {
        let page = state.questions.search(term, params.page_number()).await?;
        return Ok(Json(SearchResponse::new(page)).into_response());
    }

    let draft = draft_from(body)?;
    let id = state
        .questions
        .create_question(draft)
        .await
        .map_err(ApiError::from_mutation)?;

    // The refreshed listing is part of the mutation's response.
    let page = state
        .questions
        .list_questions(params.page_number())
        .await
        .map_err(ApiError::from_mutation)?;
    Ok(Json(CreatedResponse::new(id.value(), page)).into_response())
}

fn draft_from(body: QuestionsPostBody) -> Result<QuestionDraft, ApiError> {
    let QuestionsPostBody {
        question,
        answer,
        category,
        difficulty,
        ..
    } = body;

    let question = question.ok_or_else(|| missing("question"))?;
    let answer = answer.ok_or_else(|| missing("answer"))?;
    let difficulty = difficulty.ok_or_else(|| missing("difficulty"))?;
    let category = category.ok_or_else(|| missing("category"))?;

    let difficulty = Difficulty::try_from(difficulty.to_i64("difficulty")?)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let category = category_id(&category, "category")?;

    Ok(QuestionDraft {
        question,
        answer,
        category,
        difficulty,
    })
}

fn missing(field: &str) -> ApiError {
    ApiError::BadRequest(format!("missing field: {field}"))
}

fn category_id(field: &NumberField, name: &str) -> Result<CategoryId, ApiError> {
    let raw = field.to_i64(name)?;
    u64::try_from(raw)
        .map(CategoryId::new)
        .map_err(|_| ApiError::BadRequest(format!("{name} must not be negative")))
}

pub async fn next_quiz_question(
    State(state): State<AppState>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(body) = body?;

    let previous = body
        .previous_questions
        .ok_or_else(|| ApiError::BadRequest("previous_questions must be a list".to_string()))?;
    let id = body
        .quiz_category
        .and_then(|c| c.id)
        .ok_or_else(|| ApiError::BadRequest("quiz_category.id is required".to_string()))?;
    let category = category_id(&id, "quiz_category.id")?;

    let request = QuizRequest {
        previous: previous.into_iter().map(QuestionId::new).collect::<HashSet<_>>(),
        category: CategoryFilter::from_raw(category.value()),
    };
    let next = state.quizzes.next_question(&request).await?;

    debug!(exhausted = next.is_none(), "served quiz question");
    Ok(Json(QuizResponse {
        success: true,
        question: next.as_ref().map(QuestionBody::from),
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
