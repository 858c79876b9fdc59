#![forbid(unsafe_code)]

pub mod app_services;
pub mod category_service;
pub mod error;
pub mod question_service;
pub mod quiz_service;

pub use app_services::AppServices;
pub use category_service::CategoryService;
pub use error::{AppServicesError, CategoryServiceError, QuestionServiceError, QuizServiceError};
pub use question_service::QuestionService;
pub use quiz_service::{QuizRequest, QuizService};
