mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

use crate::db::Question;
use crate::server::error::AppError;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

pub type ApiResponse<T> = Result<Json<T>, AppError>;

/// Placeholder the frontend expects on the unfiltered listings.
const DEFAULT_CURRENT_CATEGORY: i64 = 1;

/// Page of questions along with every category, as returned by the listing and by delete.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    categories: BTreeMap<i64, String>,
    current_category: i64,
    total_questions: usize,
}

/// Page of a filtered question set: search results or one category.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuestionList {
    success: bool,
    questions: Vec<Question>,
    current_category: i64,
    total_questions: usize,
}

#[derive(Serialize, Debug)]
pub struct Success {
    success: bool,
}
