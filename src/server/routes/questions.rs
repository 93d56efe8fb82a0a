use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        NewQuestion,
    },
    server::{
        app::AppState,
        error::AppError,
        pagination::{paginate, PageQuery},
    },
};

use super::{ApiResponse, QuestionList, QuestionsPage, Success, DEFAULT_CURRENT_CATEGORY};

// numbers may arrive as strings from form-driven clients; absent values are left to the schema
#[derive(Deserialize, Debug)]
struct AddQuestionBody {
    #[serde(default)]
    question: String,
    #[serde(default)]
    answer: String,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct SearchBody {
    #[serde(default, rename = "searchTerm")]
    search_term: String,
}

async fn questions_page(pool: &SqlitePool, page: i64) -> Result<QuestionsPage, AppError> {
    let categories = categories::get_category_map(pool).await?;
    let data = questions::get_all_questions(pool).await?;
    let total_questions = data.len();
    Ok(QuestionsPage {
        success: true,
        questions: paginate(page, data),
        categories,
        current_category: DEFAULT_CURRENT_CATEGORY,
        total_questions,
    })
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<QuestionsPage> {
    let listing = questions_page(&pool, PageQuery::page_of(query)).await?;
    if listing.questions.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(Json(listing))
}

// A missing question is reported as 422 like every other failure here, not as 404.
// Ids below 1 never name a question and are treated like an unmatched route.
async fn delete_question(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<QuestionsPage> {
    let Path(id) = path.map_err(|_| AppError::NotFound)?;
    if id < 1 {
        return Err(AppError::NotFound);
    }
    let page = PageQuery::page_of(query);
    let result = async {
        questions::get_question_by_id(&pool, id)
            .await?
            .ok_or(AppError::NotFound)?;
        questions::delete_question(&pool, id).await?;
        tracing::info!(id, "Deleted question");
        questions_page(&pool, page).await
    }
    .await;

    result.map(Json).map_err(AppError::unprocessable)
}

async fn add_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<AddQuestionBody>, JsonRejection>,
) -> ApiResponse<Success> {
    let result = async {
        let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
        let new = NewQuestion {
            question: body.question,
            answer: body.answer,
            category: body.category,
            difficulty: body.difficulty,
        };
        let id = questions::create_question(&pool, &new).await?;
        tracing::info!(id, "Created question");
        Ok::<_, AppError>(Success { success: true })
    }
    .await;

    result.map(Json).map_err(AppError::unprocessable)
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<QuestionList> {
    let page = PageQuery::page_of(query);
    let result = async {
        let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
        let data = questions::search_questions(&pool, &body.search_term).await?;
        let total_questions = data.len();
        Ok::<_, AppError>(QuestionList {
            success: true,
            questions: paginate(page, data),
            current_category: DEFAULT_CURRENT_CATEGORY,
            total_questions,
        })
    }
    .await;

    result.map(Json).map_err(AppError::unprocessable)
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/add", post(add_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
