use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Question,
    },
    server::{app::AppState, deserializers::deserialize_id_list, error::AppError},
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

#[derive(Deserialize, Debug)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Deserialize, Debug)]
struct QuizBody {
    quiz_category: QuizCategory,
    #[serde(deserialize_with = "deserialize_id_list")]
    previous_questions: Vec<i64>,
}

/// Either the next question, or `false` once the round has run out of questions.
#[derive(Serialize, Debug)]
#[serde(untagged)]
enum QuizPick {
    Question(Question),
    Exhausted(bool),
}

#[derive(Serialize, Debug)]
struct QuizResponse {
    success: bool,
    question: QuizPick,
}

async fn quiz_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResponse<QuizResponse> {
    let result = async {
        let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

        // unknown ids, including the "all" pseudo-category, draw from every question
        let category = categories::get_category(&pool, body.quiz_category.id).await?;
        let pool_questions = match &category {
            Some(c) => questions::get_questions_for_category(&pool, c.id).await?,
            None => questions::get_all_questions(&pool).await?,
        };

        let candidates: Vec<Question> = pool_questions
            .into_iter()
            .filter(|q| !body.previous_questions.contains(&q.id))
            .collect();
        let picked = candidates.choose(&mut rand::thread_rng()).cloned();

        let response = match picked {
            Some(question) => {
                let label = category
                    .as_ref()
                    .map(|c| c.id.to_string())
                    .unwrap_or_else(|| "all".to_owned());
                QUIZ_QUESTIONS_SERVED.with_label_values(&[label.as_str()]).inc();
                QuizResponse {
                    success: true,
                    question: QuizPick::Question(question),
                }
            }
            None => QuizResponse {
                success: false,
                question: QuizPick::Exhausted(false),
            },
        };
        Ok::<_, AppError>(response)
    }
    .await;

    result.map(Json).map_err(AppError::unprocessable)
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(quiz_question))
        .with_state(state)
}
