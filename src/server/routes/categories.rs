use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::{categories, questions},
    server::{
        app::AppState,
        error::AppError,
        pagination::{paginate, PageQuery},
    },
};

use super::{ApiResponse, QuestionList};

#[derive(Serialize, Debug)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesResponse> {
    let categories = categories::get_category_map(&pool).await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<QuestionList> {
    let Path(id) = path.map_err(|_| AppError::NotFound)?;
    let page = PageQuery::page_of(query);
    let category = categories::get_category(&pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let data = questions::get_questions_for_category(&pool, category.id).await?;
    let total_questions = data.len();
    Ok(Json(QuestionList {
        success: true,
        questions: paginate(page, data),
        current_category: id,
        total_questions,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::server::routes::test_helpers::{get, ids, seeded_app};

    #[tokio::test]
    async fn categories_map_every_id() {
        let (app, _) = seeded_app(0).await;
        let (status, body) = get(&app, "/categories").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let map = body["categories"].as_object().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["1", "2", "3", "4", "5", "6"]);
        assert_eq!(body["categories"]["1"], "Science");
    }

    #[tokio::test]
    async fn questions_of_category() {
        let (app, _) = seeded_app(30).await;
        let (status, body) = get(&app, "/categories/1/questions").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["currentCategory"], 1);
        assert_eq!(body["totalQuestions"], 6);
        assert_eq!(ids(&body), vec![1, 6, 11, 16, 21, 26]);
        assert!(body.get("categories").is_none());
    }

    #[tokio::test]
    async fn category_total_ignores_page() {
        let (app, _) = seeded_app(60).await;
        let (status, body) = get(&app, "/categories/2/questions?page=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currentCategory"], 2);
        assert_eq!(body["totalQuestions"], 12);
        assert_eq!(ids(&body), vec![52, 57]);
    }

    #[tokio::test]
    async fn repeated_page_on_category_means_first_page() {
        let (app, _) = seeded_app(60).await;
        let (status, body) = get(&app, "/categories/2/questions?page=2&page=3").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalQuestions"], 12);
        assert_eq!(ids(&body), vec![2, 7, 12, 17, 22, 27, 32, 37, 42, 47]);
    }

    #[tokio::test]
    async fn empty_category_is_not_an_error() {
        let (app, _) = seeded_app(10).await;
        let (status, body) = get(&app, "/categories/6/questions").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalQuestions"], 0);
        assert!(ids(&body).is_empty());
    }

    #[tokio::test]
    async fn unknown_category_is_404() {
        let (app, _) = seeded_app(10).await;
        let (status, body) = get(&app, "/categories/8/questions").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Resource not found");

        let (status, _) = get(&app, "/categories/art/questions").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
