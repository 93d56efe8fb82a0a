use axum::extract::{rejection::QueryRejection, Query};
use serde::Deserialize;

use super::deserializers::deserialize_lenient_i64;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// `?page=N` query. Missing or unparsable values mean the first page.
#[derive(Deserialize, Default, Debug)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    page: Option<i64>,
}

impl PageQuery {
    /// Page requested by an extracted query; a query string that does not deserialize at all
    /// (e.g. a repeated `page`) falls back to the first page.
    pub fn page_of(query: Result<Query<PageQuery>, QueryRejection>) -> i64 {
        match query {
            Ok(Query(query)) => query.page(),
            Err(e) => {
                tracing::debug!("Ignoring page query: {e}");
                PageQuery::default().page()
            }
        }
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }
}

/// Returns the items of the 1-based `page`, empty when the page is out of range.
pub fn paginate<T>(page: i64, items: Vec<T>) -> Vec<T> {
    if page < 1 {
        return Vec::new();
    }
    let Some(begin) = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
    else {
        return Vec::new();
    };
    items
        .into_iter()
        .skip(begin)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}
