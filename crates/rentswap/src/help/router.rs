use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::center::HelpCenter;
use super::catalog::FaqEntry;
use super::HelpError;
use crate::alerts::UserAlert;
use crate::links::{ContactChannel, DeepLink};

#[derive(Debug, Default, Deserialize)]
pub struct FaqQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

pub fn help_router(center: Arc<HelpCenter>) -> Router {
    Router::new()
        .route("/api/v1/help/faqs", get(faqs_handler))
        .route("/api/v1/help/categories", get(categories_handler))
        .route("/api/v1/help/contact/:channel", get(contact_handler))
        .with_state(center)
}

async fn faqs_handler(
    State(center): State<Arc<HelpCenter>>,
    Query(query): Query<FaqQuery>,
) -> Response {
    let catalog = center.catalog();
    let matches: Vec<&FaqEntry> = catalog
        .search(query.q.as_deref().unwrap_or_default())
        .into_iter()
        .filter(|entry| match query.category.as_deref() {
            Some(category) if !category.trim().is_empty() => {
                entry.category.eq_ignore_ascii_case(category.trim())
            }
            _ => true,
        })
        .collect();
    (StatusCode::OK, axum::Json(matches)).into_response()
}

async fn categories_handler(State(center): State<Arc<HelpCenter>>) -> Response {
    (StatusCode::OK, axum::Json(center.catalog().categories())).into_response()
}

async fn contact_handler(
    State(center): State<Arc<HelpCenter>>,
    Path(channel): Path<String>,
) -> Response {
    let Some(parsed) = ContactChannel::parse(&channel) else {
        let alert = UserAlert::from(&HelpError::UnknownChannel(channel));
        return (StatusCode::NOT_FOUND, axum::Json(alert.error_body())).into_response();
    };

    match center.contact_link(parsed) {
        Ok(link) => {
            let web_fallback = match &link {
                DeepLink::Messaging { web_fallback, .. } => Some(web_fallback.clone()),
                _ => None,
            };
            let payload = json!({
                "channel": parsed,
                "label": parsed.label(),
                "uri": link.uri(),
                "webFallback": web_fallback,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let alert = UserAlert::from(&err);
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(alert.error_body())).into_response()
        }
    }
}
