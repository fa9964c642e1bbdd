// src/web/handlers/system_handlers.rs
use crate::form::{Budget, MarketPreference, TimeCommitment};
use crate::models::{ModelInfo, MODELS};
use crate::web::types::*;

use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use tracing::debug;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

pub async fn index_handler() -> RawHtml<&'static str> {
    RawHtml(INDEX_HTML)
}

pub async fn get_models_handler() -> Json<DataResponse<Vec<ModelInfo>>> {
    Json(DataResponse::success(
        format!("{} models available", MODELS.len()),
        MODELS.to_vec(),
        None,
    ))
}

pub async fn get_options_handler() -> Json<DataResponse<FormOptions>> {
    Json(DataResponse::success(
        "Form options".to_string(),
        FormOptions {
            budgets: Budget::ALL.iter().map(|b| b.label()).collect(),
            time_commitments: TimeCommitment::ALL.iter().map(|t| t.label()).collect(),
            market_preferences: MarketPreference::ALL.iter().map(|m| m.label()).collect(),
        },
        None,
    ))
}

pub async fn health_handler() -> Json<TextResponse> {
    debug!("Health check");
    Json(TextResponse::success("OK".to_string(), None))
}
