use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use kelelahan_fuzzy::{Category, FatigueInputs, InferenceResult, InferenceTrace};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::response::{ok, AppError};
use crate::services::history::{self, HistoryEntry, HistorySummary};
use crate::state::AppState;

const TIP: &str = "Jaga kualitas tidur dan kontrol beban tugas untuk kesehatan optimal.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateBody {
    #[serde(flatten)]
    inputs: FatigueInputs,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluationDto {
    score: f64,
    rounded_score: f64,
    label: &'static str,
    english_label: &'static str,
    category: Category,
    emoji: &'static str,
    tip: &'static str,
    inconclusive: bool,
    session_id: String,
    test_number: usize,
    test_label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryDto {
    category: Category,
    label: &'static str,
    english_label: &'static str,
    emoji: &'static str,
    min_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_score: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryDto {
    session_id: String,
    entries: Vec<HistoryEntry>,
    summary: Option<HistorySummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClearedDto {
    session_id: String,
    removed: usize,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/evaluate", post(evaluate))
        .route("/evaluate/trace", post(evaluate_trace))
        .route("/categories", get(categories))
        .route(
            "/sessions/:session_id/history",
            get(get_history).delete(clear_history),
        )
}

fn evaluation_dto(
    result: &InferenceResult,
    entry: &HistoryEntry,
    session_id: String,
) -> EvaluationDto {
    EvaluationDto {
        score: result.score,
        rounded_score: entry.score,
        label: result.label(),
        english_label: result.category.english_label(),
        category: result.category,
        emoji: result.category.emoji(),
        tip: TIP,
        inconclusive: result.inconclusive,
        session_id,
        test_number: entry.test_number,
        test_label: entry.test_label.clone(),
    }
}

async fn evaluate(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateBody>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;

    let session_id = match body.session_id {
        Some(id) => {
            history::validate_session_id(&id)?;
            id
        }
        None => Uuid::new_v4().to_string(),
    };

    let result = state.engine().infer(&body.inputs)?;
    let entry = state.history().append(&session_id, body.inputs, &result)?;

    tracing::info!(
        session_id = %session_id,
        test_number = entry.test_number,
        score = entry.score,
        label = result.label(),
        inconclusive = result.inconclusive,
        "fatigue evaluated"
    );

    Ok(ok(evaluation_dto(&result, &entry, session_id)))
}

async fn evaluate_trace(
    State(state): State<AppState>,
    payload: Result<Json<FatigueInputs>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(inputs) = payload?;
    let trace: InferenceTrace = state.engine().infer_traced(&inputs)?;
    Ok(ok(trace))
}

async fn categories() -> impl IntoResponse {
    let data: Vec<CategoryDto> = Category::ALL
        .iter()
        .map(|&category| CategoryDto {
            category,
            label: category.label(),
            english_label: category.english_label(),
            emoji: category.emoji(),
            min_score: category.lower_bound(),
            max_score: category.upper_bound(),
        })
        .collect();
    ok(data)
}

async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let entries = state.history().entries(&session_id)?;
    let summary = history::summarize(&entries);
    Ok(ok(HistoryDto {
        session_id,
        entries,
        summary,
    }))
}

async fn clear_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state.history().clear(&session_id)?;
    tracing::info!(session_id = %session_id, removed, "fatigue history cleared");
    Ok(ok(ClearedDto {
        session_id,
        removed,
    }))
}
