use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use mooligai_db::models::RemedyRow;
use mooligai_types::api::{RemedyPayload, RemedyQuery, SetStatusRequest};
use mooligai_types::models::{Difficulty, Remedy, RemedyStatus};

use crate::error::ApiError;
use crate::response::Envelope;
use crate::{AppState, parse_instant};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<RemedyPayload>,
) -> Result<impl IntoResponse, ApiError> {
    if req.has_blank_field() {
        return Err(ApiError::Validation("All fields are required"));
    }

    let now = Utc::now().to_rfc3339();
    let row = row_from_payload(Uuid::new_v4(), req, &now, &now);
    state.db.insert_remedy(&row)?;

    // return the stored record, not an echo of the request
    let stored = state
        .db
        .get_remedy(&row.id)?
        .ok_or_else(|| anyhow!("remedy vanished right after insert"))?;

    Ok((StatusCode::CREATED, Json(Envelope::data(to_view(stored)?))))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<RemedyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let remedies = state
        .db
        .list_remedies(query.status.map(RemedyStatus::as_str))?
        .into_iter()
        .map(to_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Envelope::data(remedies)))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let row = state
        .db
        .get_remedy(&id.to_string())?
        .ok_or(ApiError::NotFound("Remedy not found"))?;

    Ok(Json(Envelope::data(to_view(row)?)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RemedyPayload>,
) -> Result<impl IntoResponse, ApiError> {
    if req.has_blank_field() {
        return Err(ApiError::Validation("All fields are required"));
    }

    let now = Utc::now().to_rfc3339();
    let row = row_from_payload(id, req, &now, &now);
    if !state.db.update_remedy(&row.id, &row)? {
        return Err(ApiError::NotFound("Remedy not found"));
    }

    let stored = state
        .db
        .get_remedy(&row.id)?
        .ok_or_else(|| anyhow!("remedy vanished mid-update"))?;

    Ok(Json(Envelope::data(to_view(stored)?)))
}

/// The moderation transition. Any target state is accepted from any
/// current state; only the status column and the modification instant
/// change.
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let now = Utc::now().to_rfc3339();
    if !state
        .db
        .set_remedy_status(&id.to_string(), req.status.as_str(), &now)?
    {
        return Err(ApiError::NotFound("Remedy not found"));
    }

    let stored = state
        .db
        .get_remedy(&id.to_string())?
        .ok_or_else(|| anyhow!("remedy vanished mid-transition"))?;

    Ok(Json(Envelope::data(to_view(stored)?)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.delete_remedy(&id.to_string())? {
        return Err(ApiError::NotFound("Remedy not found"));
    }

    Ok(Json(Envelope::<()>::message("Remedy deleted successfully")))
}

fn row_from_payload(id: Uuid, req: RemedyPayload, created_at: &str, updated_at: &str) -> RemedyRow {
    RemedyRow {
        id: id.to_string(),
        name_en: req.name_en,
        name_ta: req.name_ta,
        category: req.category,
        difficulty: req.difficulty.as_str().to_string(),
        prep_time: req.prep_time,
        symptoms_en: req.symptoms_en,
        symptoms_ta: req.symptoms_ta,
        ingredients_en: req.ingredients_en,
        ingredients_ta: req.ingredients_ta,
        preparation_en: req.preparation_en,
        preparation_ta: req.preparation_ta,
        dosage_en: req.dosage_en,
        dosage_ta: req.dosage_ta,
        safety_tips_en: req.safety_tips_en,
        safety_tips_ta: req.safety_tips_ta,
        submitted_by: req.submitted_by.map(|u| u.to_string()),
        status: RemedyStatus::Pending.as_str().to_string(),
        created_at: created_at.to_string(),
        updated_at: updated_at.to_string(),
    }
}

fn to_view(row: RemedyRow) -> anyhow::Result<Remedy> {
    Ok(Remedy {
        id: row.id.parse()?,
        name_en: row.name_en,
        name_ta: row.name_ta,
        category: row.category,
        difficulty: Difficulty::parse(&row.difficulty)
            .ok_or_else(|| anyhow!("corrupt difficulty '{}'", row.difficulty))?,
        prep_time: row.prep_time,
        symptoms_en: row.symptoms_en,
        symptoms_ta: row.symptoms_ta,
        ingredients_en: row.ingredients_en,
        ingredients_ta: row.ingredients_ta,
        preparation_en: row.preparation_en,
        preparation_ta: row.preparation_ta,
        dosage_en: row.dosage_en,
        dosage_ta: row.dosage_ta,
        safety_tips_en: row.safety_tips_en,
        safety_tips_ta: row.safety_tips_ta,
        submitted_by: row.submitted_by.map(|s| s.parse()).transpose()?,
        status: RemedyStatus::parse(&row.status)
            .ok_or_else(|| anyhow!("corrupt status '{}'", row.status))?,
        created_at: parse_instant(&row.created_at)?,
        updated_at: parse_instant(&row.updated_at)?,
    })
}
