use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use mooligai_db::models::FeedbackRow;
use mooligai_types::api::FeedbackRequest;
use mooligai_types::models::FeedbackMessage;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::{AppState, parse_instant};

pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if [&req.name, &req.email, &req.kind, &req.subject, &req.message]
        .iter()
        .any(|f| f.trim().is_empty())
    {
        return Err(ApiError::Validation("All required fields must be filled"));
    }

    let row = FeedbackRow {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        email: req.email,
        kind: req.kind,
        remedy_id: req.remedy_id.map(|u| u.to_string()),
        rating: req.rating.map(i64::from),
        subject: req.subject,
        message: req.message,
        created_at: Utc::now().to_rfc3339(),
    };
    state.db.insert_feedback(&row)?;

    let stored = to_view(&row)?;

    let mailer = state.mailer.clone();
    let (to, name) = (row.email, row.name);
    tokio::spawn(async move {
        let body = format!("Hi {name},\n\nThank you for your feedback.\n\n- The Mooligai team\n");
        mailer.send(&to, "Thank you for your feedback!", body).await;
    });

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data_with_message(stored, "Feedback submitted successfully")),
    ))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let feedback = state
        .db
        .list_feedback()?
        .iter()
        .map(to_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Envelope::data(feedback)))
}

fn to_view(row: &FeedbackRow) -> anyhow::Result<FeedbackMessage> {
    Ok(FeedbackMessage {
        id: row.id.parse()?,
        name: row.name.clone(),
        email: row.email.clone(),
        kind: row.kind.clone(),
        remedy_id: row.remedy_id.as_deref().map(str::parse).transpose()?,
        rating: row.rating.map(|r| r as i32),
        subject: row.subject.clone(),
        message: row.message.clone(),
        created_at: parse_instant(&row.created_at)?,
    })
}
