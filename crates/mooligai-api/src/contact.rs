use anyhow::anyhow;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use mooligai_db::models::ContactRow;
use mooligai_types::api::ContactRequest;
use mooligai_types::models::{ContactMessage, Urgency};

use crate::error::ApiError;
use crate::response::Envelope;
use crate::{AppState, parse_instant};

pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if [&req.name, &req.email, &req.subject, &req.message]
        .iter()
        .any(|f| f.trim().is_empty())
    {
        return Err(ApiError::Validation("All fields are required"));
    }

    let row = ContactRow {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        email: req.email,
        subject: req.subject,
        message: req.message,
        urgency: req.urgency.as_str().to_string(),
        created_at: Utc::now().to_rfc3339(),
    };
    state.db.insert_contact(&row)?;

    let stored = to_view(&row)?;

    // the row is durable; the confirmation email is not allowed to delay
    // or fail this response
    let mailer = state.mailer.clone();
    let (to, name, subject, message) =
        (row.email, row.name, row.subject, row.message);
    tokio::spawn(async move {
        let body = format!(
            "Hi {name},\n\nThank you for reaching out. We received your message:\n\n\
             Subject: {subject}\nMessage: {message}\n\n\
             We will respond as soon as possible.\n\n- The Mooligai team\n"
        );
        mailer
            .send(&to, "Thank you for contacting Mooligai", body)
            .await;
    });

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data_with_message(stored, "Message submitted successfully")),
    ))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let contacts = state
        .db
        .list_contacts()?
        .iter()
        .map(to_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Envelope::data(contacts)))
}

fn to_view(row: &ContactRow) -> anyhow::Result<ContactMessage> {
    Ok(ContactMessage {
        id: row.id.parse()?,
        name: row.name.clone(),
        email: row.email.clone(),
        subject: row.subject.clone(),
        message: row.message.clone(),
        urgency: Urgency::parse(&row.urgency)
            .ok_or_else(|| anyhow!("corrupt urgency '{}'", row.urgency))?,
        created_at: parse_instant(&row.created_at)?,
    })
}
