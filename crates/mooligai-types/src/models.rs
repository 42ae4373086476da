use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Moderation state of a submitted remedy. Every submission starts out
/// `pending`; an admin moves it to `approved` (publicly listed) or
/// `rejected` (hidden). Any state may be re-set by an explicit admin call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemedyStatus {
    Pending,
    Approved,
    Rejected,
}

impl RemedyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RemedyStatus::Pending => "pending",
            RemedyStatus::Approved => "approved",
            RemedyStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RemedyStatus::Pending),
            "approved" => Some(RemedyStatus::Approved),
            "rejected" => Some(RemedyStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Contact form urgency. Defaults to `medium` when the form omits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Urgency::Low),
            "medium" => Some(Urgency::Medium),
            "high" => Some(Urgency::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Public view of a user record. The credential hash never leaves the
/// database layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// A remedy as served to clients. Bilingual fields carry the English and
/// Tamil variants side by side; the client picks one per the active
/// language toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remedy {
    pub id: Uuid,
    pub name_en: String,
    pub name_ta: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub prep_time: String,
    pub symptoms_en: String,
    pub symptoms_ta: String,
    pub ingredients_en: String,
    pub ingredients_ta: String,
    pub preparation_en: String,
    pub preparation_ta: String,
    pub dosage_en: String,
    pub dosage_ta: String,
    pub safety_tips_en: String,
    pub safety_tips_ta: String,
    pub submitted_by: Option<Uuid>,
    pub status: RemedyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub urgency: Urgency,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub remedy_id: Option<Uuid>,
    pub rating: Option<i32>,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
