use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::models::{Difficulty, RemedyStatus, Urgency, UserView};

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of a successful register/login. The token is client-held
/// session state; no endpoint requires it.
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: UserView,
    pub token: String,
}

// -- Remedies --

/// Body of both POST /remedies and PUT /remedies/{id}. Unknown fields are
/// ignored on purpose: a client-supplied `status` must never influence the
/// stored record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemedyPayload {
    pub name_en: String,
    pub name_ta: String,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(deserialize_with = "string_or_number")]
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
}

impl RemedyPayload {
    /// True when any required text field is empty or whitespace.
    pub fn has_blank_field(&self) -> bool {
        [
            &self.name_en,
            &self.name_ta,
            &self.category,
            &self.prep_time,
            &self.symptoms_en,
            &self.symptoms_ta,
            &self.ingredients_en,
            &self.ingredients_ta,
            &self.preparation_en,
            &self.preparation_ta,
            &self.dosage_en,
            &self.dosage_ta,
            &self.safety_tips_en,
            &self.safety_tips_ta,
        ]
        .iter()
        .any(|f| f.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetStatusRequest {
    pub status: RemedyStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct RemedyQuery {
    pub status: Option<RemedyStatus>,
}

// -- Contact / feedback --

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub urgency: Urgency,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub remedy_id: Option<Uuid>,
    pub rating: Option<i32>,
    pub subject: String,
    pub message: String,
}

/// Clients have historically sent preparation time both as `"15 mins"` and
/// as a bare number. Accept either and normalize to a string.
fn string_or_number<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(de)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_json(prep_time: &str) -> String {
        format!(
            r#"{{
                "nameEn": "Ginger Tea", "nameTa": "இஞ்சி தேநீர்",
                "category": "digestion", "difficulty": "easy",
                "prepTime": {prep_time},
                "symptomsEn": "nausea", "symptomsTa": "குமட்டல்",
                "ingredientsEn": "ginger", "ingredientsTa": "இஞ்சி",
                "preparationEn": "boil", "preparationTa": "கொதிக்கவும்",
                "dosageEn": "one cup", "dosageTa": "ஒரு கப்",
                "safetyTipsEn": "none", "safetyTipsTa": "இல்லை"
            }}"#
        )
    }

    #[test]
    fn prep_time_accepts_string_and_number() {
        let p: RemedyPayload = serde_json::from_str(&payload_json("\"15 mins\"")).unwrap();
        assert_eq!(p.prep_time, "15 mins");

        let p: RemedyPayload = serde_json::from_str(&payload_json("15")).unwrap();
        assert_eq!(p.prep_time, "15");
    }

    #[test]
    fn client_supplied_status_is_ignored() {
        let mut value: serde_json::Value = serde_json::from_str(&payload_json("\"5 mins\"")).unwrap();
        value["status"] = serde_json::json!("approved");
        let parsed: Result<RemedyPayload, _> = serde_json::from_value(value);
        assert!(parsed.is_ok());
    }

    #[test]
    fn blank_required_field_detected() {
        let mut p: RemedyPayload = serde_json::from_str(&payload_json("\"5 mins\"")).unwrap();
        assert!(!p.has_blank_field());
        p.dosage_ta = "   ".into();
        assert!(p.has_blank_field());
    }
}
