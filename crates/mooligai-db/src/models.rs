/// Database row types, mapping one to one onto SQLite rows.
/// Distinct from the mooligai-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: String,
}

pub struct RemedyRow {
    pub id: String,
    pub name_en: String,
    pub name_ta: String,
    pub category: String,
    pub difficulty: String,
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
    pub submitted_by: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

pub struct ContactRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub urgency: String,
    pub created_at: String,
}

pub struct FeedbackRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub kind: String,
    pub remedy_id: Option<String>,
    pub rating: Option<i64>,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}
