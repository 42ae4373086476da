use crate::Database;
use crate::models::{ContactRow, FeedbackRow, RemedyRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

const REMEDY_COLUMNS: &str = "id, name_en, name_ta, category, difficulty, prep_time, \
     symptoms_en, symptoms_ta, ingredients_en, ingredients_ta, \
     preparation_en, preparation_ta, dosage_en, dosage_ta, \
     safety_tips_en, safety_tips_ta, submitted_by, status, created_at, updated_at";

impl Database {
    // -- Users --

    pub fn create_user(&self, row: &UserRow) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (id, name, email, password, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    row.id,
                    row.name,
                    row.email,
                    row.password,
                    row.role,
                    row.created_at
                ],
            )?;
            Ok(())
        })
    }

    /// Idempotent admin bootstrap: inserts the privileged account once and
    /// leaves an existing row (same email) untouched.
    pub fn seed_admin(&self, row: &UserRow) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO users (id, name, email, password, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, 'admin', ?5)",
                rusqlite::params![row.id, row.name, row.email, row.password, row.created_at],
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, password, role, created_at
                 FROM users ORDER BY created_at DESC",
            )?;
            let rows = stmt
                .query_map([], map_user_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Remedies --

    /// Stores a new submission. The status column is always written as
    /// 'pending' — whatever the caller put in `row.status` is ignored.
    pub fn insert_remedy(&self, row: &RemedyRow) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO remedies (id, name_en, name_ta, category, difficulty, prep_time,
                     symptoms_en, symptoms_ta, ingredients_en, ingredients_ta,
                     preparation_en, preparation_ta, dosage_en, dosage_ta,
                     safety_tips_en, safety_tips_ta, submitted_by, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                     'pending', ?18, ?19)",
                rusqlite::params![
                    row.id,
                    row.name_en,
                    row.name_ta,
                    row.category,
                    row.difficulty,
                    row.prep_time,
                    row.symptoms_en,
                    row.symptoms_ta,
                    row.ingredients_en,
                    row.ingredients_ta,
                    row.preparation_en,
                    row.preparation_ta,
                    row.dosage_en,
                    row.dosage_ta,
                    row.safety_tips_en,
                    row.safety_tips_ta,
                    row.submitted_by,
                    row.created_at,
                    row.updated_at
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_remedy(&self, id: &str) -> Result<Option<RemedyRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {REMEDY_COLUMNS} FROM remedies WHERE id = ?1");
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row([id], map_remedy_row).optional()
        })
    }

    /// All remedies, newest first. `status` narrows to a single workflow
    /// state; the public listing passes 'approved'.
    pub fn list_remedies(&self, status: Option<&str>) -> Result<Vec<RemedyRow>> {
        self.with_conn(|conn| {
            let rows = match status {
                Some(status) => {
                    let sql = format!(
                        "SELECT {REMEDY_COLUMNS} FROM remedies
                         WHERE status = ?1 ORDER BY created_at DESC"
                    );
                    let mut stmt = conn.prepare(&sql)?;
                    stmt.query_map([status], map_remedy_row)?
                        .collect::<std::result::Result<Vec<_>, _>>()?
                }
                None => {
                    let sql = format!("SELECT {REMEDY_COLUMNS} FROM remedies ORDER BY created_at DESC");
                    let mut stmt = conn.prepare(&sql)?;
                    stmt.query_map([], map_remedy_row)?
                        .collect::<std::result::Result<Vec<_>, _>>()?
                }
            };
            Ok(rows)
        })
    }

    /// Replaces the content fields of an existing remedy. Status and
    /// creation time are untouched. Returns false when the id is unknown.
    pub fn update_remedy(&self, id: &str, row: &RemedyRow) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE remedies SET name_en = ?2, name_ta = ?3, category = ?4, difficulty = ?5,
                     prep_time = ?6, symptoms_en = ?7, symptoms_ta = ?8, ingredients_en = ?9,
                     ingredients_ta = ?10, preparation_en = ?11, preparation_ta = ?12,
                     dosage_en = ?13, dosage_ta = ?14, safety_tips_en = ?15, safety_tips_ta = ?16,
                     submitted_by = ?17, updated_at = ?18
                 WHERE id = ?1",
                rusqlite::params![
                    id,
                    row.name_en,
                    row.name_ta,
                    row.category,
                    row.difficulty,
                    row.prep_time,
                    row.symptoms_en,
                    row.symptoms_ta,
                    row.ingredients_en,
                    row.ingredients_ta,
                    row.preparation_en,
                    row.preparation_ta,
                    row.dosage_en,
                    row.dosage_ta,
                    row.safety_tips_en,
                    row.safety_tips_ta,
                    row.submitted_by,
                    row.updated_at
                ],
            )?;
            Ok(changed > 0)
        })
    }

    /// The moderation transition: any state to any state, one UPDATE.
    /// Returns false when the id is unknown; never inserts.
    pub fn set_remedy_status(&self, id: &str, status: &str, updated_at: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE remedies SET status = ?2, updated_at = ?3 WHERE id = ?1",
                rusqlite::params![id, status, updated_at],
            )?;
            Ok(changed > 0)
        })
    }

    /// Hard delete. Feedback rows referencing the remedy are left alone.
    pub fn delete_remedy(&self, id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute("DELETE FROM remedies WHERE id = ?1", [id])?;
            Ok(changed > 0)
        })
    }

    // -- Contact messages --

    pub fn insert_contact(&self, row: &ContactRow) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO contact_messages (id, name, email, subject, message, urgency, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    row.id,
                    row.name,
                    row.email,
                    row.subject,
                    row.message,
                    row.urgency,
                    row.created_at
                ],
            )?;
            Ok(())
        })
    }

    pub fn list_contacts(&self) -> Result<Vec<ContactRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, subject, message, urgency, created_at
                 FROM contact_messages ORDER BY created_at DESC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(ContactRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        subject: row.get(3)?,
                        message: row.get(4)?,
                        urgency: row.get(5)?,
                        created_at: row.get(6)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Feedback messages --

    pub fn insert_feedback(&self, row: &FeedbackRow) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO feedback_messages (id, name, email, kind, remedy_id, rating, subject, message, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    row.id,
                    row.name,
                    row.email,
                    row.kind,
                    row.remedy_id,
                    row.rating,
                    row.subject,
                    row.message,
                    row.created_at
                ],
            )?;
            Ok(())
        })
    }

    pub fn list_feedback(&self) -> Result<Vec<FeedbackRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, kind, remedy_id, rating, subject, message, created_at
                 FROM feedback_messages ORDER BY created_at DESC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(FeedbackRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        kind: row.get(3)?,
                        remedy_id: row.get(4)?,
                        rating: row.get(5)?,
                        subject: row.get(6)?,
                        message: row.get(7)?,
                        created_at: row.get(8)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    // column is a compile-time constant at every call site
    let sql = format!("SELECT id, name, email, password, role, created_at FROM users WHERE {column} = ?1");
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row([value], map_user_row).optional()
}

fn map_user_row(row: &rusqlite::Row<'_>) -> std::result::Result<UserRow, rusqlite::Error> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        role: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn map_remedy_row(row: &rusqlite::Row<'_>) -> std::result::Result<RemedyRow, rusqlite::Error> {
    Ok(RemedyRow {
        id: row.get(0)?,
        name_en: row.get(1)?,
        name_ta: row.get(2)?,
        category: row.get(3)?,
        difficulty: row.get(4)?,
        prep_time: row.get(5)?,
        symptoms_en: row.get(6)?,
        symptoms_ta: row.get(7)?,
        ingredients_en: row.get(8)?,
        ingredients_ta: row.get(9)?,
        preparation_en: row.get(10)?,
        preparation_ta: row.get(11)?,
        dosage_en: row.get(12)?,
        dosage_ta: row.get(13)?,
        safety_tips_en: row.get(14)?,
        safety_tips_ta: row.get(15)?,
        submitted_by: row.get(16)?,
        status: row.get(17)?,
        created_at: row.get(18)?,
        updated_at: row.get(19)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("test.db")).unwrap();
        (db, dir)
    }

    fn remedy(id: &str, created_at: &str) -> RemedyRow {
        RemedyRow {
            id: id.into(),
            name_en: "Ginger Tea".into(),
            name_ta: "இஞ்சி தேநீர்".into(),
            category: "digestion".into(),
            difficulty: "easy".into(),
            prep_time: "10 mins".into(),
            symptoms_en: "nausea".into(),
            symptoms_ta: "குமட்டல்".into(),
            ingredients_en: "ginger, water".into(),
            ingredients_ta: "இஞ்சி, தண்ணீர்".into(),
            preparation_en: "boil and strain".into(),
            preparation_ta: "கொதிக்க வைத்து வடிகட்டவும்".into(),
            dosage_en: "one cup twice daily".into(),
            dosage_ta: "ஒரு கப் இருமுறை".into(),
            safety_tips_en: "avoid on empty stomach".into(),
            safety_tips_ta: "வெறும் வயிற்றில் தவிர்க்கவும்".into(),
            submitted_by: None,
            status: "approved".into(),
            created_at: created_at.into(),
            updated_at: created_at.into(),
        }
    }

    #[test]
    fn insert_forces_pending_status() {
        let (db, _dir) = test_db();
        // row claims 'approved'; storage must not care
        db.insert_remedy(&remedy("r1", "2026-08-06T10:00:00+00:00")).unwrap();

        let stored = db.get_remedy("r1").unwrap().unwrap();
        assert_eq!(stored.status, "pending");
    }

    #[test]
    fn status_transition_known_and_unknown_id() {
        let (db, _dir) = test_db();
        db.insert_remedy(&remedy("r1", "2026-08-06T10:00:00+00:00")).unwrap();

        assert!(db.set_remedy_status("r1", "approved", "2026-08-06T11:00:00+00:00").unwrap());
        let stored = db.get_remedy("r1").unwrap().unwrap();
        assert_eq!(stored.status, "approved");
        assert_eq!(stored.updated_at, "2026-08-06T11:00:00+00:00");

        // rejected items can be re-approved, and vice versa
        assert!(db.set_remedy_status("r1", "rejected", "2026-08-06T12:00:00+00:00").unwrap());
        assert_eq!(db.get_remedy("r1").unwrap().unwrap().status, "rejected");

        assert!(!db.set_remedy_status("missing", "approved", "2026-08-06T11:00:00+00:00").unwrap());
        assert_eq!(db.list_remedies(None).unwrap().len(), 1);
    }

    #[test]
    fn listing_orders_newest_first_and_filters() {
        let (db, _dir) = test_db();
        db.insert_remedy(&remedy("old", "2026-08-01T10:00:00+00:00")).unwrap();
        db.insert_remedy(&remedy("new", "2026-08-05T10:00:00+00:00")).unwrap();
        db.set_remedy_status("old", "approved", "2026-08-06T10:00:00+00:00").unwrap();

        let all = db.list_remedies(None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "new");
        assert_eq!(all[1].id, "old");

        let public = db.list_remedies(Some("approved")).unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].id, "old");
    }

    #[test]
    fn update_replaces_content_but_not_status() {
        let (db, _dir) = test_db();
        db.insert_remedy(&remedy("r1", "2026-08-06T10:00:00+00:00")).unwrap();
        db.set_remedy_status("r1", "approved", "2026-08-06T10:30:00+00:00").unwrap();

        let mut edit = remedy("r1", "2026-08-06T10:00:00+00:00");
        edit.name_en = "Strong Ginger Tea".into();
        edit.status = "rejected".into(); // must be ignored
        edit.updated_at = "2026-08-06T11:00:00+00:00".into();
        assert!(db.update_remedy("r1", &edit).unwrap());

        let stored = db.get_remedy("r1").unwrap().unwrap();
        assert_eq!(stored.name_en, "Strong Ginger Tea");
        assert_eq!(stored.status, "approved");
        assert_eq!(stored.updated_at, "2026-08-06T11:00:00+00:00");

        assert!(!db.update_remedy("missing", &edit).unwrap());
    }

    #[test]
    fn delete_remedy_leaves_feedback_alone() {
        let (db, _dir) = test_db();
        db.insert_remedy(&remedy("r1", "2026-08-06T10:00:00+00:00")).unwrap();
        db.insert_feedback(&FeedbackRow {
            id: "f1".into(),
            name: "Priya".into(),
            email: "priya@example.com".into(),
            kind: "remedy-review".into(),
            remedy_id: Some("r1".into()),
            rating: Some(5),
            subject: "Worked well".into(),
            message: "Helped within a day.".into(),
            created_at: "2026-08-06T10:05:00+00:00".into(),
        })
        .unwrap();

        assert!(db.delete_remedy("r1").unwrap());
        assert!(db.get_remedy("r1").unwrap().is_none());
        assert!(!db.delete_remedy("r1").unwrap());

        let feedback = db.list_feedback().unwrap();
        assert_eq!(feedback.len(), 1);
        assert_eq!(feedback[0].remedy_id.as_deref(), Some("r1"));
    }

    #[test]
    fn seed_admin_is_idempotent() {
        let (db, _dir) = test_db();
        let seed = UserRow {
            id: "admin-1".into(),
            name: "Site Admin".into(),
            email: "admin@mooligai.example".into(),
            password: "hash-one".into(),
            role: "admin".into(),
            created_at: "2026-08-06T10:00:00+00:00".into(),
        };
        db.seed_admin(&seed).unwrap();

        let again = UserRow {
            id: "admin-2".into(),
            password: "hash-two".into(),
            ..seed
        };
        db.seed_admin(&again).unwrap();

        let users = db.list_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "admin-1");
        assert_eq!(users[0].password, "hash-one");
        assert_eq!(users[0].role, "admin");
    }

    #[test]
    fn contact_messages_are_write_once_and_ordered() {
        let (db, _dir) = test_db();
        for (id, at) in [("c1", "2026-08-01T09:00:00+00:00"), ("c2", "2026-08-03T09:00:00+00:00")] {
            db.insert_contact(&ContactRow {
                id: id.into(),
                name: "Arun".into(),
                email: "arun@example.com".into(),
                subject: "Sourcing".into(),
                message: "Where do I buy vetiver root?".into(),
                urgency: "medium".into(),
                created_at: at.into(),
            })
            .unwrap();
        }

        let contacts = db.list_contacts().unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].id, "c2");
    }

    #[test]
    fn seed_admin_conflicts_on_email_not_id() {
        let (db, _dir) = test_db();
        let seed = UserRow {
            id: "u1".into(),
            name: "Site Admin".into(),
            email: "admin@mooligai.example".into(),
            password: "hash".into(),
            role: "admin".into(),
            created_at: "2026-08-06T10:00:00+00:00".into(),
        };
        db.seed_admin(&seed).unwrap();

        // different email, different id: a normal second user
        db.create_user(&UserRow {
            id: "u2".into(),
            name: "Priya".into(),
            email: "priya@example.com".into(),
            password: "hash".into(),
            role: "user".into(),
            created_at: "2026-08-06T10:01:00+00:00".into(),
        })
        .unwrap();

        assert_eq!(db.list_users().unwrap().len(), 2);
        assert_eq!(
            db.get_user_by_email("admin@mooligai.example").unwrap().unwrap().role,
            "admin"
        );
    }
}
