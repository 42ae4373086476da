use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            role        TEXT NOT NULL DEFAULT 'user',
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS remedies (
            id              TEXT PRIMARY KEY,
            name_en         TEXT NOT NULL,
            name_ta         TEXT NOT NULL,
            category        TEXT NOT NULL,
            difficulty      TEXT NOT NULL,
            prep_time       TEXT NOT NULL,
            symptoms_en     TEXT NOT NULL,
            symptoms_ta     TEXT NOT NULL,
            ingredients_en  TEXT NOT NULL,
            ingredients_ta  TEXT NOT NULL,
            preparation_en  TEXT NOT NULL,
            preparation_ta  TEXT NOT NULL,
            dosage_en       TEXT NOT NULL,
            dosage_ta       TEXT NOT NULL,
            safety_tips_en  TEXT NOT NULL,
            safety_tips_ta  TEXT NOT NULL,
            submitted_by    TEXT,
            status          TEXT NOT NULL DEFAULT 'pending',
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS contact_messages (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL,
            subject     TEXT NOT NULL,
            message     TEXT NOT NULL,
            urgency     TEXT NOT NULL DEFAULT 'medium',
            created_at  TEXT NOT NULL
        );

        -- remedy_id is a loose reference: feedback outlives remedy deletion
        CREATE TABLE IF NOT EXISTS feedback_messages (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL,
            kind        TEXT NOT NULL,
            remedy_id   TEXT,
            rating      INTEGER,
            subject     TEXT NOT NULL,
            message     TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
