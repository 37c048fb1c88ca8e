use sqlx::{Pool, Postgres};

pub type Db = Pool<Postgres>;

/// Create the two tables at startup if they are missing.
///
/// The UNIQUE constraints are load-bearing: the profile upsert and the
/// prediction upsert both rely on ON CONFLICT against them, which is what
/// keeps concurrent saves for the same email down to a single row.
pub async fn init_schema(pool: &Db) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id              TEXT NOT NULL DEFAULT '',
            email           TEXT NOT NULL UNIQUE,
            name            TEXT NOT NULL DEFAULT '',
            photo           TEXT NOT NULL DEFAULT '',
            dob             TEXT NOT NULL DEFAULT '',
            hobbies         TEXT NOT NULL DEFAULT '',
            mobile_number   TEXT NOT NULL DEFAULT '',
            location_city   TEXT NOT NULL DEFAULT '',
            country         TEXT NOT NULL DEFAULT '',
            tarot_reading   TEXT NOT NULL DEFAULT '',
            cards_selection TEXT NOT NULL DEFAULT '',
            person_name     TEXT NOT NULL DEFAULT '',
            coins           INTEGER NOT NULL DEFAULT 0,
            relationship    TEXT NOT NULL DEFAULT '',
            occupation      TEXT NOT NULL DEFAULT '',
            birth_time      TEXT NOT NULL DEFAULT '',
            birth_city      TEXT NOT NULL DEFAULT '',
            birth_state     TEXT NOT NULL DEFAULT '',
            birth_country   TEXT NOT NULL DEFAULT '',
            reading_date    TEXT NOT NULL DEFAULT '',
            updated_at      TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS numerology_predictions (
            id                 BIGSERIAL PRIMARY KEY,
            user_email         TEXT NOT NULL,
            prediction_date    DATE NOT NULL,
            life_path_number   INTEGER NOT NULL,
            destiny_number     INTEGER NOT NULL,
            soul_number        INTEGER NOT NULL,
            personality_number INTEGER NOT NULL,
            daily_number       INTEGER NOT NULL,
            prediction         TEXT NOT NULL,
            lucky_color        TEXT NOT NULL,
            lucky_number       INTEGER NOT NULL,
            affirmation        TEXT NOT NULL,
            lucky_activity     TEXT NOT NULL,
            quote              TEXT NOT NULL,
            focus_area         TEXT NOT NULL,
            created_at         TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (user_email, prediction_date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_predictions_user_date
        ON numerology_predictions (user_email, prediction_date DESC)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
