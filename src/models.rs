use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// One row per end user, keyed by the unique `email` column.
#[derive(FromRow, Debug, Clone)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub photo: String,
    pub dob: String,
    pub hobbies: String,
    pub mobile_number: String,
    pub location_city: String,
    pub country: String,
    pub tarot_reading: String,
    pub cards_selection: String,
    pub person_name: String,
    pub coins: i32,
    pub relationship: String,
    pub occupation: String,
    pub birth_time: String,
    pub birth_city: String,
    pub birth_state: String,
    pub birth_country: String,
    pub reading_date: String,
    pub updated_at: DateTime<Utc>,
}

/// Persisted daily reading, unique on (user_email, prediction_date).
#[derive(FromRow, Debug, Clone)]
pub struct PredictionRow {
    pub id: i64,
    pub user_email: String,
    pub prediction_date: NaiveDate,
    pub life_path_number: i32,
    pub destiny_number: i32,
    pub soul_number: i32,
    pub personality_number: i32,
    pub daily_number: i32,
    pub prediction: String,
    pub lucky_color: String,
    pub lucky_number: i32,
    pub affirmation: String,
    pub lucky_activity: String,
    pub quote: String,
    pub focus_area: String,
    pub created_at: DateTime<Utc>,
}
