use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::PredictionRow;

/// Field values for one computed reading, before it has a row id.
#[derive(Debug, Clone)]
pub struct NewPrediction {
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
}

pub struct PredictionRepo {
    pool: PgPool,
}

impl PredictionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert on (user_email, prediction_date); recomputing the same day
    /// overwrites in place rather than accumulating rows.
    pub async fn save_prediction(&self, p: &NewPrediction) -> Result<i64> {
        let rec: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO numerology_predictions (
                user_email, prediction_date, life_path_number, destiny_number,
                soul_number, personality_number, daily_number, prediction,
                lucky_color, lucky_number, affirmation, lucky_activity,
                quote, focus_area
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (user_email, prediction_date) DO UPDATE SET
                life_path_number = EXCLUDED.life_path_number,
                destiny_number = EXCLUDED.destiny_number,
                soul_number = EXCLUDED.soul_number,
                personality_number = EXCLUDED.personality_number,
                daily_number = EXCLUDED.daily_number,
                prediction = EXCLUDED.prediction,
                lucky_color = EXCLUDED.lucky_color,
                lucky_number = EXCLUDED.lucky_number,
                affirmation = EXCLUDED.affirmation,
                lucky_activity = EXCLUDED.lucky_activity,
                quote = EXCLUDED.quote,
                focus_area = EXCLUDED.focus_area
            RETURNING id
            "#,
        )
        .bind(&p.user_email)
        .bind(p.prediction_date)
        .bind(p.life_path_number)
        .bind(p.destiny_number)
        .bind(p.soul_number)
        .bind(p.personality_number)
        .bind(p.daily_number)
        .bind(&p.prediction)
        .bind(&p.lucky_color)
        .bind(p.lucky_number)
        .bind(&p.affirmation)
        .bind(&p.lucky_activity)
        .bind(&p.quote)
        .bind(&p.focus_area)
        .fetch_one(&self.pool)
        .await?;

        Ok(rec.0)
    }

    pub async fn list_for_user(&self, email: &str, limit: i64) -> Result<Vec<PredictionRow>> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT *
            FROM numerology_predictions
            WHERE user_email = $1
            ORDER BY prediction_date DESC
            LIMIT $2
            "#,
        )
        .bind(email)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_by_date(&self, email: &str, date: NaiveDate) -> Result<Option<PredictionRow>> {
        let row = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT *
            FROM numerology_predictions
            WHERE user_email = $1 AND prediction_date = $2
            "#,
        )
        .bind(email)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
