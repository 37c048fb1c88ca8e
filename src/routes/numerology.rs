use chrono::{NaiveDate, Utc};
use poem_openapi::{Object, OpenApi, param::Path, param::Query, payload::Json};
use serde::Serialize;

use crate::app_error::AppError;
use crate::models::PredictionRow;
use crate::numerology::{daily_number, life_path, reading};
use crate::repos::prediction_repo::{NewPrediction, PredictionRepo};
use crate::repos::profile_repo::ProfileRepo;
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 30;

#[derive(Clone)]
pub struct NumerologyApi {
    pub state: AppState,
}

#[derive(Object, Debug, Serialize)]
struct DailyPredictionResponse {
    email: Option<String>,
    date: NaiveDate,
    life_path_number: i32,
    destiny_number: i32,
    soul_number: i32,
    personality_number: i32,
    daily_number: i32,
    prediction: String,
    lucky_color: String,
    lucky_number: i32,
    affirmation: String,
    lucky_activity: String,
    quote: String,
    focus_area: String,
}

#[derive(Object, Debug, Serialize)]
struct HistoryResponse {
    predictions: Vec<DailyPredictionResponse>,
    count: usize,
}

impl From<PredictionRow> for DailyPredictionResponse {
    fn from(r: PredictionRow) -> Self {
        Self {
            email: Some(r.user_email),
            date: r.prediction_date,
            life_path_number: r.life_path_number,
            destiny_number: r.destiny_number,
            soul_number: r.soul_number,
            personality_number: r.personality_number,
            daily_number: r.daily_number,
            prediction: r.prediction,
            lucky_color: r.lucky_color,
            lucky_number: r.lucky_number,
            affirmation: r.affirmation,
            lucky_activity: r.lucky_activity,
            quote: r.quote,
            focus_area: r.focus_area,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::validation("invalid date, expected YYYY-MM-DD"))
}

/// Lenient limit handling: anything that is not a positive integer falls
/// back to the default rather than rejecting the request.
fn normalize_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
}

fn compute_prediction(email: Option<String>, dob: &str, date: NaiveDate) -> DailyPredictionResponse {
    let lp = life_path(dob) as i32;
    let daily = daily_number(lp as u32, date) as i32;
    let r = reading(daily as u32);

    DailyPredictionResponse {
        email,
        date,
        life_path_number: lp,
        // simplified aliases of the life path in the current logic
        destiny_number: lp,
        soul_number: lp,
        personality_number: lp,
        daily_number: daily,
        prediction: r.prediction.to_string(),
        lucky_color: r.color.to_string(),
        lucky_number: r.number,
        affirmation: r.affirmation.to_string(),
        lucky_activity: r.activity.to_string(),
        quote: r.quote.to_string(),
        focus_area: r.focus_area.to_string(),
    }
}

#[OpenApi(prefix_path = "/numerology")]
impl NumerologyApi {
    /// Compute the daily reading for a birth date
    #[oai(path = "/daily", method = "get", operation_id = "daily_prediction")]
    async fn daily(
        &self,
        dob: Query<Option<String>>,
        date: Query<Option<String>>,
        email: Query<Option<String>>,
    ) -> poem::Result<Json<DailyPredictionResponse>> {
        let email = email.0.filter(|e| !e.is_empty());

        let date = match date.0.filter(|d| !d.is_empty()) {
            Some(s) => parse_date(&s)?,
            None => Utc::now().date_naive(),
        };

        // 1: explicit dob wins; otherwise fall back to the stored profile
        let dob = match dob.0.filter(|d| !d.is_empty()) {
            Some(d) => d,
            None => {
                let email = email
                    .as_deref()
                    .ok_or_else(|| AppError::validation("dob query parameter is required"))?;
                let repo = ProfileRepo::new(self.state.db.clone());
                let profile = repo
                    .get_by_email(email)
                    .await
                    .map_err(|e| AppError::store("get_by_email failed", e))?
                    .ok_or(AppError::NotFound)?;
                if profile.dob.is_empty() {
                    return Err(AppError::validation("stored profile has no dob").into());
                }
                profile.dob
            }
        };

        // 2: pure computation
        let prediction = compute_prediction(email.clone(), &dob, date);

        // 3: persist only when the caller identified themselves
        if let Some(email) = email {
            let repo = PredictionRepo::new(self.state.db.clone());
            let row = NewPrediction {
                user_email: email,
                prediction_date: date,
                life_path_number: prediction.life_path_number,
                destiny_number: prediction.destiny_number,
                soul_number: prediction.soul_number,
                personality_number: prediction.personality_number,
                daily_number: prediction.daily_number,
                prediction: prediction.prediction.clone(),
                lucky_color: prediction.lucky_color.clone(),
                lucky_number: prediction.lucky_number,
                affirmation: prediction.affirmation.clone(),
                lucky_activity: prediction.lucky_activity.clone(),
                quote: prediction.quote.clone(),
                focus_area: prediction.focus_area.clone(),
            };
            repo.save_prediction(&row)
                .await
                .map_err(|e| AppError::store("save_prediction failed", e))?;
        }

        Ok(Json(prediction))
    }

    /// List a user's persisted readings, most recent first
    #[oai(path = "/history", method = "get", operation_id = "prediction_history")]
    async fn history(
        &self,
        email: Query<Option<String>>,
        limit: Query<Option<String>>,
    ) -> poem::Result<Json<HistoryResponse>> {
        let email = email.0.filter(|e| !e.is_empty()).ok_or_else(|| {
            AppError::validation("email query parameter is required")
        })?;
        let limit = normalize_limit(limit.0.as_deref());

        let repo = PredictionRepo::new(self.state.db.clone());
        let rows = repo
            .list_for_user(&email, limit)
            .await
            .map_err(|e| AppError::store("list_for_user failed", e))?;

        let predictions: Vec<DailyPredictionResponse> =
            rows.into_iter().map(Into::into).collect();
        let count = predictions.len();

        Ok(Json(HistoryResponse { predictions, count }))
    }

    /// Fetch the persisted reading for an exact date
    #[oai(path = "/date/:date", method = "get", operation_id = "prediction_by_date")]
    async fn by_date(
        &self,
        date: Path<String>,
        email: Query<Option<String>>,
    ) -> poem::Result<Json<DailyPredictionResponse>> {
        let email = email.0.filter(|e| !e.is_empty()).ok_or_else(|| {
            AppError::validation("email query parameter is required")
        })?;
        let date = parse_date(&date.0)?;

        let repo = PredictionRepo::new(self.state.db.clone());
        let row = repo
            .get_by_date(&email, date)
            .await
            .map_err(|e| AppError::store("get_by_date failed", e))?
            .ok_or(AppError::NotFound)?;

        Ok(Json(row.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_passthrough() {
        assert_eq!(normalize_limit(None), 30);
        assert_eq!(normalize_limit(Some("10")), 10);
        assert_eq!(normalize_limit(Some("0")), 30);
        assert_eq!(normalize_limit(Some("-5")), 30);
        assert_eq!(normalize_limit(Some("lots")), 30);
        assert_eq!(normalize_limit(Some(" 7 ")), 7);
    }

    #[test]
    fn parse_date_rejects_invalid_calendar_dates() {
        assert!(parse_date("2024-13-40").is_err());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("not-a-date").is_err());
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn computed_prediction_matches_engine_tables() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let p = compute_prediction(None, "01/01/1990", date);
        assert_eq!(p.life_path_number, 3);
        assert_eq!(p.destiny_number, p.life_path_number);
        assert_eq!(p.soul_number, p.life_path_number);
        assert!((0..=9).contains(&p.daily_number));
        assert_eq!(p.lucky_number, reading(p.daily_number as u32).number);
    }
}
