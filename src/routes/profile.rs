use chrono::Utc;
use poem_openapi::{Object, OpenApi, param::Query, payload::Json};
use serde::Serialize;

use crate::app_error::AppError;
use crate::models::Profile;
use crate::repos::profile_repo::ProfileRepo;
use crate::services::identity::{bearer_token, resolve_identity};
use crate::state::AppState;

#[derive(Clone)]
pub struct ProfileApi {
    pub state: AppState,
}

#[derive(Object, Debug)]
struct SaveProfileRequest {
    /// If present, must match the authenticated identity's email
    email: Option<String>,
    dob: Option<String>,
    hobbies: Option<String>,
    mobile_number: Option<String>,
    location_city: Option<String>,
    country: Option<String>,
    tarot_reading: Option<String>,
    cards_selection: Option<String>,
    person_name: Option<String>,
    coins: Option<i32>,
    relationship: Option<String>,
    occupation: Option<String>,
    birth_time: Option<String>,
    birth_city: Option<String>,
    birth_state: Option<String>,
    birth_country: Option<String>,
    reading_date: Option<String>,
}

#[derive(Object, Debug, Serialize)]
struct SaveProfileResponse {
    message: String,
}

#[derive(Object, Debug, Serialize)]
struct ProfileResponse {
    id: String,
    email: String,
    name: String,
    photo: String,
    dob: String,
    hobbies: String,
    mobile_number: String,
    location_city: String,
    country: String,
    tarot_reading: String,
    cards_selection: String,
    person_name: String,
    coins: i32,
    relationship: String,
    occupation: String,
    birth_time: String,
    birth_city: String,
    birth_state: String,
    birth_country: String,
    reading_date: String,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            name: p.name,
            photo: p.photo,
            dob: p.dob,
            hobbies: p.hobbies,
            mobile_number: p.mobile_number,
            location_city: p.location_city,
            country: p.country,
            tarot_reading: p.tarot_reading,
            cards_selection: p.cards_selection,
            person_name: p.person_name,
            coins: p.coins,
            relationship: p.relationship,
            occupation: p.occupation,
            birth_time: p.birth_time,
            birth_city: p.birth_city,
            birth_state: p.birth_state,
            birth_country: p.birth_country,
            reading_date: p.reading_date,
        }
    }
}

#[OpenApi]
impl ProfileApi {
    /// Create or update the caller's profile (upsert by email)
    #[oai(path = "/saveProfile", method = "post", operation_id = "save_profile")]
    async fn save_profile(
        &self,
        req: &poem::Request,
        Json(body): Json<SaveProfileRequest>,
    ) -> poem::Result<Json<SaveProfileResponse>> {
        // 1: resolve identity from the bearer credential
        let token = bearer_token(req)?;
        let identity = resolve_identity(&self.state.config, token).await?;

        // 2: a client-supplied email must match the verified one
        if let Some(claimed) = body.email.as_deref() {
            if !claimed.is_empty() && claimed != identity.email {
                return Err(AppError::Forbidden.into());
            }
        }

        // 3: identity fields come from the token, never from the body
        let profile = Profile {
            id: identity.subject_id,
            email: identity.email,
            name: identity.name,
            photo: identity.picture_url,
            dob: body.dob.unwrap_or_default(),
            hobbies: body.hobbies.unwrap_or_default(),
            mobile_number: body.mobile_number.unwrap_or_default(),
            location_city: body.location_city.unwrap_or_default(),
            country: body.country.unwrap_or_default(),
            tarot_reading: body.tarot_reading.unwrap_or_default(),
            cards_selection: body.cards_selection.unwrap_or_default(),
            person_name: body.person_name.unwrap_or_default(),
            coins: body.coins.unwrap_or_default(),
            relationship: body.relationship.unwrap_or_default(),
            occupation: body.occupation.unwrap_or_default(),
            birth_time: body.birth_time.unwrap_or_default(),
            birth_city: body.birth_city.unwrap_or_default(),
            birth_state: body.birth_state.unwrap_or_default(),
            birth_country: body.birth_country.unwrap_or_default(),
            reading_date: body.reading_date.unwrap_or_default(),
            updated_at: Utc::now(),
        };

        let repo = ProfileRepo::new(self.state.db.clone());
        repo.upsert_profile(&profile)
            .await
            .map_err(|e| AppError::store("upsert_profile failed", e))?;

        Ok(Json(SaveProfileResponse {
            message: "User profile saved successfully!".to_string(),
        }))
    }

    /// Fetch a profile by email
    #[oai(path = "/getProfile", method = "get", operation_id = "get_profile")]
    async fn get_profile(
        &self,
        email: Query<Option<String>>,
    ) -> poem::Result<Json<ProfileResponse>> {
        let email = email.0.filter(|e| !e.is_empty()).ok_or_else(|| {
            AppError::validation("email query parameter is required")
        })?;

        let repo = ProfileRepo::new(self.state.db.clone());
        let profile = repo
            .get_by_email(&email)
            .await
            .map_err(|e| AppError::store("get_by_email failed", e))?
            .ok_or(AppError::NotFound)?;

        Ok(Json(profile.into()))
    }
}
