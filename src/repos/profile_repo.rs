use anyhow::Result;
use sqlx::PgPool;

use crate::models::Profile;

pub struct ProfileRepo {
    pool: PgPool,
}

impl ProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert-or-update by email in a single statement.
    ///
    /// The uniqueness constraint on `users.email` plus ON CONFLICT makes two
    /// concurrent saves for the same new email converge on one row instead
    /// of racing a separate read-then-write.
    pub async fn upsert_profile(&self, profile: &Profile) -> Result<Profile> {
        let saved = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO users (
                id, email, name, photo, dob, hobbies, mobile_number,
                location_city, country, tarot_reading, cards_selection,
                person_name, coins, relationship, occupation, birth_time,
                birth_city, birth_state, birth_country, reading_date
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            ON CONFLICT (email) DO UPDATE SET
                id = EXCLUDED.id,
                name = EXCLUDED.name,
                photo = EXCLUDED.photo,
                dob = EXCLUDED.dob,
                hobbies = EXCLUDED.hobbies,
                mobile_number = EXCLUDED.mobile_number,
                location_city = EXCLUDED.location_city,
                country = EXCLUDED.country,
                tarot_reading = EXCLUDED.tarot_reading,
                cards_selection = EXCLUDED.cards_selection,
                person_name = EXCLUDED.person_name,
                coins = EXCLUDED.coins,
                relationship = EXCLUDED.relationship,
                occupation = EXCLUDED.occupation,
                birth_time = EXCLUDED.birth_time,
                birth_city = EXCLUDED.birth_city,
                birth_state = EXCLUDED.birth_state,
                birth_country = EXCLUDED.birth_country,
                reading_date = EXCLUDED.reading_date,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.email)
        .bind(&profile.name)
        .bind(&profile.photo)
        .bind(&profile.dob)
        .bind(&profile.hobbies)
        .bind(&profile.mobile_number)
        .bind(&profile.location_city)
        .bind(&profile.country)
        .bind(&profile.tarot_reading)
        .bind(&profile.cards_selection)
        .bind(&profile.person_name)
        .bind(profile.coins)
        .bind(&profile.relationship)
        .bind(&profile.occupation)
        .bind(&profile.birth_time)
        .bind(&profile.birth_city)
        .bind(&profile.birth_state)
        .bind(&profile.birth_country)
        .bind(&profile.reading_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Profile>> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            SELECT * FROM users WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
