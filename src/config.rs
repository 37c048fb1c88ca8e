use anyhow::Context;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub google_client_id: String,
    pub bind_addr: String,
    pub tokeninfo_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL missing")?,
            google_client_id: std::env::var("GOOGLE_CLIENT_ID")
                .context("GOOGLE_CLIENT_ID missing")?,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            tokeninfo_url: std::env::var("TOKENINFO_URL")
                .unwrap_or_else(|_| GOOGLE_TOKENINFO_URL.into()),
        })
    }
}
