/// Runtime configuration for the ingestion guard, loaded once at startup
/// and shared across workers as Actix app data.
#[derive(Clone)]
pub struct GuardConfig {
    /// Shared secret used to key the request HMAC. Known only to trusted
    /// callers and this service.
    pub secret: Vec<u8>,
}

const SECRET_ENV: &str = "SCOUT_INGEST_SECRET";

pub fn load() -> Result<GuardConfig, String> {
    match std::env::var(SECRET_ENV) {
        Ok(v) if !v.is_empty() => Ok(GuardConfig {
            secret: v.into_bytes(),
        }),
        _ => Err(format!(
            "{} must be set to a non-empty shared secret",
            SECRET_ENV
        )),
    }
}
