use std::env;
use tracing::warn;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@clinic.com";
pub const DEFAULT_PORT: u16 = 3006;
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 12;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    /// Adds `Secure` to the session cookie. Turn off only for plain-HTTP local runs.
    pub session_cookie_secure: bool,
    pub admin_email: String,
    /// Argon2 PHC string. Admin login is disabled while this is unset.
    pub admin_password_hash: Option<String>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_service_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_SERVICE_ROLE_KEY not set, using empty value");
                    String::new()
                }),
            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SESSION_SECRET not set, sessions cannot be issued");
                    String::new()
                }),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_SESSION_TTL_HOURS),
            session_cookie_secure: env::var("SESSION_COOKIE_SECURE")
                .map(|raw| !matches!(raw.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string()),
            admin_password_hash: env::var("ADMIN_PASSWORD_HASH")
                .ok()
                .filter(|hash| !hash.trim().is_empty()),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        };

        if !config.session_cookie_secure {
            warn!("SESSION_COOKIE_SECURE disabled, session cookie will be sent over plain HTTP");
        }

        if config.admin_password_hash.is_none() {
            warn!("ADMIN_PASSWORD_HASH not set, admin login is disabled");
        }

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_service_key.is_empty()
            && !self.session_secret.is_empty()
    }

    pub fn is_admin_login_enabled(&self) -> bool {
        self.admin_password_hash.is_some()
    }

    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_hours.saturating_mul(3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "service-key".to_string(),
            session_secret: "secret".to_string(),
            session_ttl_hours: 2,
            session_cookie_secure: true,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password_hash: None,
            port: DEFAULT_PORT,
        }
    }

    #[test]
    fn test_is_configured_requires_session_secret() {
        let mut config = config();
        assert!(config.is_configured());

        config.session_secret.clear();
        assert!(!config.is_configured());
    }

    #[test]
    fn test_admin_login_disabled_without_hash() {
        let mut config = config();
        assert!(!config.is_admin_login_enabled());

        config.admin_password_hash = Some("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string());
        assert!(config.is_admin_login_enabled());
    }

    #[test]
    fn test_session_ttl_seconds() {
        assert_eq!(config().session_ttl_seconds(), 7200);
    }

    #[test]
    fn test_oversized_session_ttl_saturates() {
        let mut config = config();
        config.session_ttl_hours = 9_999_999_999_999_999;
        assert_eq!(config.session_ttl_seconds(), i64::MAX);
    }
}
