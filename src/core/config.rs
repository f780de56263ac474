use std::env;
use std::ops::RangeInclusive;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub dispatch: DispatchConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Placeholder admin credentials and session lifetime
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub admin_username: String,
    pub admin_password: String,
    pub session_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Hours added to the dispatch time to produce the estimated completion
    pub estimate_hours: i64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            dispatch: DispatchConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AuthConfig {
    const DEFAULT_SESSION_TTL_SECS: u64 = 8 * 60 * 60; // one working day
    const SESSION_TTL_SECS_RANGE: RangeInclusive<u64> = 1..=30 * 24 * 60 * 60;

    pub fn from_env() -> Result<Self, String> {
        let admin_username = env::var("ADMIN_USERNAME")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "admin".to_string());
        let admin_password = env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "admin".to_string());

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SESSION_TTL_SECS.to_string());

        Ok(Self {
            admin_username,
            admin_password,
            session_ttl: Self::parse_session_ttl(&session_ttl_secs)?,
        })
    }

    fn parse_session_ttl(raw: &str) -> Result<Duration, String> {
        let secs = raw
            .parse::<u64>()
            .map_err(|_| "SESSION_TTL_SECS must be a valid number".to_string())?;

        if !Self::SESSION_TTL_SECS_RANGE.contains(&secs) {
            return Err(format!(
                "SESSION_TTL_SECS must be between {} and {}",
                Self::SESSION_TTL_SECS_RANGE.start(),
                Self::SESSION_TTL_SECS_RANGE.end()
            ));
        }
        Ok(Duration::from_secs(secs))
    }
}

impl DispatchConfig {
    const DEFAULT_ESTIMATE_HOURS: i64 = 8;
    const ESTIMATE_HOURS_RANGE: RangeInclusive<i64> = 1..=720; // up to 30 days

    pub fn from_env() -> Result<Self, String> {
        let estimate_hours = env::var("DISPATCH_ESTIMATE_HOURS")
            .unwrap_or_else(|_| Self::DEFAULT_ESTIMATE_HOURS.to_string());

        Ok(Self {
            estimate_hours: Self::parse_estimate_hours(&estimate_hours)?,
        })
    }

    fn parse_estimate_hours(raw: &str) -> Result<i64, String> {
        let hours = raw
            .parse::<i64>()
            .map_err(|_| "DISPATCH_ESTIMATE_HOURS must be a valid number".to_string())?;

        if !Self::ESTIMATE_HOURS_RANGE.contains(&hours) {
            return Err(format!(
                "DISPATCH_ESTIMATE_HOURS must be between {} and {}",
                Self::ESTIMATE_HOURS_RANGE.start(),
                Self::ESTIMATE_HOURS_RANGE.end()
            ));
        }
        Ok(hours)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            estimate_hours: Self::DEFAULT_ESTIMATE_HOURS,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Sahayak API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Civic issue tracking admin API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swagger_credentials_require_both_parts() {
        let mut swagger = SwaggerConfig {
            username: Some("ops".to_string()),
            password: None,
            title: "t".to_string(),
            version: "v".to_string(),
            description: "d".to_string(),
        };
        assert_eq!(swagger.credentials(), None);

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials().as_deref(), Some("ops:secret"));
    }

    #[test]
    fn test_estimate_hours_bounds() {
        assert_eq!(DispatchConfig::parse_estimate_hours("8"), Ok(8));
        assert_eq!(DispatchConfig::parse_estimate_hours("720"), Ok(720));
        assert!(DispatchConfig::parse_estimate_hours("0").is_err());
        assert!(DispatchConfig::parse_estimate_hours("-3").is_err());
        assert!(DispatchConfig::parse_estimate_hours("5000000000").is_err());
        assert!(DispatchConfig::parse_estimate_hours("soon").is_err());
    }

    #[test]
    fn test_session_ttl_bounds() {
        assert_eq!(
            AuthConfig::parse_session_ttl("28800"),
            Ok(Duration::from_secs(28800))
        );
        assert!(AuthConfig::parse_session_ttl("0").is_err());
        assert!(AuthConfig::parse_session_ttl("18446744073709551615").is_err());
    }

    #[test]
    fn test_server_address() {
        let app = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allowed_origins: vec!["*".to_string()],
        };
        assert_eq!(app.server_address(), "0.0.0.0:8080");
    }
}
