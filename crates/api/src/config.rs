use writinghub_core::company::CompanyProfile;
use writinghub_core::staff_access::hash_token;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SHA-256 hex digest of `STAFF_API_TOKEN`. When `None`, every staff
    /// route is rejected.
    pub staff_token_hash: Option<String>,
    /// Seconds between background testimonial backfill runs (default: `900`).
    /// `0` disables the background job.
    pub testimonial_backfill_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                              | Default                 |
    /// |--------------------------------------|-------------------------|
    /// | `HOST`                               | `0.0.0.0`               |
    /// | `PORT`                               | `3000`                  |
    /// | `CORS_ORIGINS`                       | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`               | `30`                    |
    /// | `STAFF_API_TOKEN`                    | unset                   |
    /// | `TESTIMONIAL_BACKFILL_INTERVAL_SECS` | `900`                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let staff_token_hash = std::env::var("STAFF_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .map(|t| hash_token(t.trim()));

        let testimonial_backfill_interval_secs: u64 =
            std::env::var("TESTIMONIAL_BACKFILL_INTERVAL_SECS")
                .unwrap_or_else(|_| "900".into())
                .parse()
                .expect("TESTIMONIAL_BACKFILL_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            staff_token_hash,
            testimonial_backfill_interval_secs,
        }
    }
}

/// Load the company profile, overriding defaults with `COMPANY_*` variables.
///
/// `COMPANY_NAME`, `COMPANY_TAGLINE`, `COMPANY_PHONE`, `COMPANY_EMAIL`,
/// `COMPANY_WEBSITE`, `COMPANY_ADDRESS`, `COMPANY_FACEBOOK`,
/// `COMPANY_TWITTER`, `COMPANY_LINKEDIN`, `COMPANY_INSTAGRAM`,
/// `COMPANY_FOUNDER_NAME`, `COMPANY_FOUNDER_TITLE`, `COMPANY_VISION`,
/// `COMPANY_MISSION`, `COMPANY_ESTABLISHED_YEAR`, `COMPANY_REGISTRATION_YEAR`.
pub fn company_from_env() -> CompanyProfile {
    let defaults = CompanyProfile::default();
    let text = |key: &str, default: String| env_text(key).unwrap_or(default);
    let link = |key: &str, default: Option<String>| env_text(key).or(default);
    let year = |key: &str, default: i32| -> i32 {
        env_text(key)
            .map(|v| {
                v.parse()
                    .unwrap_or_else(|_| panic!("{key} must be a valid year"))
            })
            .unwrap_or(default)
    };

    CompanyProfile {
        company_name: text("COMPANY_NAME", defaults.company_name),
        tagline: text("COMPANY_TAGLINE", defaults.tagline),
        phone: text("COMPANY_PHONE", defaults.phone),
        email: text("COMPANY_EMAIL", defaults.email),
        website: text("COMPANY_WEBSITE", defaults.website),
        address: text("COMPANY_ADDRESS", defaults.address),
        facebook: link("COMPANY_FACEBOOK", defaults.facebook),
        twitter: link("COMPANY_TWITTER", defaults.twitter),
        linkedin: link("COMPANY_LINKEDIN", defaults.linkedin),
        instagram: link("COMPANY_INSTAGRAM", defaults.instagram),
        founder_name: text("COMPANY_FOUNDER_NAME", defaults.founder_name),
        founder_title: text("COMPANY_FOUNDER_TITLE", defaults.founder_title),
        vision: text("COMPANY_VISION", defaults.vision),
        mission: text("COMPANY_MISSION", defaults.mission),
        established_year: year("COMPANY_ESTABLISHED_YEAR", defaults.established_year),
        registration_year: year("COMPANY_REGISTRATION_YEAR", defaults.registration_year),
    }
}

fn env_text(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
