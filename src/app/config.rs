/// Centralized environment configuration.
/// All env vars and defaults are defined here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address.
    /// Default: 0.0.0.0
    pub host: String,

    /// Listen port.
    /// Default: 4000
    pub port: u16,

    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,

    /// Outbound SMTP settings.
    pub smtp: SmtpSettings,

    /// Sender address override. Falls back to the SMTP user.
    pub mail_from: Option<String>,

    /// Recipient override. Falls back to the SMTP user, then the submitter.
    pub mail_to: Option<String>,
}

/// SMTP connection settings.
#[derive(Debug, Clone, Default)]
pub struct SmtpSettings {
    /// SMTP host. Without it every request takes the discard path.
    pub host: Option<String>,

    /// SMTP port. 465 means implicit TLS.
    /// Default: 587
    pub port: u16,

    /// SMTP username. Optional for some servers.
    pub user: Option<String>,

    /// SMTP password. Optional for some servers.
    pub pass: Option<String>,
}

impl Config {
    /// Build config from environment variables.
    /// Returns an error if a var is present but malformed.
    pub fn from_env() -> Result<Self, String> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse::<u16>()
            .map_err(|_| "PORT must be a valid port number")?;

        let cors_origins = std::env::var("CORS_ORIGIN")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let smtp_port = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .map_err(|_| "SMTP_PORT must be a valid port number")?;

        let smtp = SmtpSettings {
            host: non_empty_var("SMTP_HOST"),
            port: smtp_port,
            user: non_empty_var("SMTP_USER"),
            pass: non_empty_var("SMTP_PASS"),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            smtp,
            mail_from: non_empty_var("MAIL_FROM"),
            mail_to: non_empty_var("MAIL_TO"),
        })
    }

    /// Address to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Config for tests. No SMTP host, any origin.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            cors_origins: Vec::new(),
            smtp: SmtpSettings {
                host: None,
                port: 587,
                user: None,
                pass: None,
            },
            mail_from: Some("site@example.com".to_string()),
            mail_to: Some("owner@example.com".to_string()),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
