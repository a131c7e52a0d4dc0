use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub mail_transport: MailTransportKind,
    pub smtp: SmtpSettings,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: u16,
}

/// Which outbound transport the dispatcher uses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MailTransportKind {
    Smtp,
    Mock,
}

/// Outbound mail settings. Optional at startup; a dispatch run fails with a
/// configuration error when required values are absent.
#[derive(Clone, Debug)]
pub struct SmtpSettings {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_email: Option<String>,
    pub from_name: String,
    pub use_tls: bool,
}

impl SmtpSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidSmtpPort)?;

        let use_tls = env::var("SMTP_USE_TLS")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        Ok(Self {
            host: non_empty_var("SMTP_HOST"),
            port,
            username: non_empty_var("SMTP_USERNAME"),
            password: non_empty_var("SMTP_PASSWORD"),
            from_email: non_empty_var("SMTP_FROM_EMAIL"),
            from_name: env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "Maildeck".to_string()),
            use_tls,
        })
    }

    /// Names of required variables that are not set
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.host.is_none() {
            missing.push("SMTP_HOST");
        }
        if self.username.is_none() {
            missing.push("SMTP_USERNAME");
        }
        if self.password.is_none() {
            missing.push("SMTP_PASSWORD");
        }
        if self.from_email.is_none() {
            missing.push("SMTP_FROM_EMAIL");
        }
        missing
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://maildeck.db?mode=rwc".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let mail_transport = match env::var("MAIL_TRANSPORT")
            .unwrap_or_else(|_| "smtp".to_string())
            .to_lowercase()
            .as_str()
        {
            "smtp" => MailTransportKind::Smtp,
            "mock" => MailTransportKind::Mock,
            other => return Err(ConfigError::UnknownMailTransport(other.to_string())),
        };

        let smtp = SmtpSettings::from_env()?;

        let otel_exporter_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "maildeck".to_string());

        let metrics_port = env::var("METRICS_PORT")
            .unwrap_or_else(|_| "9000".to_string())
            .parse()
            .unwrap_or(9000);

        Ok(Config {
            database_url,
            server_host,
            server_port,
            mail_transport,
            smtp,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid SMTP_PORT")]
    InvalidSmtpPort,

    #[error("Unknown MAIL_TRANSPORT '{0}', expected 'smtp' or 'mock'")]
    UnknownMailTransport(String),
}
