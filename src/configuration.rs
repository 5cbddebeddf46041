use crate::domain::SubmitterEmail;
use ipnetwork::IpNetwork;
use secrecy::Secret;
use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub rate_limit: RateLimitSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub static_dir: PathBuf,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub allowed_origins: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub trusted_proxies: Vec<String>,
}

impl ApplicationSettings {
    pub fn trusted_proxies(&self) -> Result<Vec<IpNetwork>, String> {
        self.trusted_proxies
            .iter()
            .map(|net| {
                net.parse::<IpNetwork>()
                    .map_err(|e| format!("{} is not a valid proxy network: {}", net, e))
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailClientSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub use_tls: bool,
    // Some relays sit behind self-signed certificates; validation stays on unless asked.
    #[serde(default)]
    pub accept_invalid_certs: bool,
    pub username: String,
    pub password: Secret<String>,
    pub sender_email: String,
    pub sender_name: String,
    pub recipient_email: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<SubmitterEmail, String> {
        SubmitterEmail::parse(self.sender_email.clone())
    }

    pub fn recipient(&self) -> Result<SubmitterEmail, String> {
        SubmitterEmail::parse(self.recipient_email.clone())
    }

    pub fn base_url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    pub global: WindowSettings,
    pub forms: WindowSettings,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WindowSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub window_seconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_requests: u32,
}

impl WindowSettings {
    pub fn window(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.window_seconds)
    }
}

/// Accepts either a YAML sequence or a single comma-separated string,
/// the latter being what an environment variable override provides.
fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        Csv(String),
    }

    let items = match ListOrString::deserialize(deserializer)? {
        ListOrString::List(items) => items,
        ListOrString::Csv(raw) => raw.split(',').map(str::to_owned).collect(),
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect())
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine current directory: {}", e))
    })?;
    let config_dir = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let environment_file = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(config_dir.join("base.yaml")))
        .add_source(config::File::from(config_dir.join(environment_file)))
        // e.g. `APP_EMAIL_CLIENT__PASSWORD=...` sets `Settings.email_client.password`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
