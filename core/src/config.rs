//! Client configuration: credential, target deployment and session-wide
//! query settings.
//!
//! # Design
//! A `ClientConfig` is assembled once, validated by `SudregClient` on
//! construction, and never mutated afterwards. Settings that the registry
//! accepts on every call (`snapshot_id`, `omit_nulls`, `no_data_error`) live
//! here rather than on each method so that a client reads one consistent
//! snapshot of the registry for its whole lifetime.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use url::Url;

use crate::error::{Result, SudregError};

/// Header that carries the subscription key on every request.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Applied when the configuration does not name a timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Opaque credential issued by the registry operator.
///
/// `Debug` never prints the key itself.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionKey(String);

impl SubscriptionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SubscriptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubscriptionKey(***)")
    }
}

/// Which deployment of the registry service to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Production,
    #[default]
    Test,
}

impl Environment {
    pub fn root_url(self) -> &'static str {
        match self {
            Environment::Production => "https://sudreg-data.gov.hr/api/",
            Environment::Test => "https://sudreg-data-test.gov.hr/api/",
        }
    }
}

/// API surface: the open-data one, or the one reserved for state bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    #[default]
    Public,
    StateBodies,
}

impl Audience {
    pub fn path_segment(self) -> &'static str {
        match self {
            Audience::Public => "javni/",
            Audience::StateBodies => "drzavna_tijela/",
        }
    }
}

/// Everything a `SudregClient` needs before it can issue a request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub subscription_key: SubscriptionKey,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub audience: Audience,
    /// Replaces the environment's root URL; the audience segment is still
    /// appended to it.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Read from `timeout_ms` when deserialized.
    #[serde(default, rename = "timeout_ms", deserialize_with = "millis")]
    pub timeout: Option<Duration>,
    /// Pins every call to one registry snapshot instead of the latest.
    #[serde(default)]
    pub snapshot_id: Option<u64>,
    #[serde(default)]
    pub omit_nulls: Option<bool>,
    #[serde(default)]
    pub no_data_error: Option<bool>,
}

impl ClientConfig {
    pub fn new(subscription_key: impl Into<String>) -> Self {
        Self {
            subscription_key: SubscriptionKey::new(subscription_key),
            environment: Environment::default(),
            audience: Audience::default(),
            base_url: None,
            timeout: None,
            snapshot_id: None,
            omit_nulls: None,
            no_data_error: None,
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = audience;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_snapshot_id(mut self, snapshot_id: u64) -> Self {
        self.snapshot_id = Some(snapshot_id);
        self
    }

    pub fn with_omit_nulls(mut self, omit_nulls: bool) -> Self {
        self.omit_nulls = Some(omit_nulls);
        self
    }

    pub fn with_no_data_error(mut self, no_data_error: bool) -> Self {
        self.no_data_error = Some(no_data_error);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Check the settings without contacting the service.
    pub fn validate(&self) -> Result<()> {
        let key = self.subscription_key.expose();
        if key.trim().is_empty() {
            return Err(SudregError::Configuration(
                "subscription key must not be empty".to_string(),
            ));
        }
        // Sent verbatim as a header value.
        if !key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(SudregError::Configuration(
                "subscription key must contain only visible ASCII characters".to_string(),
            ));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(SudregError::Configuration(
                "timeout must be greater than zero".to_string(),
            ));
        }
        self.api_base().map(|_| ())
    }

    /// Resolved root of the API surface, always ending in `/`.
    pub fn api_base(&self) -> Result<Url> {
        let root = match &self.base_url {
            Some(url) => format!("{}/", url.trim_end_matches('/')),
            None => self.environment.root_url().to_string(),
        };
        let root = Url::parse(&root)
            .map_err(|e| SudregError::Configuration(format!("invalid base URL `{root}`: {e}")))?;
        if !matches!(root.scheme(), "http" | "https") {
            return Err(SudregError::Configuration(format!(
                "base URL must use http or https, got `{}`",
                root.scheme()
            )));
        }
        root.join(self.audience.path_segment())
            .map_err(|e| SudregError::Configuration(format!("invalid base URL: {e}")))
    }
}

fn millis<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
}
