//! Common deployment settings shared by services.
//!
//! [`Basic`] is meant to be flattened into a service's own configuration
//! record so its fields resolve from top-level keys such as `ENV` and
//! `SLACK_TOKEN`.

use serde::Deserialize;

use crate::CascadeConfig;

/// Local development deployments.
pub const ENV_LOCAL: &str = "local";
/// Production deployments.
pub const ENV_PRODUCTION: &str = "production";
/// Development deployments on testnet.
pub const ENV_TESTNET_DEV: &str = "testnet-dev";
/// Production deployments on testnet.
pub const ENV_TESTNET_PROD: &str = "testnet-prod";

/// Deployment environment, build tag and alerting channel.
///
/// # Examples
///
/// ```
/// use cascade_config::{Basic, CascadeConfig, Environment, Loader, Sources};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, PartialEq, Deserialize, CascadeConfig)]
/// struct Service {
///     #[cascade_config(flatten)]
///     basic: Basic,
///     workers: u8,
/// }
///
/// let env: Environment = [("ENV", "testnet-dev"), ("WORKERS", "4")].into_iter().collect();
/// let mut service = Service::default();
/// Loader::new(Sources::new().with_env(env)).load(&mut service)?;
/// assert_eq!(service.basic.env, cascade_config::ENV_TESTNET_DEV);
/// assert_eq!(service.basic.release, "local-debug");
/// assert_eq!(service.workers, 4);
/// # Ok::<(), cascade_config::CascadeError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, CascadeConfig)]
#[cascade_config(crate = "crate")]
pub struct Basic {
    /// One of the `ENV_*` constants.
    #[cascade_config(default = "local")]
    pub env: String,
    /// Enables verbose diagnostics.
    #[cascade_config(default = false)]
    pub debug: bool,
    /// Build identifier injected at image build time.
    #[cascade_config(default = "local-debug")]
    pub release: String,
    /// Slack bot token; alerting is off when empty.
    pub slack_token: String,
    /// Slack channel receiving warnings and errors.
    #[cascade_config(default = "C076H0HBZLZ")]
    pub slack_channel: String,
}

impl Basic {
    /// Whether this is a local development deployment.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.env == ENV_LOCAL
    }

    /// Whether Slack alerting is configured.
    #[must_use]
    pub const fn alerts_enabled(&self) -> bool {
        !self.slack_token.is_empty() && !self.slack_channel.is_empty()
    }
}
