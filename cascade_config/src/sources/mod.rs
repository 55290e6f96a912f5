//! Value sources consulted by the resolver.
//!
//! A [`Sources`] set is assembled once per top-level load and shared
//! read-only by the whole recursive walk. Each source is optional; the
//! precedence between them is fixed by the resolver, not by the order in
//! which they are added here.

mod env;
mod remote;
mod secret;

pub use env::Environment;
pub use remote::{Parameter, ParameterPage, ParameterStore, RemoteParams};
pub use secret::{SecretReadPolicy, SecretStore};

/// The active sources for one resolution call.
///
/// # Examples
///
/// ```
/// use cascade_config::{Environment, RemoteParams, Sources};
///
/// let remote: RemoteParams = [("RETRIES", "3")].into_iter().collect();
/// let sources = Sources::new()
///     .with_remote(&remote)
///     .with_env(Environment::Process);
/// assert!(sources.remote().is_some());
/// assert!(sources.secrets().is_none());
/// ```
#[derive(Debug)]
pub struct Sources<'a> {
    defaults: bool,
    remote: Option<&'a RemoteParams>,
    env: Option<Environment>,
    secrets: Option<SecretStore>,
}

impl Default for Sources<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Sources<'a> {
    /// A source set with only field defaults active.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            defaults: true,
            remote: None,
            env: None,
            secrets: None,
        }
    }

    /// Enable or disable field default literals.
    #[must_use]
    pub const fn defaults(mut self, enabled: bool) -> Self {
        self.defaults = enabled;
        self
    }

    /// Consult a pre-fetched remote parameter map.
    #[must_use]
    pub const fn with_remote(mut self, remote: &'a RemoteParams) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Consult environment variables.
    #[must_use]
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Consult files in a secret directory.
    #[must_use]
    pub fn with_secrets(mut self, secrets: SecretStore) -> Self {
        self.secrets = Some(secrets);
        self
    }

    /// Whether default literals are applied.
    #[must_use]
    pub const fn uses_defaults(&self) -> bool {
        self.defaults
    }

    /// The remote parameter map, if active.
    #[must_use]
    pub const fn remote(&self) -> Option<&'a RemoteParams> {
        self.remote
    }

    /// The environment source, if active.
    #[must_use]
    pub const fn env(&self) -> Option<&Environment> {
        self.env.as_ref()
    }

    /// The secret directory, if active.
    #[must_use]
    pub const fn secrets(&self) -> Option<&SecretStore> {
        self.secrets.as_ref()
    }
}
