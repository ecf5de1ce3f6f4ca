use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::fetcher::{FetchError, TaxBracketFetcher};

/// Backend-agnostic provider configuration.
///
/// `backend` must match the [`FetcherFactory::backend_name`] of a registered
/// factory.  `source` is passed through to that factory unchanged; its meaning
/// is entirely backend-specific.
///
/// | backend | source examples                          |
/// |---------|------------------------------------------|
/// | `http`  | `http://localhost:5000/tax-calculator`   |
/// | `csv`   | `brackets.csv`                           |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"http"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub source: String,
    /// Upper bound on a single fetch, for backends that do I/O per call.
    pub request_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            source: "http://localhost:5000/tax-calculator".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// One implementation per provider backend.  Each backend crate exports a
/// single unit struct that implements this trait and is registered with a
/// [`FetcherRegistry`] at startup.
#[async_trait]
pub trait FetcherFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Build a ready-to-use fetcher.  File-backed implementations load their
    /// data here so a bad source fails at startup, not on the first request.
    async fn create(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn TaxBracketFetcher>, FetchError>;
}

/// Registry of [`FetcherFactory`] instances, keyed by backend name.
///
/// Typical lifetime:
/// 1. Create with `FetcherRegistry::new()`.
/// 2. Call `register` once per known backend.
/// 3. Call `create` with the configured backend.
pub struct FetcherRegistry {
    factories: HashMap<&'static str, Box<dyn FetcherFactory>>,
}

impl FetcherRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory.
    ///
    /// If a factory with the same [`FetcherFactory::backend_name`] is already
    /// present it is silently replaced.
    pub fn register(
        &mut self,
        factory: Box<dyn FetcherFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend` and return the
    /// fetcher it produces.
    ///
    /// # Errors
    /// * [`FetchError::Configuration`] if no factory is registered for the
    ///   requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn TaxBracketFetcher>, FetchError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                FetchError::Configuration(format!(
                    "unknown provider '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for FetcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}
