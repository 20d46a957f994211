//! Runtime configuration.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use url::Url;

// Layer 3: Internal module imports
// (none)

/// Settings shared by every actor in a system.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use missive_rt::system::SystemConfig;
///
/// let config = SystemConfig::default()
///     .with_call_timeout(Duration::from_secs(30));
/// assert_eq!(config.call_timeout, Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SystemConfig {
    /// Public base URL of this system's HTTP bridge, if it serves one.
    ///
    /// With a base URL configured, local addresses leaving over the wire are
    /// rewritten to absolute URLs beneath it, and inbound addresses under it
    /// are resolved back to local actors.
    pub base_url: Option<Url>,

    /// Default deadline for `call` when the caller gives none. `None` means
    /// calls without an explicit timeout wait indefinitely.
    pub call_timeout: Option<Duration>,
}

impl SystemConfig {
    /// Set the bridge base URL.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the default call timeout.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SystemConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.call_timeout.is_none());
    }

    #[test]
    fn test_builder_methods() {
        let base = Url::parse("http://127.0.0.1:8080/").unwrap();
        let config = SystemConfig::default()
            .with_base_url(base.clone())
            .with_call_timeout(Duration::from_millis(250));

        assert_eq!(config.base_url, Some(base));
        assert_eq!(config.call_timeout, Some(Duration::from_millis(250)));
    }
}
