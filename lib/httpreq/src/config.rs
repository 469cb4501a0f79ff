//! Settings for the default transport.

use std::time::Duration;

/// Default time allowed until response headers arrive.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default time allowed to open a TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of idle pooled connections kept per host.
pub const DEFAULT_POOL_IDLE_PER_HOST: usize = 32;

/// Default lifetime of an idle pooled connection.
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Settings of a [`HyperClient`](crate::HyperClient).
///
/// The timeout covers sending the request and receiving the response head;
/// reading the body is up to the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Time allowed until response headers are received.
    pub timeout: Duration,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Idle connections kept per host for reuse.
    pub pool_idle_per_host: usize,
    /// How long an idle connection stays in the pool.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_idle_per_host: DEFAULT_POOL_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Starts from the defaults.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`], seeded with the defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Time allowed until response headers are received.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Time allowed to establish a connection.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Idle connections kept per host. Zero disables reuse.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config.pool_idle_per_host = count;
        self
    }

    /// How long an idle connection stays in the pool.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Finishes the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_starts_from_defaults() {
        assert_eq!(ClientConfig::builder().build(), ClientConfig::default());
        assert_eq!(ClientConfig::default().timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn builder_changes_only_what_is_set() {
        let config = ClientConfig::builder()
            .connect_timeout(Duration::from_millis(250))
            .pool_idle_per_host(0)
            .build();

        assert_eq!(config.connect_timeout, Duration::from_millis(250));
        assert_eq!(config.pool_idle_per_host, 0);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.pool_idle_timeout, DEFAULT_POOL_IDLE_TIMEOUT);
    }
}
