//! Configuration for the default HTTP transport.
//!
//! The traversal loop itself has no timeout, retry or cancellation; those live
//! here, in the transport that executes each request.
//!
//! # Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `request_timeout_ms` | 30000 | Whole-request timeout |
//! | `connect_timeout_ms` | 10000 | Connection establishment timeout |
//! | `proxy_url` | empty | Route requests through this proxy |
//! | `max_idle_per_host` | 16 | Pooled idle connections per host |
//! | `max_retries` | 0 | Retry attempts for retryable failures |
//! | `retry_delay_ms` | 500 | Base delay for exponential backoff |
//! | `enable_logging` | false | Log each request and response |
//!
//! # Examples
//!
//! ```
//! use traverson::client::ClientConfig;
//!
//! let config = ClientConfig {
//!     max_retries: 2,
//!     ..Default::default()
//! };
//! assert_eq!(config.retry_delay_ms, 500);
//! ```

/// Configuration for [`ReqwestTransport`](super::ReqwestTransport).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// Connection timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Proxy URL. Empty means no proxy.
    pub proxy_url: String,

    /// Maximum idle pooled connections per host.
    pub max_idle_per_host: usize,

    /// Maximum retries for a failed request.
    ///
    /// Only transport failures and retryable statuses (see
    /// [`is_retryable_status`](super::is_retryable_status)) are retried.
    /// Zero disables retries.
    pub max_retries: u32,

    /// Base retry delay in milliseconds.
    ///
    /// The actual delay uses exponential backoff: `delay = base * 2^attempt`.
    pub retry_delay_ms: u64,

    /// Log request and response details using the `tracing` crate.
    pub enable_logging: bool,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            request_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            proxy_url: String::new(),
            max_idle_per_host: 16,
            max_retries: 0,
            retry_delay_ms: 500,
            enable_logging: false,
            user_agent: concat!("traverson/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout_ms, 30_000);
        assert_eq!(config.max_retries, 0);
        assert!(config.proxy_url.is_empty());
        assert!(!config.enable_logging);
        assert!(config.user_agent.starts_with("traverson/"));
    }

    #[test]
    fn test_partial_override() {
        let config = ClientConfig {
            max_retries: 3,
            ..Default::default()
        };
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_ms, 500);
    }
}
