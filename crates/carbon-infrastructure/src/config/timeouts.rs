use std::time::Duration;

/// Configuration for the timeout durations used by infrastructure adapters
#[derive(Debug, Clone, PartialEq)]
pub struct TimeoutConfig {
    /// Whole-request timeout for the network API
    pub http_request: Duration,

    /// TCP connect timeout for the network API
    pub http_connect: Duration,

    /// Single slot read or write against the local database
    pub db_query: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            http_request: Duration::from_secs(30),
            http_connect: Duration::from_secs(10),
            db_query: Duration::from_secs(10),
        }
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the request timeout, keeping connect no longer than it
    pub fn with_http_request(mut self, timeout: Duration) -> Self {
        self.http_request = timeout;
        self.http_connect = self.http_connect.min(timeout);
        self
    }
}
