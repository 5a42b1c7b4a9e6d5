use std::time::Duration;
use tokio::time::sleep;

/// Tracks attempts for a single request and spaces retries apart
pub struct RetryPolicy {
    max_attempts: usize,
    delay: Duration,
    attempt: usize,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            delay: Duration::from_millis(delay_ms),
            attempt: 0,
        }
    }

    /// Record a failed attempt. Returns true while another attempt is allowed.
    pub fn next_attempt(&mut self) -> bool {
        self.attempt += 1;
        self.attempt < self.max_attempts
    }

    pub async fn wait(&self) {
        sleep(self.delay).await;
    }

    pub fn attempts(&self) -> usize {
        self.attempt
    }
}
