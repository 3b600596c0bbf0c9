//! Driver configuration.

use std::time::Duration;

use serde::Deserialize;

/// Tunable capacities and timings for the driver.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TriggerConfig {
    /// Response buffer capacity in bytes. Must hold the largest response
    /// the board produces (a full status report).
    pub response_capacity: usize,

    /// Version-string buffer capacity in bytes.
    pub version_capacity: usize,

    /// Default wait-phase timeout for queries, in milliseconds.
    pub reply_timeout_ms: u64,

    /// Pause between consecutive response-byte reads, in milliseconds.
    /// The board's controller refills its UART FIFO slower than the host
    /// can read it.
    pub inter_byte_delay_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        TriggerConfig {
            response_capacity: 64,
            version_capacity: 32,
            reply_timeout_ms: 2000,
            inter_byte_delay_ms: 20,
        }
    }
}

impl TriggerConfig {
    /// Default query timeout as a [`Duration`].
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }

    /// Drain-phase inter-byte delay as a [`Duration`].
    pub fn inter_byte_delay(&self) -> Duration {
        Duration::from_millis(self.inter_byte_delay_ms)
    }
}
