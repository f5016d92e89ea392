//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the website monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// URLs to probe on every tick. Fixed for the process lifetime.
    pub endpoints: Vec<String>,

    /// Probe timeouts and request settings.
    pub probe: ProbeConfig,

    /// Tick cadence and overlap policy.
    pub schedule: ScheduleConfig,

    /// Failure streak threshold and repeat policy.
    pub alert: AlertConfig,

    /// Telegram bot credentials for alert delivery.
    pub telegram: TelegramConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Upper bound on the whole request (connect + response head) in seconds.
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every probe.
    pub user_agent: String,

    /// Honor HTTP(S)_PROXY / NO_PROXY from the environment.
    pub use_system_proxy: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
            user_agent: "website-monitor/0.1".to_string(),
            use_system_proxy: true,
        }
    }
}

/// Scheduling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Seconds between ticks.
    pub interval_secs: u64,

    /// Allow a tick to start while the previous one is still running.
    /// When false, ticks are serialized and missed ticks are skipped.
    pub allow_overlap: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            allow_overlap: true,
        }
    }
}

/// When to notify once a failure streak reaches the threshold.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertMode {
    /// Notify on every failing tick at or above the threshold.
    #[default]
    Repeat,
    /// Notify once, on the tick the streak reaches the threshold.
    Edge,
}

/// Alerting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Consecutive failures required before notifying.
    pub threshold: u32,

    /// Repeat or edge-triggered alerts.
    pub mode: AlertMode,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold: 5,
            mode: AlertMode::Repeat,
        }
    }
}

/// Telegram Bot API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather.
    pub bot_token: String,

    /// Target chat identifier.
    pub chat_id: String,

    /// API base URL. Overridable for testing.
    pub api_base: String,

    /// Timeout for a single sendMessage call in seconds.
    pub timeout_secs: u64,

    /// Honor HTTP(S)_PROXY / NO_PROXY from the environment.
    pub use_system_proxy: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: "https://api.telegram.org".to_string(),
            timeout_secs: 10,
            use_system_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
