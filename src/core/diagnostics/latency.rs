//! Gateway latency reporting for the `ping` command.

use crate::core::audit::{Notification, NotificationColor};
use std::time::Duration;

/// Latencies below this are reported as healthy.
pub const HEALTHY_LATENCY_MS: u128 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyHealth {
    Healthy,
    Degraded,
}

impl LatencyHealth {
    pub fn from_millis(millis: u128) -> Self {
        if millis < HEALTHY_LATENCY_MS {
            LatencyHealth::Healthy
        } else {
            LatencyHealth::Degraded
        }
    }

    pub fn color(&self) -> NotificationColor {
        match self {
            LatencyHealth::Healthy => NotificationColor::Success,
            LatencyHealth::Degraded => NotificationColor::Warning,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LatencyHealth::Healthy => "🟢 Healthy",
            LatencyHealth::Degraded => "🟠 Degraded",
        }
    }
}

pub fn ping_notification(latency: Duration) -> Notification {
    let millis = latency.as_millis();
    let health = LatencyHealth::from_millis(millis);

    Notification::new("🏓 Pong!", health.color())
        .description(format!("Bot latency: `{}ms`", millis))
        .field("Status", health.label(), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_ping_is_healthy() {
        let card = ping_notification(Duration::from_millis(150));
        assert_eq!(card.color, NotificationColor::Success);
        assert_eq!(card.description.as_deref(), Some("Bot latency: `150ms`"));
        assert_eq!(card.field_value("Status"), Some("🟢 Healthy"));
    }

    #[test]
    fn test_slow_ping_is_degraded() {
        let card = ping_notification(Duration::from_millis(250));
        assert_eq!(card.color, NotificationColor::Warning);
        assert_eq!(card.field_value("Status"), Some("🟠 Degraded"));
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(LatencyHealth::from_millis(199), LatencyHealth::Healthy);
        assert_eq!(LatencyHealth::from_millis(200), LatencyHealth::Degraded);
    }
}
