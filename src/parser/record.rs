//! Per-packet timing record.
//!
//! A packet passes three probes after it is sent: just before the tunnel,
//! just after the tunnel, and at final receipt. A probe that never saw the
//! packet leaves its timestamp absent.

use serde::{Deserialize, Serialize};

/// Timing checkpoint a packet passes between transmission and receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    PreTunnel,
    PostTunnel,
    Receive,
}

impl Stage {
    /// All stages in path order
    pub const ALL: [Stage; 3] = [Stage::PreTunnel, Stage::PostTunnel, Stage::Receive];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PreTunnel => "pre_tunnel",
            Self::PostTunnel => "post_tunnel",
            Self::Receive => "receive",
        }
    }
}

/// One row of a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PacketRecord {
    /// Position at which the packet was observed on the receive side
    pub receive_index: Option<u64>,
    pub send_timestamp: i64,
    pub pre_tunnel_timestamp: Option<i64>,
    pub post_tunnel_timestamp: Option<i64>,
    pub receive_timestamp: Option<i64>,
}

/// Latencies derived from one record. A value is present only when both of
/// its endpoints were observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Latencies {
    /// send -> pre-tunnel
    pub pre_tunnel: Option<i64>,
    /// pre-tunnel -> post-tunnel
    pub in_tunnel: Option<i64>,
    /// post-tunnel -> receive
    pub post_tunnel: Option<i64>,
    /// send -> receive
    pub total: Option<i64>,
}

impl PacketRecord {
    pub fn new(send_timestamp: i64) -> Self {
        Self {
            send_timestamp,
            ..Default::default()
        }
    }

    /// Timestamp recorded by the probe of `stage`
    pub fn timestamp(&self, stage: Stage) -> Option<i64> {
        match stage {
            Stage::PreTunnel => self.pre_tunnel_timestamp,
            Stage::PostTunnel => self.post_tunnel_timestamp,
            Stage::Receive => self.receive_timestamp,
        }
    }

    pub fn was_received(&self) -> bool {
        self.receive_index.is_some()
    }

    pub fn pre_tunnel_latency(&self) -> Option<i64> {
        latency(Some(self.send_timestamp), self.pre_tunnel_timestamp)
    }

    pub fn in_tunnel_latency(&self) -> Option<i64> {
        latency(self.pre_tunnel_timestamp, self.post_tunnel_timestamp)
    }

    pub fn post_tunnel_latency(&self) -> Option<i64> {
        latency(self.post_tunnel_timestamp, self.receive_timestamp)
    }

    pub fn total_latency(&self) -> Option<i64> {
        latency(Some(self.send_timestamp), self.receive_timestamp)
    }

    pub fn latencies(&self) -> Latencies {
        Latencies {
            pre_tunnel: self.pre_tunnel_latency(),
            in_tunnel: self.in_tunnel_latency(),
            post_tunnel: self.post_tunnel_latency(),
            total: self.total_latency(),
        }
    }
}

// Negative results are kept, they surface clock skew between probes
fn latency(from: Option<i64>, to: Option<i64>) -> Option<i64> {
    match (from, to) {
        (Some(from), Some(to)) => Some(to.saturating_sub(from)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latencies_need_both_endpoints() {
        let record = PacketRecord {
            receive_index: None,
            send_timestamp: 100,
            pre_tunnel_timestamp: Some(150),
            post_tunnel_timestamp: None,
            receive_timestamp: None,
        };

        let l = record.latencies();
        assert_eq!(l.pre_tunnel, Some(50));
        assert_eq!(l.in_tunnel, None);
        assert_eq!(l.post_tunnel, None);
        assert_eq!(l.total, None);
    }

    #[test]
    fn test_full_record_latencies() {
        let record = PacketRecord {
            receive_index: Some(1),
            send_timestamp: 1000,
            pre_tunnel_timestamp: Some(1010),
            post_tunnel_timestamp: Some(1035),
            receive_timestamp: Some(1040),
        };

        assert_eq!(
            record.latencies(),
            Latencies {
                pre_tunnel: Some(10),
                in_tunnel: Some(25),
                post_tunnel: Some(5),
                total: Some(40),
            }
        );
    }

    #[test]
    fn test_negative_latency_is_tolerated() {
        let record = PacketRecord {
            pre_tunnel_timestamp: Some(90),
            ..PacketRecord::new(100)
        };
        assert_eq!(record.pre_tunnel_latency(), Some(-10));
    }

    #[test]
    fn test_total_skips_missing_middle_stages() {
        let record = PacketRecord {
            receive_index: Some(4),
            receive_timestamp: Some(130),
            ..PacketRecord::new(100)
        };
        assert_eq!(record.in_tunnel_latency(), None);
        assert_eq!(record.total_latency(), Some(30));
    }

    #[test]
    fn test_timestamp_by_stage() {
        let record = PacketRecord {
            pre_tunnel_timestamp: Some(1),
            post_tunnel_timestamp: Some(2),
            receive_timestamp: None,
            ..PacketRecord::new(0)
        };
        assert_eq!(record.timestamp(Stage::PreTunnel), Some(1));
        assert_eq!(record.timestamp(Stage::PostTunnel), Some(2));
        assert_eq!(record.timestamp(Stage::Receive), None);
    }
}
