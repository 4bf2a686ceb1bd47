//! Connectivity probe.
//!
//! A short TCP connect to a well-known public address decides whether the
//! remote AI source is worth attempting. Readings are cached briefly; a
//! stale "online" for up to the cache window is an accepted tradeoff.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Reachability check gating remote-dependent sources.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Whether the network currently looks reachable.
    async fn is_online(&self) -> bool;
}

/// Shared reference to a probe.
pub type SharedProbe = Arc<dyn Probe>;

// ─────────────────────────────────────────────────────────────────────────────
// TCP Probe
// ─────────────────────────────────────────────────────────────────────────────

/// TCP connect probe with a cached reading.
pub struct TcpProbe {
    addr: SocketAddr,
    timeout: Duration,
    cache_window: Duration,
    last: Mutex<Option<(Instant, bool)>>,
}

impl TcpProbe {
    /// Create a probe against `addr`.
    pub fn new(addr: SocketAddr, timeout: Duration, cache_window: Duration) -> Self {
        Self {
            addr,
            timeout,
            cache_window,
            last: Mutex::new(None),
        }
    }

    /// The reference target: `8.8.8.8:53`, 3 s timeout, 60 s cache.
    pub fn default_target() -> Self {
        Self::new(
            SocketAddr::from(([8, 8, 8, 8], 53)),
            Duration::from_secs(3),
            Duration::from_secs(60),
        )
    }

    async fn probe_once(&self) -> bool {
        let connect = tokio::net::TcpStream::connect(self.addr);
        matches!(
            tokio::time::timeout(self.timeout, connect).await,
            Ok(Ok(_))
        )
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn is_online(&self) -> bool {
        let cached = *self.last.lock();
        if let Some((at, reading)) = cached
            && at.elapsed() < self.cache_window
        {
            return reading;
        }

        let reading = self.probe_once().await;
        debug!(addr = %self.addr, online = reading, "connectivity probe");
        *self.last.lock() = Some((Instant::now(), reading));
        reading
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixed Probe
// ─────────────────────────────────────────────────────────────────────────────

/// Probe with a fixed reading, for tests and forced-offline operation.
pub struct FixedProbe(pub bool);

#[async_trait]
impl Probe for FixedProbe {
    async fn is_online(&self) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_probe() {
        assert!(FixedProbe(true).is_online().await);
        assert!(!FixedProbe(false).is_online().await);
    }

    #[tokio::test]
    async fn test_unreachable_target_is_offline() {
        // Port 1 on loopback refuses immediately
        let probe = TcpProbe::new(
            SocketAddr::from(([127, 0, 0, 1], 1)),
            Duration::from_millis(200),
            Duration::from_secs(60),
        );
        assert!(!probe.is_online().await);
    }

    #[tokio::test]
    async fn test_reading_is_cached() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let probe = TcpProbe::new(addr, Duration::from_millis(500), Duration::from_secs(60));
        assert!(probe.is_online().await);

        // Target goes away; the cached reading holds within the window
        drop(listener);
        assert!(probe.is_online().await);
    }

    #[tokio::test]
    async fn test_cache_window_expiry() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Zero-width window forces a fresh probe every call
        let probe = TcpProbe::new(addr, Duration::from_millis(500), Duration::ZERO);
        assert!(probe.is_online().await);

        drop(listener);
        assert!(!probe.is_online().await);
    }
}
