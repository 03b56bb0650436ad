//! Redis-backed redirect cache.

use super::service::RedirectCache;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

const KEY_PREFIX: &str = "link:";

/// Redis cache for redirect lookups.
///
/// Entries expire after the configured TTL; since mappings are immutable the
/// TTL only bounds memory, not staleness. Connection reuse goes through
/// `ConnectionManager`, which reconnects transparently.
pub struct RedisCache {
    connection: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection cannot be
    /// established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> anyhow::Result<Self> {
        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        conn.ping::<()>().await?;

        info!("Connected to Redis");

        Ok(Self {
            connection: manager,
            ttl_seconds,
        })
    }

    fn key(code: &str) -> String {
        format!("{KEY_PREFIX}{code}")
    }
}

#[async_trait]
impl RedirectCache for RedisCache {
    async fn get(&self, code: &str) -> Option<String> {
        let mut conn = self.connection.clone();

        match conn.get::<_, Option<String>>(Self::key(code)).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(code, error = %e, "redis GET failed");
                None
            }
        }
    }

    async fn set(&self, code: &str, destination_url: &str) {
        let mut conn = self.connection.clone();

        if let Err(e) = conn
            .set_ex::<_, _, ()>(Self::key(code), destination_url, self.ttl_seconds)
            .await
        {
            warn!(code, error = %e, "redis SET failed");
        }
    }

    async fn invalidate(&self, code: &str) {
        let mut conn = self.connection.clone();

        match conn.del::<_, i64>(Self::key(code)).await {
            Ok(deleted) if deleted > 0 => debug!(code, "cache entry invalidated"),
            Ok(_) => {}
            Err(e) => warn!(code, error = %e, "redis DEL failed"),
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.connection.clone();
        conn.ping::<()>().await.is_ok()
    }
}
