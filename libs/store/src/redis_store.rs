//! Redis-backed store
//!
//! Uses one multiplexed connection per process; handles clone it per call, so
//! the HTTP handlers and the background tickers share a single socket.

use std::num::NonZeroUsize;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisError};
use tracing::{debug, info};
use types::errors::StoreError;

use crate::QueueStore;

/// Store client over a Redis server.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
}

/// Accept both bare `host:port` and full `redis://` URLs.
fn connection_url(addr: &str) -> String {
    if addr.starts_with("redis://") || addr.starts_with("rediss://") {
        addr.to_string()
    } else {
        format!("redis://{addr}/0")
    }
}

fn command_error(command: &'static str, key: &str, err: RedisError) -> StoreError {
    if err.code() == Some("WRONGTYPE") {
        StoreError::WrongType {
            key: key.to_string(),
        }
    } else {
        StoreError::command(command, key, err)
    }
}

impl RedisStore {
    /// Open a connection to `addr` and verify it with `PING`.
    pub async fn connect(addr: &str) -> Result<Self, StoreError> {
        let connection_error = |err: RedisError| StoreError::Connection {
            addr: addr.to_string(),
            reason: err.to_string(),
        };

        info!(addr, "Connecting to Redis");
        let client = redis::Client::open(connection_url(addr)).map_err(connection_error)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(connection_error)?;

        let store = Self { conn };
        store.ping().await.map_err(|err| StoreError::Connection {
            addr: addr.to_string(),
            reason: err.to_string(),
        })?;

        info!(addr, "Connected to Redis");
        Ok(store)
    }
}

#[async_trait]
impl QueueStore for RedisStore {
    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::command("PING", "", e))?;
        debug!(reply = %pong, "PING");
        Ok(())
    }

    async fn push_head(&self, key: &str, value: &str) -> Result<usize, StoreError> {
        let mut conn = self.conn.clone();
        conn.lpush::<_, _, usize>(key, value)
            .await
            .map_err(|e| command_error("LPUSH", key, e))
    }

    async fn pop_head(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.lpop::<_, Option<String>>(key, None::<NonZeroUsize>)
            .await
            .map_err(|e| command_error("LPOP", key, e))
    }

    async fn pop_tail(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.rpop::<_, Option<String>>(key, None::<NonZeroUsize>)
            .await
            .map_err(|e| command_error("RPOP", key, e))
    }

    async fn len(&self, key: &str) -> Result<usize, StoreError> {
        let mut conn = self.conn.clone();
        conn.llen::<_, usize>(key)
            .await
            .map_err(|e| command_error("LLEN", key, e))
    }

    async fn trim(&self, key: &str, start: isize, stop: isize) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.ltrim::<_, ()>(key, start, stop)
            .await
            .map_err(|e| command_error("LTRIM", key, e))
    }
}
