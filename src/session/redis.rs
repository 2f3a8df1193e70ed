use std::fmt;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use time::OffsetDateTime;
use tower_sessions::{
    session::{Id, Record},
    session_store::{self, SessionStore},
};

/// Session records stored as JSON strings at `session:<id>`, expiring with the
/// record's own expiry date.
#[derive(Clone)]
pub struct RedisSessionStore {
    redis: ConnectionManager,
}

impl fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSessionStore").finish_non_exhaustive()
    }
}

impl RedisSessionStore {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }

    fn key(id: &Id) -> String {
        format!("session:{}", id)
    }
}

fn backend(err: redis::RedisError) -> session_store::Error {
    session_store::Error::Backend(err.to_string())
}

fn encode(record: &Record) -> session_store::Result<String> {
    serde_json::to_string(record).map_err(|e| session_store::Error::Encode(e.to_string()))
}

/// Seconds until the record expires, at least one
fn ttl_seconds(record: &Record) -> u64 {
    let remaining = (record.expiry_date - OffsetDateTime::now_utc()).whole_seconds();
    remaining.max(1) as u64
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut conn = self.redis.clone();

        // SET NX fails on an id collision; draw a new id and retry
        loop {
            let created: Option<String> = redis::cmd("SET")
                .arg(Self::key(&record.id))
                .arg(encode(record)?)
                .arg("NX")
                .arg("EX")
                .arg(ttl_seconds(record))
                .query_async(&mut conn)
                .await
                .map_err(backend)?;

            if created.is_some() {
                return Ok(());
            }
            record.id = Id::default();
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let mut conn = self.redis.clone();

        let _: () = redis::cmd("SET")
            .arg(Self::key(&record.id))
            .arg(encode(record)?)
            .arg("EX")
            .arg(ttl_seconds(record))
            .query_async(&mut conn)
            .await
            .map_err(backend)?;

        Ok(())
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        let mut conn = self.redis.clone();
        let payload: Option<String> = conn.get(Self::key(id)).await.map_err(backend)?;

        payload
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|e| session_store::Error::Decode(e.to_string()))
            })
            .transpose()
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        let mut conn = self.redis.clone();
        let _: () = conn.del(Self::key(id)).await.map_err(backend)?;
        Ok(())
    }
}
