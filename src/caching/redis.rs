//! # Redis 캐시 클라이언트
//!
//! 값은 `serde_json`으로 직렬화한 문자열로 저장됩니다.
//! 현재 사용처는 Twitter PKCE verifier 일회성 보관 (`oauth:pkce:{state}`)입니다.
//!
//! 모든 호출은 멀티플렉싱 연결을 사용합니다.

use std::env;

use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, ErrorKind, RedisError};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

fn encode<T: Serialize>(value: &T) -> Result<String, RedisError> {
    serde_json::to_string(value)
        .map_err(|e| RedisError::from((ErrorKind::TypeError, "Serialization failed", e.to_string())))
}

fn decode<T: DeserializeOwned>(json: Option<String>) -> Result<Option<T>, RedisError> {
    json.map(|json| {
        serde_json::from_str(&json)
            .map_err(|e| RedisError::from((ErrorKind::TypeError, "Deserialization failed", e.to_string())))
    })
    .transpose()
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 `PING`으로 가용성을 확인합니다.
    pub async fn new() -> Result<Self, RedisError> {
        let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let client = Client::open(redis_url)?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    /// 값을 읽으면서 삭제합니다 (`GETDEL`). 일회성 값에 사용합니다.
    pub async fn take<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RedisError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get_del(key).await?;
        decode(value)
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), RedisError> {
        let mut conn = self.connection().await?;
        conn.set_ex(key, encode(value)?, seconds as u64).await
    }
}
