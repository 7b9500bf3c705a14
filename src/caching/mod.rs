//! 캐싱 계층 모듈
//!
//! Redis 기반 JSON 캐시를 제공합니다.
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("user:65f0c0ffee", &user, 600).await?;
//! let verifier: Option<String> = cache.take("oauth:pkce:abc").await?;
//! ```
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
