//! 사용자 저장소 모듈
//!
//! - [`user_store::UserStore`] - 신원 확인 로직이 의존하는 저장소 트레이트
//! - [`user_repo::UserRepository`] - MongoDB + Redis 구현 (`#[repository]` 싱글톤)
//! - [`memory_store::MemoryUserStore`] - 인메모리 구현
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::users::{UserRepository, UserStore};
//!
//! let store: Arc<dyn UserStore> = UserRepository::instance();
//! let user = store.find_by_local_email("user@example.com").await?;
//! ```

pub mod user_store;
pub mod user_repo;
pub mod memory_store;

pub use user_store::UserStore;
pub use user_repo::UserRepository;
pub use memory_store::MemoryUserStore;
