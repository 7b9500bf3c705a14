//! # Domain Layer
//!
//! ```text
//! domain/
//! ├── entities/   ← MongoDB 문서 (User)
//! ├── models/     ← 값 객체 (Resolution, FederatedProfile, SessionClaims)
//! └── dto/        ← HTTP 요청/응답 본문
//! ```

pub mod entities;
pub mod dto;
pub mod models;
