//! # Domain Models Module
//!
//! 영속성이 없는 도메인 모델과 값 객체를 정의합니다.
//!
//! ```text
//! models/
//! ├── auth/    ← 신원 확인 결과(Resolution), 세션 사용자
//! ├── oauth/   ← 프로바이더 표, 프로필 정규화
//! └── token/   ← 세션 JWT 클레임
//! ```
//!
//! 엔티티(`../entities/`)와 달리 이 모듈의 타입은 MongoDB에 직접 저장되지 않습니다.

pub mod auth;
pub mod oauth;
pub mod token;
