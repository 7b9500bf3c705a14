//! 데이터 액세스 계층
//!
//! `#[repository]` 매크로로 관리되는 MongoDB 리포지토리와, 같은 트레이트를 구현하는
//! 인메모리 저장소를 제공합니다.

pub mod users;
