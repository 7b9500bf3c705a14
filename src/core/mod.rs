//! # Core Framework Module
//!
//! 싱글톤 의존성 주입 컨테이너([`registry`])와 공용 에러 타입 재export를 제공합니다.
//!
//! `#[service]`, `#[repository]` 매크로가 생성하는 코드는 이 모듈의
//! [`ServiceLocator`](registry::ServiceLocator)와 등록 타입들을 사용합니다.
//! 매크로로 만들 수 없는 컴포넌트(트레이트 객체를 받는 `IdentityResolver`,
//! `SessionCodec` 등)는 `main`에서 직접 생성해 [`ServiceLocator::set`](registry::ServiceLocator::set)
//! 으로 등록합니다.

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
