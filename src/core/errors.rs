//! `core` 경로에서도 동일한 에러 타입을 쓸 수 있도록 재export 합니다.

pub use crate::errors::errors::{AppError, AppResult, ErrorContext};
