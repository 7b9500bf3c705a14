//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 경계의 요청/응답 본문을 정의합니다. 엔티티를 그대로 내보내지 않고
//! 응답 DTO로 변환해 비밀번호 해시와 프로바이더 토큰이 노출되지 않게 합니다.
//!
//! | 역할             | 타입                                  |
//! |------------------|---------------------------------------|
//! | 요청 본문 검증   | `validator::Validate` derive          |
//! | 응답 직렬화      | `serde::Serialize` derive             |
//! | 에러 응답        | `AppError` → `ResponseError`          |

pub mod users;
