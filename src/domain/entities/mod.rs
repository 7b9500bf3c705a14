//! # Domain Entities Module
//!
//! MongoDB 컬렉션과 1:1로 대응되는 문서 구조를 정의합니다.
//!
//! | 엔티티 | 컬렉션  | 고유 인덱스                                           |
//! |--------|---------|-------------------------------------------------------|
//! | `User` | `users` | `local.email`, `facebook.id`, `twitter.id`, `google.id` |

pub mod users;
