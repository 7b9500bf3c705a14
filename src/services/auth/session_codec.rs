//! 세션 식별자 코덱
//!
//! 세션에는 사용자 전체가 아니라 사용자 id(ObjectId hex)만 담습니다.
//! 요청마다 id로 저장소를 다시 조회해 사용자를 복원합니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::domain::entities::users::user::User;
use crate::errors::AppError;
use crate::repositories::users::user_store::UserStore;

pub struct SessionCodec {
    store: Arc<dyn UserStore>,
}

impl SessionCodec {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn serialize(&self, user: &User) -> String {
        user.id_string()
    }

    /// 세션 식별자로 사용자를 복원합니다.
    ///
    /// 형식이 잘못됐거나 삭제된 사용자의 id는 `Ok(None)`입니다.
    /// 저장소 장애만 `Err`로 돌려줍니다.
    pub async fn deserialize(&self, session_id: &str) -> Result<Option<User>, AppError> {
        let Ok(id) = ObjectId::parse_str(session_id) else {
            log::debug!("잘못된 세션 식별자: {}", session_id);
            return Ok(None);
        };

        self.store.find_by_id(&id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::LocalCredential;
    use crate::repositories::users::memory_store::MemoryUserStore;

    fn codec_with_user() -> (SessionCodec, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::new());
        (SessionCodec::new(store.clone()), store)
    }

    #[actix_web::test]
    async fn test_round_trip_restores_same_user() {
        let (codec, store) = codec_with_user();
        let user = store
            .insert(User::new_local(LocalCredential {
                email: "henry@example.com".into(),
                password_hash: "hash".into(),
            }))
            .await
            .unwrap();

        let session_id = codec.serialize(&user);
        assert_eq!(session_id, user.id.to_hex());

        let restored = codec.deserialize(&session_id).await.unwrap().unwrap();
        assert_eq!(restored.id, user.id);
        assert_eq!(restored.local_email(), Some("henry@example.com"));
    }

    #[actix_web::test]
    async fn test_deleted_user_is_none_on_next_request() {
        let (codec, store) = codec_with_user();
        let user = store
            .insert(User::new_local(LocalCredential {
                email: "ivy@example.com".into(),
                password_hash: "hash".into(),
            }))
            .await
            .unwrap();
        let session_id = codec.serialize(&user);
        assert!(codec.deserialize(&session_id).await.unwrap().is_some());

        assert!(store.remove(&user.id));

        assert!(codec.deserialize(&session_id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_unknown_id_is_none() {
        let (codec, _) = codec_with_user();
        let result = codec.deserialize(&ObjectId::new().to_hex()).await.unwrap();
        assert!(result.is_none());
    }

    #[actix_web::test]
    async fn test_malformed_id_is_none() {
        let (codec, _) = codec_with_user();
        assert!(codec.deserialize("not-an-object-id").await.unwrap().is_none());
        assert!(codec.deserialize("").await.unwrap().is_none());
    }
}
