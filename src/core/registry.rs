//! # 의존성 주입 레지스트리
//!
//! 타입 기반 싱글톤 컨테이너입니다.
//!
//! - `#[repository(name = "user", collection = "users")]`, `#[service(name = "token")]`
//!   매크로가 `inventory`로 생성자를 제출하면 [`ServiceLocator::get`]이 첫 요청 시
//!   인스턴스를 만들고 이후에는 캐시된 `Arc`를 돌려줍니다.
//! - 데이터 스토어(`Database`, `RedisClient`)와 트레이트 객체 기반 컴포넌트는
//!   [`ServiceLocator::set`]으로 직접 등록합니다.
//!
//! ## 조회 규칙
//!
//! 타입 이름에서 접미사를 떼고 소문자로 바꾼 이름으로 등록 정보를 찾습니다.
//!
//! | 타입               | 조회 키  |
//! |--------------------|----------|
//! | `UserRepository`   | `user`   |
//! | `TokenService`     | `token`  |
//! | `OAuthService`     | `oauth`  |
//!
//! 등록되지 않은 타입을 `get`하면 패닉합니다. 모든 등록은 서버 기동 단계에서
//! 끝나므로 요청 처리 중에는 발생하지 않습니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use once_cell::sync::Lazy;

#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;
    fn collection_name(&self) -> &str;
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]` 매크로가 제출하는 생성자 정보
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]` 매크로가 제출하는 생성자 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

type Constructor = fn() -> Box<dyn Any + Send + Sync>;

static SERVICE_CONSTRUCTORS: Lazy<HashMap<String, (&'static str, Constructor)>> = Lazy::new(|| {
    let table: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|r| (lookup_key(r.name), (r.name, r.constructor)))
        .collect();
    log::debug!("📚 Service 생성자 {}개 색인", table.len());
    table
});

static REPOSITORY_CONSTRUCTORS: Lazy<HashMap<String, (&'static str, Constructor)>> = Lazy::new(|| {
    let table: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|r| (lookup_key(r.name), (r.name, r.constructor)))
        .collect();
    log::debug!("📚 Repository 생성자 {}개 색인", table.len());
    table
});

/// 등록 이름(`token_service`, `user_repository`, `user`)을 조회 키로 정규화
fn lookup_key(registration_name: &str) -> String {
    registration_name
        .strip_suffix("_service")
        .or_else(|| registration_name.strip_suffix("_repository"))
        .unwrap_or(registration_name)
        .replace('_', "")
        .to_lowercase()
}

/// `crate::services::auth::TokenService` → `TokenService`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(|| ServiceLocator {
    instances: RwLock::new(HashMap::new()),
    initializing: RwLock::new(HashSet::new()),
});

impl ServiceLocator {
    /// 타입 `T`의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// # Panics
    ///
    /// 등록되지 않았거나 순환 의존성이 있는 경우
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>() {
            return instance;
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner());
            if !initializing.insert(type_id) {
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        // 생성자는 내부에서 다시 get을 호출하므로 락을 잡지 않은 상태로 실행
        let created = Self::construct::<T>(short_type_name(type_name));

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&type_id);

        let instance = match created {
            Ok(instance) => instance,
            Err(reason) => panic!("{}: {}", type_name, reason),
        };

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        let entry = instances
            .entry(type_id)
            .or_insert_with(|| instance as Arc<dyn Any + Send + Sync>)
            .clone();
        match entry.downcast::<T>() {
            Ok(instance) => instance,
            Err(_) => panic!("Type mismatch in ServiceLocator for {}", type_name),
        }
    }

    fn cached<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
        instances
            .get(&TypeId::of::<T>())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    fn construct<T: 'static + Send + Sync>(clean_name: &str) -> Result<Arc<T>, String> {
        let (table, suffix) = if let Some(entity) = clean_name.strip_suffix("Repository") {
            (&*REPOSITORY_CONSTRUCTORS, entity)
        } else if let Some(entity) = clean_name.strip_suffix("Service") {
            (&*SERVICE_CONSTRUCTORS, entity)
        } else {
            return Err(format!(
                "not registered. Use #[service]/#[repository] or ServiceLocator::set() ({})",
                clean_name
            ));
        };

        let key = suffix.to_lowercase();
        let (registration_name, constructor) = table
            .get(&key)
            .ok_or_else(|| format!("no registration found for '{}'", key))?;

        (constructor)()
            .downcast::<Arc<T>>()
            .map(|boxed| *boxed)
            .map_err(|_| format!("registration '{}' produced a different type", registration_name))
    }

    /// 미리 생성한 인스턴스를 등록합니다. 같은 타입이 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        log::info!("📦 Registering: {}", short_type_name(type_name));

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 제출된 모든 리포지토리와 서비스 생성자를 실행해 싱글톤을 미리 만듭니다.
    ///
    /// `Database`, `RedisClient`가 먼저 [`set`](Self::set) 되어 있어야 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        log::info!("🔄 Initializing service registry");

        let mut repositories = 0;
        for registration in inventory::iter::<RepositoryRegistration>() {
            let _ = (registration.constructor)();
            log::debug!("  ✓ repository {}", registration.name);
            repositories += 1;
        }

        let mut services = 0;
        for registration in inventory::iter::<ServiceRegistration>() {
            let _ = (registration.constructor)();
            log::debug!("  ✓ service {}", registration.name);
            services += 1;
        }

        log::info!(
            "✅ Registry ready: {} repositories, {} services",
            repositories, services
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SessionSettings {
        ttl_minutes: i64,
    }

    #[test]
    fn test_lookup_key_normalization() {
        assert_eq!(lookup_key("token"), "token");
        assert_eq!(lookup_key("token_service"), "token");
        assert_eq!(lookup_key("user_repository"), "user");
        assert_eq!(lookup_key("OAuth"), "oauth");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("crate::services::auth::TokenService"), "TokenService");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn test_set_then_get_returns_same_instance() {
        let settings = Arc::new(SessionSettings { ttl_minutes: 10 });
        ServiceLocator::set(settings.clone());

        let fetched = ServiceLocator::get::<SessionSettings>();
        assert!(Arc::ptr_eq(&settings, &fetched));
        assert_eq!(fetched.ttl_minutes, 10);
    }
}
