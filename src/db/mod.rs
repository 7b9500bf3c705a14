//! MongoDB 연결 관리
//!
//! 사용자 문서가 저장되는 데이터베이스 핸들을 제공합니다. 서버 기동 시 한 번
//! 연결해 `ServiceLocator`에 등록하면 `#[repository]` 매크로가 만든
//! 리포지토리들이 주입받아 사용합니다.
//!
//! ```bash
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="identity_auth_dev"
//! ```

use std::env;

use log::info;
use mongodb::{bson::doc, options::ClientOptions, Client};

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 환경 변수 기준으로 연결하고 `ping`으로 가용성을 확인합니다.
    pub async fn new() -> Result<Self, mongodb::error::Error> {
        let uri = env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let database_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "identity_auth_dev".to_string());

        Self::connect(&uri, database_name).await
    }

    pub async fn connect(uri: &str, database_name: String) -> Result<Self, mongodb::error::Error> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some("identity_auth".to_string());

        let client = Client::with_options(options)?;
        client
            .database(&database_name)
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self { client, database_name })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
