// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the catalog and conversation-log traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use shopwise_config::model::StorageConfig;
use shopwise_core::types::{
    Conversation, ConversationMessage, NewMessage, Product, ProductQuery,
};
use shopwise_core::{
    AdapterType, ConversationLog, HealthStatus, PluginAdapter, ProductStore, ShopwiseError,
};

use crate::database::Database;
use crate::import::{self, CatalogImport, ImportSummary};
use crate::queries;

/// SQLite-backed product store and conversation log.
///
/// The database is opened by [`SqliteStorage::initialize`]; every other
/// operation fails with a storage error until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Unopened store; call [`SqliteStorage::initialize`] before use.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database and apply migrations.
    pub async fn initialize(&self) -> Result<(), ShopwiseError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| ShopwiseError::Storage {
            source: "catalog database opened twice".into(),
        })?;
        debug!(path = %self.config.database_path, "catalog database ready");
        Ok(())
    }

    /// Checkpoint the WAL. The connection itself closes on drop.
    pub async fn close(&self) -> Result<(), ShopwiseError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("catalog database checkpointed");
        }
        Ok(())
    }

    /// Upsert a catalog document.
    pub async fn import_catalog(
        &self,
        catalog: CatalogImport,
    ) -> Result<ImportSummary, ShopwiseError> {
        import::import_catalog(self.db()?, catalog).await
    }

    fn db(&self) -> Result<&Database, ShopwiseError> {
        self.db.get().ok_or_else(|| ShopwiseError::Storage {
            source: "catalog database used before initialize()".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Catalog
    }

    async fn health_check(&self) -> Result<HealthStatus, ShopwiseError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ProductStore for SqliteStorage {
    async fn find_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ShopwiseError> {
        queries::products::find_products(self.db()?, query).await
    }
}

#[async_trait]
impl ConversationLog for SqliteStorage {
    async fn find_or_create_conversation(
        &self,
        chatbot_id: &str,
        session_id: &str,
        workspace_id: &str,
    ) -> Result<Conversation, ShopwiseError> {
        queries::conversations::find_or_create(self.db()?, chatbot_id, session_id, workspace_id)
            .await
    }

    async fn find_conversation(
        &self,
        chatbot_id: &str,
        session_id: &str,
        workspace_id: &str,
    ) -> Result<Option<Conversation>, ShopwiseError> {
        queries::conversations::find(self.db()?, chatbot_id, session_id, workspace_id).await
    }

    async fn append_message(
        &self,
        conversation_id: &str,
        message: NewMessage,
    ) -> Result<ConversationMessage, ShopwiseError> {
        queries::conversations::append_message(self.db()?, conversation_id, message).await
    }

    async fn list_messages(
        &self,
        conversation_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ConversationMessage>, ShopwiseError> {
        queries::conversations::list_messages(self.db()?, conversation_id, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let storage = SqliteStorage::new(StorageConfig::default());
        let err = storage.health_check().await.unwrap_err();
        assert!(err.to_string().contains("before initialize"));
    }

    #[tokio::test]
    async fn initialize_twice_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::new(StorageConfig {
            database_path: dir.path().join("shop.db").to_string_lossy().into_owned(),
            wal_mode: true,
        });
        storage.initialize().await.unwrap();
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
        assert!(storage.initialize().await.is_err());
        storage.close().await.unwrap();
    }
}
