use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::entities::{kv_entries, prelude::*};

/// String values stored under string keys in the `kv_entries` table.
pub struct KvRepository {
    db: DatabaseConnection,
}

impl KvRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = KvEntries::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(entry.map(|model| model.value))
    }

    /// Insert or overwrite the value stored under `key`
    pub async fn put(&self, key: &str, value: String) -> Result<()> {
        let entry = kv_entries::ActiveModel {
            key: ActiveValue::Set(key.to_string()),
            value: ActiveValue::Set(value),
            updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        KvEntries::insert(entry)
            .on_conflict(
                OnConflict::column(kv_entries::Column::Key)
                    .update_columns([kv_entries::Column::Value, kv_entries::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }
}
