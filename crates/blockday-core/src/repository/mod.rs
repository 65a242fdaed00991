use crate::category::CategoryPalette;
use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{Block, CustomCategory, NewBlockData, Priority, UpdateBlockData};
use crate::settings::CalendarSettings;
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod blocks;
pub mod categories;
pub mod settings;

/// Domain-specific trait for block operations
#[async_trait]
pub trait BlockRepository {
    async fn add_block(&self, data: NewBlockData) -> Result<Block, CoreError>;
    async fn find_block_by_id(&self, id: &str) -> Result<Option<Block>, CoreError>;
    async fn find_blocks_by_id_prefix(&self, prefix: &str) -> Result<Vec<Block>, CoreError>;
    async fn find_blocks(&self) -> Result<Vec<Block>, CoreError>;
    /// Blocks that may occur somewhere in `[start, end]`. This is a coarse
    /// pre-filter; callers still decide per day with `recurrence::occurs_on`.
    async fn find_blocks_active_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Block>, CoreError>;
    async fn update_block(&self, id: &str, data: UpdateBlockData) -> Result<Block, CoreError>;
    async fn delete_block(&self, id: &str) -> Result<(), CoreError>;
    async fn add_block_task(&self, block_id: &str, title: String, priority: Option<Priority>) -> Result<Block, CoreError>;
    async fn set_block_task_completed(&self, block_id: &str, task_id: &str, completed: bool) -> Result<Block, CoreError>;
    async fn remove_block_task(&self, block_id: &str, task_id: &str) -> Result<Block, CoreError>;
    /// Inserts or replaces whole blocks, keeping their ids. Returns the count written.
    async fn import_blocks(&self, blocks: Vec<Block>) -> Result<usize, CoreError>;
}

/// Domain-specific trait for custom category operations
#[async_trait]
pub trait CategoryRepository {
    async fn add_category(&self, name: &str, color: &str) -> Result<CustomCategory, CoreError>;
    async fn find_categories(&self) -> Result<Vec<CustomCategory>, CoreError>;
    async fn delete_category(&self, name: &str) -> Result<(), CoreError>;
    async fn palette(&self) -> Result<CategoryPalette, CoreError>;
}

/// Typed load/save contract for user settings
#[async_trait]
pub trait SettingsRepository {
    /// Stored settings merged over defaults. Unreadable or invalid documents
    /// are logged and replaced by defaults.
    async fn load_settings(&self) -> Result<CalendarSettings, CoreError>;
    async fn save_settings(&self, settings: &CalendarSettings) -> Result<(), CoreError>;
    async fn reset_settings(&self) -> Result<CalendarSettings, CoreError>;
}

/// Main repository trait that composes all domain traits
#[async_trait]
pub trait Repository: BlockRepository + CategoryRepository + SettingsRepository + Send + Sync {}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}
