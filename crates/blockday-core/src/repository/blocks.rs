use crate::category::{normalize_color, normalize_name};
use crate::error::CoreError;
use crate::models::{Block, BlockTask, NewBlockData, Priority, Recurrence, UpdateBlockData};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;
use sqlx::{FromRow, Sqlite};
use uuid::Uuid;

/// Row shape of the `blocks` table. Recurrence rule and checklist are JSON.
#[derive(Debug, Clone, FromRow)]
struct BlockRow {
    id: String,
    title: String,
    description: Option<String>,
    date: NaiveDate,
    start_time: String,
    end_time: String,
    category: String,
    color: Option<String>,
    priority: Option<Priority>,
    has_quiz: bool,
    recurring: Option<String>,
    tasks: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BlockRow {
    fn from_block(block: &Block) -> Result<Self, CoreError> {
        Ok(Self {
            id: block.id.clone(),
            title: block.title.clone(),
            description: block.description.clone(),
            date: block.date,
            start_time: block.start_time.to_string(),
            end_time: block.end_time.to_string(),
            category: block.category.clone(),
            color: block.color.clone(),
            priority: block.priority,
            has_quiz: block.has_quiz,
            recurring: block.recurring.as_ref().map(serde_json::to_string).transpose()?,
            tasks: serde_json::to_string(&block.tasks)?,
            created_at: block.created_at,
            updated_at: block.updated_at,
        })
    }

    /// Binds all columns in table order; `id` is always `$1`.
    fn bind<'q>(
        self,
        query: QueryAs<'q, Sqlite, BlockRow, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, BlockRow, SqliteArguments<'q>> {
        query
            .bind(self.id)
            .bind(self.title)
            .bind(self.description)
            .bind(self.date)
            .bind(self.start_time)
            .bind(self.end_time)
            .bind(self.category)
            .bind(self.color)
            .bind(self.priority)
            .bind(self.has_quiz)
            .bind(self.recurring)
            .bind(self.tasks)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl TryFrom<BlockRow> for Block {
    type Error = CoreError;

    fn try_from(row: BlockRow) -> Result<Self, Self::Error> {
        let start_time = row.start_time.parse().map_err(|e| {
            CoreError::InvalidInput(format!("Stored block {} has a bad start time: {}", row.id, e))
        })?;
        let end_time = row.end_time.parse().map_err(|e| {
            CoreError::InvalidInput(format!("Stored block {} has a bad end time: {}", row.id, e))
        })?;

        let recurring = match row.recurring.as_deref() {
            None => None,
            Some(json) => match serde_json::from_str::<Recurrence>(json) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    tracing::warn!(block = %row.id, error = %e, "ignoring unreadable recurrence rule");
                    None
                }
            },
        };

        let tasks = serde_json::from_str::<Vec<BlockTask>>(&row.tasks).unwrap_or_else(|e| {
            tracing::warn!(block = %row.id, error = %e, "ignoring unreadable task list");
            Vec::new()
        });

        Ok(Block {
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.date,
            start_time,
            end_time,
            category: row.category,
            color: row.color,
            priority: row.priority,
            has_quiz: row.has_quiz,
            recurring,
            tasks,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn rows_to_blocks(rows: Vec<BlockRow>) -> Result<Vec<Block>, CoreError> {
    rows.into_iter().map(Block::try_from).collect()
}

/// Input checks applied to every block before it is written.
fn validate_block(block: &mut Block) -> Result<(), CoreError> {
    block.title = block.title.trim().to_string();
    if block.title.is_empty() {
        return Err(CoreError::InvalidInput("Block title cannot be empty".to_string()));
    }
    block.category = normalize_name(&block.category)?;
    if let Some(color) = &block.color {
        block.color = Some(normalize_color(color)?);
    }
    if let Some(rule) = &block.recurring {
        if let Some(end) = rule.end_date {
            if end < block.date {
                return Err(CoreError::InvalidInput(format!(
                    "Recurrence end date {} is before the block's date {}",
                    end, block.date
                )));
            }
        }
        if let Some(days) = &rule.days_of_week {
            if let Some(bad) = days.iter().find(|d| **d > 6) {
                return Err(CoreError::InvalidInput(format!(
                    "Weekday {} is out of range (0 = Sunday … 6 = Saturday)",
                    bad
                )));
            }
        }
    }
    if block.duration_minutes() <= 0 {
        // Accepted as-is; the grid renders such blocks as nothing.
        tracing::warn!(
            block = %block.id,
            start = %block.start_time,
            end = %block.end_time,
            "block ends at or before its start"
        );
    }
    Ok(())
}

fn new_task(title: String, priority: Option<Priority>) -> Result<BlockTask, CoreError> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(CoreError::InvalidInput("Task title cannot be empty".to_string()));
    }
    Ok(BlockTask {
        id: Uuid::new_v4().to_string(),
        title,
        completed: false,
        priority,
    })
}

impl SqliteRepository {
    async fn insert_block(&self, block: Block) -> Result<Block, CoreError> {
        let row = BlockRow::from_block(&block)?;
        let query = sqlx::query_as(
            r#"INSERT INTO blocks (id, title, description, date, start_time, end_time, category, color, priority, has_quiz, recurring, tasks, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        );
        let stored: BlockRow = row.bind(query).fetch_one(self.pool()).await?;
        Block::try_from(stored)
    }

    async fn write_block(&self, block: Block) -> Result<Block, CoreError> {
        let row = BlockRow::from_block(&block)?;
        let query = sqlx::query_as(
            r#"UPDATE blocks
            SET title = $2, description = $3, date = $4, start_time = $5, end_time = $6,
                category = $7, color = $8, priority = $9, has_quiz = $10, recurring = $11,
                tasks = $12, created_at = $13, updated_at = $14
            WHERE id = $1
            RETURNING *
            "#,
        );
        let stored: Option<BlockRow> = row.bind(query).fetch_optional(self.pool()).await?;
        let stored = stored.ok_or_else(|| CoreError::NotFound(format!("Block '{}' not found", block.id)))?;
        Block::try_from(stored)
    }

    async fn require_block(&self, id: &str) -> Result<Block, CoreError> {
        self.find_block_by_id_inner(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Block '{}' not found", id)))
    }

    async fn find_block_by_id_inner(&self, id: &str) -> Result<Option<Block>, CoreError> {
        let row: Option<BlockRow> = sqlx::query_as("SELECT * FROM blocks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.map(Block::try_from).transpose()
    }
}

#[async_trait]
impl super::BlockRepository for SqliteRepository {
    async fn add_block(&self, data: NewBlockData) -> Result<Block, CoreError> {
        let id = match data.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            Some(_) => return Err(CoreError::InvalidInput("Block id cannot be empty".to_string())),
            None => Uuid::new_v4().to_string(),
        };
        if self.find_block_by_id_inner(&id).await?.is_some() {
            return Err(CoreError::InvalidInput(format!("A block with id '{}' already exists", id)));
        }

        let tasks = data
            .tasks
            .into_iter()
            .map(|title| new_task(title, None))
            .collect::<Result<Vec<_>, _>>()?;

        let now = Utc::now();
        let mut block = Block {
            id,
            title: data.title,
            description: data.description,
            date: data.date,
            start_time: data.start_time,
            end_time: data.end_time,
            category: data.category,
            color: data.color,
            priority: data.priority,
            has_quiz: data.has_quiz,
            recurring: data.recurring,
            tasks,
            created_at: now,
            updated_at: now,
        };
        validate_block(&mut block)?;

        let block = self.insert_block(block).await?;
        tracing::debug!(block = %block.id, date = %block.date, "added block");
        Ok(block)
    }

    async fn find_block_by_id(&self, id: &str) -> Result<Option<Block>, CoreError> {
        self.find_block_by_id_inner(id).await
    }

    async fn find_blocks_by_id_prefix(&self, prefix: &str) -> Result<Vec<Block>, CoreError> {
        // Imported ids are arbitrary strings, so `%` and `_` must match literally.
        let mut pattern = String::with_capacity(prefix.len() * 2 + 1);
        for c in prefix.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');

        let rows: Vec<BlockRow> = sqlx::query_as(r"SELECT * FROM blocks WHERE id LIKE ? ESCAPE '\'")
            .bind(pattern)
            .fetch_all(self.pool())
            .await?;
        rows_to_blocks(rows)
    }

    async fn find_blocks(&self) -> Result<Vec<Block>, CoreError> {
        let rows: Vec<BlockRow> = sqlx::query_as("SELECT * FROM blocks ORDER BY created_at, id")
            .fetch_all(self.pool())
            .await?;
        rows_to_blocks(rows)
    }

    async fn find_blocks_active_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Block>, CoreError> {
        let rows: Vec<BlockRow> = sqlx::query_as(
            r#"SELECT * FROM blocks
            WHERE (recurring IS NULL AND date BETWEEN $1 AND $2)
               OR (recurring IS NOT NULL AND date <= $2
                   AND CASE WHEN json_valid(recurring)
                            THEN json_extract(recurring, '$.endDate') IS NULL
                                 OR json_extract(recurring, '$.endDate') >= $1
                            ELSE 1 END)
            ORDER BY created_at, id
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;
        rows_to_blocks(rows)
    }

    async fn update_block(&self, id: &str, data: UpdateBlockData) -> Result<Block, CoreError> {
        let mut block = self.require_block(id).await?;
        block.apply_update(data);
        validate_block(&mut block)?;

        let block = self.write_block(block).await?;
        tracing::debug!(block = %block.id, "updated block");
        Ok(block)
    }

    async fn delete_block(&self, id: &str) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM blocks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Block '{}' not found", id)));
        }
        tracing::debug!(block = %id, "deleted block");
        Ok(())
    }

    async fn add_block_task(&self, block_id: &str, title: String, priority: Option<Priority>) -> Result<Block, CoreError> {
        let mut block = self.require_block(block_id).await?;
        block.tasks.push(new_task(title, priority)?);
        block.updated_at = Utc::now();
        self.write_block(block).await
    }

    async fn set_block_task_completed(&self, block_id: &str, task_id: &str, completed: bool) -> Result<Block, CoreError> {
        let mut block = self.require_block(block_id).await?;
        let task = block
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| CoreError::NotFound(format!("Task '{}' not found in block '{}'", task_id, block_id)))?;
        task.completed = completed;
        block.updated_at = Utc::now();
        self.write_block(block).await
    }

    async fn remove_block_task(&self, block_id: &str, task_id: &str) -> Result<Block, CoreError> {
        let mut block = self.require_block(block_id).await?;
        let before = block.tasks.len();
        block.tasks.retain(|t| t.id != task_id);
        if block.tasks.len() == before {
            return Err(CoreError::NotFound(format!("Task '{}' not found in block '{}'", task_id, block_id)));
        }
        block.updated_at = Utc::now();
        self.write_block(block).await
    }

    async fn import_blocks(&self, blocks: Vec<Block>) -> Result<usize, CoreError> {
        let mut tx = self.pool().begin().await?;
        let mut written = 0;

        for mut block in blocks {
            validate_block(&mut block)?;
            let row = BlockRow::from_block(&block)?;
            let query = sqlx::query_as(
                r#"INSERT INTO blocks (id, title, description, date, start_time, end_time, category, color, priority, has_quiz, recurring, tasks, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title, description = excluded.description, date = excluded.date,
                    start_time = excluded.start_time, end_time = excluded.end_time,
                    category = excluded.category, color = excluded.color, priority = excluded.priority,
                    has_quiz = excluded.has_quiz, recurring = excluded.recurring, tasks = excluded.tasks,
                    updated_at = excluded.updated_at
                RETURNING *
                "#,
            );
            let _: BlockRow = row.bind(query).fetch_one(&mut *tx).await?;
            written += 1;
        }

        tx.commit().await?;
        tracing::debug!(count = written, "imported blocks");
        Ok(written)
    }
}
