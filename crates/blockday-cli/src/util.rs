use anyhow::{anyhow, Result};
use blockday_core::error::CoreError;
use blockday_core::models::{Block, BlockTask};
use blockday_core::repository::Repository;

/// Length of the id prefix shown in tables.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

pub async fn resolve_block_id(repo: &impl Repository, short_id: &str) -> Result<String> {
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    if let Some(block) = repo.find_block_by_id(short_id).await? {
        return Ok(block.id);
    }
    let blocks = repo.find_blocks_by_id_prefix(short_id).await?;
    if blocks.len() == 1 {
        Ok(blocks[0].id.clone())
    } else if blocks.is_empty() {
        Err(anyhow!(CoreError::NotFound(format!(
            "No block found with ID prefix '{}'",
            short_id
        ))))
    } else {
        let block_info: Vec<(String, String)> = blocks.into_iter().map(|b| (b.id, b.title)).collect();
        Err(anyhow!(CoreError::AmbiguousId(block_info)))
    }
}

pub async fn resolve_block(repo: &impl Repository, short_id: &str) -> Result<Block> {
    let id = resolve_block_id(repo, short_id).await?;
    repo.find_block_by_id(&id)
        .await?
        .ok_or_else(|| anyhow!(CoreError::NotFound(format!("Block '{}' not found", id))))
}

/// Resolves a checklist item inside `block` by id or id prefix.
pub fn resolve_task<'a>(block: &'a Block, short_id: &str) -> Result<&'a BlockTask> {
    if let Some(task) = block.tasks.iter().find(|t| t.id == short_id) {
        return Ok(task);
    }
    let matches: Vec<&BlockTask> = block.tasks.iter().filter(|t| t.id.starts_with(short_id)).collect();
    match matches.as_slice() {
        [task] => Ok(task),
        [] => Err(anyhow!(CoreError::NotFound(format!(
            "No task found with ID prefix '{}' in block '{}'",
            short_id, block.title
        )))),
        many => Err(anyhow!(CoreError::AmbiguousId(
            many.iter().map(|t| (t.id.clone(), t.title.clone())).collect()
        ))),
    }
}
