//! # Blockday Core Library
//!
//! Time-blocking calendar primitives: blocks with optional recurrence rules,
//! the pure functions that decide which blocks occur on a given day and where
//! they sit in an hour grid, and a SQLite-backed store for blocks, custom
//! categories and user settings.
//!
//! ## Core Modules
//!
//! - [`models`]: Blocks, recurrence rules, checklist tasks and DTOs
//! - [`recurrence`]: Occurrence expansion for days and weeks
//! - [`layout`]: Vertical placement of occurrences in a time grid
//! - [`upcoming`]: Upcoming occurrences and reminder computation
//! - [`category`]: Category colour palette and resolver
//! - [`settings`]: Typed calendar settings with validated defaults
//! - [`db`]: Database connection and migration management
//! - [`repository`]: Data access layer with Repository pattern
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use blockday_core::{
//!     db, layout::GridConfig, models::NewBlockData,
//!     repository::{BlockRepository, SqliteRepository},
//! };
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("blockday.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
//!     repo.add_block(NewBlockData {
//!         title: "Deep work".to_string(),
//!         date,
//!         start_time: "09:00".parse()?,
//!         end_time: "10:30".parse()?,
//!         category: "work".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//!     let blocks = repo.find_blocks().await?;
//!     let grid = GridConfig::default();
//!     for placed in blockday_core::layout::layout_day(&blocks, date, &grid) {
//!         println!("{} at {}px", placed.block.title, placed.placement.top);
//!     }
//!     Ok(())
//! }
//! ```

pub mod category;
pub mod db;
pub mod error;
pub mod layout;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod settings;
pub mod upcoming;
