pub mod add;
pub mod category;
pub mod day;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod settings;
pub mod task;
pub mod upcoming;
pub mod week;
