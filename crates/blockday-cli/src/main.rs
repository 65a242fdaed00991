use blockday_core::db;
use blockday_core::error::CoreError;
use blockday_core::repository::SqliteRepository;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = cli::Cli::parse();

    let config = config::Config::new().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable configuration");
        config::Config::default()
    });
    let grid = match config.grid() {
        Ok(grid) => grid,
        Err(e) => {
            handle_error(e.into());
            std::process::exit(1);
        }
    };

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool);

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_block(&repository, command).await,
        cli::Commands::Edit(command) => commands::edit::edit_block(&repository, command).await,
        cli::Commands::Delete(command) => commands::delete::delete_block(&repository, command).await,
        cli::Commands::Task(command) => commands::task::task_command(&repository, command).await,
        cli::Commands::List(command) => commands::list::list_blocks(&repository, command).await,
        cli::Commands::Day(command) => commands::day::show_day(&repository, command, &grid).await,
        cli::Commands::Week(command) => commands::week::show_week(&repository, command).await,
        cli::Commands::Category(command) => {
            commands::category::category_command(&repository, command).await
        }
        cli::Commands::Settings(command) => {
            commands::settings::settings_command(&repository, command).await
        }
        cli::Commands::Upcoming(command) => {
            commands::upcoming::show_upcoming(&repository, command).await
        }
        cli::Commands::Export(command) => commands::export::export_blocks(&repository, command).await,
        cli::Commands::Import(command) => commands::import::import_blocks(&repository, command).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so table output stays clean. `BLOCKDAY_LOG` takes the
/// usual `EnvFilter` directives, e.g. `BLOCKDAY_LOG=blockday_core=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("BLOCKDAY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(matches) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in matches {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
