//! `grocery` command-line entry point.
//!
//! # Responsibility
//! - Act as the composition root: open the slot database, hydrate a
//!   session and route one command into the session callbacks.
//! - Render results and map failures to a non-zero exit code.

mod cli;
mod render;
mod resolve;

use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands};
use grocery_core::{
    default_log_level, init_logging, ActionResponse, GrocerySession, HydrationSource,
    SqliteSlotRepository,
};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DB_FILE_NAME: &str = "grocery.sqlite3";
const LOG_DIR_NAME: &str = "logs";

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let data_dir = absolute_dir(&cli.data_dir)?;
    std::fs::create_dir_all(&data_dir).map_err(|err| {
        format!(
            "failed to create data directory `{}`: {err}",
            data_dir.display()
        )
    })?;

    let log_dir = data_dir.join(LOG_DIR_NAME);
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &log_dir.to_string_lossy())?;

    let repo = SqliteSlotRepository::open(data_dir.join(DB_FILE_NAME))
        .map_err(|err| format!("failed to open grocery database: {err}"))?;
    let mut session = GrocerySession::open(repo);
    match session.source() {
        HydrationSource::RecoveredFromCorrupt => {
            eprintln!("warning: saved lists were unreadable and have been reset");
        }
        HydrationSource::StorageUnavailable => {
            eprintln!("warning: saved lists could not be read; changes in this run will not be saved");
        }
        HydrationSource::Restored | HydrationSource::SeededDefault => {}
    }

    execute(&mut session, cli.command)
}

fn execute(session: &mut GrocerySession, command: Commands) -> Result<(), String> {
    match command {
        Commands::Lists => {
            let store = session.store();
            println!(
                "{}",
                render::render_lists(store.lists(), store.current_list_id())
            );
            Ok(())
        }
        Commands::Create { name } => report(session.submit_list_form(&name)),
        Commands::Select { list } => {
            let id = resolve::resolve_id(
                "list",
                &list,
                session.store().lists().iter().map(|list| list.id.as_str()),
            )?
            .to_string();
            report(session.on_select_list(&id))
        }
        Commands::Show => {
            let list = session
                .store()
                .current_list()
                .ok_or("no list is selected")?;
            println!("{}", render::render_list(list));
            Ok(())
        }
        Commands::Add {
            name,
            quantity,
            price,
        } => {
            report(session.submit_item_form(&name, &quantity, &price))?;
            println!("{}", render::render_total(session.store().current_total()));
            Ok(())
        }
        Commands::Toggle { item } => {
            let id = resolve_item(session, &item)?;
            report(session.on_toggle_bought(&id))
        }
        Commands::Delete { item } => {
            let id = resolve_item(session, &item)?;
            report(session.on_delete_item(&id))?;
            println!("{}", render::render_total(session.store().current_total()));
            Ok(())
        }
        Commands::Total => {
            println!("{}", render::render_total(session.store().current_total()));
            Ok(())
        }
        Commands::Export { out } => {
            let dir = match out {
                Some(dir) => dir,
                None => std::env::current_dir()
                    .map_err(|err| format!("failed to resolve working directory: {err}"))?,
            };
            info!("event=cli_export module=cli status=start dir={}", dir.display());
            report(session.on_download_pdf(&dir, Local::now().naive_local()))
        }
    }
}

/// Resolves `query` against the current list. With no list selected the
/// query passes through unchanged and the session treats it as a no-op.
fn resolve_item(session: &GrocerySession, query: &str) -> Result<String, String> {
    let Some(list) = session.store().current_list() else {
        return Ok(query.to_string());
    };
    let id = resolve::resolve_id("item", query, list.items.iter().map(|item| item.id.as_str()))?;
    Ok(id.to_string())
}

fn report(response: ActionResponse) -> Result<(), String> {
    if response.ok {
        println!("{}", response.message);
        Ok(())
    } else {
        Err(response.message)
    }
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, String> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(dir))
        .map_err(|err| format!("failed to resolve working directory: {err}"))
}
