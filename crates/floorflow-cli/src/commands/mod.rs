//! Command handlers.
//!
//! Handlers are generic over [`SheetStore`](floorflow_core::SheetStore) so the
//! same code runs against the HTTP store and the in-memory mock.

pub mod buildings;
pub mod dashboard;
pub mod reference;
pub mod session;

use chrono::NaiveDate;
use floorflow_client::HttpSheetStore;

use crate::cli::{Cli, Command};
use crate::config::FloorflowConfig;
use crate::config_handlers::handle_config_command;
use crate::context::Context;
use crate::output::Output;
use crate::Result;

/// Runs one parsed command line.
pub async fn run(cli: Cli, config: FloorflowConfig) -> Result<()> {
    let config_path = cli.config.as_deref();
    let mut ctx = Context::new(config, Output::new(cli.json))?;

    match cli.command {
        Command::Config(action) => handle_config_command(config_path, action),
        Command::Login { username, password } => {
            session::login(&mut ctx, &username, &password).await
        }
        Command::Logout => session::logout(&ctx),
        Command::Whoami => session::whoami(&mut ctx),
        Command::Dashboard => {
            let store = connect(&mut ctx)?;
            dashboard::dashboard(&mut ctx, &store).await
        }
        Command::Chart { building, category } => {
            let store = connect(&mut ctx)?;
            dashboard::chart(&mut ctx, &store, &building, category.as_deref()).await
        }
        Command::Buildings(cmd) => {
            let store = connect(&mut ctx)?;
            buildings::buildings(&mut ctx, &store, cmd).await
        }
        Command::Floors(building) => {
            let store = connect(&mut ctx)?;
            buildings::floors(&mut ctx, &store, &building).await
        }
        Command::Flats(floor) => {
            let store = connect(&mut ctx)?;
            buildings::flats(&mut ctx, &store, &floor).await
        }
        Command::Tasks { flat, category } => {
            let store = connect(&mut ctx)?;
            buildings::tasks(&mut ctx, &store, &flat, &category).await
        }
        Command::Complete { flat, task_no } => {
            let store = connect(&mut ctx)?;
            buildings::complete(&mut ctx, &store, &flat, &task_no).await
        }
        Command::CategoryMeta {
            flat,
            category,
            vendor,
            payment,
            billing,
        } => {
            let store = connect(&mut ctx)?;
            let meta = buildings::MetaArgs {
                category,
                vendor,
                payment,
                billing,
            };
            buildings::category_meta(&mut ctx, &store, &flat, &meta).await
        }
        Command::Vendors(cmd) => {
            let store = connect(&mut ctx)?;
            reference::vendors(&mut ctx, &store, cmd, today()).await
        }
        Command::Categories(cmd) => {
            let store = connect(&mut ctx)?;
            reference::categories(&mut ctx, &store, cmd, today()).await
        }
    }
}

/// Restores the session, then opens the store.
fn connect(ctx: &mut Context) -> Result<HttpSheetStore> {
    ctx.require_user()?;
    ctx.store()
}

/// Local calendar date stamped on new reference rows.
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
