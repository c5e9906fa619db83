//! Building list, floor and flat drill-down, and the task board of a flat.

use serde_json::json;

use floorflow_core::board::{CategoryFilter, CategoryGroup, TaskBoard};
use floorflow_core::dashboard::filter_buildings;
use floorflow_core::layout::NewBuilding;
use floorflow_core::mutation::MutationState;
use floorflow_core::types::Section;
use floorflow_core::{Error as CoreError, SheetStore};

use crate::cli::{BuildingArgs, BuildingsCommand, FlatArgs, FloorArgs};
use crate::context::Context;
use crate::output::{render_board, render_buildings, render_flats, render_floors};
use crate::{Error, Result};

/// Values for `category-meta`.
#[derive(Debug, Clone)]
pub struct MetaArgs {
    /// Category to update.
    pub category: String,
    /// Vendor name.
    pub vendor: String,
    /// Payment value.
    pub payment: String,
    /// Billing value.
    pub billing: String,
}

/// `buildings list` and `buildings add`.
pub async fn buildings<S>(ctx: &mut Context, store: &S, cmd: BuildingsCommand) -> Result<()>
where
    S: SheetStore + ?Sized,
{
    ctx.navigate(Section::Buildings)?;
    match cmd {
        BuildingsCommand::List { serial, name } => {
            let all = store.buildings().await?;
            let shown = filter_buildings(
                &all,
                serial.as_deref().unwrap_or_default(),
                name.as_deref().unwrap_or_default(),
            );
            ctx.output().emit(&shown, || render_buildings(&shown))
        }
        BuildingsCommand::Add {
            name,
            address,
            total_floors,
            floors,
        } => {
            let building = NewBuilding {
                name,
                address,
                total_floors,
                floors,
            };
            store.insert_building(&building).await?;
            ctx.output().emit(&building, || {
                format!(
                    "Added {} with {} floor(s): {}\n",
                    building.name,
                    building.total_floors,
                    building.floor_flats()
                )
            })
        }
    }
}

/// Floors of one building.
pub async fn floors<S>(ctx: &mut Context, store: &S, args: &BuildingArgs) -> Result<()>
where
    S: SheetStore + ?Sized,
{
    let building = ctx.open_building(store, args).await?;
    let floors = store.floors(&building.key()?).await?;
    ctx.output().emit(&floors, || render_floors(&floors))
}

/// Flats of one floor.
pub async fn flats<S>(ctx: &mut Context, store: &S, args: &FloorArgs) -> Result<()>
where
    S: SheetStore + ?Sized,
{
    let (building, floor) = ctx.open_floor(store, args).await?;
    let flats = store.flats(&building.key()?, &floor.key()?).await?;
    ctx.output().emit(&flats, || render_flats(&flats))
}

async fn load_board<S>(ctx: &mut Context, store: &S, args: &FlatArgs) -> Result<TaskBoard>
where
    S: SheetStore + ?Sized,
{
    let (building, floor, flat) = ctx.open_flat(store, args).await?;
    let tasks = store
        .flat_tasks(&building.key()?, &floor.key()?, &flat.key()?)
        .await?;
    Ok(TaskBoard::from_records(building.name, &tasks))
}

/// Task board of a flat, optionally narrowed to one category.
pub async fn tasks<S>(ctx: &mut Context, store: &S, args: &FlatArgs, category: &str) -> Result<()>
where
    S: SheetStore + ?Sized,
{
    let board = load_board(ctx, store, args).await?;
    let Ok(filter) = category.parse::<CategoryFilter>();
    let groups = board.filtered(&filter);
    ctx.output()
        .emit(&groups, || render_board(&board, &groups))
}

/// Marks one task complete; a refusal by the store is reported as an error
/// after the board was rolled back.
pub async fn complete<S>(ctx: &mut Context, store: &S, args: &FlatArgs, task_no: &str) -> Result<()>
where
    S: SheetStore + ?Sized,
{
    let mut board = load_board(ctx, store, args).await?;
    let task = board
        .find_task_no(task_no)
        .ok_or_else(|| CoreError::row_not_found("task", task_no))?;

    match board.mark_complete(store, task).await? {
        MutationState::RolledBack(reason) => Err(Error::RolledBack {
            task_no: task_no.to_string(),
            reason,
        }),
        state => {
            tracing::info!(task_no, %state, "task completed");
            let done = board.task(task);
            ctx.output().emit(&done, || format!("Task {task_no} marked complete\n"))
        }
    }
}

/// Assigns vendor, payment and billing to one category of a flat's board.
pub async fn category_meta<S>(
    ctx: &mut Context,
    store: &S,
    args: &FlatArgs,
    meta: &MetaArgs,
) -> Result<()>
where
    S: SheetStore + ?Sized,
{
    let mut board = load_board(ctx, store, args).await?;
    let group_id = board
        .groups()
        .iter()
        .find(|g| g.category == meta.category)
        .map(|g| g.id)
        .ok_or_else(|| CoreError::row_not_found("category", meta.category.as_str()))?;

    board
        .submit_category_meta(store, group_id, &meta.vendor, &meta.payment, &meta.billing)
        .await?;
    let group: Option<&CategoryGroup> = board.group(group_id);
    ctx.output().emit(&group, || {
        format!(
            "Updated {}: vendor {}, payment {}, billing {}\n",
            meta.category, meta.vendor, meta.payment, meta.billing
        )
    })
}
