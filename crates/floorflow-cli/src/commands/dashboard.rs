//! `dashboard` and `chart`.

use serde_json::json;

use floorflow_core::chart::BuildingChart;
use floorflow_core::dashboard::Dashboard;
use floorflow_core::types::Section;
use floorflow_core::SheetStore;

use crate::cli::BuildingArgs;
use crate::context::Context;
use crate::output::{render_chart, render_dashboard};
use crate::Result;

/// Summary counts plus progress, payment and bill status per building.
pub async fn dashboard<S>(ctx: &mut Context, store: &S) -> Result<()>
where
    S: SheetStore + ?Sized,
{
    ctx.navigate(Section::Dashboard)?;
    let dashboard = Dashboard::load(store).await?;
    let summary = dashboard.summary();
    let rows = dashboard.rows();
    tracing::debug!(buildings = rows.len(), "dashboard loaded");
    ctx.output().emit(
        &json!({ "summary": summary, "buildings": rows }),
        || render_dashboard(&summary, &rows),
    )
}

/// Task, payment, bill and per-floor statistics of one building.
pub async fn chart<S>(
    ctx: &mut Context,
    store: &S,
    args: &BuildingArgs,
    category: Option<&str>,
) -> Result<()>
where
    S: SheetStore + ?Sized,
{
    let building = ctx.open_chart(store, args).await?;
    let mut chart = BuildingChart::load(store, building).await?;
    if let Some(category) = category {
        chart.select_category(category)?;
    }
    ctx.output().emit(&chart, || render_chart(&chart))
}
