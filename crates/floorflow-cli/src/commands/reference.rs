//! Vendor and work-category reference data.

use chrono::NaiveDate;
use serde_json::json;

use floorflow_core::registry::{
    add_vendors, add_work_categories, deactivate_vendor, deactivate_work_category, edit_vendor,
    edit_work_category,
};
use floorflow_core::types::{
    ReferenceRow, Section, VendorBatch, VendorPatch, WorkCategoryBatch, WorkCategoryPatch,
    filter_rows, unique_categories,
};
use floorflow_client::columns::sheet_row;
use floorflow_core::SheetStore;

use crate::cli::{CategoriesCommand, VendorsCommand};
use crate::context::Context;
use crate::output::{render_added, render_categories, render_vendors};
use crate::Result;

fn updated<R: ReferenceRow>(row: &R, what: &str) -> String {
    format!("Updated {what} {} (sheet row {})\n", row.composite_key(), sheet_row(row.position()))
}

/// `vendors list|add|edit|deactivate`.
pub async fn vendors<S>(
    ctx: &mut Context,
    store: &S,
    cmd: VendorsCommand,
    today: NaiveDate,
) -> Result<()>
where
    S: SheetStore + ?Sized,
{
    ctx.navigate(Section::Vendors)?;
    let out = ctx.output();
    match cmd {
        VendorsCommand::List { category, search } => {
            let rows = store.vendor_sheet().await?;
            let shown = filter_rows(&rows, category.as_deref(), search.as_deref());
            let categories = unique_categories(&rows);
            out.emit(&json!({ "categories": categories, "vendors": shown }), || {
                render_vendors(&shown)
            })
        }
        VendorsCommand::Add { category, vendors } => {
            let added = add_vendors(store, VendorBatch { category, vendors }, today).await?;
            out.emit(&added, || render_added(&added, "vendor(s)"))
        }
        VendorsCommand::Edit {
            key,
            name,
            contact,
            email,
            address,
            status,
        } => {
            let patch = VendorPatch {
                vendor_name: name,
                contact_number: contact,
                email_id: email,
                address,
                status,
            };
            let row = edit_vendor(store, &key.key(), &patch).await?;
            out.emit(&row, || updated(&row, "vendor"))
        }
        VendorsCommand::Deactivate(key) => {
            let row = deactivate_vendor(store, &key.key()).await?;
            out.emit(&row, || updated(&row, "vendor"))
        }
    }
}

/// `categories list|add|edit|deactivate`.
pub async fn categories<S>(
    ctx: &mut Context,
    store: &S,
    cmd: CategoriesCommand,
    today: NaiveDate,
) -> Result<()>
where
    S: SheetStore + ?Sized,
{
    ctx.navigate(Section::WorkCategory)?;
    let out = ctx.output();
    match cmd {
        CategoriesCommand::List { category, search } => {
            let rows = store.work_category_sheet().await?;
            let shown = filter_rows(&rows, category.as_deref(), search.as_deref());
            let categories = unique_categories(&rows);
            out.emit(&json!({ "categories": categories, "stages": shown }), || {
                render_categories(&shown)
            })
        }
        CategoriesCommand::Add { name, stages } => {
            let batch = WorkCategoryBatch {
                category_name: name,
                stages,
            };
            let added = add_work_categories(store, batch, today).await?;
            out.emit(&added, || render_added(&added, "stage(s)"))
        }
        CategoriesCommand::Edit {
            key,
            name,
            stage,
            status,
        } => {
            let patch = WorkCategoryPatch {
                category_name: name,
                stage,
                status,
            };
            let row = edit_work_category(store, &key.key(), &patch).await?;
            out.emit(&row, || updated(&row, "stage"))
        }
        CategoriesCommand::Deactivate(key) => {
            let row = deactivate_work_category(store, &key.key()).await?;
            out.emit(&row, || updated(&row, "stage"))
        }
    }
}
