//! Rendering of command results, as plain text or JSON.

use std::fmt::Write as _;

use serde::Serialize;

use floorflow_core::access::Resolution;
use floorflow_core::board::{CategoryGroup, TaskBoard};
use floorflow_core::chart::BuildingChart;
use floorflow_core::dashboard::{BuildingRow, DashboardSummary};
use floorflow_core::registry::AddedBatch;
use floorflow_core::types::{Building, Flat, Floor, UserInfo, Vendor, WorkCategory};

use crate::Result;

/// Where results go and in which shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    json: bool,
}

impl Output {
    /// Plain text unless `json` is set.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Whether results are printed as JSON.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Prints `value` as pretty JSON, or the text built by `human`.
    pub fn emit<T, F>(&self, value: &T, human: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> String,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", human());
        }
        Ok(())
    }
}

// ============================================================================
// Text renderers
// ============================================================================

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

/// Greeting after login or for `whoami`.
pub fn render_user(user: &UserInfo, resolution: &Resolution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Logged in as {} ({})", user.display_name(), user.role);
    let sections: Vec<&str> = resolution.allowed.iter().map(|s| s.label()).collect();
    let _ = writeln!(out, "Sections: {}", sections.join(", "));
    let _ = writeln!(
        out,
        "Start page: {} ({})",
        resolution.initial.label(),
        resolution.source
    );
    out
}

/// Dashboard headline counts and the building table.
pub fn render_dashboard(summary: &DashboardSummary, rows: &[BuildingRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Buildings: {} ({} complete)  Work categories: {}  Active vendors: {}",
        summary.total_buildings,
        summary.completed_buildings,
        summary.work_categories,
        summary.active_vendors
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<8} {:<28} {:>8}  {:<9} {:<9}",
        "SERIAL", "BUILDING", "PROGRESS", "PAYMENT", "BILL"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<8} {:<28} {:>7}%  {:<9} {:<9}",
            row.building.serial_no,
            row.building.name,
            row.status.percentage,
            row.status.payment,
            row.status.bill
        );
    }
    out
}

/// Building list.
pub fn render_buildings(buildings: &[&Building]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<28} {:>6}  {:<14} {}",
        "SERIAL", "BUILDING", "FLOORS", "STATUS", "ADDRESS"
    );
    for building in buildings {
        let _ = writeln!(
            out,
            "{:<8} {:<28} {:>6}  {:<14} {}",
            building.serial_no,
            building.name,
            or_dash(building.total_floors.as_deref()),
            or_dash(building.work_status.as_deref()),
            or_dash(building.address.as_deref())
        );
    }
    out
}

/// Floors of one building.
pub fn render_floors(floors: &[Floor]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<8} {:<20} {:>5}  {}", "CB NO", "FLOOR", "FLATS", "NUMBERS");
    for floor in floors {
        let _ = writeln!(
            out,
            "{:<8} {:<20} {:>5}  {}",
            floor.cb_no,
            floor.name,
            floor.flat_count(),
            or_dash(floor.flats.as_deref())
        );
    }
    out
}

/// Flats of one floor.
pub fn render_flats(flats: &[Flat]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<8} {:<8} {}", "BF NO", "FLAT", "FLOOR");
    for flat in flats {
        let _ = writeln!(
            out,
            "{:<8} {:<8} {}",
            flat.bf_no,
            or_dash(flat.flat_no.as_deref()),
            flat.floor_name
        );
    }
    out
}

fn render_group(out: &mut String, group: &CategoryGroup) {
    let _ = writeln!(
        out,
        "[{}] {}  {}/{} done ({}%)  vendor: {}  payment: {}  billing: {}",
        group.id,
        group.category,
        group.completed(),
        group.tasks.len(),
        group.percentage(),
        or_dash(Some(group.vendor_name.as_str())),
        or_dash(Some(group.payment.as_str())),
        or_dash(Some(group.billing.as_str()))
    );
    for task in &group.tasks {
        let _ = writeln!(
            out,
            "    [{}] {:<6} {} ({})",
            if task.completed { "x" } else { " " },
            or_dash(task.task_no.as_deref()),
            task.name,
            task.assignee
        );
    }
}

/// Task board groups.
pub fn render_board(board: &TaskBoard, groups: &[&CategoryGroup]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", board.building_name());
    let _ = writeln!(out, "Categories: {}", board.filter_options().join(", "));
    for group in groups {
        let _ = writeln!(out);
        render_group(&mut out, group);
    }
    out
}

/// Building chart statistics.
pub fn render_chart(chart: &BuildingChart) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({})  floors: {}  rooms: {}",
        chart.building.name, chart.building.serial_no, chart.total_floors, chart.total_rooms
    );
    let _ = writeln!(
        out,
        "Tasks: {} total, {} completed, {} pending ({}%)",
        chart.stats.total, chart.stats.completed, chart.stats.pending, chart.stats.percentage
    );
    let _ = writeln!(
        out,
        "Payments: {} paid, {} pending   Bills: {} generated, {} pending",
        chart.payments.settled, chart.payments.pending, chart.bills.settled, chart.bills.pending
    );
    let _ = writeln!(
        out,
        "Floor bands: {} high, {} medium, {} low",
        chart.floor_bands.high, chart.floor_bands.medium, chart.floor_bands.low
    );

    let selected = chart.selected();
    let _ = writeln!(
        out,
        "Selected category: {}  {}/{} ({}%)",
        chart.selected_category().unwrap_or("-"),
        selected.completed,
        selected.total,
        selected.percentage
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<24} {:>5} {:>9} {:>5}", "CATEGORY", "TOTAL", "COMPLETED", "%");
    for group in &chart.categories {
        let _ = writeln!(
            out,
            "{:<24} {:>5} {:>9} {:>5}",
            group.key, group.total, group.completed, group.percentage
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<24} {:>5} {:>9} {:>5}", "FLOOR", "TOTAL", "COMPLETED", "%");
    for group in &chart.floors {
        let _ = writeln!(
            out,
            "{:<24} {:>5} {:>9} {:>5}",
            group.key, group.total, group.completed, group.percentage
        );
    }
    out
}

/// Vendor rows.
pub fn render_vendors(vendors: &[&Vendor]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<4} {:<16} {:<20} {:<14} {:<26} {}",
        "SERIAL", "NO", "CATEGORY", "VENDOR", "CONTACT", "EMAIL", "STATUS"
    );
    for v in vendors {
        let _ = writeln!(
            out,
            "{:<8} {:<4} {:<16} {:<20} {:<14} {:<26} {}",
            v.serial_no, v.category_no, v.category, v.vendor_name, v.contact_number, v.email_id,
            v.status
        );
    }
    out
}

/// Work-category rows.
pub fn render_categories(rows: &[&WorkCategory]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<4} {:<20} {:<24} {}",
        "SERIAL", "NO", "CATEGORY", "STAGE", "STATUS"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<8} {:<4} {:<20} {:<24} {}",
            row.serial_no, row.category_no, row.category_name, row.stage, row.status
        );
    }
    out
}

/// Summary of an add-rows batch.
pub fn render_added(batch: &AddedBatch, what: &str) -> String {
    format!("Added {} {what} under {}\n", batch.count, batch.serial_no)
}
