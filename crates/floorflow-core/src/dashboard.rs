//! Dashboard overview: summary counts and per-building status.

use serde::{Deserialize, Serialize};

use crate::progress::{BuildingStatus, ProgressIndex};
use crate::store::SheetStore;
use crate::types::{Building, ReferenceRow, Vendor, WorkCategory, unique_categories};
use crate::Result;

/// Headline counts of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Buildings in the store.
    pub total_buildings: usize,
    /// Buildings whose work status is `Complete`.
    pub completed_buildings: usize,
    /// Distinct work-category names.
    pub work_categories: usize,
    /// Vendors with status `Active`.
    pub active_vendors: usize,
}

/// One building with its derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingRow {
    /// The building.
    pub building: Building,
    /// Completion percentage and payment/bill status.
    pub status: BuildingStatus,
}

/// Everything the dashboard shows, fetched in one go.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    /// All buildings.
    pub buildings: Vec<Building>,
    /// All vendors.
    pub vendors: Vec<Vendor>,
    /// All work-category rows.
    pub work_categories: Vec<WorkCategory>,
    /// Progress records per building.
    pub progress: ProgressIndex,
}

impl Dashboard {
    /// Fetches buildings, vendors and work categories concurrently, then the
    /// progress of each building one after another.
    ///
    /// A list the store rejects is left empty. A transport or decoding
    /// failure of any of the three lists fails the whole load. Progress
    /// never fails the load, see [`load_progress`].
    pub async fn load<S>(store: &S) -> Result<Self>
    where
        S: SheetStore + ?Sized,
    {
        let (buildings, vendors, work_categories) = futures::try_join!(
            or_empty("buildings", store.buildings()),
            or_empty("vendors", store.vendors()),
            or_empty("work categories", store.work_categories())
        )?;
        log::debug!(
            "Loaded {} buildings, {} vendors, {} work categories",
            buildings.len(),
            vendors.len(),
            work_categories.len()
        );
        let progress = load_progress(store, &buildings).await;
        Ok(Self {
            buildings,
            vendors,
            work_categories,
            progress,
        })
    }

    /// Headline counts.
    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            total_buildings: self.buildings.len(),
            completed_buildings: self.buildings.iter().filter(|b| b.is_complete()).count(),
            work_categories: unique_categories(&self.work_categories).len(),
            active_vendors: self.vendors.iter().filter(|v| v.is_active()).count(),
        }
    }

    /// Every building with its status, in store order.
    pub fn rows(&self) -> Vec<BuildingRow> {
        self.buildings
            .iter()
            .map(|building| BuildingRow {
                building: building.clone(),
                status: self.progress.status_of(building),
            })
            .collect()
    }
}

async fn or_empty<T, F>(what: &str, fetch: F) -> Result<Vec<T>>
where
    F: Future<Output = Result<Vec<T>>>,
{
    match fetch.await {
        Err(err) if err.is_business() => {
            log::warn!("Failed to load {what}: {err}");
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Fetches progress for each building in turn.
///
/// Rejected fetches and buildings without a usable key are skipped with a
/// warning. Any other failure stops the loop and yields an empty index, so
/// the buildings still show with unknown status.
pub async fn load_progress<S>(store: &S, buildings: &[Building]) -> ProgressIndex
where
    S: SheetStore + ?Sized,
{
    let mut index = ProgressIndex::new();
    for building in buildings {
        let key = match building.key() {
            Ok(key) => key,
            Err(err) => {
                log::warn!("Skipping building without key ({err})");
                continue;
            }
        };
        match store.building_progress(&key).await {
            Ok(records) => index.insert(key, records),
            Err(err) if err.is_business() => {
                log::warn!("No progress data for {key}: {err}");
            }
            Err(err) => {
                log::error!("Error fetching progress data: {err}");
                return ProgressIndex::new();
            }
        }
    }
    index
}

/// Buildings whose serial number and name contain the given filters,
/// case-insensitively. Blank filters match everything.
pub fn filter_buildings<'a>(
    buildings: &'a [Building],
    serial_no: &str,
    name: &str,
) -> Vec<&'a Building> {
    let serial_no = serial_no.to_lowercase();
    let name = name.to_lowercase();
    buildings
        .iter()
        .filter(|b| serial_no.is_empty() || b.serial_no.to_lowercase().contains(&serial_no))
        .filter(|b| name.is_empty() || b.name.to_lowercase().contains(&name))
        .collect()
}
