//! Progress charts of one building.

use serde::{Deserialize, Serialize};

use crate::progress::{
    BandSummary, MarkerCounts, ProgressGroup, ProgressStats, category_progress, floor_progress,
};
use crate::store::SheetStore;
use crate::types::{Building, TaskRecord};
use crate::{Error, Result};

/// Category and floor breakdowns plus headline figures for one building.
///
/// Overall, payment and bill figures come from the building's progress
/// records; the category and floor breakdowns come from its full task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingChart {
    /// The building.
    pub building: Building,
    /// Overall completion.
    pub stats: ProgressStats,
    /// Paid against unpaid tasks.
    pub payments: MarkerCounts,
    /// Billed against unbilled tasks.
    pub bills: MarkerCounts,
    /// Progress per task category, first-seen order.
    pub categories: Vec<ProgressGroup>,
    /// Progress per floor, first-seen order.
    pub floors: Vec<ProgressGroup>,
    /// Floors per progress band.
    pub floor_bands: BandSummary,
    /// Declared floor count.
    pub total_floors: u32,
    /// Flats summed over the building's flat ranges.
    pub total_rooms: u32,
    selected_category: Option<String>,
}

impl BuildingChart {
    /// Builds the chart from already-fetched records.
    pub fn from_records(building: Building, progress: &[TaskRecord], tasks: &[TaskRecord]) -> Self {
        let categories = category_progress(tasks);
        let floors = floor_progress(tasks);
        let selected_category = categories.first().map(|g| g.key.clone());
        Self {
            stats: ProgressStats::from_records(progress),
            payments: MarkerCounts::payments(progress),
            bills: MarkerCounts::bills(progress),
            floor_bands: BandSummary::from_groups(&floors),
            total_floors: building.floor_count(),
            total_rooms: building.total_rooms(),
            categories,
            floors,
            selected_category,
            building,
        }
    }

    /// Fetches progress records and the full task list, then builds the
    /// chart.
    ///
    /// Each fetch fails independently: a failure is logged and that half of
    /// the chart stays empty.
    pub async fn load<S>(store: &S, building: Building) -> Result<Self>
    where
        S: SheetStore + ?Sized,
    {
        let key = building.key()?;
        let (progress, tasks) =
            futures::join!(store.building_progress(&key), store.building_tasks(&key));
        let progress = progress.unwrap_or_else(|err| {
            log::warn!("Error fetching progress data for {key}: {err}");
            Vec::new()
        });
        let tasks = tasks.unwrap_or_else(|err| {
            log::warn!("Error fetching building data for {key}: {err}");
            Vec::new()
        });
        Ok(Self::from_records(building, &progress, &tasks))
    }

    /// Currently selected category, if any group exists.
    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    /// Selects a category by exact name.
    pub fn select_category(&mut self, category: &str) -> Result<()> {
        if !self.categories.iter().any(|g| g.key == category) {
            return Err(Error::validation_field(
                "category",
                format!("no tasks in category '{category}'"),
            ));
        }
        self.selected_category = Some(category.to_string());
        Ok(())
    }

    /// Progress of the selected category; an empty group when nothing is
    /// selected.
    pub fn selected(&self) -> ProgressGroup {
        self.selected_category
            .as_deref()
            .and_then(|key| self.categories.iter().find(|g| g.key == key))
            .cloned()
            .unwrap_or(ProgressGroup {
                key: String::new(),
                total: 0,
                completed: 0,
                percentage: 0,
            })
    }
}
