//! Progress aggregation over task records.
//!
//! Everything here is a pure function of a task-record snapshot; callers
//! recompute from scratch after every fetch.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Building, BuildingKey, Marker, TaskRecord};

/// Integer completion percentage, rounded half-up, 0 when `total` is 0.
///
/// # Examples
///
/// ```
/// use floorflow_core::progress::percentage;
///
/// assert_eq!(percentage(1, 2), 50);
/// assert_eq!(percentage(1, 3), 33);
/// assert_eq!(percentage(2, 3), 67);
/// assert_eq!(percentage(0, 0), 0);
/// ```
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    // round(c / t * 100) == floor((200c + t) / 2t) for non-negative values
    ((completed * 200 + total) / (2 * total)) as u8
}

/// Coarse progress band used by the floor summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    /// 80% and above.
    High,
    /// 40% up to (not including) 80%.
    Medium,
    /// Below 40%.
    Low,
}

impl ProgressBand {
    /// Band a percentage falls into.
    pub fn of(percentage: u8) -> Self {
        match percentage {
            80.. => ProgressBand::High,
            40..=79 => ProgressBand::Medium,
            _ => ProgressBand::Low,
        }
    }
}

impl fmt::Display for ProgressBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressBand::High => write!(f, "High"),
            ProgressBand::Medium => write!(f, "Medium"),
            ProgressBand::Low => write!(f, "Low"),
        }
    }
}

/// Completion statistics of the task records sharing one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressGroup {
    /// Group key (category or floor name).
    pub key: String,
    /// Records in the group.
    pub total: usize,
    /// Records with a non-blank completion date.
    pub completed: usize,
    /// Rounded completion percentage in `0..=100`.
    pub percentage: u8,
}

impl ProgressGroup {
    /// Records not yet completed.
    pub fn pending(&self) -> usize {
        self.total - self.completed
    }

    /// Band of this group's percentage.
    pub fn band(&self) -> ProgressBand {
        ProgressBand::of(self.percentage)
    }
}

/// Groups records by `key`, one group per distinct key in first-seen order.
pub fn group_progress<F>(records: &[TaskRecord], key: F) -> Vec<ProgressGroup>
where
    F: Fn(&TaskRecord) -> &str,
{
    let mut groups: Vec<ProgressGroup> = Vec::new();
    for record in records {
        let k = key(record);
        let index = match groups.iter().position(|g| g.key == k) {
            Some(index) => index,
            None => {
                groups.push(ProgressGroup {
                    key: k.to_string(),
                    total: 0,
                    completed: 0,
                    percentage: 0,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        group.total += 1;
        if record.is_completed() {
            group.completed += 1;
        }
    }
    for group in &mut groups {
        group.percentage = percentage(group.completed, group.total);
    }
    groups
}

/// Progress per task category; missing categories group as `Uncategorized`.
pub fn category_progress(records: &[TaskRecord]) -> Vec<ProgressGroup> {
    group_progress(records, TaskRecord::category_or_default)
}

/// Progress per floor; missing floors group as `Uncategorized`.
pub fn floor_progress(records: &[TaskRecord]) -> Vec<ProgressGroup> {
    group_progress(records, TaskRecord::floor_or_default)
}

/// Ungrouped completion statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStats {
    /// All records.
    pub total: usize,
    /// Completed records.
    pub completed: usize,
    /// Records still open.
    pub pending: usize,
    /// Rounded completion percentage.
    pub percentage: u8,
}

impl ProgressStats {
    /// Statistics over every record.
    pub fn from_records(records: &[TaskRecord]) -> Self {
        let total = records.len();
        let completed = records.iter().filter(|r| r.is_completed()).count();
        Self {
            total,
            completed,
            pending: total - completed,
            percentage: percentage(completed, total),
        }
    }
}

/// Count of records whose marker reads "yes" against the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerCounts {
    /// Marker reads "yes" (paid, bill generated).
    pub settled: usize,
    /// Everything else.
    pub pending: usize,
}

impl MarkerCounts {
    fn count<'a>(markers: impl Iterator<Item = &'a Marker>) -> Self {
        let (settled, pending) = markers.fold((0, 0), |(yes, rest), marker| {
            if marker.is_yes() {
                (yes + 1, rest)
            } else {
                (yes, rest + 1)
            }
        });
        Self { settled, pending }
    }

    /// Paid versus unpaid records.
    pub fn payments(records: &[TaskRecord]) -> Self {
        Self::count(records.iter().map(|r| &r.payment))
    }

    /// Billed versus unbilled records.
    pub fn bills(records: &[TaskRecord]) -> Self {
        Self::count(records.iter().map(|r| &r.bill))
    }
}

/// Aggregate yes/no status of a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionStatus {
    /// At least one record is still outstanding.
    Pending,
    /// No record is outstanding.
    Complete,
}

impl CompletionStatus {
    /// Taint rule: `Pending` as soon as one marker is pending.
    pub fn from_markers<'a>(mut markers: impl Iterator<Item = &'a Marker>) -> Self {
        if markers.any(Marker::is_pending) {
            CompletionStatus::Pending
        } else {
            CompletionStatus::Complete
        }
    }

    /// Returns whether the status is `Complete`.
    pub fn is_complete(&self) -> bool {
        matches!(self, CompletionStatus::Complete)
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionStatus::Pending => write!(f, "Pending"),
            CompletionStatus::Complete => write!(f, "Complete"),
        }
    }
}

/// Payment status of a task set (taint rule).
pub fn payment_status(records: &[TaskRecord]) -> CompletionStatus {
    CompletionStatus::from_markers(records.iter().map(|r| &r.payment))
}

/// Bill status of a task set (taint rule).
pub fn bill_status(records: &[TaskRecord]) -> CompletionStatus {
    CompletionStatus::from_markers(records.iter().map(|r| &r.bill))
}

/// Overall completion percentage and payment/bill status of one building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingStatus {
    /// Completion percentage over all records.
    pub percentage: u8,
    /// Payment status.
    pub payment: CompletionStatus,
    /// Bill status.
    pub bill: CompletionStatus,
}

impl BuildingStatus {
    /// Status derived from a building's progress records.
    pub fn from_records(records: &[TaskRecord]) -> Self {
        Self {
            percentage: ProgressStats::from_records(records).percentage,
            payment: payment_status(records),
            bill: bill_status(records),
        }
    }

    /// Status reported for a building with no progress entry.
    pub fn unknown() -> Self {
        Self {
            percentage: 0,
            payment: CompletionStatus::Pending,
            bill: CompletionStatus::Pending,
        }
    }
}

/// Fetched progress records keyed by building.
#[derive(Debug, Clone, Default)]
pub struct ProgressIndex {
    entries: Vec<(BuildingKey, Vec<TaskRecord>)>,
}

impl ProgressIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records progress for a building.
    pub fn insert(&mut self, key: BuildingKey, records: Vec<TaskRecord>) {
        self.entries.push((key, records));
    }

    /// Number of buildings with progress.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no progress has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Progress records of a building: serial matches exactly, name
    /// case-insensitively.
    pub fn get(&self, serial_no: &str, name: &str) -> Option<&[TaskRecord]> {
        let name = name.to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| key.serial_no() == serial_no && key.name().to_lowercase() == name)
            .map(|(_, records)| records.as_slice())
    }

    /// Status of a building, `Pending/Pending/0` when it has no entry.
    pub fn status_of(&self, building: &Building) -> BuildingStatus {
        self.get(&building.serial_no, &building.name)
            .map(BuildingStatus::from_records)
            .unwrap_or_else(BuildingStatus::unknown)
    }
}

/// Number of groups per band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandSummary {
    /// Groups at 80% or more.
    pub high: usize,
    /// Groups from 40% to below 80%.
    pub medium: usize,
    /// Groups below 40%.
    pub low: usize,
}

impl BandSummary {
    /// Tallies the groups by band.
    pub fn from_groups(groups: &[ProgressGroup]) -> Self {
        groups.iter().fold(Self::default(), |mut acc, group| {
            match group.band() {
                ProgressBand::High => acc.high += 1,
                ProgressBand::Medium => acc.medium += 1,
                ProgressBand::Low => acc.low += 1,
            }
            acc
        })
    }
}
