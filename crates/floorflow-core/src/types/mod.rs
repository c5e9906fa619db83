//! Core types for Floorflow.

mod keys;
mod proptests;
mod records;
mod reference;
mod section;
mod user;

pub use keys::{BuildingKey, FlatKey, FloorKey};
pub use records::{Building, Flat, Floor, Marker, TaskRecord, UNCATEGORIZED};
pub use reference::{
    CompositeKey, ReferenceRow, STATUS_ACTIVE, STATUS_INACTIVE, Vendor, VendorBatch, VendorDraft,
    VendorPatch, WorkCategory, WorkCategoryBatch, WorkCategoryPatch, filter_rows, next_serial,
    sheet_timestamp, unique_categories,
};
pub use section::Section;
pub use user::{DEFAULT_ROLE, UserInfo};

pub(crate) use records::non_blank;
