//! Command-line definition of the `floorflow` binary.

use clap::{Args, Parser, Subcommand};

use floorflow_core::layout::NewFloor;
use floorflow_core::types::{CompositeKey, VendorDraft};

/// Floorflow - construction progress from the project spreadsheet
#[derive(Parser, Debug)]
#[command(name = "floorflow")]
#[command(version, about = "Construction progress dashboard over the project spreadsheet", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    // === Session ===
    /// Log in against the user directory and remember the session
    Login {
        /// User name or user id
        username: String,

        /// Password
        #[arg(long, env = "FLOORFLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user and the sections they may open
    Whoami,

    // === Project views ===
    /// Overview of every building with progress, payment and bill status
    Dashboard,

    /// Building list and creation
    #[command(subcommand)]
    Buildings(BuildingsCommand),

    /// Floors of a building
    Floors(BuildingArgs),

    /// Flats of a floor
    Flats(FloorArgs),

    /// Task board of a flat, grouped by category
    Tasks {
        #[command(flatten)]
        flat: FlatArgs,

        /// Only show this category ("All" for every group)
        #[arg(long, default_value = "All")]
        category: String,
    },

    /// Mark a task of a flat complete
    Complete {
        #[command(flatten)]
        flat: FlatArgs,

        /// Task number to complete
        #[arg(long)]
        task_no: String,
    },

    /// Set vendor, payment and billing of one category of a flat
    CategoryMeta {
        #[command(flatten)]
        flat: FlatArgs,

        /// Category to update
        #[arg(long)]
        category: String,

        /// Vendor name
        #[arg(long)]
        vendor: String,

        /// Payment value ("Yes", "No", "Partial")
        #[arg(long)]
        payment: String,

        /// Billing value ("Yes", "No")
        #[arg(long)]
        billing: String,
    },

    /// Progress chart of a building
    Chart {
        #[command(flatten)]
        building: BuildingArgs,

        /// Category to focus on
        #[arg(long)]
        category: Option<String>,
    },

    // === Reference data ===
    /// Vendor reference data
    #[command(subcommand)]
    Vendors(VendorsCommand),

    /// Work-category reference data
    #[command(subcommand)]
    Categories(CategoriesCommand),

    // === Configuration ===
    /// Configuration file management
    #[command(subcommand)]
    Config(ConfigAction),
}

/// Identifies a building.
#[derive(Args, Debug, Clone)]
pub struct BuildingArgs {
    /// Building serial number
    pub serial: String,
    /// Building name
    pub name: String,
}

/// Identifies a floor of a building.
#[derive(Args, Debug, Clone)]
pub struct FloorArgs {
    #[command(flatten)]
    pub building: BuildingArgs,
    /// CB number of the floor
    pub cb_no: String,
    /// Floor name
    pub floor: String,
}

/// Identifies a flat of a floor.
#[derive(Args, Debug, Clone)]
pub struct FlatArgs {
    #[command(flatten)]
    pub floor: FloorArgs,
    /// BF number of the flat
    pub bf_no: String,
}

/// Building subcommands.
#[derive(Subcommand, Debug)]
pub enum BuildingsCommand {
    /// List buildings
    #[command(alias = "ls")]
    List {
        /// Serial number contains (case-insensitive)
        #[arg(long)]
        serial: Option<String>,

        /// Name contains (case-insensitive)
        #[arg(long)]
        name: Option<String>,
    },

    /// Add a building with its floors
    Add {
        /// Building name
        #[arg(long)]
        name: String,

        /// Street address
        #[arg(long)]
        address: String,

        /// Number of floors
        #[arg(long)]
        total_floors: u32,

        /// Floor as NAME:FLATS, once per floor in order
        #[arg(long = "floor", value_parser = parse_floor)]
        floors: Vec<NewFloor>,
    },
}

/// Composite key of a reference row.
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// Serial number (column B)
    pub serial: String,
    /// Category number (column C)
    pub category_no: String,
    /// Category name (column D)
    pub category_name: String,
}

impl KeyArgs {
    /// The composite key these arguments name.
    pub fn key(&self) -> CompositeKey {
        CompositeKey::new(&self.serial, &self.category_no, &self.category_name)
    }
}

/// Vendor subcommands.
#[derive(Subcommand, Debug)]
pub enum VendorsCommand {
    /// List vendors
    #[command(alias = "ls")]
    List {
        /// Exact category (case-insensitive)
        #[arg(long)]
        category: Option<String>,

        /// Text contained in any column
        #[arg(long)]
        search: Option<String>,
    },

    /// Add vendors under one category
    Add {
        /// Category the vendors serve
        #[arg(long)]
        category: String,

        /// Vendor as NAME,CONTACT,EMAIL[,ADDRESS], once per vendor
        #[arg(long = "vendor", value_parser = parse_vendor, required = true)]
        vendors: Vec<VendorDraft>,
    },

    /// Change columns of one vendor row
    Edit {
        #[command(flatten)]
        key: KeyArgs,

        /// New vendor name
        #[arg(long)]
        name: Option<String>,

        /// New contact number
        #[arg(long)]
        contact: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,

        /// New address
        #[arg(long)]
        address: Option<String>,

        /// New status
        #[arg(long)]
        status: Option<String>,
    },

    /// Set one vendor row to Inactive
    Deactivate(KeyArgs),
}

/// Work-category subcommands.
#[derive(Subcommand, Debug)]
pub enum CategoriesCommand {
    /// List work-category stages
    #[command(alias = "ls")]
    List {
        /// Exact category (case-insensitive)
        #[arg(long)]
        category: Option<String>,

        /// Text contained in any column
        #[arg(long)]
        search: Option<String>,
    },

    /// Add stages under a new category serial
    Add {
        /// Category name
        #[arg(long)]
        name: String,

        /// Stage name, once per stage in order
        #[arg(long = "stage", required = true)]
        stages: Vec<String>,
    },

    /// Change columns of one stage row
    Edit {
        #[command(flatten)]
        key: KeyArgs,

        /// New category name
        #[arg(long)]
        name: Option<String>,

        /// New stage
        #[arg(long)]
        stage: Option<String>,

        /// New status
        #[arg(long)]
        status: Option<String>,
    },

    /// Set one stage row to Inactive
    Deactivate(KeyArgs),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Get a configuration value by dotted key
    Get {
        /// Dotted key, e.g. `sheets.login`
        key: String,
    },

    /// Create a default configuration file
    Init {
        /// Where to write (defaults to the resolved path)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Value parsers
// ============================================================================

/// Parses `NAME:FLATS`.
pub fn parse_floor(raw: &str) -> Result<NewFloor, String> {
    let (name, flats) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:FLATS, got '{raw}'"))?;
    let flats = flats
        .trim()
        .parse()
        .map_err(|_| format!("flat count must be a number, got '{flats}'"))?;
    Ok(NewFloor {
        name: name.trim().to_string(),
        flats,
    })
}

/// Parses `NAME,CONTACT,EMAIL[,ADDRESS]`. The address may contain commas.
pub fn parse_vendor(raw: &str) -> Result<VendorDraft, String> {
    let mut parts = raw.splitn(4, ',').map(str::trim);
    let (Some(vendor_name), Some(contact_number), Some(email_id)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected NAME,CONTACT,EMAIL[,ADDRESS], got '{raw}'"));
    };
    Ok(VendorDraft {
        vendor_name: vendor_name.to_string(),
        contact_number: contact_number.to_string(),
        email_id: email_id.to_string(),
        address: parts.next().unwrap_or_default().to_string(),
    })
}
