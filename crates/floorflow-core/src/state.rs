//! Application state: who is logged in, where they are, what is selected.
//!
//! One [`AppState`] owns the session-wide state and is passed explicitly to
//! whatever drives navigation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::access::{AccessResolver, Permissions, Resolution};
use crate::types::{Building, Flat, Floor, Section, UserInfo};
use crate::{Error, Result};

/// A navigable page: a top-level section or a drill-down detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    /// A top-level section.
    Section(Section),
    /// Floors of the selected building.
    BuildingDetails,
    /// Flats of the selected floor.
    FloorDetails,
    /// Task board of the selected flat.
    FlatDetails,
    /// Progress charts of the selected building.
    BuildingChart,
}

impl Page {
    /// Stable page identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Page::Section(section) => section.id(),
            Page::BuildingDetails => "building-details",
            Page::FloorDetails => "floor-details",
            Page::FlatDetails => "flat-details",
            Page::BuildingChart => "building-chart",
        }
    }

    /// Detail pages are reached by drilling down and skip the access check.
    pub fn is_detail(&self) -> bool {
        !matches!(self, Page::Section(_))
    }
}

impl From<Section> for Page {
    fn from(section: Section) -> Self {
        Page::Section(section)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Page {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "building-details" => Ok(Page::BuildingDetails),
            "floor-details" => Ok(Page::FloorDetails),
            "flat-details" => Ok(Page::FlatDetails),
            "building-chart" => Ok(Page::BuildingChart),
            other => other
                .parse::<Section>()
                .map(Page::Section)
                .map_err(|_| Error::validation_field("page", format!("unknown page '{s}'"))),
        }
    }
}

/// What should be shown for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The page itself.
    Page(Page),
    /// The page exists but the user may not open it.
    AccessDenied(Page),
}

/// Session-wide application state.
#[derive(Debug, Clone)]
pub struct AppState {
    resolver: AccessResolver,
    user: Option<UserInfo>,
    permissions: Permissions,
    page: Page,
    building: Option<Building>,
    floor: Option<Floor>,
    flat: Option<Flat>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AccessResolver::default())
    }
}

impl AppState {
    /// Creates a logged-out state on the resolver's default section.
    pub fn new(resolver: AccessResolver) -> Self {
        let page = Page::Section(resolver.default_section());
        Self {
            resolver,
            user: None,
            permissions: Permissions::unrestricted(),
            page,
            building: None,
            floor: None,
            flat: None,
        }
    }

    /// Logs a user in and lands on their initial section.
    pub fn login(&mut self, user: UserInfo) -> Resolution {
        let resolution = self.resolver.resolve(&user.page_show);
        log::info!(
            "Logged in as {} ({}), landing on {} via {}",
            user.display_name(),
            user.role,
            resolution.initial,
            resolution.source
        );
        self.permissions = resolution.permissions.clone();
        self.page = Page::Section(resolution.initial);
        self.user = Some(user);
        resolution
    }

    /// Clears the user, permissions and selections; back to the default
    /// section.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("Logged out {}", user.display_name());
        }
        self.permissions = Permissions::unrestricted();
        self.page = Page::Section(self.resolver.default_section());
        self.building = None;
        self.floor = None;
        self.flat = None;
    }

    /// True once a user has logged in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Logged-in user.
    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// Permissions of the logged-in user.
    pub fn permissions(&self) -> &Permissions {
        &self.permissions
    }

    /// Current page.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Selected building.
    pub fn selected_building(&self) -> Option<&Building> {
        self.building.as_ref()
    }

    /// Selected floor.
    pub fn selected_floor(&self) -> Option<&Floor> {
        self.floor.as_ref()
    }

    /// Selected flat.
    pub fn selected_flat(&self) -> Option<&Flat> {
        self.flat.as_ref()
    }

    /// Whether the section may be opened. Unrestricted without a user.
    pub fn has_access(&self, section: Section) -> bool {
        self.user.is_none() || self.permissions.allows(section)
    }

    /// Sections shown in the menu.
    pub fn menu(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| self.has_access(*section))
            .collect()
    }

    /// What to render for the current page.
    pub fn view(&self) -> View {
        match self.page {
            Page::Section(section) if !self.has_access(section) => View::AccessDenied(self.page),
            page => View::Page(page),
        }
    }

    /// Switches to a top-level section if the user may open it.
    pub fn navigate(&mut self, section: Section) -> Result<()> {
        if !self.has_access(section) {
            log::warn!("Refused navigation to {section}");
            return Err(Error::access_denied(section.label()));
        }
        self.page = Page::Section(section);
        Ok(())
    }

    /// Opens the floors of a building.
    pub fn open_building(&mut self, building: Building) {
        self.building = Some(building);
        self.page = Page::BuildingDetails;
    }

    /// Opens the progress charts of a building.
    pub fn open_chart(&mut self, building: Building) {
        self.building = Some(building);
        self.page = Page::BuildingChart;
    }

    /// Opens the flats of a floor of the selected building.
    pub fn open_floor(&mut self, floor: Floor) -> Result<()> {
        if self.building.is_none() {
            return Err(Error::validation("select a building before opening a floor"));
        }
        self.floor = Some(floor);
        self.page = Page::FloorDetails;
        Ok(())
    }

    /// Opens the task board of a flat on the selected floor.
    pub fn open_flat(&mut self, flat: Flat) -> Result<()> {
        if self.floor.is_none() {
            return Err(Error::validation("select a floor before opening a flat"));
        }
        self.flat = Some(flat);
        self.page = Page::FlatDetails;
        Ok(())
    }

    /// Steps back one level, clearing the selection left behind.
    ///
    /// Top-level sections have no parent; the page stays put.
    pub fn back(&mut self) -> Page {
        match self.page {
            Page::FlatDetails => {
                self.flat = None;
                self.page = Page::FloorDetails;
            }
            Page::FloorDetails => {
                self.floor = None;
                self.page = Page::BuildingDetails;
            }
            Page::BuildingDetails => {
                self.building = None;
                self.page = Page::Section(Section::Buildings);
            }
            Page::BuildingChart => {
                self.building = None;
                self.page = Page::Section(Section::Dashboard);
            }
            Page::Section(_) => {}
        }
        self.page
    }
}
