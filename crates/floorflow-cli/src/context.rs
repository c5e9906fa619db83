//! Per-invocation state shared by the command handlers.

use floorflow_auth::{LoginService, SessionStore};
use floorflow_client::{CsvUserDirectory, HttpSheetStore};
use floorflow_core::types::{Building, Flat, Floor, Section, UserInfo};
use floorflow_core::{AppState, Error as CoreError, Resolution, SheetStore};

use crate::cli::{BuildingArgs, FlatArgs, FloorArgs};
use crate::config::FloorflowConfig;
use crate::output::Output;
use crate::{Error, Result};

/// Config, session slots, navigation state and output settings.
pub struct Context {
    config: FloorflowConfig,
    sessions: SessionStore,
    state: AppState,
    output: Output,
}

impl Context {
    /// Builds the context; no network access happens here.
    pub fn new(config: FloorflowConfig, output: Output) -> Result<Self> {
        let sessions = SessionStore::new(config.session_dir()?);
        Ok(Self {
            config,
            sessions,
            state: AppState::default(),
            output,
        })
    }

    /// Loaded configuration.
    pub fn config(&self) -> &FloorflowConfig {
        &self.config
    }

    /// Output settings.
    pub fn output(&self) -> Output {
        self.output
    }

    /// Navigation state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Store client for the configured endpoints.
    pub fn store(&self) -> Result<HttpSheetStore> {
        Ok(HttpSheetStore::new(self.config.client_config()?))
    }

    /// Login service over the configured user directory.
    pub fn login_service(&self) -> Result<LoginService<CsvUserDirectory>> {
        let directory = CsvUserDirectory::new(self.config.client_config()?);
        Ok(LoginService::new(directory, self.sessions.clone()))
    }

    /// Session slots.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Logs `user` into the navigation state.
    pub fn enter(&mut self, user: UserInfo) -> Resolution {
        self.state.login(user)
    }

    /// Restores the saved session into the navigation state.
    pub fn require_user(&mut self) -> Result<Resolution> {
        let session = match self.sessions.load() {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable session");
                None
            }
        };
        let session = session.ok_or(Error::NotLoggedIn)?;
        tracing::debug!(user = %session.user.user_id, "restored session");
        Ok(self.enter(session.user))
    }

    /// Switches to a top-level section, enforcing permissions.
    pub fn navigate(&mut self, section: Section) -> Result<()> {
        Ok(self.state.navigate(section)?)
    }

    // ------------------------------------------------------------------------
    // Drill-down
    // ------------------------------------------------------------------------

    /// Looks up a building and opens its floors.
    pub async fn open_building<S>(&mut self, store: &S, args: &BuildingArgs) -> Result<Building>
    where
        S: SheetStore + ?Sized,
    {
        self.navigate(Section::Buildings)?;
        let building = find_building(store, args).await?;
        self.state.open_building(building.clone());
        Ok(building)
    }

    /// Looks up a floor of a building and opens its flats.
    pub async fn open_floor<S>(&mut self, store: &S, args: &FloorArgs) -> Result<(Building, Floor)>
    where
        S: SheetStore + ?Sized,
    {
        let building = self.open_building(store, &args.building).await?;
        let floors = store.floors(&building.key()?).await?;
        let floor = floors
            .into_iter()
            .find(|f| f.cb_no == args.cb_no && f.name == args.floor)
            .ok_or_else(|| {
                CoreError::row_not_found("floor", format!("{} ({})", args.floor, args.cb_no))
            })?;
        self.state.open_floor(floor.clone())?;
        Ok((building, floor))
    }

    /// Looks up a flat of a floor and opens its task board.
    pub async fn open_flat<S>(
        &mut self,
        store: &S,
        args: &FlatArgs,
    ) -> Result<(Building, Floor, Flat)>
    where
        S: SheetStore + ?Sized,
    {
        let (building, floor) = self.open_floor(store, &args.floor).await?;
        let flats = store.flats(&building.key()?, &floor.key()?).await?;
        let flat = flats
            .into_iter()
            .find(|f| f.bf_no == args.bf_no)
            .ok_or_else(|| CoreError::row_not_found("flat", args.bf_no.clone()))?;
        self.state.open_flat(flat.clone())?;
        Ok((building, floor, flat))
    }

    /// Looks up a building and opens its chart.
    ///
    /// Charts are reachable from the dashboard and from the building list.
    pub async fn open_chart<S>(&mut self, store: &S, args: &BuildingArgs) -> Result<Building>
    where
        S: SheetStore + ?Sized,
    {
        if self.state.has_access(Section::Dashboard) {
            self.navigate(Section::Dashboard)?;
        } else {
            self.navigate(Section::Buildings)?;
        }
        let building = find_building(store, args).await?;
        self.state.open_chart(building.clone());
        Ok(building)
    }
}

async fn find_building<S>(store: &S, args: &BuildingArgs) -> Result<Building>
where
    S: SheetStore + ?Sized,
{
    store
        .buildings()
        .await?
        .into_iter()
        .find(|b| b.serial_no == args.serial && b.name == args.name)
        .ok_or_else(|| {
            CoreError::row_not_found("building", format!("{} ({})", args.name, args.serial)).into()
        })
}
