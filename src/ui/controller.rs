//! MVC Controller - Mediates between Model (device service) and View (GTK4 components)
//!
//! # Responsibilities
//!
//! - Select the device to configure
//! - Build one model per resolution, button and LED of its active profile
//! - Apply the row expansion policy
//! - Produce the commit task for the save action and report its outcome
//! - Turn unsupported operations into status messages
//!
//! # Architecture
//!
//! The Controller holds the device service and the models but doesn't know
//! about GTK4 widgets. Views observe [`Controller::status`] and the models.

use chrono::Local;
use std::rc::Rc;
use tracing::{info, warn};

use crate::core::{
    ButtonMapModel, Device, DeviceSelection, LedGroupModel, Profile, Property,
    ResolutionRowModel,
};
use crate::ratbag::{CommitTask, DeviceService, Operation, RatbagError};

/// Severity of a status banner message
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

/// Message shown in the status banner
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Options the window is built with
#[derive(Clone, Debug, Default)]
pub struct ControllerOptions {
    /// Device name or id to prefer when several are connected
    pub preferred_device: Option<String>,
    /// Collapse other resolution rows when one expands
    pub single_expansion: bool,
}

/// MVC Controller coordinating the device service and the views
pub struct Controller {
    service: Rc<dyn DeviceService>,
    selection: DeviceSelection,
    profile: Option<Rc<Profile>>,
    resolution_rows: Vec<Rc<ResolutionRowModel>>,
    button_maps: Vec<Rc<ButtonMapModel>>,
    led_groups: Vec<Rc<LedGroupModel>>,
    single_expansion: bool,
    status: Property<Option<StatusMessage>>,
}

impl Controller {
    /// Creates a Controller and loads the device to configure
    ///
    /// Never fails: an unreachable service or an empty device list ends up
    /// as [`DeviceSelection::NoDevice`] with the reason as diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// use piper_gtk::ratbag::FixtureService;
    /// use piper_gtk::ui::{Controller, ControllerOptions};
    /// use std::rc::Rc;
    ///
    /// let controller = Controller::new(
    ///     Rc::new(FixtureService::demo()),
    ///     ControllerOptions::default(),
    /// );
    /// assert!(controller.device().is_some());
    /// assert_eq!(controller.resolution_rows().len(), 5);
    /// ```
    pub fn new(service: Rc<dyn DeviceService>, options: ControllerOptions) -> Self {
        let selection = match service.list_devices() {
            Ok(devices) => DeviceSelection::select(devices, options.preferred_device.as_deref()),
            Err(e) => {
                warn!(error = %e, "could not list devices");
                DeviceSelection::unavailable(e.to_string())
            }
        };

        let profile = selection.device().and_then(|device| device.active_profile());

        let (resolution_rows, button_maps, led_groups) = match &profile {
            Some(profile) => (
                profile
                    .resolutions
                    .iter()
                    .map(|resolution| Rc::new(ResolutionRowModel::new(Rc::clone(resolution))))
                    .collect(),
                profile
                    .buttons
                    .iter()
                    .map(|button| Rc::new(ButtonMapModel::new(Rc::clone(button))))
                    .collect(),
                profile
                    .leds
                    .iter()
                    .map(|led| Rc::new(LedGroupModel::new(Rc::clone(led))))
                    .collect(),
            ),
            None => (Vec::new(), Vec::new(), Vec::new()),
        };

        let status = match &selection {
            DeviceSelection::Multiple { .. } => selection
                .diagnostic()
                .map(|text| StatusMessage::new(StatusKind::Warning, text)),
            _ => None,
        };

        Self {
            service,
            selection,
            profile,
            resolution_rows,
            button_maps,
            led_groups,
            single_expansion: options.single_expansion,
            status: Property::new(status),
        }
    }

    pub fn service(&self) -> &Rc<dyn DeviceService> {
        &self.service
    }

    pub fn selection(&self) -> &DeviceSelection {
        &self.selection
    }

    /// The device being configured
    pub fn device(&self) -> Option<&Rc<Device>> {
        self.selection.device()
    }

    /// Whether the window has any page content at all
    pub fn has_content(&self) -> bool {
        self.profile.is_some()
    }

    pub fn resolution_rows(&self) -> &[Rc<ResolutionRowModel>] {
        &self.resolution_rows
    }

    pub fn button_maps(&self) -> &[Rc<ButtonMapModel>] {
        &self.button_maps
    }

    pub fn led_groups(&self) -> &[Rc<LedGroupModel>] {
        &self.led_groups
    }

    /// Observable status banner content
    pub fn status(&self) -> &Property<Option<StatusMessage>> {
        &self.status
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.service.supports(operation)
    }

    /// Toggles the resolution row at `index`
    ///
    /// Rows toggle independently unless single expansion is enabled, in which
    /// case expanding a row collapses every other row.
    ///
    /// # Returns
    ///
    /// The row's new expand state, or `None` for an out-of-range index
    pub fn activate_row(&self, index: usize) -> Option<bool> {
        let row = self.resolution_rows.get(index)?;
        let expanded = row.toggle();

        if expanded && self.single_expansion {
            for (other_index, other) in self.resolution_rows.iter().enumerate() {
                if other_index != index {
                    other.set_expanded(false);
                }
            }
        }

        Some(expanded)
    }

    /// Asks the service for a new resolution on the active profile
    pub fn add_resolution(&self) -> Result<(), RatbagError> {
        let profile = self.profile.as_ref().ok_or(RatbagError::NoDeviceSelected)?;
        let result = self.service.add_resolution(profile);
        self.report(&result);
        result
    }

    /// Asks the service to delete the resolution behind row `index`
    pub fn delete_resolution(&self, index: usize) -> Result<(), RatbagError> {
        let profile = self.profile.as_ref().ok_or(RatbagError::NoDeviceSelected)?;
        let row = self
            .resolution_rows
            .get(index)
            .ok_or_else(|| RatbagError::InvalidReply(format!("no resolution row {}", index)))?;
        let result = self.service.delete_resolution(profile, row.resolution());
        self.report(&result);
        result
    }

    /// Prepares the commit for the save action
    ///
    /// Calls the service's `commit()` exactly once. The returned task must be
    /// run (inline or on a worker) and its result passed to
    /// [`finish_commit`](Self::finish_commit).
    pub fn save(&self) -> Result<CommitTask, RatbagError> {
        let device = self.device().ok_or(RatbagError::NoDeviceSelected)?;
        info!(device = %device.name, "saving changes");
        self.status
            .set(Some(StatusMessage::new(StatusKind::Info, "Saving changes to the device…")));
        Ok(self.service.commit(device))
    }

    /// Publishes the outcome of a commit task
    pub fn finish_commit(&self, result: Result<(), RatbagError>) {
        match result {
            Ok(()) => {
                let text = format!("Changes saved at {}", Local::now().format("%H:%M:%S"));
                self.status.set(Some(StatusMessage::new(StatusKind::Info, text)));
            }
            Err(e) => {
                warn!(error = %e, "commit failed");
                self.status
                    .set(Some(StatusMessage::new(StatusKind::Error, e.to_string())));
            }
        }
    }

    /// Reflects an operation result in the status banner
    ///
    /// Unsupported operations become a warning, other failures an error.
    /// Success leaves the banner alone.
    pub fn report(&self, result: &Result<(), RatbagError>) {
        let Err(e) = result else {
            return;
        };

        let kind = if e.is_unsupported() {
            StatusKind::Warning
        } else {
            StatusKind::Error
        };
        warn!(error = %e, "operation did not complete");
        self.status.set(Some(StatusMessage::new(kind, e.to_string())));
    }

    /// Clears the status banner
    pub fn dismiss_status(&self) {
        self.status.set(None);
    }
}
