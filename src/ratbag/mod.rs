// Copyright 2025 bakri (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! ratbagd device service integration
//!
//! # Client Modes
//!
//! - **DryRun**: Serves a built-in demo device, commits are only logged
//! - **Live**: Talks to ratbagd on the system bus
//!
//! Tests use DryRun (or their own [`DeviceService`]) and never touch the bus.
//!
//! # Example
//! ```
//! use piper_gtk::ratbag::{self, ClientMode};
//!
//! // Safe: DryRun never connects to D-Bus
//! let service = ratbag::connect(ClientMode::DryRun)?;
//! let devices = service.list_devices()?;
//! assert_eq!(devices.len(), 1);
//!
//! // Commits run as a task, inline here
//! let task = service.commit(&devices[0]);
//! assert!(task().is_ok());
//! # Ok::<(), piper_gtk::ratbag::RatbagError>(())
//! ```

pub mod dbus;
mod error;
pub mod fixture;

pub use dbus::DbusService;
pub use error::{Operation, RatbagError};
pub use fixture::FixtureService;

use std::rc::Rc;
use tracing::warn;

use crate::core::types::{Button, Device, Led, LedMode, Profile, Resolution};

/// Deferred `commit()` call
///
/// `Send` so the GUI can run it on a blocking worker while the main loop
/// keeps drawing; tests and the CLI simply call it inline.
pub type CommitTask = Box<dyn FnOnce() -> Result<(), RatbagError> + Send + 'static>;

/// Device service operation mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientMode {
    /// Demo device, nothing leaves the process
    DryRun,
    /// ratbagd on the system bus
    Live,
}

/// The device configuration daemon as seen by the window
///
/// Entities returned by [`list_devices`](Self::list_devices) stay owned by
/// the service; writes to their properties reach the hardware only after
/// [`commit`](Self::commit).
///
/// Operations the daemon does not offer yet have default implementations
/// returning [`RatbagError::Unsupported`]. Views query
/// [`supports`](Self::supports) to render those affordances as unavailable.
pub trait DeviceService {
    /// Lists the connected devices in service order
    fn list_devices(&self) -> Result<Vec<Rc<Device>>, RatbagError>;

    /// Prepares persisting all pending changes of `device` to hardware
    fn commit(&self, device: &Device) -> CommitTask;

    fn supports(&self, _operation: Operation) -> bool {
        false
    }

    fn add_resolution(&self, _profile: &Profile) -> Result<(), RatbagError> {
        Err(RatbagError::Unsupported(Operation::AddResolution))
    }

    fn delete_resolution(
        &self,
        _profile: &Profile,
        _resolution: &Resolution,
    ) -> Result<(), RatbagError> {
        Err(RatbagError::Unsupported(Operation::DeleteResolution))
    }

    fn set_button_mapping(&self, _button: &Button, _mapping: u32) -> Result<(), RatbagError> {
        Err(RatbagError::Unsupported(Operation::WriteButtonMapping))
    }

    fn set_led_mode(&self, _led: &Led, _mode: LedMode) -> Result<(), RatbagError> {
        Err(RatbagError::Unsupported(Operation::SetLedMode))
    }
}

/// Creates the device service for `mode`
///
/// # Returns
///
/// * `Ok(service)` - Ready to list devices
/// * `Err(RatbagError)` - Live mode only: system bus or ratbagd unreachable
pub fn connect(mode: ClientMode) -> Result<Rc<dyn DeviceService>, RatbagError> {
    match mode {
        ClientMode::DryRun => Ok(Rc::new(FixtureService::demo())),
        ClientMode::Live => Ok(Rc::new(DbusService::connect()?)),
    }
}

/// Creates the device service for `mode`, never failing
///
/// A daemon that cannot be reached yields an [`UnavailableService`], so the
/// window still opens and shows why there is nothing to configure.
pub fn connect_or_unavailable(mode: ClientMode) -> Rc<dyn DeviceService> {
    match connect(mode) {
        Ok(service) => service,
        Err(e) => {
            warn!(error = %e, "device service unreachable");
            Rc::new(UnavailableService::new(&e))
        }
    }
}

/// Stands in for a device service that could not be reached
///
/// Listing reports the connection error; there is never a device to commit.
pub struct UnavailableService {
    reason: String,
}

impl UnavailableService {
    pub fn new(error: &RatbagError) -> Self {
        let reason = match error {
            RatbagError::ServiceUnavailable(reason) => reason.clone(),
            other => other.to_string(),
        };
        Self { reason }
    }
}

impl DeviceService for UnavailableService {
    fn list_devices(&self) -> Result<Vec<Rc<Device>>, RatbagError> {
        Err(RatbagError::ServiceUnavailable(self.reason.clone()))
    }

    fn commit(&self, _device: &Device) -> CommitTask {
        Box::new(|| Err(RatbagError::NoDeviceSelected))
    }
}

#[cfg(test)]
mod tests;
