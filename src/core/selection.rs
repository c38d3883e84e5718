// Copyright 2025 Eric Jingryd (tidynest@proton.me)
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

//! Device selection
//!
//! The window configures exactly one device. [`DeviceSelection`] records how
//! that device was chosen so the degraded cases (nothing plugged in, several
//! mice) are explicit states the view can render instead of console noise.

use std::rc::Rc;
use tracing::{info, warn};

use crate::core::types::Device;

/// Shown when the service reports no devices
pub const NO_DEVICE_MESSAGE: &str =
    "Could not find any devices. Do you have anything vaguely mouse-looking plugged in?";

/// Outcome of picking the device to configure
#[derive(Debug)]
pub enum DeviceSelection {
    /// Nothing to configure; `diagnostic` says why
    NoDevice { diagnostic: String },
    /// Exactly one device was available
    Single(Rc<Device>),
    /// Several devices were available; `ignored` names the ones not shown
    Multiple {
        chosen: Rc<Device>,
        ignored: Vec<String>,
    },
}

impl DeviceSelection {
    /// Picks one device from the service listing
    ///
    /// With several devices the first in listing order wins, unless
    /// `preferred` matches another device's name or id.
    ///
    /// # Example
    ///
    /// ```
    /// use piper_gtk::core::selection::DeviceSelection;
    ///
    /// let selection = DeviceSelection::select(Vec::new(), None);
    /// assert!(selection.device().is_none());
    /// assert!(selection.diagnostic().is_some());
    /// ```
    pub fn select(mut devices: Vec<Rc<Device>>, preferred: Option<&str>) -> Self {
        if devices.is_empty() {
            warn!("{}", NO_DEVICE_MESSAGE);
            return Self::NoDevice {
                diagnostic: NO_DEVICE_MESSAGE.to_string(),
            };
        }

        let chosen_index = match preferred {
            Some(wanted) => match devices
                .iter()
                .position(|device| device.name == wanted || device.id == wanted)
            {
                Some(index) => index,
                None => {
                    warn!(device = wanted, "preferred device not found, using the first one");
                    0
                }
            },
            None => 0,
        };

        let chosen = devices.remove(chosen_index);
        if devices.is_empty() {
            info!(device = %chosen.name, "configuring device");
            return Self::Single(chosen);
        }

        let ignored: Vec<String> = devices.iter().map(|device| device.name.clone()).collect();
        warn!(device = %chosen.name, "more than one device found, configuring only one");
        for name in &ignored {
            warn!(device = %name, "ignoring device");
        }

        Self::Multiple { chosen, ignored }
    }

    /// A selection for a device service that could not be queried
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::NoDevice {
            diagnostic: reason.into(),
        }
    }

    /// The device being configured, if any
    pub fn device(&self) -> Option<&Rc<Device>> {
        match self {
            Self::NoDevice { .. } => None,
            Self::Single(device) => Some(device),
            Self::Multiple { chosen, .. } => Some(chosen),
        }
    }

    /// User-facing explanation for the degraded states
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::NoDevice { diagnostic } => Some(diagnostic.clone()),
            Self::Single(_) => None,
            Self::Multiple { chosen, ignored } => Some(format!(
                "Several devices found, configuring {}. Ignoring: {}",
                chosen.name,
                ignored.join(", ")
            )),
        }
    }
}
