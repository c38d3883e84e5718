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

//! Piper GTK
//!
//! A GTK4 front-end for configuring gaming mice through the ratbagd
//! device daemon.
//!
//! # Features
//!
//! - **Resolutions:** Expandable rows with X/Y editors bound live to the device
//! - **Buttons:** One mapping button per physical button
//! - **LEDs:** Mode selectors per LED
//! - **Save:** Commits pending changes to hardware without freezing the window
//! - **Dry run:** Built-in demo device for use without ratbagd
//!
//! # Architecture
//!
//! - **`core`:** Entities, observable properties, view models (no GTK)
//! - **`ratbag`:** Device service trait, D-Bus client, demo service
//! - **`config`:** User settings file
//! - **`ui`:** GTK4 GUI components (MVC pattern)
//!
//! # Examples
//!
//! ## Editing a resolution
//!
//! ```
//! use piper_gtk::ratbag::{self, ClientMode};
//! use piper_gtk::ui::{Controller, ControllerOptions};
//!
//! let service = ratbag::connect(ClientMode::DryRun)?;
//! let controller = Controller::new(service, ControllerOptions::default());
//!
//! let row = &controller.resolution_rows()[0];
//! row.adjustment_x().set_value(1200);
//! assert_eq!(row.resolution().resolution_x.get(), 1200);
//!
//! let task = controller.save()?;
//! controller.finish_commit(task());
//! # Ok::<(), piper_gtk::ratbag::RatbagError>(())
//! ```
//!
//! ## Using the GUI
//!
//! ```no_run
//! use piper_gtk::ratbag::{self, ClientMode};
//! use piper_gtk::ui::{App, ControllerOptions};
//!
//! let service = ratbag::connect(ClientMode::Live)?;
//! App::new(service, ControllerOptions::default()).run(); // Blocks until window closes
//! # Ok::<(), piper_gtk::ratbag::RatbagError>(())
//! ```

pub mod config;
pub mod core;
pub mod ratbag;
pub mod ui;

// Re-export commonly used types for convenience
pub use core::{Button, Device, Led, LedMode, Profile, Resolution};
