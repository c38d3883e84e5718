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

//! src/core/mod.rs
//!
//! Core models
//!
//! This module contains the device entities and the view models behind each
//! widget, including:
//! - Observable properties with two-way binding
//! - Device, profile, resolution, button and LED entities
//! - Device selection (none / one / several)
//! - Mouse-map anchor parsing
//! - Resolution row, button-map and LED group models
//!
//! Nothing here touches GTK, so every behaviour the window shows can be
//! unit tested without a display server.

pub mod anchor;
pub mod button_map;
pub mod led_group;
pub mod property;
pub mod resolution_row;
pub mod selection;
pub mod types;

pub use anchor::{parse_anchor, Anchor};
pub use button_map::{ButtonMapModel, DialogResponse};
pub use led_group::LedGroupModel;
pub use property::{Adjustment, Property};
pub use resolution_row::ResolutionRowModel;
pub use selection::DeviceSelection;
pub use types::*;

#[cfg(test)]
mod tests;
