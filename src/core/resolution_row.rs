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

//! Resolution row model
//!
//! One row per resolution step. The row owns two clamped editors (X and Y)
//! bound two-way to the resolution's properties and a boolean expand flag.
//!
//! # Separate X/Y
//!
//! When the resolution lacks [`ResolutionCapability::SeparateXyResolution`]
//! the Y editor is hidden and every X value is mirrored into Y, so both axes
//! always carry the same sensitivity.

use std::rc::Rc;

use crate::core::property::{Adjustment, Binding, Property, SubscriptionId};
use crate::core::types::{Resolution, ResolutionCapability};

/// Toolkit-agnostic state behind one resolution row
pub struct ResolutionRowModel {
    resolution: Rc<Resolution>,
    adjustment_x: Adjustment,
    adjustment_y: Adjustment,
    expanded: Property<bool>,
    mirror: Option<SubscriptionId>,
    _bindings: [Binding<u32>; 2],
}

impl ResolutionRowModel {
    /// Creates the row model and binds both editors to `resolution`
    ///
    /// Editor bounds are the resolution's `[min_res, max_res]`. Binding
    /// happens with initial sync, so an out-of-range device value is clamped
    /// on both sides before this returns.
    pub fn new(resolution: Rc<Resolution>) -> Self {
        let (min, max) = (resolution.min_res, resolution.max_res);

        let adjustment_y = Adjustment::new(min, min, max);
        let binding_y = resolution.resolution_y.bind_bidirectional(adjustment_y.property());

        let adjustment_x = Adjustment::new(min, min, max);
        let binding_x = resolution.resolution_x.bind_bidirectional(adjustment_x.property());

        let mirror = if resolution.has_capability(ResolutionCapability::SeparateXyResolution) {
            None
        } else {
            let y = adjustment_y.clone();
            let id = adjustment_x.property().subscribe(move |x| {
                y.set_value(*x);
            });
            adjustment_y.set_value(adjustment_x.value());
            Some(id)
        };

        Self {
            resolution,
            adjustment_x,
            adjustment_y,
            expanded: Property::new(false),
            mirror,
            _bindings: [binding_y, binding_x],
        }
    }

    pub fn resolution(&self) -> &Rc<Resolution> {
        &self.resolution
    }

    /// Row title, 1-based for humans
    pub fn index_label(&self) -> String {
        format!("Resolution {}", self.resolution.index + 1)
    }

    /// Current rate as shown next to the title
    pub fn rate_label(&self) -> String {
        format!("{} DPI", self.resolution.resolution_x.get())
    }

    pub fn adjustment_x(&self) -> &Adjustment {
        &self.adjustment_x
    }

    pub fn adjustment_y(&self) -> &Adjustment {
        &self.adjustment_y
    }

    /// Whether the Y editor is shown
    pub fn y_visible(&self) -> bool {
        self.mirror.is_none()
    }

    /// Observable expand flag
    pub fn expanded(&self) -> &Property<bool> {
        &self.expanded
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    pub fn set_expanded(&self, expanded: bool) {
        self.expanded.set(expanded);
    }

    /// Flips the expand flag and returns the new state
    pub fn toggle(&self) -> bool {
        let expanded = !self.expanded.get();
        self.expanded.set(expanded);
        expanded
    }
}

impl Drop for ResolutionRowModel {
    fn drop(&mut self) {
        if let Some(id) = self.mirror.take() {
            self.adjustment_x.property().unsubscribe(id);
        }
    }
}
