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

//! Mouse map component
//!
//! A titled panel that places child widgets at named anchors (`#button3`,
//! `#led1`). Children are kept sorted by anchor with a caption per row, and
//! all children share a horizontal size group so they line up.
//!
//! # Layout
//!
//! ```text
//! ┌───────────────────────────────────────┐
//! │ Buttons · Logitech G500s              │
//! │   Button 0   [ Button 1       | ⚙ ]   │
//! │   Button 1   [ Button 2       | ⚙ ]   │
//! └───────────────────────────────────────┘
//! ```

use gtk4::{prelude::*, Align, Box as GtkBox, Grid, Label, Orientation, SizeGroup, SizeGroupMode};
use std::cell::RefCell;

use crate::core::anchor::{parse_anchor, Anchor, AnchorError};
use crate::core::types::Device;

pub struct MouseMap {
    widget: GtkBox,
    grid: Grid,
    size_group: SizeGroup,
    anchors: RefCell<Vec<Anchor>>,
}

impl MouseMap {
    /// Creates a mouse map titled after `selector` (e.g. `"#Buttons"`)
    pub fn new(selector: &str, device: &Device) -> Self {
        let widget = GtkBox::builder()
            .orientation(Orientation::Vertical)
            .spacing(20)
            .margin_start(20)
            .margin_end(20)
            .margin_top(20)
            .margin_bottom(20)
            .build();
        widget.add_css_class("mouse-map");

        let section = match parse_anchor(selector) {
            Ok(anchor) => anchor.caption(),
            Err(_) => selector.trim_start_matches('#').to_string(),
        };

        let title = Label::builder()
            .label(format!("{} · {}", section, device.name))
            .xalign(0.0)
            .build();
        title.add_css_class("title-4");
        widget.append(&title);

        let grid = Grid::builder()
            .row_spacing(8)
            .column_spacing(16)
            .halign(Align::Center)
            .build();
        widget.append(&grid);

        Self {
            widget,
            grid,
            size_group: SizeGroup::new(SizeGroupMode::Horizontal),
            anchors: RefCell::new(Vec::new()),
        }
    }

    /// Places `child` at `anchor`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Child attached in anchor order
    /// * `Err(AnchorError)` - Anchor string not understood; nothing attached
    pub fn add(&self, child: &impl IsA<gtk4::Widget>, anchor: &str) -> Result<(), AnchorError> {
        let anchor = parse_anchor(anchor)?;

        let position = {
            let mut anchors = self.anchors.borrow_mut();
            let position = anchors.partition_point(|existing| existing < &anchor);
            anchors.insert(position, anchor.clone());
            position as i32
        };

        let caption = Label::builder()
            .label(anchor.caption())
            .halign(Align::End)
            .build();
        caption.add_css_class("dim-label");

        self.grid.insert_row(position);
        self.grid.attach(&caption, 0, position, 1, 1);
        self.grid.attach(child, 1, position, 1, 1);
        self.size_group.add_widget(child);

        Ok(())
    }

    /// Number of anchored children
    pub fn len(&self) -> usize {
        self.anchors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.borrow().is_empty()
    }

    /// Returns the root widget for adding to a container
    pub fn widget(&self) -> &GtkBox {
        &self.widget
    }
}
