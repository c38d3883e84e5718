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

//! Resolution row component
//!
//! One list row per resolution. The header shows the index and current rate;
//! activating the row reveals the X/Y spin buttons.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Resolution 1                 800 DPI   [🗑]   │
//! │   X [ 800 ▴▾ ]   Y [ 800 ▴▾ ]                 │  <- revealed
//! └──────────────────────────────────────────────┘
//! ```

use gtk4::{
    prelude::*, Align, Box as GtkBox, Button, Frame, Label, ListBoxRow, Orientation, Revealer,
    RevealerTransitionType, SpinButton,
};
use std::rc::Rc;

use crate::core::property::Adjustment;
use crate::core::ResolutionRowModel;

/// Step used by the spin buttons, in DPI
const RESOLUTION_STEP: f64 = 50.0;

pub struct ResolutionRow {
    row: ListBoxRow,
    delete_button: Button,
    model: Rc<ResolutionRowModel>,
}

impl ResolutionRow {
    /// Builds the row for `model`
    ///
    /// `delete_supported` controls whether the delete button is clickable.
    pub fn new(model: Rc<ResolutionRowModel>, delete_supported: bool) -> Self {
        let vbox = GtkBox::builder()
            .orientation(Orientation::Vertical)
            .spacing(6)
            .margin_start(12)
            .margin_end(12)
            .margin_top(8)
            .margin_bottom(8)
            .build();

        // Header line
        let header = GtkBox::new(Orientation::Horizontal, 12);
        let index_label = Label::builder()
            .label(model.index_label())
            .xalign(0.0)
            .hexpand(true)
            .build();
        let rate_label = Label::builder().label(model.rate_label()).build();
        rate_label.add_css_class("dim-label");

        let delete_button = Button::builder()
            .icon_name("user-trash-symbolic")
            .sensitive(delete_supported)
            .tooltip_text(if delete_supported {
                "Delete this resolution"
            } else {
                "Deleting resolutions is not supported by ratbagd yet"
            })
            .build();
        delete_button.add_css_class("flat");

        header.append(&index_label);
        header.append(&rate_label);
        header.append(&delete_button);
        vbox.append(&header);

        // Keep the rate label current
        {
            let rate_label = rate_label.downgrade();
            model.resolution().resolution_x.subscribe(move |x| {
                if let Some(label) = rate_label.upgrade() {
                    label.set_label(&format!("{} DPI", x));
                }
            });
        }

        // Editors
        let editors = GtkBox::new(Orientation::Horizontal, 12);
        editors.set_halign(Align::Start);

        let frame_x = Self::build_editor("X", model.adjustment_x());
        let frame_y = Self::build_editor("Y", model.adjustment_y());
        frame_y.set_visible(model.y_visible());
        editors.append(&frame_x);
        editors.append(&frame_y);

        let revealer = Revealer::builder()
            .transition_type(RevealerTransitionType::SlideDown)
            .transition_duration(200)
            .reveal_child(model.is_expanded())
            .child(&editors)
            .build();
        vbox.append(&revealer);

        {
            let revealer = revealer.downgrade();
            model.expanded().subscribe(move |expanded| {
                if let Some(revealer) = revealer.upgrade() {
                    revealer.set_reveal_child(*expanded);
                }
            });
        }

        let row = ListBoxRow::builder().child(&vbox).activatable(true).build();

        Self {
            row,
            delete_button,
            model,
        }
    }

    /// Builds a labelled spin button mirroring `adjustment` both ways
    fn build_editor(axis: &str, adjustment: &Adjustment) -> Frame {
        let gtk_adjustment = gtk4::Adjustment::new(
            adjustment.value() as f64,
            adjustment.lower() as f64,
            adjustment.upper() as f64,
            RESOLUTION_STEP,
            RESOLUTION_STEP * 4.0,
            0.0,
        );

        {
            let adjustment = adjustment.clone();
            gtk_adjustment.connect_value_changed(move |gtk_adjustment| {
                adjustment.set_value(gtk_adjustment.value().round() as u32);
            });
        }

        {
            let gtk_adjustment = gtk_adjustment.downgrade();
            adjustment.property().subscribe(move |value| {
                if let Some(gtk_adjustment) = gtk_adjustment.upgrade() {
                    if gtk_adjustment.value().round() as u32 != *value {
                        gtk_adjustment.set_value(*value as f64);
                    }
                }
            });
        }

        let spin = SpinButton::builder()
            .adjustment(&gtk_adjustment)
            .numeric(true)
            .width_chars(6)
            .build();

        Frame::builder().label(axis).child(&spin).build()
    }

    pub fn model(&self) -> &Rc<ResolutionRowModel> {
        &self.model
    }

    pub fn delete_button(&self) -> &Button {
        &self.delete_button
    }

    /// Returns the list row for adding to a ListBox
    pub fn widget(&self) -> &ListBoxRow {
        &self.row
    }
}
