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

//! Page builders
//!
//! Creates the three stack pages ("resolutions", "buttons", "leds") and the
//! empty-state page shown when there is no device.

use gtk4::{
    prelude::*, Align, Box as GtkBox, Label, ListBox, ListBoxRow, Orientation, ScrolledWindow,
    SelectionMode, Stack,
};
use std::rc::Rc;
use tracing::warn;

use crate::core::Device;
use crate::ratbag::Operation;
use crate::ui::{
    components::{ButtonMapButton, LedButtonGroup, MouseMap, ResolutionRow},
    Controller,
};

/// Widgets of the resolutions page the handlers need
pub struct ResolutionsPage {
    pub list_box: ListBox,
    pub rows: Vec<ResolutionRow>,
    pub add_row: ListBoxRow,
}

/// Adds all device pages to `stack`
///
/// # Returns
///
/// The resolutions page widgets, or `None` when the controller has no
/// device content (nothing is added then)
pub fn build_pages(stack: &Stack, controller: Rc<Controller>) -> Option<ResolutionsPage> {
    let device = controller.device()?.clone();
    if !controller.has_content() {
        return None;
    }

    let (resolutions_widget, resolutions_page) = build_resolutions_page(&device, controller.clone());
    stack.add_titled(&resolutions_widget, Some("resolutions"), "Resolutions");
    stack.add_titled(
        build_buttons_page(&device, controller.clone()).widget(),
        Some("buttons"),
        "Buttons",
    );
    stack.add_titled(build_leds_page(&device, controller).widget(), Some("leds"), "LEDs");

    Some(resolutions_page)
}

/// Builds the resolutions page
///
/// Creates a horizontal box containing:
/// - Left: mouse map of the whole device
/// - Right: scrollable list of resolution rows plus the "add" row
fn build_resolutions_page(device: &Device, controller: Rc<Controller>) -> (GtkBox, ResolutionsPage) {
    let page = GtkBox::new(Orientation::Horizontal, 0);

    let mousemap = MouseMap::new("#Device", device);
    page.append(mousemap.widget());

    let list_box = ListBox::builder()
        .selection_mode(SelectionMode::None)
        .valign(Align::Start)
        .build();
    list_box.add_css_class("boxed-list");

    let delete_supported = controller.supports(Operation::DeleteResolution);
    let rows: Vec<ResolutionRow> = controller
        .resolution_rows()
        .iter()
        .map(|model| ResolutionRow::new(model.clone(), delete_supported))
        .collect();

    for row in &rows {
        list_box.append(row.widget());
    }

    let add_supported = controller.supports(Operation::AddResolution);
    let add_label = Label::builder()
        .label("➕ Add resolution")
        .margin_top(8)
        .margin_bottom(8)
        .build();
    let add_row = ListBoxRow::builder()
        .child(&add_label)
        .activatable(true)
        .sensitive(add_supported)
        .tooltip_text(if add_supported {
            "Add a resolution"
        } else {
            "Adding resolutions is not supported by ratbagd yet"
        })
        .build();
    list_box.append(&add_row);

    let scrolled_window = ScrolledWindow::builder()
        .hexpand(true)
        .vexpand(true)
        .margin_start(20)
        .margin_end(20)
        .margin_top(20)
        .margin_bottom(20)
        .child(&list_box)
        .build();
    page.append(&scrolled_window);

    (
        page,
        ResolutionsPage {
            list_box,
            rows,
            add_row,
        },
    )
}

/// Builds the buttons page: one mapping button per physical button
fn build_buttons_page(device: &Device, controller: Rc<Controller>) -> MouseMap {
    let mousemap = MouseMap::new("#Buttons", device);

    for model in controller.button_maps() {
        let button = ButtonMapButton::new(model.clone(), controller.clone());
        let anchor = model.anchor().to_string();
        if let Err(e) = mousemap.add(button.widget(), &anchor) {
            warn!(error = %e, "skipping button");
        }
    }

    mousemap
}

/// Builds the LEDs page: one mode selector group per LED
fn build_leds_page(device: &Device, controller: Rc<Controller>) -> MouseMap {
    let mousemap = MouseMap::new("#LEDs", device);

    for model in controller.led_groups() {
        let group = LedButtonGroup::new(model.clone(), controller.clone());
        let anchor = model.anchor().to_string();
        if let Err(e) = mousemap.add(group.widget(), &anchor) {
            warn!(error = %e, "skipping LED");
        }
    }

    mousemap
}

/// Builds the page shown instead of the stack when there is no device
pub fn build_empty_state(diagnostic: &str) -> GtkBox {
    let page = GtkBox::builder()
        .orientation(Orientation::Vertical)
        .spacing(12)
        .valign(Align::Center)
        .halign(Align::Center)
        .vexpand(true)
        .build();

    let title = Label::builder().label("No device to configure").build();
    title.add_css_class("title-2");

    let message = Label::builder()
        .label(diagnostic)
        .wrap(true)
        .justify(gtk4::Justification::Center)
        .max_width_chars(50)
        .build();
    message.add_css_class("dim-label");

    page.append(&title);
    page.append(&message);
    page
}
