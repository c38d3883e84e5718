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

//! Status banner component
//!
//! Displays a banner at the top of the window for the Controller's status
//! messages: the several-devices diagnostic, save results and unsupported
//! operations. The banner slides in when a message is set and out when it is
//! dismissed.
//!
//! # Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ ⚠️  Not supported yet: changing LED modes     [✕]   │
//! └─────────────────────────────────────────────────────┘
//! ```

use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Button, Label, Orientation, Revealer};
use std::rc::Rc;

use crate::ui::controller::{StatusKind, StatusMessage};
use crate::ui::Controller;

const KIND_CLASSES: [&str; 3] = ["info-banner", "warning-banner", "error-banner"];

/// Banner bound to [`Controller::status`]
pub struct StatusBanner {
    /// Root widget (Revealer for smooth show/hide animation)
    widget: Revealer,
}

impl StatusBanner {
    pub fn new(controller: Rc<Controller>) -> Self {
        let revealer = Revealer::builder()
            .transition_type(gtk4::RevealerTransitionType::SlideDown)
            .transition_duration(300)
            .reveal_child(false)
            .build();

        let banner_box = GtkBox::builder()
            .orientation(Orientation::Horizontal)
            .spacing(10)
            .margin_start(10)
            .margin_end(10)
            .margin_top(5)
            .margin_bottom(5)
            .hexpand(true)
            .build();

        let message_label = Label::builder()
            .xalign(0.0)
            .hexpand(true)
            .wrap(true)
            .margin_start(10)
            .margin_end(10)
            .margin_top(5)
            .margin_bottom(5)
            .build();

        let dismiss_button = Button::builder()
            .icon_name("window-close-symbolic")
            .tooltip_text("Dismiss")
            .build();
        dismiss_button.add_css_class("flat");

        banner_box.append(&message_label);
        banner_box.append(&dismiss_button);
        revealer.set_child(Some(&banner_box));

        {
            let controller = controller.clone();
            dismiss_button.connect_clicked(move |_| controller.dismiss_status());
        }

        let show = {
            let revealer = revealer.downgrade();
            let banner_box = banner_box.downgrade();
            let message_label = message_label.downgrade();
            move |status: &Option<StatusMessage>| {
                let (Some(revealer), Some(banner_box), Some(message_label)) =
                    (revealer.upgrade(), banner_box.upgrade(), message_label.upgrade())
                else {
                    return;
                };
                Self::show(&revealer, &banner_box, &message_label, status.as_ref());
            }
        };

        show(&controller.status().get());
        controller.status().subscribe(show);

        Self { widget: revealer }
    }

    fn show(revealer: &Revealer, banner_box: &GtkBox, label: &Label, status: Option<&StatusMessage>) {
        for class in KIND_CLASSES {
            banner_box.remove_css_class(class);
        }

        match status {
            None => revealer.set_reveal_child(false),
            Some(status) => {
                let (class, icon) = match status.kind {
                    StatusKind::Info => (KIND_CLASSES[0], "ℹ️"),
                    StatusKind::Warning => (KIND_CLASSES[1], "⚠️"),
                    StatusKind::Error => (KIND_CLASSES[2], "❌"),
                };
                banner_box.add_css_class(class);
                label.set_label(&format!("{}  {}", icon, status.text));
                revealer.set_reveal_child(true);
            }
        }
    }

    /// Returns the root widget for adding to a container
    pub fn widget(&self) -> &Revealer {
        &self.widget
    }
}
