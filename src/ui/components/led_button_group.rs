//! LED mode selector group
//!
//! A linked row of one button per LED mode. Clicks go through
//! [`LedGroupModel::select_mode`]; the outcome lands in the status banner.

use gtk4::{prelude::*, Box as GtkBox, Button, Orientation};
use std::rc::Rc;

use crate::core::LedGroupModel;
use crate::ratbag::Operation;
use crate::ui::Controller;

pub struct LedButtonGroup {
    widget: GtkBox,
    model: Rc<LedGroupModel>,
}

impl LedButtonGroup {
    pub fn new(model: Rc<LedGroupModel>, controller: Rc<Controller>) -> Self {
        let widget = GtkBox::builder()
            .orientation(Orientation::Horizontal)
            .homogeneous(true)
            .build();
        widget.add_css_class("linked");

        let tooltip = if controller.supports(Operation::SetLedMode) {
            None
        } else {
            Some("Changing LED modes is not supported by ratbagd yet")
        };

        for mode in model.modes().iter().copied() {
            let button = Button::builder().label(mode.to_string()).hexpand(true).build();
            button.set_tooltip_text(tooltip);

            if model.led().mode.get() == mode {
                button.add_css_class("suggested-action");
            }

            let model = model.clone();
            let controller = controller.clone();
            button.connect_clicked(move |_| {
                let result = model.select_mode(mode, controller.service().as_ref());
                controller.report(&result);
            });

            widget.append(&button);
        }

        Self { widget, model }
    }

    pub fn model(&self) -> &Rc<LedGroupModel> {
        &self.model
    }

    /// Returns the root widget for adding to a container
    pub fn widget(&self) -> &GtkBox {
        &self.widget
    }
}
