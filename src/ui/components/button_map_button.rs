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

//! Button mapping button and dialog
//!
//! The button shows the current mapping with a cog icon; clicking it opens a
//! modal dialog with "Set" and "Cancel". The dialog's response goes through
//! [`ButtonMapModel::respond`], which is where a real mapping write plugs in.

use gtk4::{
    prelude::*, Align, Box as GtkBox, Button, Image, Label, Orientation, Separator, Window,
};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

use crate::core::{ButtonMapModel, DialogResponse};
use crate::ui::Controller;

/// Button that opens the mapping dialog for one physical button
pub struct ButtonMapButton {
    button: Button,
    model: Rc<ButtonMapModel>,
}

impl ButtonMapButton {
    pub fn new(model: Rc<ButtonMapModel>, controller: Rc<Controller>) -> Self {
        let hbox = GtkBox::new(Orientation::Horizontal, 4);

        let label = Label::builder()
            .label(model.label())
            .hexpand(true)
            .xalign(0.0)
            .margin_start(4)
            .margin_end(4)
            .build();
        let separator = Separator::new(Orientation::Vertical);
        let cog = Image::from_icon_name("emblem-system-symbolic");

        hbox.append(&label);
        hbox.append(&separator);
        hbox.append(&cog);

        let button = Button::builder().child(&hbox).build();

        // Keep the label current
        {
            let label = label.downgrade();
            model.button().button_mapping.subscribe(move |mapping| {
                if let Some(label) = label.upgrade() {
                    label.set_label(&format!("Button {}", mapping));
                }
            });
        }

        {
            let model = model.clone();
            button.connect_clicked(move |button| {
                let parent = button.root().and_downcast::<Window>();
                let response = ButtonMapDialog::new(parent.as_ref(), &model).run();
                debug!(button = model.button().index, ?response, "mapping dialog closed");

                let result = model
                    .respond(response, controller.service().as_ref())
                    .map(|_| ());
                controller.report(&result);
            });
        }

        Self { button, model }
    }

    pub fn model(&self) -> &Rc<ButtonMapModel> {
        &self.model
    }

    /// Returns the root widget for adding to a container
    pub fn widget(&self) -> &Button {
        &self.button
    }
}

/// Modal dialog for configuring one button mapping
pub struct ButtonMapDialog {
    window: Window,
    response: Rc<Cell<Option<DialogResponse>>>,
}

impl ButtonMapDialog {
    pub fn new(parent: Option<&Window>, model: &ButtonMapModel) -> Self {
        let window = Window::builder()
            .title(format!("Configure button {}", model.button().index))
            .modal(true)
            .default_width(360)
            .default_height(160)
            .resizable(false)
            .build();
        window.set_transient_for(parent);

        let main_box = GtkBox::builder()
            .orientation(Orientation::Vertical)
            .spacing(12)
            .margin_start(20)
            .margin_end(20)
            .margin_top(20)
            .margin_bottom(20)
            .build();

        let description = Label::builder()
            .label(format!(
                "Physical button {} currently sends button {}.",
                model.button().index,
                model.pending_mapping()
            ))
            .wrap(true)
            .xalign(0.0)
            .build();
        main_box.append(&description);

        let button_box = GtkBox::builder()
            .orientation(Orientation::Horizontal)
            .spacing(12)
            .halign(Align::End)
            .build();

        let cancel_button = Button::builder().label("Cancel").build();
        let set_button = Button::builder().label("Set").build();
        set_button.add_css_class("suggested-action");

        button_box.append(&cancel_button);
        button_box.append(&set_button);
        main_box.append(&button_box);

        window.set_child(Some(&main_box));

        let response: Rc<Cell<Option<DialogResponse>>> = Rc::new(Cell::new(None));

        Self::connect_response(&cancel_button, &window, &response, DialogResponse::Cancel);
        Self::connect_response(&set_button, &window, &response, DialogResponse::Accept);

        // Closing via the window manager counts as cancel
        {
            let response = response.clone();
            window.connect_close_request(move |_| {
                if response.get().is_none() {
                    response.set(Some(DialogResponse::Cancel));
                }
                glib::Propagation::Proceed
            });
        }

        Self { window, response }
    }

    fn connect_response(
        button: &Button,
        window: &Window,
        response: &Rc<Cell<Option<DialogResponse>>>,
        value: DialogResponse,
    ) {
        let response = response.clone();
        let window = window.clone();
        button.connect_clicked(move |_| {
            response.set(Some(value));
            window.close();
        });
    }

    /// Shows the dialog and waits for a response
    ///
    /// Iterates the main context until a button is clicked or the window
    /// closes, like `gtk_dialog_run()` did.
    pub fn run(self) -> DialogResponse {
        self.window.present();

        let main_context = glib::MainContext::default();
        while self.response.get().is_none() && self.window.is_visible() {
            main_context.iteration(true);
        }

        self.window.close();
        self.response.get().unwrap_or(DialogResponse::Cancel)
    }
}
