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

//! GTK4 Application wrapper
//!
//! This module sets up the GTK4 application lifecycle and creates
//! the main window. It uses the Controller to load and display data.
//!
//! # Architecture
//!
//! ```text
//! App (GTK4 Application)
//!   ├─ Creates Controller (selects the device)
//!   ├─ Builds main window (banner + stack, or empty state)
//!   └─ Connects components to Controller
//! ```

use gtk4::prelude::*;
use gtk4::{gdk, Application, ApplicationWindow, CssProvider, Orientation, Stack, StackTransitionType};
use std::rc::Rc;
use tracing::warn;

use crate::ratbag::DeviceService;
use crate::ui::builders::{build_empty_state, build_header_bar, build_pages, wire_up_handlers};
use crate::ui::components::StatusBanner;
use crate::ui::{actions, Controller, ControllerOptions};

/// Application id registered with GTK
pub const APPLICATION_ID: &str = "org.freedesktop.Piper";

/// GTK4 Application for mouse configuration
pub struct App {
    /// GTK4 Application instance
    app: Application,
    /// MVC Controller
    controller: Rc<Controller>,
}

impl App {
    /// Creates a new App for the given device service
    ///
    /// The device is selected right away; a service without devices still
    /// yields a window (showing the empty state).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use piper_gtk::ratbag::{self, ClientMode};
    /// use piper_gtk::ui::{App, ControllerOptions};
    ///
    /// let service = ratbag::connect(ClientMode::DryRun)?;
    /// let app = App::new(service, ControllerOptions::default());
    /// app.run(); // Blocks until window closes
    /// # Ok::<(), piper_gtk::ratbag::RatbagError>(())
    /// ```
    pub fn new(service: Rc<dyn DeviceService>, options: ControllerOptions) -> Self {
        // Create GTK4 Application
        let app = Application::builder()
            .application_id(APPLICATION_ID)
            .build();

        let controller = Rc::new(Controller::new(service, options));

        Self { app, controller }
    }

    /// Runs the GTK4 application
    ///
    /// This starts the GTK4 main loop. The function blocks until the
    /// application exits.
    pub fn run(self) {
        let controller = self.controller.clone();

        // Connect activate signal (called when app starts)
        self.app.connect_activate(move |app| {
            // A second launch just raises the existing window
            if let Some(window) = app.active_window() {
                window.present();
                return;
            }
            Self::build_ui(app, controller.clone());
        });

        // Run the application (blocks until exit)
        self.app.run_with_args::<&str>(&[]);
    }

    /// Loads custom CSS styling for the application
    ///
    /// Applies the CSS from `style.css` to the default display
    /// at APPLICATION priority level.
    fn load_css() {
        let provider = CssProvider::new();
        provider.load_from_string(include_str!("style.css"));

        match gdk::Display::default() {
            Some(display) => gtk4::style_context_add_provider_for_display(
                &display,
                &provider,
                gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
            ),
            None => warn!("no default display, skipping custom CSS"),
        }
    }

    /// Builds the main window UI
    ///
    /// This is called when the application activates. It creates
    /// the window and all components.
    fn build_ui(app: &Application, controller: Rc<Controller>) {
        Self::load_css();

        let title = match controller.device() {
            Some(device) => format!("Piper · {}", device.name),
            None => "Piper".to_string(),
        };

        // Create application window
        let window = ApplicationWindow::builder()
            .application(app)
            .title(title)
            .default_width(900)
            .default_height(600)
            .build();

        let stack = Stack::builder()
            .transition_type(StackTransitionType::SlideLeftRight)
            .vexpand(true)
            .build();

        let resolutions_page = build_pages(&stack, controller.clone());
        let has_pages = resolutions_page.is_some();

        window.set_titlebar(Some(&build_header_bar(&stack, has_pages)));

        let main_vbox = gtk4::Box::new(Orientation::Vertical, 0);

        // Banner at top
        let banner = StatusBanner::new(controller.clone());
        main_vbox.append(banner.widget());

        match &resolutions_page {
            Some(page) => {
                wire_up_handlers(controller.clone(), page);
                main_vbox.append(&stack);
            }
            None => {
                let diagnostic = controller
                    .selection()
                    .diagnostic()
                    .unwrap_or_else(|| "The device has no profiles.".to_string());
                main_vbox.append(&build_empty_state(&diagnostic));
            }
        }

        window.set_child(Some(&main_vbox));

        actions::setup_quit_action(app);
        actions::setup_save_action(app, controller);

        window.present();
    }
}
