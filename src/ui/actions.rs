//! GTK Action setup for the application
//!
//! This module contains all GTK action definitions (quit, save)
//! and their setup functions

use gtk4::{gio, prelude::*, Application};
use std::rc::Rc;
use tracing::error;

use crate::ratbag::RatbagError;
use crate::ui::Controller;

/// Sets up the quit action
///
/// Creates a GTK action that quits the application when triggered.
pub fn setup_quit_action(app: &Application) {
    let quit_action = gio::SimpleAction::new("quit", None);
    let app_for_quit = app.clone();

    quit_action.connect_activate(move |_, _| {
        app_for_quit.quit();
    });

    app.add_action(&quit_action);
    app.set_accels_for_action("app.quit", &["<Ctrl>q"]);
}

/// Sets up the save action
///
/// Creates a GTK action that commits the selected device. The commit runs on
/// a blocking worker; the action stays disabled until it finishes and the
/// result is shown in the status banner. Disabled outright without a device.
pub fn setup_save_action(app: &Application, controller: Rc<Controller>) {
    let save_action = gio::SimpleAction::new("save", None);
    save_action.set_enabled(controller.device().is_some());

    save_action.connect_activate(move |action, _| {
        let task = match controller.save() {
            Ok(task) => task,
            Err(e) => {
                controller.report(&Err(e));
                return;
            }
        };

        action.set_enabled(false);

        let controller = controller.clone();
        let action = action.clone();
        glib::spawn_future_local(async move {
            let result = gio::spawn_blocking(task).await.unwrap_or_else(|_| {
                error!("commit worker panicked");
                Err(RatbagError::CommitFailed("commit worker panicked".to_string()))
            });

            controller.finish_commit(result);
            action.set_enabled(true);
        });
    });

    app.add_action(&save_action);
    app.set_accels_for_action("app.save", &["<Ctrl>s"]);
}
