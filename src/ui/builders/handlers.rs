//! Event handler setup
//!
//! Wires up the event handlers of the resolutions page:
//! - Row activation (expand/collapse, add resolution)
//! - Delete buttons

use gtk4::prelude::*;
use std::rc::Rc;
use tracing::debug;

use crate::ui::builders::pages::ResolutionsPage;
use crate::ui::Controller;

/// Wires up all event handlers for the resolutions page
pub fn wire_up_handlers(controller: Rc<Controller>, page: &ResolutionsPage) {
    // ============================================================================
    // Row activation
    // ============================================================================
    {
        let controller = controller.clone();
        let add_row = page.add_row.clone();

        page.list_box.connect_row_activated(move |_list_box, row| {
            if *row == add_row {
                // Already shown in the status banner
                if let Err(e) = controller.add_resolution() {
                    debug!(error = %e, "add resolution refused");
                }
                return;
            }

            let index = row.index();
            if index < 0 {
                return;
            }
            if let Some(expanded) = controller.activate_row(index as usize) {
                debug!(row = index, expanded, "resolution row toggled");
            }
        });
    }

    // ============================================================================
    // Delete buttons
    // ============================================================================
    for (index, row) in page.rows.iter().enumerate() {
        let controller = controller.clone();
        row.delete_button().connect_clicked(move |_| {
            // Already shown in the status banner
            if let Err(e) = controller.delete_resolution(index) {
                debug!(row = index, error = %e, "delete resolution refused");
            }
        });
    }
}
