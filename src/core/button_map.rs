//! Button mapping model
//!
//! Backs one "Button N" entry on the buttons page and the modal dialog it
//! opens. Accepting the dialog hands the pending mapping to the device
//! service; until the daemon can write mappings that call reports
//! `Unsupported` and the button entity is left untouched.

use std::cell::Cell;
use std::rc::Rc;

use crate::core::anchor::Anchor;
use crate::core::types::Button;
use crate::ratbag::{DeviceService, RatbagError};

/// How the mapping dialog was closed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DialogResponse {
    /// "Set" was clicked
    Accept,
    /// "Cancel" was clicked or the dialog was closed
    Cancel,
}

/// Toolkit-agnostic state behind one button-map button
pub struct ButtonMapModel {
    button: Rc<Button>,
    pending_mapping: Cell<u32>,
}

impl ButtonMapModel {
    pub fn new(button: Rc<Button>) -> Self {
        let pending_mapping = Cell::new(button.button_mapping.get());
        Self {
            button,
            pending_mapping,
        }
    }

    pub fn button(&self) -> &Rc<Button> {
        &self.button
    }

    /// Label reflecting the current mapping
    pub fn label(&self) -> String {
        format!("Button {}", self.button.button_mapping.get())
    }

    /// Where the button sits on the mouse map
    pub fn anchor(&self) -> Anchor {
        Anchor::Button(self.button.index)
    }

    /// Mapping the dialog would apply on accept
    pub fn pending_mapping(&self) -> u32 {
        self.pending_mapping.get()
    }

    pub fn set_pending_mapping(&self, mapping: u32) {
        self.pending_mapping.set(mapping);
    }

    /// Resolves a dialog response
    ///
    /// # Returns
    ///
    /// * `Ok(Cancel)` - Nothing was sent; the pending mapping is reset
    /// * `Ok(Accept)` - The service accepted the new mapping
    /// * `Err(RatbagError::Unsupported)` - The service cannot write mappings yet
    pub fn respond(
        &self,
        response: DialogResponse,
        service: &dyn DeviceService,
    ) -> Result<DialogResponse, RatbagError> {
        match response {
            DialogResponse::Accept => {
                service.set_button_mapping(&self.button, self.pending_mapping.get())?;
                Ok(DialogResponse::Accept)
            }
            DialogResponse::Cancel => {
                self.pending_mapping.set(self.button.button_mapping.get());
                Ok(DialogResponse::Cancel)
            }
        }
    }
}
