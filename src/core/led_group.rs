//! LED mode selector model
//!
//! One selector per [`LedMode`]. Picking a mode fires the observable
//! `requested_mode` event and asks the device service to apply it, which
//! currently answers `Unsupported`; the LED entity keeps its mode.

use std::rc::Rc;

use crate::core::anchor::Anchor;
use crate::core::property::Property;
use crate::core::types::{Led, LedMode};
use crate::ratbag::{DeviceService, RatbagError};

pub struct LedGroupModel {
    led: Rc<Led>,
    requested_mode: Property<Option<LedMode>>,
}

impl LedGroupModel {
    pub fn new(led: Rc<Led>) -> Self {
        Self {
            led,
            requested_mode: Property::new(None),
        }
    }

    pub fn led(&self) -> &Rc<Led> {
        &self.led
    }

    /// Modes offered, in display order
    pub fn modes(&self) -> &'static [LedMode] {
        &LedMode::ALL
    }

    pub fn anchor(&self) -> Anchor {
        Anchor::Led(self.led.index)
    }

    /// Last mode the user picked, observable by views
    pub fn requested_mode(&self) -> &Property<Option<LedMode>> {
        &self.requested_mode
    }

    /// Records the user's pick and forwards it to the service
    pub fn select_mode(&self, mode: LedMode, service: &dyn DeviceService) -> Result<(), RatbagError> {
        self.requested_mode.set(Some(mode));
        service.set_led_mode(&self.led, mode)
    }
}
