//! src/core/types.rs
//!
//! Device entity types
//!
//! This module defines the entities the device service exposes:
//! - `Device`: one mouse, with its profiles
//! - `Profile`: a configuration set of resolutions, buttons and LEDs
//! - `Resolution`: one DPI step with observable X/Y values
//! - `Button`: one physical button and its mapping
//! - `Led`: one LED and its mode
//!
//! Entities are shared as `Rc` handles. Mutable fields are [`Property`]
//! handles so views and the service can observe each other's writes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use crate::core::property::Property;

/// Optional per-resolution hardware features
///
/// Wire codes follow libratbag's resolution capability enum.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ResolutionCapability {
    /// Report rate can differ between resolutions
    IndividualReportRate,
    /// X and Y sensitivity can be set independently
    SeparateXyResolution,
}

impl ResolutionCapability {
    /// Maps a libratbag capability code, `None` for codes we don't know
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::IndividualReportRate),
            2 => Some(Self::SeparateXyResolution),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::IndividualReportRate => 1,
            Self::SeparateXyResolution => 2,
        }
    }
}

/// LED modes offered in the LED page
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum LedMode {
    Off,
    On,
    Cycle,
    Breathing,
}

impl LedMode {
    /// All modes, in the order they are presented
    pub const ALL: [LedMode; 4] = [LedMode::Off, LedMode::On, LedMode::Cycle, LedMode::Breathing];

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            2 => Some(Self::Cycle),
            3 => Some(Self::Breathing),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::Off => 0,
            Self::On => 1,
            Self::Cycle => 2,
            Self::Breathing => 3,
        }
    }
}

impl fmt::Display for LedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedMode::Off => write!(f, "Off"),
            LedMode::On => write!(f, "On"),
            LedMode::Cycle => write!(f, "Cycle"),
            LedMode::Breathing => write!(f, "Breathing"),
        }
    }
}

/// One resolution (DPI) step of a profile
#[derive(Debug)]
pub struct Resolution {
    /// 0-based index within the profile
    pub index: u32,
    pub capabilities: Vec<ResolutionCapability>,
    pub min_res: u32,
    pub max_res: u32,
    /// Report rate in Hz
    pub report_rate: u32,
    pub resolution_x: Property<u32>,
    pub resolution_y: Property<u32>,
}

impl Resolution {
    /// Creates a resolution without capabilities and a 1000 Hz report rate
    pub fn new(index: u32, resolution: (u32, u32), min_res: u32, max_res: u32) -> Self {
        Self {
            index,
            capabilities: Vec::new(),
            min_res,
            max_res,
            report_rate: 1000,
            resolution_x: Property::new(resolution.0),
            resolution_y: Property::new(resolution.1),
        }
    }

    pub fn with_capabilities(mut self, capabilities: Vec<ResolutionCapability>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_report_rate(mut self, report_rate: u32) -> Self {
        self.report_rate = report_rate;
        self
    }

    pub fn has_capability(&self, capability: ResolutionCapability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Whether X and Y can be edited independently
    pub fn separate_xy(&self) -> bool {
        self.has_capability(ResolutionCapability::SeparateXyResolution)
    }
}

/// One physical button
#[derive(Debug)]
pub struct Button {
    pub index: u32,
    /// The logical button this physical button sends
    pub button_mapping: Property<u32>,
}

impl Button {
    pub fn new(index: u32, button_mapping: u32) -> Self {
        Self {
            index,
            button_mapping: Property::new(button_mapping),
        }
    }
}

/// One LED
#[derive(Debug)]
pub struct Led {
    pub index: u32,
    pub mode: Property<LedMode>,
}

impl Led {
    pub fn new(index: u32, mode: LedMode) -> Self {
        Self {
            index,
            mode: Property::new(mode),
        }
    }
}

/// A configuration set stored on the device
#[derive(Debug, Default)]
pub struct Profile {
    pub index: u32,
    pub is_active: bool,
    pub resolutions: Vec<Rc<Resolution>>,
    pub buttons: Vec<Rc<Button>>,
    pub leds: Vec<Rc<Led>>,
}

/// A mouse managed by the device service
#[derive(Debug)]
pub struct Device {
    /// Service-side identifier (e.g. `usb:046d:c24e:0`)
    pub id: String,
    /// Human readable name
    pub name: String,
    /// Object path on the service bus; empty for fixture devices
    pub object_path: String,
    pub profiles: Vec<Rc<Profile>>,
}

impl Device {
    /// Returns the active profile
    ///
    /// Falls back to the first profile when none is flagged active, and
    /// returns `None` only for a device without profiles.
    pub fn active_profile(&self) -> Option<Rc<Profile>> {
        self.profiles
            .iter()
            .find(|profile| profile.is_active)
            .or_else(|| self.profiles.first())
            .cloned()
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
