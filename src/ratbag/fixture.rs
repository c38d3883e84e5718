//! In-process device service
//!
//! Backs `--dry-run` and the test suites: devices live in memory and commits
//! are counted and logged instead of reaching hardware.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

use crate::core::types::{
    Button, Device, Led, LedMode, Profile, Resolution, ResolutionCapability,
};
use crate::ratbag::{CommitTask, DeviceService, RatbagError};

/// A [`DeviceService`] over a fixed list of in-memory devices
pub struct FixtureService {
    devices: Vec<Rc<Device>>,
    commits: Arc<AtomicUsize>,
    fail_commits: Arc<AtomicBool>,
}

impl FixtureService {
    /// Serves `devices` in the given order
    pub fn new(devices: Vec<Device>) -> Self {
        Self {
            devices: devices.into_iter().map(Rc::new).collect(),
            commits: Arc::new(AtomicUsize::new(0)),
            fail_commits: Arc::new(AtomicBool::new(false)),
        }
    }

    /// One demo mouse with separate X/Y support
    pub fn demo() -> Self {
        Self::new(vec![demo_device("Logitech Gaming Mouse G500s (demo)", true)])
    }

    /// Number of commit tasks that have run
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Makes subsequent commits fail, for exercising error paths
    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

impl DeviceService for FixtureService {
    fn list_devices(&self) -> Result<Vec<Rc<Device>>, RatbagError> {
        Ok(self.devices.clone())
    }

    fn commit(&self, device: &Device) -> CommitTask {
        let commits = Arc::clone(&self.commits);
        let fail = Arc::clone(&self.fail_commits);
        let name = device.name.clone();

        Box::new(move || {
            commits.fetch_add(1, Ordering::SeqCst);
            if fail.load(Ordering::SeqCst) {
                return Err(RatbagError::CommitFailed(format!("{} rejected the changes", name)));
            }
            info!(device = %name, "dry-run commit, nothing written");
            Ok(())
        })
    }
}

/// Builds a plausible mouse: 5 resolutions, 8 buttons, 2 LEDs
///
/// Without `separate_xy` the resolutions lack the separate X/Y capability.
pub fn demo_device(name: &str, separate_xy: bool) -> Device {
    let capabilities = if separate_xy {
        vec![
            ResolutionCapability::IndividualReportRate,
            ResolutionCapability::SeparateXyResolution,
        ]
    } else {
        vec![ResolutionCapability::IndividualReportRate]
    };

    let resolutions = [400u32, 800, 1600, 3200, 6400]
        .iter()
        .enumerate()
        .map(|(index, dpi)| {
            Rc::new(
                Resolution::new(index as u32, (*dpi, *dpi), 100, 8200)
                    .with_capabilities(capabilities.clone())
                    .with_report_rate(1000),
            )
        })
        .collect();

    let buttons = (0..8u32).map(|index| Rc::new(Button::new(index, index + 1))).collect();

    let leds = vec![
        Rc::new(Led::new(0, LedMode::On)),
        Rc::new(Led::new(1, LedMode::Breathing)),
    ];

    let id = name.to_lowercase().replace(' ', "-");
    Device {
        id: format!("fixture:{}", id),
        name: name.to_string(),
        object_path: String::new(),
        profiles: vec![
            Rc::new(Profile {
                index: 0,
                is_active: true,
                resolutions,
                buttons,
                leds,
            }),
            Rc::new(Profile {
                index: 1,
                is_active: false,
                ..Profile::default()
            }),
        ],
    }
}
