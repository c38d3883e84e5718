use std::rc::Rc;

use crate::core::types::{Device, LedMode, Profile, Resolution, ResolutionCapability};

fn device_with(profiles: Vec<Profile>) -> Device {
    Device {
        id: "usb:046d:c24e:0".to_string(),
        name: "Test Mouse".to_string(),
        object_path: "/org/freedesktop/ratbag1/device/event5".to_string(),
        profiles: profiles.into_iter().map(Rc::new).collect(),
    }
}

#[test]
fn test_capability_codes() {
    assert_eq!(
        ResolutionCapability::from_code(1),
        Some(ResolutionCapability::IndividualReportRate)
    );
    assert_eq!(
        ResolutionCapability::from_code(2),
        Some(ResolutionCapability::SeparateXyResolution)
    );
    assert_eq!(ResolutionCapability::from_code(0), None);
    assert_eq!(ResolutionCapability::SeparateXyResolution.code(), 2);
}

#[test]
fn test_led_mode_codes_and_labels() {
    for mode in LedMode::ALL {
        assert_eq!(LedMode::from_code(mode.code()), Some(mode));
    }
    assert_eq!(LedMode::from_code(4), None);

    let labels: Vec<String> = LedMode::ALL.iter().map(|mode| mode.to_string()).collect();
    assert_eq!(labels, vec!["Off", "On", "Cycle", "Breathing"]);
}

#[test]
fn test_resolution_defaults() {
    let resolution = Resolution::new(2, (800, 800), 100, 8200);

    assert_eq!(resolution.index, 2);
    assert_eq!(resolution.report_rate, 1000);
    assert!(resolution.capabilities.is_empty());
    assert!(!resolution.separate_xy());
    assert_eq!(resolution.resolution_x.get(), 800);
    assert_eq!(resolution.resolution_y.get(), 800);
}

#[test]
fn test_resolution_capabilities() {
    let resolution = Resolution::new(0, (400, 400), 100, 8200)
        .with_capabilities(vec![ResolutionCapability::SeparateXyResolution])
        .with_report_rate(500);

    assert!(resolution.separate_xy());
    assert!(!resolution.has_capability(ResolutionCapability::IndividualReportRate));
    assert_eq!(resolution.report_rate, 500);
}

#[test]
fn test_active_profile_prefers_flagged_profile() {
    let device = device_with(vec![
        Profile {
            index: 0,
            ..Profile::default()
        },
        Profile {
            index: 1,
            is_active: true,
            ..Profile::default()
        },
    ]);

    let active = device.active_profile().unwrap();
    assert_eq!(active.index, 1);
}

#[test]
fn test_active_profile_falls_back_to_first() {
    let device = device_with(vec![
        Profile {
            index: 3,
            ..Profile::default()
        },
        Profile {
            index: 4,
            ..Profile::default()
        },
    ]);

    assert_eq!(device.active_profile().unwrap().index, 3);
}

#[test]
fn test_active_profile_none_without_profiles() {
    let device = device_with(Vec::new());
    assert!(device.active_profile().is_none());
    assert_eq!(device.to_string(), "Test Mouse");
}
