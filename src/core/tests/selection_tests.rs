use std::rc::Rc;

use crate::core::selection::{DeviceSelection, NO_DEVICE_MESSAGE};
use crate::core::types::Device;

/// Helper: a profile-less device
fn device(name: &str, id: &str) -> Rc<Device> {
    Rc::new(Device {
        id: id.to_string(),
        name: name.to_string(),
        object_path: String::new(),
        profiles: Vec::new(),
    })
}

#[test]
fn test_no_devices() {
    let selection = DeviceSelection::select(Vec::new(), None);

    assert!(selection.device().is_none());
    assert_eq!(selection.diagnostic().as_deref(), Some(NO_DEVICE_MESSAGE));
}

#[test]
fn test_single_device() {
    let selection = DeviceSelection::select(vec![device("G500s", "usb:1")], None);

    assert!(matches!(selection, DeviceSelection::Single(_)));
    assert_eq!(selection.device().unwrap().name, "G500s");
    assert!(selection.diagnostic().is_none());
}

#[test]
fn test_multiple_devices_pick_first_and_list_ignored() {
    let devices = vec![
        device("G500s", "usb:1"),
        device("G303", "usb:2"),
        device("MX Master", "usb:3"),
    ];

    let selection = DeviceSelection::select(devices, None);

    match &selection {
        DeviceSelection::Multiple { chosen, ignored } => {
            assert_eq!(chosen.name, "G500s");
            assert_eq!(ignored, &vec!["G303".to_string(), "MX Master".to_string()]);
        }
        other => panic!("expected Multiple, got {:?}", other),
    }

    let diagnostic = selection.diagnostic().unwrap();
    assert!(diagnostic.contains("configuring G500s"));
    assert!(diagnostic.contains("G303, MX Master"));
}

#[test]
fn test_preferred_device_by_name() {
    let devices = vec![device("G500s", "usb:1"), device("G303", "usb:2")];

    let selection = DeviceSelection::select(devices, Some("G303"));

    assert_eq!(selection.device().unwrap().name, "G303");
    if let DeviceSelection::Multiple { ignored, .. } = &selection {
        assert_eq!(ignored, &vec!["G500s".to_string()]);
    } else {
        panic!("expected Multiple");
    }
}

#[test]
fn test_preferred_device_by_id() {
    let devices = vec![device("G500s", "usb:1"), device("G303", "usb:2")];

    let selection = DeviceSelection::select(devices, Some("usb:2"));
    assert_eq!(selection.device().unwrap().name, "G303");
}

#[test]
fn test_unknown_preferred_device_falls_back_to_first() {
    let devices = vec![device("G500s", "usb:1"), device("G303", "usb:2")];

    let selection = DeviceSelection::select(devices, Some("Razer"));
    assert_eq!(selection.device().unwrap().name, "G500s");
}

#[test]
fn test_preferred_single_device_is_single() {
    let selection = DeviceSelection::select(vec![device("G500s", "usb:1")], Some("G500s"));
    assert!(matches!(selection, DeviceSelection::Single(_)));
}

#[test]
fn test_unavailable_carries_reason() {
    let selection = DeviceSelection::unavailable("ratbagd is not available");

    assert!(selection.device().is_none());
    assert_eq!(
        selection.diagnostic().as_deref(),
        Some("ratbagd is not available")
    );
}
