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

//! Device service tests
//!
//! Exercises the in-process service and the trait defaults.
//! Note: Tests needing a running ratbagd are marked #[ignore].

use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    core::{LedMode, Resolution, ResolutionCapability, ResolutionRowModel},
    ratbag::{
        self, dbus::forward_resolution, fixture::demo_device, ClientMode, DeviceService,
        FixtureService, Operation, RatbagError, UnavailableService,
    },
};

/// Helper: resolution whose `SetResolution` calls are recorded
fn recorded_resolution(separate_xy: bool) -> (Rc<Resolution>, Rc<RefCell<Vec<(u32, u32)>>>) {
    let capabilities = if separate_xy {
        vec![ResolutionCapability::SeparateXyResolution]
    } else {
        Vec::new()
    };
    let resolution =
        Rc::new(Resolution::new(0, (800, 800), 100, 8200).with_capabilities(capabilities));

    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    forward_resolution(&resolution, move |x, y| sink.borrow_mut().push((x, y)));

    (resolution, calls)
}

#[test]
fn test_dryrun_serves_demo_device() {
    let service = ratbag::connect(ClientMode::DryRun).unwrap();
    let devices = service.list_devices().unwrap();

    assert_eq!(devices.len(), 1);
    assert!(devices[0].id.starts_with("fixture:"));
    assert!(devices[0].object_path.is_empty());
}

#[test]
fn test_demo_device_layout() {
    let device = demo_device("Test Mouse", true);
    let profile = device.active_profile().unwrap();

    assert_eq!(device.id, "fixture:test-mouse");
    assert_eq!(device.profiles.len(), 2);
    assert_eq!(profile.index, 0);

    let dpis: Vec<u32> = profile
        .resolutions
        .iter()
        .map(|resolution| resolution.resolution_x.get())
        .collect();
    assert_eq!(dpis, vec![400, 800, 1600, 3200, 6400]);
    assert!(profile.resolutions.iter().all(|r| r.separate_xy()));

    assert_eq!(profile.buttons.len(), 8);
    assert_eq!(profile.buttons[0].button_mapping.get(), 1);

    assert_eq!(profile.leds.len(), 2);
    assert_eq!(profile.leds[1].mode.get(), LedMode::Breathing);
}

#[test]
fn test_demo_device_without_separate_xy() {
    let device = demo_device("Test Mouse", false);
    let profile = device.active_profile().unwrap();

    for resolution in &profile.resolutions {
        assert!(!resolution.separate_xy());
        assert!(resolution.has_capability(ResolutionCapability::IndividualReportRate));
    }
}

#[test]
fn test_fixture_preserves_listing_order() {
    let service = FixtureService::new(vec![demo_device("First", true), demo_device("Second", true)]);
    let names: Vec<String> = service
        .list_devices()
        .unwrap()
        .iter()
        .map(|device| device.name.clone())
        .collect();

    assert_eq!(names, vec!["First", "Second"]);
}

#[test]
fn test_fixture_commit_runs_lazily() {
    let service = FixtureService::demo();
    let devices = service.list_devices().unwrap();

    let task = service.commit(&devices[0]);
    assert_eq!(service.commit_count(), 0, "preparing a commit writes nothing");

    assert!(task().is_ok());
    assert_eq!(service.commit_count(), 1);
}

#[test]
fn test_fixture_commit_failure() {
    let service = FixtureService::demo();
    let devices = service.list_devices().unwrap();
    service.set_fail_commits(true);

    let result = service.commit(&devices[0])();

    assert!(matches!(result, Err(RatbagError::CommitFailed(_))));
    assert_eq!(service.commit_count(), 1);
}

#[test]
fn test_commit_task_runs_on_another_thread() {
    let service = FixtureService::demo();
    let devices = service.list_devices().unwrap();

    let task = service.commit(&devices[0]);
    let result = std::thread::spawn(task).join().unwrap();

    assert!(result.is_ok());
    assert_eq!(service.commit_count(), 1);
}

#[test]
fn test_default_operations_are_unsupported() {
    let service = FixtureService::demo();
    let device = service.list_devices().unwrap().remove(0);
    let profile = device.active_profile().unwrap();

    for operation in [
        Operation::AddResolution,
        Operation::DeleteResolution,
        Operation::WriteButtonMapping,
        Operation::SetLedMode,
    ] {
        assert!(!service.supports(operation));
    }

    assert!(matches!(
        service.add_resolution(&profile),
        Err(RatbagError::Unsupported(Operation::AddResolution))
    ));
    assert!(matches!(
        service.delete_resolution(&profile, &profile.resolutions[0]),
        Err(RatbagError::Unsupported(Operation::DeleteResolution))
    ));
    assert!(matches!(
        service.set_button_mapping(&profile.buttons[0], 3),
        Err(RatbagError::Unsupported(Operation::WriteButtonMapping))
    ));
    assert!(matches!(
        service.set_led_mode(&profile.leds[0], LedMode::Off),
        Err(RatbagError::Unsupported(Operation::SetLedMode))
    ));

    // Nothing was changed behind the refusal
    assert_eq!(profile.resolutions.len(), 5);
    assert_eq!(profile.leds[0].mode.get(), LedMode::On);
}

#[test]
fn test_error_classification() {
    let unsupported = RatbagError::Unsupported(Operation::SetLedMode);
    assert!(unsupported.is_unsupported());
    assert_eq!(unsupported.to_string(), "Not supported yet: changing LED modes");

    assert!(!RatbagError::NoDeviceSelected.is_unsupported());
    assert!(!RatbagError::CommitFailed("io".to_string()).is_unsupported());
}

#[test]
fn test_missing_daemon_maps_to_service_unavailable() {
    let error: RatbagError = zbus::Error::FDO(Box::new(zbus::fdo::Error::ServiceUnknown(
        "The name org.freedesktop.ratbag1 was not provided by any .service files".to_string(),
    )))
    .into();

    assert!(matches!(error, RatbagError::ServiceUnavailable(_)));
}

#[test]
fn test_error_text_alone_does_not_mean_missing_daemon() {
    let error: RatbagError =
        zbus::Error::Failure("org.freedesktop.DBus.Error.ServiceUnknown".to_string()).into();
    assert!(matches!(error, RatbagError::DBus(_)));
}

#[test]
fn test_other_bus_errors_stay_dbus_errors() {
    let error: RatbagError = zbus::Error::Failure("timeout".to_string()).into();
    assert!(matches!(error, RatbagError::DBus(_)));
}

#[test]
fn test_write_through_without_separate_xy_sends_x_for_both_axes() {
    let (resolution, calls) = recorded_resolution(false);
    let row = ResolutionRowModel::new(Rc::clone(&resolution));

    row.adjustment_x().set_value(1600);

    assert_eq!(*calls.borrow(), vec![(1600, 1600)]);
    assert_eq!(resolution.resolution_y.get(), 1600);
}

#[test]
fn test_write_through_with_separate_xy_sends_both_axes() {
    let (resolution, calls) = recorded_resolution(true);
    let row = ResolutionRowModel::new(Rc::clone(&resolution));

    row.adjustment_x().set_value(1600);
    row.adjustment_y().set_value(1200);

    assert_eq!(*calls.borrow(), vec![(1600, 800), (1600, 1200)]);
}

#[test]
fn test_unavailable_service_reports_reason_when_listing() {
    let service = UnavailableService::new(&RatbagError::ServiceUnavailable(
        "is ratbagd running?".to_string(),
    ));

    match service.list_devices() {
        Err(RatbagError::ServiceUnavailable(reason)) => assert_eq!(reason, "is ratbagd running?"),
        other => panic!("Expected ServiceUnavailable, got: {:?}", other),
    }

    let device = demo_device("Test Mouse", true);
    assert!(matches!(service.commit(&device)(), Err(RatbagError::NoDeviceSelected)));
}

#[test]
fn test_connect_or_unavailable_dryrun_is_fixture() {
    let service = ratbag::connect_or_unavailable(ClientMode::DryRun);
    assert_eq!(service.list_devices().unwrap().len(), 1);
}

#[test]
#[ignore] // Requires ratbagd on the system bus
fn test_live_lists_devices() {
    let service = ratbag::connect(ClientMode::Live).unwrap();
    let devices = service.list_devices().unwrap();

    for device in devices {
        assert!(!device.object_path.is_empty());
    }
}
