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

//! Controller tests
//!
//! Test for the MVC Controller logic

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{DeviceSelection, Device, DialogResponse, LedMode, Profile, Resolution};
use crate::ratbag::fixture::demo_device;
use crate::ratbag::{
    CommitTask, DeviceService, FixtureService, Operation, RatbagError, UnavailableService,
};
use crate::ui::{Controller, ControllerOptions, StatusKind, StatusMessage};

/// Helper: Controller over a shared fixture service
fn create_controller(devices: Vec<Device>, options: ControllerOptions) -> (Rc<FixtureService>, Controller) {
    let service = Rc::new(FixtureService::new(devices));
    let controller = Controller::new(service.clone(), options);
    (service, controller)
}

/// Service whose device listing fails, like a missing daemon
struct UnreachableService;

impl DeviceService for UnreachableService {
    fn list_devices(&self) -> Result<Vec<Rc<Device>>, RatbagError> {
        Err(RatbagError::ServiceUnavailable("is ratbagd running?".to_string()))
    }

    fn commit(&self, _device: &Device) -> CommitTask {
        Box::new(|| Ok(()))
    }
}

#[test]
fn test_controller_with_one_device() {
    let (_service, controller) =
        create_controller(vec![demo_device("G500s", true)], ControllerOptions::default());

    assert!(matches!(controller.selection(), DeviceSelection::Single(_)));
    assert!(controller.has_content());
    assert_eq!(controller.resolution_rows().len(), 5);
    assert_eq!(controller.button_maps().len(), 8);
    assert_eq!(controller.led_groups().len(), 2);
    assert_eq!(controller.status().get(), None);
}

#[test]
fn test_rows_follow_resolution_order() {
    let (_service, controller) =
        create_controller(vec![demo_device("G500s", true)], ControllerOptions::default());

    let labels: Vec<String> = controller
        .resolution_rows()
        .iter()
        .map(|row| row.index_label())
        .collect();
    assert_eq!(
        labels,
        vec!["Resolution 1", "Resolution 2", "Resolution 3", "Resolution 4", "Resolution 5"]
    );
}

#[test]
fn test_controller_without_devices() {
    let (_service, controller) = create_controller(Vec::new(), ControllerOptions::default());

    assert!(controller.device().is_none());
    assert!(!controller.has_content());
    assert!(controller.resolution_rows().is_empty());
    assert!(controller.selection().diagnostic().is_some());
    assert!(matches!(controller.save(), Err(RatbagError::NoDeviceSelected)));
}

/// Helper: device with a single resolution and no buttons or LEDs
fn small_device(name: &str) -> Device {
    Device {
        id: format!("usb:{}", name.to_lowercase()),
        name: name.to_string(),
        object_path: String::new(),
        profiles: vec![Rc::new(Profile {
            index: 0,
            is_active: true,
            resolutions: vec![Rc::new(Resolution::new(0, (1000, 1000), 200, 4000))],
            ..Profile::default()
        })],
    }
}

#[test]
fn test_controller_with_unreachable_service() {
    let controller = Controller::new(Rc::new(UnreachableService), ControllerOptions::default());

    assert!(controller.device().is_none());
    let diagnostic = controller.selection().diagnostic().unwrap();
    assert!(diagnostic.contains("ratbagd"), "got: {}", diagnostic);
}

#[test]
fn test_controller_when_daemon_cannot_be_reached() {
    let error = RatbagError::ServiceUnavailable(
        "org.freedesktop.ratbag1 not found on the system bus - is ratbagd running?".to_string(),
    );
    let controller = Controller::new(
        Rc::new(UnavailableService::new(&error)),
        ControllerOptions::default(),
    );

    assert!(controller.device().is_none());
    assert!(!controller.has_content());

    let diagnostic = controller.selection().diagnostic().unwrap();
    assert!(diagnostic.starts_with("ratbagd is not available"), "got: {}", diagnostic);
    assert!(diagnostic.contains("is ratbagd running?"));
    assert!(matches!(controller.save(), Err(RatbagError::NoDeviceSelected)));
}

#[test]
fn test_controller_with_several_devices_warns() {
    let (_service, controller) = create_controller(
        vec![demo_device("G500s", true), small_device("G303")],
        ControllerOptions::default(),
    );

    assert_eq!(controller.device().unwrap().name, "G500s");

    // Models come from the chosen device only
    assert_eq!(controller.resolution_rows().len(), 5);
    assert_eq!(controller.button_maps().len(), 8);
    assert_eq!(controller.led_groups().len(), 2);

    let status = controller.status().get().unwrap();
    assert_eq!(status.kind, StatusKind::Warning);
    assert!(status.text.contains("G303"));
}

#[test]
fn test_preferred_device_option() {
    let (_service, controller) = create_controller(
        vec![demo_device("G500s", true), demo_device("G303", false)],
        ControllerOptions {
            preferred_device: Some("G303".to_string()),
            ..ControllerOptions::default()
        },
    );

    assert_eq!(controller.device().unwrap().name, "G303");
    // G303 lacks separate X/Y, so its rows hide the Y editor
    assert!(!controller.resolution_rows()[0].y_visible());
}

#[test]
fn test_preferred_device_supplies_the_models() {
    let (_service, controller) = create_controller(
        vec![demo_device("G500s", true), small_device("G303")],
        ControllerOptions {
            preferred_device: Some("G303".to_string()),
            ..ControllerOptions::default()
        },
    );

    let rows = controller.resolution_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].adjustment_x().upper(), 4000);
    assert!(controller.button_maps().is_empty());
    assert!(controller.led_groups().is_empty());
}

#[test]
fn test_rows_toggle_independently_by_default() {
    let (_service, controller) =
        create_controller(vec![demo_device("G500s", true)], ControllerOptions::default());

    assert_eq!(controller.activate_row(0), Some(true));
    assert_eq!(controller.activate_row(2), Some(true));

    let rows = controller.resolution_rows();
    assert!(rows[0].is_expanded());
    assert!(rows[2].is_expanded());

    assert_eq!(controller.activate_row(0), Some(false));
    assert!(!rows[0].is_expanded());
    assert!(rows[2].is_expanded());
}

#[test]
fn test_single_expansion_collapses_other_rows() {
    let (_service, controller) = create_controller(
        vec![demo_device("G500s", true)],
        ControllerOptions {
            single_expansion: true,
            ..ControllerOptions::default()
        },
    );

    controller.activate_row(0);
    controller.activate_row(3);

    let expanded: Vec<bool> = controller
        .resolution_rows()
        .iter()
        .map(|row| row.is_expanded())
        .collect();
    assert_eq!(expanded, vec![false, false, false, true, false]);

    // Collapsing leaves the rest alone
    assert_eq!(controller.activate_row(3), Some(false));
    assert!(controller.resolution_rows().iter().all(|row| !row.is_expanded()));
}

#[test]
fn test_activate_row_out_of_range() {
    let (_service, controller) =
        create_controller(vec![demo_device("G500s", true)], ControllerOptions::default());

    assert_eq!(controller.activate_row(5), None);
}

#[test]
fn test_save_commits_once_after_many_edits() {
    let (service, controller) =
        create_controller(vec![demo_device("G500s", true)], ControllerOptions::default());

    let rows = controller.resolution_rows();
    rows[0].adjustment_x().set_value(500);
    rows[1].adjustment_y().set_value(900);
    rows[2].adjustment_x().set_value(20_000);

    let device = controller.device().unwrap().clone();
    let profile = device.active_profile().unwrap();
    assert_eq!(profile.resolutions[0].resolution_x.get(), 500);
    assert_eq!(profile.resolutions[1].resolution_y.get(), 900);
    assert_eq!(profile.resolutions[2].resolution_x.get(), 8200);

    let task = controller.save().unwrap();
    assert_eq!(
        controller.status().get(),
        Some(StatusMessage::new(StatusKind::Info, "Saving changes to the device…"))
    );
    assert_eq!(service.commit_count(), 0);

    controller.finish_commit(task());

    assert_eq!(service.commit_count(), 1);
    let status = controller.status().get().unwrap();
    assert_eq!(status.kind, StatusKind::Info);
    assert!(status.text.starts_with("Changes saved at "));
}

#[test]
fn test_failed_commit_shows_error() {
    let (service, controller) =
        create_controller(vec![demo_device("G500s", true)], ControllerOptions::default());
    service.set_fail_commits(true);

    let task = controller.save().unwrap();
    controller.finish_commit(task());

    let status = controller.status().get().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("G500s"));
}

#[test]
fn test_unsupported_operations_warn_and_change_nothing() {
    let (_service, controller) =
        create_controller(vec![demo_device("G500s", true)], ControllerOptions::default());

    assert!(!controller.supports(Operation::AddResolution));
    assert!(!controller.supports(Operation::DeleteResolution));

    let result = controller.add_resolution();
    assert!(matches!(result, Err(RatbagError::Unsupported(Operation::AddResolution))));
    assert_eq!(controller.status().get().unwrap().kind, StatusKind::Warning);

    controller.dismiss_status();
    assert_eq!(controller.status().get(), None);

    let result = controller.delete_resolution(1);
    assert!(matches!(result, Err(RatbagError::Unsupported(Operation::DeleteResolution))));
    assert_eq!(controller.status().get().unwrap().kind, StatusKind::Warning);

    let profile = controller.device().unwrap().active_profile().unwrap();
    assert_eq!(profile.resolutions.len(), 5);
    assert_eq!(controller.resolution_rows().len(), 5);
}

#[test]
fn test_button_dialog_paths_through_controller() {
    let (_service, controller) =
        create_controller(vec![demo_device("G500s", true)], ControllerOptions::default());
    let model = &controller.button_maps()[0];

    model.set_pending_mapping(6);
    let cancelled = model.respond(DialogResponse::Cancel, controller.service().as_ref());
    assert!(matches!(cancelled, Ok(DialogResponse::Cancel)));
    assert_eq!(model.button().button_mapping.get(), 1);

    model.set_pending_mapping(6);
    let accepted = model
        .respond(DialogResponse::Accept, controller.service().as_ref())
        .map(|_| ());
    controller.report(&accepted);

    assert_eq!(model.button().button_mapping.get(), 1);
    assert_eq!(controller.status().get().unwrap().kind, StatusKind::Warning);
}

#[test]
fn test_led_selection_reports_warning() {
    let (_service, controller) =
        create_controller(vec![demo_device("G500s", true)], ControllerOptions::default());
    let group = &controller.led_groups()[0];

    let result = group.select_mode(LedMode::Cycle, controller.service().as_ref());
    controller.report(&result);

    assert_eq!(group.requested_mode().get(), Some(LedMode::Cycle));
    assert_eq!(group.led().mode.get(), LedMode::On);
    assert_eq!(controller.status().get().unwrap().kind, StatusKind::Warning);
}

#[test]
fn test_successful_report_keeps_banner() {
    let (_service, controller) = create_controller(
        vec![demo_device("G500s", true), demo_device("G303", true)],
        ControllerOptions::default(),
    );
    let before = controller.status().get();

    controller.report(&Ok(()));
    assert_eq!(controller.status().get(), before);
}

#[test]
fn test_status_is_observable() {
    let (_service, controller) =
        create_controller(vec![demo_device("G500s", true)], ControllerOptions::default());

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    controller
        .status()
        .subscribe(move |status| sink.borrow_mut().push(status.as_ref().map(|s| s.kind)));

    controller.report(&Err(RatbagError::CommitFailed("usb reset".to_string())));
    controller.dismiss_status();

    assert_eq!(*seen.borrow(), vec![Some(StatusKind::Error), None]);
}
