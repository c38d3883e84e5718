// Copyright 2025 bakri (tidynest@proton.me)
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

//! ratbagd over the system bus
//!
//! Thin blocking `zbus` proxies for the `org.freedesktop.ratbag1` objects and
//! the code that turns them into [`Device`] entities.
//!
//! # Write-through
//!
//! Every loaded resolution forwards changes of its X/Y properties to the
//! daemon with `SetResolution(x, y)` as they happen. Resolutions without
//! separate X/Y support send `SetResolution(x, x)`. The daemon keeps them
//! pending until `Commit()`.

use std::rc::Rc;
use tracing::{debug, info, warn};
use zbus::blocking::Connection;
use zbus::proxy::CacheProperties;
use zbus::zvariant::OwnedObjectPath;

use crate::core::types::{
    Button, Device, Led, LedMode, Profile, Resolution, ResolutionCapability,
};
use crate::ratbag::{CommitTask, DeviceService, RatbagError};

#[zbus::proxy(
    interface = "org.freedesktop.ratbag1.Manager",
    default_service = "org.freedesktop.ratbag1",
    default_path = "/org/freedesktop/ratbag1"
)]
trait RatbagManager {
    #[zbus(property)]
    fn devices(&self) -> zbus::Result<Vec<OwnedObjectPath>>;
}

#[zbus::proxy(
    interface = "org.freedesktop.ratbag1.Device",
    default_service = "org.freedesktop.ratbag1"
)]
trait RatbagDevice {
    #[zbus(property)]
    fn id(&self) -> zbus::Result<String>;

    #[zbus(property)]
    fn description(&self) -> zbus::Result<String>;

    #[zbus(property)]
    fn profiles(&self) -> zbus::Result<Vec<OwnedObjectPath>>;

    fn commit(&self) -> zbus::Result<()>;
}

#[zbus::proxy(
    interface = "org.freedesktop.ratbag1.Profile",
    default_service = "org.freedesktop.ratbag1"
)]
trait RatbagProfile {
    #[zbus(property)]
    fn index(&self) -> zbus::Result<u32>;

    #[zbus(property)]
    fn is_active(&self) -> zbus::Result<bool>;

    #[zbus(property)]
    fn resolutions(&self) -> zbus::Result<Vec<OwnedObjectPath>>;

    #[zbus(property)]
    fn buttons(&self) -> zbus::Result<Vec<OwnedObjectPath>>;

    #[zbus(property)]
    fn leds(&self) -> zbus::Result<Vec<OwnedObjectPath>>;
}

#[zbus::proxy(
    interface = "org.freedesktop.ratbag1.Resolution",
    default_service = "org.freedesktop.ratbag1"
)]
trait RatbagResolution {
    #[zbus(property)]
    fn index(&self) -> zbus::Result<u32>;

    #[zbus(property)]
    fn capabilities(&self) -> zbus::Result<Vec<u32>>;

    #[zbus(property)]
    fn x_resolution(&self) -> zbus::Result<u32>;

    #[zbus(property)]
    fn y_resolution(&self) -> zbus::Result<u32>;

    #[zbus(property)]
    fn report_rate(&self) -> zbus::Result<u32>;

    #[zbus(property)]
    fn minimum(&self) -> zbus::Result<u32>;

    #[zbus(property)]
    fn maximum(&self) -> zbus::Result<u32>;

    fn set_resolution(&self, xres: u32, yres: u32) -> zbus::Result<()>;
}

#[zbus::proxy(
    interface = "org.freedesktop.ratbag1.Button",
    default_service = "org.freedesktop.ratbag1"
)]
trait RatbagButton {
    #[zbus(property)]
    fn index(&self) -> zbus::Result<u32>;

    #[zbus(property)]
    fn button_mapping(&self) -> zbus::Result<u32>;
}

#[zbus::proxy(
    interface = "org.freedesktop.ratbag1.Led",
    default_service = "org.freedesktop.ratbag1"
)]
trait RatbagLed {
    #[zbus(property)]
    fn index(&self) -> zbus::Result<u32>;

    #[zbus(property)]
    fn mode(&self) -> zbus::Result<u32>;
}

/// [`DeviceService`] backed by ratbagd
pub struct DbusService {
    conn: Connection,
}

impl DbusService {
    /// Connects to the system bus and checks that ratbagd answers
    ///
    /// # Returns
    ///
    /// * `Ok(DbusService)` - ratbagd is reachable
    /// * `Err(RatbagError::ServiceUnavailable)` - daemon not running
    /// * `Err(RatbagError::DBus)` - no system bus or other bus failure
    pub fn connect() -> Result<Self, RatbagError> {
        let conn = Connection::system()?;
        let manager = RatbagManagerProxyBlocking::new(&conn)?;
        let count = manager.devices()?.len();
        debug!(devices = count, "connected to ratbagd");

        Ok(Self { conn })
    }

    fn load_device(&self, path: &OwnedObjectPath) -> Result<Device, RatbagError> {
        let proxy = RatbagDeviceProxyBlocking::builder(&self.conn)
            .path(path.to_string())?
            .cache_properties(CacheProperties::No)
            .build()?;

        let profiles = proxy
            .profiles()?
            .iter()
            .map(|profile| self.load_profile(profile).map(Rc::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Device {
            id: proxy.id()?,
            name: proxy.description()?,
            object_path: path.to_string(),
            profiles,
        })
    }

    fn load_profile(&self, path: &OwnedObjectPath) -> Result<Profile, RatbagError> {
        let proxy = RatbagProfileProxyBlocking::builder(&self.conn)
            .path(path.to_string())?
            .cache_properties(CacheProperties::No)
            .build()?;

        let resolutions = proxy
            .resolutions()?
            .iter()
            .map(|path| self.load_resolution(path).map(Rc::new))
            .collect::<Result<Vec<_>, _>>()?;

        let buttons = proxy
            .buttons()?
            .iter()
            .map(|path| self.load_button(path).map(Rc::new))
            .collect::<Result<Vec<_>, _>>()?;

        let leds = proxy
            .leds()?
            .iter()
            .map(|path| self.load_led(path).map(Rc::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Profile {
            index: proxy.index()?,
            is_active: proxy.is_active()?,
            resolutions,
            buttons,
            leds,
        })
    }

    fn load_resolution(&self, path: &OwnedObjectPath) -> Result<Resolution, RatbagError> {
        let proxy = RatbagResolutionProxyBlocking::builder(&self.conn)
            .path(path.to_string())?
            .cache_properties(CacheProperties::No)
            .build()?;

        let capabilities = proxy
            .capabilities()?
            .into_iter()
            .filter_map(ResolutionCapability::from_code)
            .collect();

        let resolution = Resolution::new(
            proxy.index()?,
            (proxy.x_resolution()?, proxy.y_resolution()?),
            proxy.minimum()?,
            proxy.maximum()?,
        )
        .with_capabilities(capabilities)
        .with_report_rate(proxy.report_rate()?);

        Self::write_through(&resolution, proxy);
        Ok(resolution)
    }

    /// Forwards X/Y edits to the daemon as they happen
    fn write_through(resolution: &Resolution, proxy: RatbagResolutionProxyBlocking<'static>) {
        let index = resolution.index;
        forward_resolution(resolution, move |x, y| match proxy.set_resolution(x, y) {
            Ok(()) => debug!(resolution = index, x, y, "resolution sent to ratbagd"),
            Err(e) => warn!(resolution = index, error = %e, "failed to send resolution"),
        });
    }

    fn load_button(&self, path: &OwnedObjectPath) -> Result<Button, RatbagError> {
        let proxy = RatbagButtonProxyBlocking::builder(&self.conn)
            .path(path.to_string())?
            .cache_properties(CacheProperties::No)
            .build()?;

        Ok(Button::new(proxy.index()?, proxy.button_mapping()?))
    }

    fn load_led(&self, path: &OwnedObjectPath) -> Result<Led, RatbagError> {
        let proxy = RatbagLedProxyBlocking::builder(&self.conn)
            .path(path.to_string())?
            .cache_properties(CacheProperties::No)
            .build()?;

        let index = proxy.index()?;
        let code = proxy.mode()?;
        let mode = LedMode::from_code(code).unwrap_or_else(|| {
            warn!(led = index, mode = code, "unknown LED mode, showing it as off");
            LedMode::Off
        });

        Ok(Led::new(index, mode))
    }
}

/// Calls `sink(x, y)` whenever `resolution` changes
///
/// Without separate X/Y support only X is observed and sent for both axes,
/// so the daemon never sees a split the hardware cannot do.
pub(crate) fn forward_resolution(resolution: &Resolution, sink: impl Fn(u32, u32) + 'static) {
    let weak_x = resolution.resolution_x.downgrade();

    if !resolution.separate_xy() {
        resolution.resolution_x.subscribe(move |x| sink(*x, *x));
        return;
    }

    let weak_y = resolution.resolution_y.downgrade();
    let push = Rc::new(move || {
        let (Some(x), Some(y)) = (weak_x.upgrade(), weak_y.upgrade()) else {
            return;
        };
        sink(x.get(), y.get());
    });

    let push_x = Rc::clone(&push);
    resolution.resolution_x.subscribe(move |_| push_x());
    resolution.resolution_y.subscribe(move |_| push());
}

impl DeviceService for DbusService {
    fn list_devices(&self) -> Result<Vec<Rc<Device>>, RatbagError> {
        let manager = RatbagManagerProxyBlocking::new(&self.conn)?;
        manager
            .devices()?
            .iter()
            .map(|path| self.load_device(path).map(Rc::new))
            .collect()
    }

    fn commit(&self, device: &Device) -> CommitTask {
        let conn = self.conn.clone();
        let path = device.object_path.clone();
        let name = device.name.clone();

        Box::new(move || {
            let proxy = RatbagDeviceProxyBlocking::builder(&conn)
                .path(path)?
                .cache_properties(CacheProperties::No)
                .build()?;

            proxy
                .commit()
                .map_err(|e| RatbagError::CommitFailed(e.to_string()))?;

            info!(device = %name, "changes committed to hardware");
            Ok(())
        })
    }
}
