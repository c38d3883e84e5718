use std::fmt;
use thiserror::Error;

const SERVICE_UNKNOWN: &str = "org.freedesktop.DBus.Error.ServiceUnknown";

/// Device-service operations the daemon does not offer yet
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
    AddResolution,
    DeleteResolution,
    WriteButtonMapping,
    SetLedMode,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::AddResolution => write!(f, "adding resolutions"),
            Operation::DeleteResolution => write!(f, "deleting resolutions"),
            Operation::WriteButtonMapping => write!(f, "changing button mappings"),
            Operation::SetLedMode => write!(f, "changing LED modes"),
        }
    }
}

/// Errors that can occur while talking to the device service.
#[derive(Debug, Error)]
pub enum RatbagError {
    /// ratbagd is not running or not reachable on the system bus.
    #[error("ratbagd is not available: {0}")]
    ServiceUnavailable(String),
    /// A D-Bus call failed.
    #[error("D-Bus error: {0}")]
    DBus(zbus::Error),
    /// The service reported an object we could not interpret.
    #[error("Unexpected reply from ratbagd: {0}")]
    InvalidReply(String),
    /// No device is selected, so there is nothing to act on.
    #[error("No device selected")]
    NoDeviceSelected,
    /// The operation is not implemented by the device service yet.
    #[error("Not supported yet: {0}")]
    Unsupported(Operation),
    /// Writing pending changes to the hardware failed.
    #[error("Failed to write changes to the device: {0}")]
    CommitFailed(String),
}

impl From<zbus::Error> for RatbagError {
    fn from(e: zbus::Error) -> Self {
        if is_service_unknown(&e) {
            RatbagError::ServiceUnavailable(
                "org.freedesktop.ratbag1 not found on the system bus - is ratbagd running?"
                    .to_string(),
            )
        } else {
            RatbagError::DBus(e)
        }
    }
}

/// The bus reports an unknown name when the daemon isn't running
fn is_service_unknown(e: &zbus::Error) -> bool {
    match e {
        zbus::Error::MethodError(name, _, _) => name.as_str() == SERVICE_UNKNOWN,
        zbus::Error::FDO(fdo) => matches!(**fdo, zbus::fdo::Error::ServiceUnknown(_)),
        _ => false,
    }
}

impl RatbagError {
    /// Whether this only signals a missing daemon feature
    pub fn is_unsupported(&self) -> bool {
        matches!(self, RatbagError::Unsupported(_))
    }
}
