use owlsync_api::DeviceSession;

use crate::{DEVICE_NAME, DOMAIN, MANUFACTURER};

/// Static identity record handed to the host's device registry.
///
/// Captured once at coordinator construction. The polling loop never
/// touches it, even if the session later reports drifted values -- only
/// the session object itself is refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Identifier tuple: integration namespace + device serial.
    pub identifiers: (&'static str, String),

    /// Display name shown by the host platform.
    pub name: String,

    /// Manufacturer string.
    pub manufacturer: &'static str,

    /// Hardware model.
    pub model: String,

    /// Firmware version at construction time.
    pub sw_version: String,

    /// Hardware revision at construction time.
    pub hw_version: String,
}

impl DeviceDescriptor {
    pub(crate) fn from_session(session: &dyn DeviceSession) -> Self {
        Self {
            identifiers: (DOMAIN, session.serial().to_owned()),
            name: DEVICE_NAME.to_owned(),
            manufacturer: MANUFACTURER,
            model: session.model().to_owned(),
            sw_version: session.software_version().to_owned(),
            hw_version: session.hardware_version().to_owned(),
        }
    }
}
