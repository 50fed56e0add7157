use async_trait::async_trait;

use crate::error::Error;
use crate::properties::PropertyUpdate;

/// One authenticated connection to a monitored device.
///
/// Implemented by the vendor API client (and by test doubles). Identity
/// fields must already be resolved when the session is handed to a
/// coordinator -- none of the getters may perform I/O.
#[async_trait]
pub trait DeviceSession: Send + Sync {
    /// Device serial number.
    fn serial(&self) -> &str;

    /// Hardware model string.
    fn model(&self) -> &str;

    /// Firmware version reported by the device.
    fn software_version(&self) -> &str;

    /// Hardware revision reported by the device.
    fn hardware_version(&self) -> &str;

    /// Refresh the device's properties from the remote service.
    ///
    /// This is the only suspension point in a poll tick: it performs
    /// network I/O and may rotate the session's authentication tokens,
    /// which the caller is responsible for persisting.
    async fn update_properties(&self) -> Result<PropertyUpdate, Error>;
}
