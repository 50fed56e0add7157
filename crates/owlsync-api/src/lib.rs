// owlsync-api: session contract and error taxonomy for the Owlet cloud API

pub mod error;
pub mod properties;
pub mod session;

pub use error::Error;
pub use properties::{PropertyUpdate, TokenSet};
pub use session::DeviceSession;
