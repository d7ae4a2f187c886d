//! Domain-based type organization
//!
//! - config: console settings from the shell
//! - connection: device WebSocket lifecycle
//! - device: processor and firmware reported by the device
//! - form: form submissions from the firmware page
//! - inventory: firmware images grouped by processor family
//! - protocol: device message decoding
//! - result: upgrade result codes
//! - session: upgrade state machine and overlay guard
//! - target: UI targets addressed by the protocol
//! - template: firmware table synthesis
//! - version: version ordering

pub mod config;
pub mod connection;
pub mod device;
pub mod form;
pub mod inventory;
pub mod protocol;
pub mod result;
pub mod session;
pub mod target;
pub mod template;
pub mod version;

pub use config::*;
pub use connection::*;
pub use device::*;
pub use form::*;
pub use inventory::*;
pub use protocol::*;
pub use result::*;
pub use session::*;
pub use target::*;
pub use template::*;
pub use version::*;
