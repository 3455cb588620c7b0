//! Server List Ping prober: asks Minecraft servers for their public status.
pub mod addr;
pub mod config;
pub mod logging;
pub mod probe;
pub mod proto;
pub mod status;
