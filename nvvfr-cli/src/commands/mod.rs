//! CLI command implementations

mod config;
mod encode;
mod info;

pub use config::{ConfigArgs, config};
pub use encode::{EncodeArgs, encode};
pub use info::{InfoArgs, info};
