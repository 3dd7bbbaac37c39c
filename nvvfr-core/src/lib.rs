//! NVVFR Core Library
//!
//! NVEncC-powered video super-resolution, frame doubling, and encoding.
//!
//! This library provides:
//! - Input validation for video files and image sequences
//! - AviSynth script materialization for image-sequence input
//! - Numbered, non-colliding output filename bookkeeping
//! - Translation of encode options into NVEncC arguments and a
//!   blocking subprocess invocation
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌───────────────┐    ┌──────────────────┐
//! │ InputSource  │───▶│ AvsScript /   │───▶│ Encoder (NVEncC  │
//! │ (video/imgs) │    │ arg builder   │    │ subprocess)      │
//! └──────────────┘    └───────────────┘    └──────────────────┘
//! ```
//!
//! All heavy lifting (super-resolution, frame interpolation, encoding)
//! happens inside NVEncC itself.

pub mod config;
pub mod encode;
pub mod error;
pub mod input;
pub mod output;
pub mod script;

pub use config::{BitDepth, Codec, EncodeConfig, Quality};
pub use encode::{Encoder, EncoderInput};
pub use error::{NvvfrError, Result};
pub use input::{InputSource, SourceKind};
