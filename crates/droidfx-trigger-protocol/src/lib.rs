//! Audio-Trigger Serial Protocol
//!
//! This crate provides types and utilities for the audio-trigger playback
//! board's serial protocol: fixed-layout frames carrying a command code
//! and a little-endian payload in each direction.
//!
//! # Protocol Overview
//!
//! Every frame shares one layout (see [`frame`]): a fixed two-byte header
//! pair, a total-length byte, a command or response code, the payload,
//! and a single terminator byte. Commands the host sends are built with
//! [`Command::encode`]; frames the board sends back are checked with
//! [`ValidatedFrame::parse`] and decoded with [`Response::decode`].
//!
//! This crate does no I/O. Transports, timeouts and the mirrored device
//! state live in the `droidfx-trigger` driver crate.
//!
//! # Example
//!
//! ```rust
//! use droidfx_trigger_protocol::{Command, TrackOp};
//!
//! let frame = Command::TrackControl { op: TrackOp::PlayPoly, track: 12 }.encode();
//! assert_eq!(frame.len(), 8);
//! ```

mod commands;
mod constants;
mod error;
mod frame;
mod responses;
mod types;

pub use commands::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use responses::*;
pub use types::*;
