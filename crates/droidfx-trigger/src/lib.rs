//! Audio-Trigger Driver
//!
//! Blocking request/response driver for the audio-trigger playback board,
//! built on the wire protocol in `droidfx-trigger-protocol`.
//!
//! The driver runs inline in one control-loop context: fire-and-forget
//! commands are a single write, and queries block — bounded by a timeout
//! for the wait, unbounded for the drain — before folding the response
//! into a mirrored device-state cache. A non-blocking `request`/
//! `poll_response` pair is available for cooperative schedulers.
//!
//! # Example
//!
//! ```rust,ignore
//! use droidfx_trigger::{AudioTrigger, TcpPort, TriggerConfig};
//!
//! let port = TcpPort::connect("127.0.0.1:9100")?;
//! let mut trigger = AudioTrigger::new(port, TriggerConfig::default());
//!
//! trigger.get_sys_info()?;
//! println!("{} voices", trigger.voice_count());
//! trigger.track_play_poly(12)?;
//! ```

mod config;
mod driver;
mod error;
mod receiver;
mod state;
mod transport;

pub use config::TriggerConfig;
pub use driver::AudioTrigger;
pub use error::TriggerError;
pub use receiver::{ResponseReceiver, RESPONSE_MIN_BYTES};
pub use state::DeviceStateMirror;
pub use transport::{ScriptedPort, TcpPort, TransportPort};
