//! Mirrored device state.

use droidfx_trigger_protocol::{Response, SysInfo};

use crate::error::TriggerError;

/// Last-known device state, populated by successful query responses.
///
/// Fields persist across calls and change only when a response decodes
/// cleanly and fits its buffers; every failure path leaves the previous
/// values in place, so callers read stale-but-consistent data as the
/// degraded default (an empty playing list reads as "no tracks known to
/// be playing").
#[derive(Debug)]
pub struct DeviceStateMirror {
    version: Vec<u8>,
    version_capacity: usize,
    info: SysInfo,
    playing: Vec<u16>,
}

impl DeviceStateMirror {
    /// Create an empty mirror with the given version-buffer capacity.
    pub fn new(version_capacity: usize) -> Self {
        DeviceStateMirror {
            version: Vec::with_capacity(version_capacity),
            version_capacity,
            info: SysInfo::default(),
            playing: Vec::new(),
        }
    }

    /// Fold a decoded response into the mirror.
    ///
    /// Capacity is checked before anything is written: a failed apply is
    /// a no-op on the mirrored fields.
    pub fn apply(&mut self, response: &Response) -> Result<(), TriggerError> {
        match response {
            Response::Version(bytes) => {
                if bytes.len() > self.version_capacity {
                    return Err(TriggerError::ResponseTooLarge {
                        len: bytes.len(),
                        capacity: self.version_capacity,
                    });
                }
                self.version.clear();
                self.version.extend_from_slice(bytes);
            }
            Response::SysInfo(info) => self.info = *info,
            Response::Status { playing } => {
                self.playing.clear();
                self.playing.extend_from_slice(playing);
            }
        }
        Ok(())
    }

    /// Raw version bytes as reported by the board.
    pub fn version_bytes(&self) -> &[u8] {
        &self.version
    }

    /// Version as text, trimmed of padding.
    pub fn version_string(&self) -> String {
        String::from_utf8_lossy(&self.version)
            .trim_matches('\0')
            .trim()
            .to_string()
    }

    /// Concurrent playback voices the board reported.
    pub fn voice_count(&self) -> u8 {
        self.info.voices
    }

    /// Track count the board reported.
    pub fn track_count(&self) -> u16 {
        self.info.tracks
    }

    /// Tracks currently playing, in the order the board reported them.
    pub fn playing(&self) -> &[u16] {
        &self.playing
    }
}
