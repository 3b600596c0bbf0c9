//! Responses reported by the audio-trigger board.

use log::trace;

use crate::constants::*;
use crate::error::ProtocolError;
use crate::frame::ValidatedFrame;
use crate::types::SysInfo;

/// Responses the board sends back to query commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Firmware version string, copied verbatim from the payload.
    Version(Vec<u8>),

    /// Voice and track counts.
    SysInfo(SysInfo),

    /// Tracks currently playing, in the order the board reported them.
    Status {
        /// Playing track identifiers.
        playing: Vec<u16>,
    },
}

impl Response {
    /// Decode a response from a validated frame.
    ///
    /// Dispatches on the response-kind code. A code this driver does not
    /// recognize is an explicit error, not a silent no-op, so callers can
    /// tell "nothing changed" apart from "nothing was understood".
    pub fn decode(frame: &ValidatedFrame<'_>) -> Result<Self, ProtocolError> {
        let payload = frame.payload()?;

        match frame.code() {
            RSP_VERSION_STRING => {
                trace!("version response, {} bytes", payload.len());
                Ok(Response::Version(payload.to_vec()))
            }

            RSP_SYS_INFO => {
                if payload.len() < SYS_INFO_PAYLOAD_SIZE {
                    return Err(ProtocolError::FrameTooShort {
                        expected: FRAME_OVERHEAD + SYS_INFO_PAYLOAD_SIZE,
                        actual: FRAME_OVERHEAD + payload.len(),
                    });
                }
                let info = SysInfo {
                    voices: payload[0],
                    tracks: u16::from_le_bytes([payload[1], payload[2]]),
                };
                trace!("sysinfo response: {} voices, {} tracks", info.voices, info.tracks);
                Ok(Response::SysInfo(info))
            }

            RSP_STATUS => {
                // Fewer than two payload bytes means nothing is playing.
                // Otherwise every consecutive, non-overlapping pair is one
                // little-endian track id; a trailing odd byte is ignored.
                let playing: Vec<u16> = if payload.len() < TRACK_ID_SIZE {
                    Vec::new()
                } else {
                    payload
                        .chunks_exact(TRACK_ID_SIZE)
                        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                        .collect()
                };
                trace!("status response: {} playing", playing.len());
                Ok(Response::Status { playing })
            }

            code => Err(ProtocolError::UnknownResponseKind(code)),
        }
    }
}
