//! Commands that can be sent to the audio-trigger board.

use crate::constants::*;
use crate::frame::build_frame;
use crate::types::TrackOp;

/// Commands accepted by the board.
///
/// Encoding never fails and performs no range validation beyond what the
/// field types enforce: gains outside the board's usable range are sent
/// as-is, and the board clamps them. Checking argument ranges is the
/// caller's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Query the firmware version string.
    GetVersion,

    /// Query voice and track counts.
    GetSysInfo,

    /// Query the list of currently playing tracks.
    GetStatus,

    /// Set the master output gain.
    MasterGain {
        /// Gain in the board's dB-like unit.
        gain_db: i16,
    },

    /// Apply a transport operation to one track.
    TrackControl {
        /// Operation to perform.
        op: TrackOp,
        /// Track identifier.
        track: u16,
    },

    /// Stop every playing track.
    StopAll,

    /// Resume every paused track sample-synchronized.
    ResumeAllInSync,

    /// Set the gain of one track.
    TrackGain {
        /// Track identifier.
        track: u16,
        /// Gain in the board's dB-like unit.
        gain_db: i16,
    },

    /// Fade one track to a target gain over a duration.
    TrackFade {
        /// Track identifier.
        track: u16,
        /// Target gain.
        gain_db: i16,
        /// Fade duration in milliseconds.
        time_ms: u16,
        /// Stop the track when the fade completes.
        stop_at_end: bool,
    },

    /// Offset the playback samplerate (pitch bend).
    SamplerateOffset {
        /// Signed offset in the board's native unit.
        offset: i16,
    },
}

impl Command {
    /// Get the command code for this command.
    pub fn code(&self) -> u8 {
        match self {
            Command::GetVersion => CMD_GET_VERSION,
            Command::GetSysInfo => CMD_GET_SYS_INFO,
            Command::GetStatus => CMD_GET_STATUS,
            Command::MasterGain { .. } => CMD_MASTER_VOLUME,
            Command::TrackControl { .. } => CMD_TRACK_CONTROL,
            Command::StopAll => CMD_STOP_ALL,
            Command::ResumeAllInSync => CMD_RESUME_ALL_SYNC,
            Command::TrackGain { .. } => CMD_TRACK_VOLUME,
            Command::TrackFade { .. } => CMD_TRACK_FADE,
            Command::SamplerateOffset { .. } => CMD_SAMPLERATE_OFFSET,
        }
    }

    /// Whether the board answers this command with a response frame.
    pub fn expects_response(&self) -> bool {
        matches!(
            self,
            Command::GetVersion | Command::GetSysInfo | Command::GetStatus
        )
    }

    /// Encode the command as one complete frame.
    ///
    /// Multi-byte fields are little-endian, low byte first.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Command::GetVersion => build_frame(CMD_GET_VERSION, &[]),

            Command::GetSysInfo => build_frame(CMD_GET_SYS_INFO, &[]),

            Command::GetStatus => build_frame(CMD_GET_STATUS, &[]),

            Command::StopAll => build_frame(CMD_STOP_ALL, &[]),

            Command::ResumeAllInSync => build_frame(CMD_RESUME_ALL_SYNC, &[]),

            Command::MasterGain { gain_db } => {
                build_frame(CMD_MASTER_VOLUME, &gain_db.to_le_bytes())
            }

            Command::TrackControl { op, track } => {
                let mut payload = Vec::with_capacity(3);
                payload.push(op.code());
                payload.extend_from_slice(&track.to_le_bytes());
                build_frame(CMD_TRACK_CONTROL, &payload)
            }

            Command::TrackGain { track, gain_db } => {
                let mut payload = Vec::with_capacity(4);
                payload.extend_from_slice(&track.to_le_bytes());
                payload.extend_from_slice(&gain_db.to_le_bytes());
                build_frame(CMD_TRACK_VOLUME, &payload)
            }

            Command::TrackFade {
                track,
                gain_db,
                time_ms,
                stop_at_end,
            } => {
                let mut payload = Vec::with_capacity(7);
                payload.extend_from_slice(&track.to_le_bytes());
                payload.extend_from_slice(&gain_db.to_le_bytes());
                payload.extend_from_slice(&time_ms.to_le_bytes());
                payload.push(u8::from(*stop_at_end));
                build_frame(CMD_TRACK_FADE, &payload)
            }

            Command::SamplerateOffset { offset } => {
                build_frame(CMD_SAMPLERATE_OFFSET, &offset.to_le_bytes())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use crate::frame::ValidatedFrame;

    /// Test-only inverse of [`Command::encode`].
    fn decode_command(frame_bytes: &[u8]) -> Result<Command, ProtocolError> {
        let frame = ValidatedFrame::parse(frame_bytes)?;
        let payload = frame.payload()?;
        let le16 = |at: usize| u16::from_le_bytes([payload[at], payload[at + 1]]);
        match frame.code() {
            CMD_GET_VERSION => Ok(Command::GetVersion),
            CMD_GET_SYS_INFO => Ok(Command::GetSysInfo),
            CMD_GET_STATUS => Ok(Command::GetStatus),
            CMD_STOP_ALL => Ok(Command::StopAll),
            CMD_RESUME_ALL_SYNC => Ok(Command::ResumeAllInSync),
            CMD_MASTER_VOLUME => Ok(Command::MasterGain {
                gain_db: le16(0) as i16,
            }),
            CMD_TRACK_CONTROL => Ok(Command::TrackControl {
                op: TrackOp::from_code(payload[0]).expect("opcode"),
                track: le16(1),
            }),
            CMD_TRACK_VOLUME => Ok(Command::TrackGain {
                track: le16(0),
                gain_db: le16(2) as i16,
            }),
            CMD_TRACK_FADE => Ok(Command::TrackFade {
                track: le16(0),
                gain_db: le16(2) as i16,
                time_ms: le16(4),
                stop_at_end: payload[6] != 0,
            }),
            CMD_SAMPLERATE_OFFSET => Ok(Command::SamplerateOffset {
                offset: le16(0) as i16,
            }),
            code => Err(ProtocolError::UnknownResponseKind(code)),
        }
    }

    #[test]
    fn test_query_commands_encode_as_minimum_frames() {
        for (command, code) in [
            (Command::GetVersion, CMD_GET_VERSION),
            (Command::GetSysInfo, CMD_GET_SYS_INFO),
            (Command::GetStatus, CMD_GET_STATUS),
            (Command::StopAll, CMD_STOP_ALL),
            (Command::ResumeAllInSync, CMD_RESUME_ALL_SYNC),
        ] {
            let frame = command.encode();
            assert_eq!(frame, vec![FRAME_HEAD_1, FRAME_HEAD_2, 5, code, FRAME_EOM]);
        }
    }

    #[test]
    fn test_master_gain_encoding_boundaries() {
        let frame = Command::MasterGain { gain_db: i16::MIN }.encode();
        assert_eq!(frame.len(), 7);
        assert_eq!(frame[OFFSET_CODE], CMD_MASTER_VOLUME);
        assert_eq!(&frame[OFFSET_PAYLOAD..6], &[0x00, 0x80]);

        let frame = Command::MasterGain { gain_db: i16::MAX }.encode();
        assert_eq!(&frame[OFFSET_PAYLOAD..6], &[0xFF, 0x7F]);

        let frame = Command::MasterGain { gain_db: -40 }.encode();
        assert_eq!(&frame[OFFSET_PAYLOAD..6], &(-40i16).to_le_bytes());
    }

    #[test]
    fn test_track_control_encoding() {
        let frame = Command::TrackControl {
            op: TrackOp::PlayPoly,
            track: 0x0102,
        }
        .encode();
        assert_eq!(frame.len(), 8);
        assert_eq!(frame[OFFSET_LENGTH], 8);
        assert_eq!(frame[OFFSET_CODE], CMD_TRACK_CONTROL);
        assert_eq!(frame[4], TRK_PLAY_POLY);
        // Track id is little-endian, low byte first.
        assert_eq!(frame[5], 0x02);
        assert_eq!(frame[6], 0x01);
        assert_eq!(frame[7], FRAME_EOM);
    }

    #[test]
    fn test_track_control_track_boundaries() {
        for track in [0u16, u16::MAX] {
            let frame = Command::TrackControl {
                op: TrackOp::Stop,
                track,
            }
            .encode();
            assert_eq!(frame.len(), 8);
            assert_eq!(&frame[5..7], &track.to_le_bytes());
        }
    }

    #[test]
    fn test_track_gain_encoding() {
        let frame = Command::TrackGain {
            track: 513,
            gain_db: -10,
        }
        .encode();
        assert_eq!(frame.len(), 9);
        assert_eq!(frame[OFFSET_CODE], CMD_TRACK_VOLUME);
        assert_eq!(&frame[4..6], &513u16.to_le_bytes());
        assert_eq!(&frame[6..8], &(-10i16).to_le_bytes());
        assert_eq!(frame[8], FRAME_EOM);
    }

    #[test]
    fn test_track_fade_encoding_boundaries() {
        let frame = Command::TrackFade {
            track: u16::MAX,
            gain_db: i16::MIN,
            time_ms: u16::MAX,
            stop_at_end: true,
        }
        .encode();
        assert_eq!(frame.len(), 12);
        assert_eq!(frame[OFFSET_LENGTH], 12);
        assert_eq!(frame[OFFSET_CODE], CMD_TRACK_FADE);
        assert_eq!(&frame[4..6], &[0xFF, 0xFF]);
        assert_eq!(&frame[6..8], &[0x00, 0x80]);
        assert_eq!(&frame[8..10], &[0xFF, 0xFF]);
        assert_eq!(frame[10], 1);
        assert_eq!(frame[11], FRAME_EOM);

        let frame = Command::TrackFade {
            track: 0,
            gain_db: i16::MAX,
            time_ms: 0,
            stop_at_end: false,
        }
        .encode();
        assert_eq!(frame.len(), 12);
        assert_eq!(frame[10], 0);
    }

    #[test]
    fn test_samplerate_offset_encoding() {
        let frame = Command::SamplerateOffset { offset: -32768 }.encode();
        assert_eq!(frame.len(), 7);
        assert_eq!(frame[OFFSET_CODE], CMD_SAMPLERATE_OFFSET);
        assert_eq!(&frame[4..6], &[0x00, 0x80]);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let commands = [
            Command::GetVersion,
            Command::GetSysInfo,
            Command::GetStatus,
            Command::StopAll,
            Command::ResumeAllInSync,
            Command::MasterGain { gain_db: i16::MIN },
            Command::MasterGain { gain_db: i16::MAX },
            Command::TrackControl {
                op: TrackOp::Load,
                track: 0,
            },
            Command::TrackControl {
                op: TrackOp::LoopOff,
                track: u16::MAX,
            },
            Command::TrackGain {
                track: 65535,
                gain_db: -70,
            },
            Command::TrackFade {
                track: 42,
                gain_db: 0,
                time_ms: 65535,
                stop_at_end: true,
            },
            Command::SamplerateOffset { offset: 0 },
            Command::SamplerateOffset { offset: i16::MAX },
        ];
        for command in commands {
            let decoded = decode_command(&command.encode()).expect("round trip");
            assert_eq!(decoded, command);
        }
    }

    #[test]
    fn test_only_queries_expect_responses() {
        assert!(Command::GetVersion.expects_response());
        assert!(Command::GetSysInfo.expects_response());
        assert!(Command::GetStatus.expects_response());
        assert!(!Command::StopAll.expects_response());
        assert!(!Command::MasterGain { gain_db: 0 }.expects_response());
        assert!(!Command::TrackFade {
            track: 1,
            gain_db: 0,
            time_ms: 100,
            stop_at_end: false
        }
        .expects_response());
    }
}
