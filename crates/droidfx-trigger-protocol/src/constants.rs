//! Protocol constants
//!
//! Command codes, response codes, track-control opcodes and frame geometry
//! for the audio-trigger board's serial protocol.

// ============================================================================
// Framing
// ============================================================================

/// First byte of the fixed header pair opening every frame.
pub const FRAME_HEAD_1: u8 = 0xF0;
/// Second byte of the fixed header pair.
pub const FRAME_HEAD_2: u8 = 0xAA;
/// Terminator sentinel. Always the last byte of a frame.
pub const FRAME_EOM: u8 = 0x55;

/// Offset of the total-length byte within a frame.
pub const OFFSET_LENGTH: usize = 2;
/// Offset of the command/response code byte within a frame.
pub const OFFSET_CODE: usize = 3;
/// Offset of the first payload byte within a frame.
pub const OFFSET_PAYLOAD: usize = 4;
/// Bytes surrounding the payload: header pair, length, code, terminator.
pub const FRAME_OVERHEAD: usize = 5;
/// Smallest valid frame: a command with an empty payload.
pub const MIN_FRAME_SIZE: usize = FRAME_OVERHEAD;
/// Largest representable frame; the length field is a single byte.
pub const MAX_FRAME_SIZE: usize = 255;

// ============================================================================
// Command Codes (host → board)
// ============================================================================

/// Request the firmware version string.
pub const CMD_GET_VERSION: u8 = 1;
/// Request voice and track counts.
pub const CMD_GET_SYS_INFO: u8 = 2;
/// Per-track transport control (play/pause/stop/loop/load).
pub const CMD_TRACK_CONTROL: u8 = 3;
/// Stop every playing track.
pub const CMD_STOP_ALL: u8 = 4;
/// Set the master output gain.
pub const CMD_MASTER_VOLUME: u8 = 5;
/// Request the list of currently playing tracks.
pub const CMD_GET_STATUS: u8 = 7;
/// Set the gain of a single track.
pub const CMD_TRACK_VOLUME: u8 = 8;
/// Fade a track to a target gain over a duration.
pub const CMD_TRACK_FADE: u8 = 10;
/// Resume every paused track sample-synchronized.
pub const CMD_RESUME_ALL_SYNC: u8 = 11;
/// Apply a playback samplerate offset (pitch bend).
pub const CMD_SAMPLERATE_OFFSET: u8 = 12;

// ============================================================================
// Track-Control Opcodes (payload byte 0 of CMD_TRACK_CONTROL)
// ============================================================================

/// Start a track, stopping everything else.
pub const TRK_PLAY_SOLO: u8 = 0;
/// Start a track mixed with whatever is already playing.
pub const TRK_PLAY_POLY: u8 = 1;
/// Pause a track, keeping its position.
pub const TRK_PAUSE: u8 = 2;
/// Resume a paused track.
pub const TRK_RESUME: u8 = 3;
/// Stop a track.
pub const TRK_STOP: u8 = 4;
/// Enable looping for a track.
pub const TRK_LOOP_ON: u8 = 5;
/// Disable looping for a track.
pub const TRK_LOOP_OFF: u8 = 6;
/// Pre-load a track paused at its start.
pub const TRK_LOAD: u8 = 7;

// ============================================================================
// Response Codes (board → host)
// ============================================================================

/// Firmware version string response.
pub const RSP_VERSION_STRING: u8 = 0x81;
/// Voice/track count response.
pub const RSP_SYS_INFO: u8 = 0x82;
/// Currently-playing-tracks response.
pub const RSP_STATUS: u8 = 0x83;

// ============================================================================
// Sizes
// ============================================================================

/// Bytes per track identifier in a status payload.
pub const TRACK_ID_SIZE: usize = 2;
/// SysInfo payload: one voice-count byte plus a 16-bit track count.
pub const SYS_INFO_PAYLOAD_SIZE: usize = 3;
