//! Integration tests for the driver over a scripted transport.
//!
//! Each test scripts the bytes the board "sends", runs driver operations,
//! and asserts on the written frames and the mirrored state.

use std::time::Duration;

use droidfx_trigger::{AudioTrigger, ScriptedPort, TriggerConfig, TriggerError};
use droidfx_trigger_protocol::{
    build_frame, Command, ProtocolError, TrackOp, RSP_STATUS, RSP_SYS_INFO, RSP_VERSION_STRING,
};

const TIMEOUT: Duration = Duration::from_millis(20);

/// Driver config for scripted ports: no inter-byte pacing needed.
fn test_config() -> TriggerConfig {
    TriggerConfig {
        inter_byte_delay_ms: 0,
        ..TriggerConfig::default()
    }
}

fn trigger_with_reply(reply: &[u8]) -> AudioTrigger<ScriptedPort> {
    let mut port = ScriptedPort::new();
    port.queue_reply(reply);
    AudioTrigger::new(port, test_config())
}

// ============================================================================
// Query Flows
// ============================================================================

#[test]
fn test_version_query_populates_mirror() {
    let mut trigger = trigger_with_reply(&build_frame(RSP_VERSION_STRING, b"1.23"));

    trigger
        .query(&Command::GetVersion, TIMEOUT)
        .expect("query should succeed");

    assert_eq!(trigger.version_bytes(), b"1.23");
    assert_eq!(trigger.version_string(), "1.23");
}

#[test]
fn test_sys_info_query_populates_mirror() {
    let mut trigger = trigger_with_reply(&build_frame(RSP_SYS_INFO, &[14, 0x00, 0x02]));

    trigger
        .query(&Command::GetSysInfo, TIMEOUT)
        .expect("query should succeed");

    assert_eq!(trigger.voice_count(), 14);
    assert_eq!(trigger.track_count(), 512);
}

#[test]
fn test_status_query_populates_mirror_in_order() {
    let mut payload = Vec::new();
    for track in [42u16, 7, 300] {
        payload.extend_from_slice(&track.to_le_bytes());
    }
    let mut trigger = trigger_with_reply(&build_frame(RSP_STATUS, &payload));

    trigger
        .query(&Command::GetStatus, TIMEOUT)
        .expect("query should succeed");

    assert_eq!(trigger.playing(), &[42, 7, 300]);
}

#[test]
fn test_query_writes_exactly_one_request_frame() {
    let mut trigger = trigger_with_reply(&build_frame(RSP_SYS_INFO, &[2, 10, 0]));

    trigger
        .query(&Command::GetSysInfo, TIMEOUT)
        .expect("query should succeed");

    assert_eq!(trigger.port().written(), Command::GetSysInfo.encode());
    assert_eq!(trigger.port().drain_count(), 1);
}

// ============================================================================
// Failure Paths Leave the Mirror Unchanged
// ============================================================================

#[test]
fn test_timeout_leaves_mirror_unchanged() {
    let mut trigger = trigger_with_reply(&build_frame(RSP_SYS_INFO, &[4, 0x00, 0x01]));
    trigger
        .query(&Command::GetSysInfo, TIMEOUT)
        .expect("first query should succeed");

    // Nothing queued for the second query.
    let err = trigger
        .query(&Command::GetSysInfo, Duration::from_millis(5))
        .unwrap_err();
    assert!(matches!(err, TriggerError::Timeout { .. }));

    assert_eq!(trigger.voice_count(), 4);
    assert_eq!(trigger.track_count(), 256);
}

#[test]
fn test_bad_header_leaves_mirror_unchanged() {
    let mut trigger = trigger_with_reply(&build_frame(RSP_VERSION_STRING, b"1.00"));
    trigger
        .query(&Command::GetVersion, TIMEOUT)
        .expect("first query should succeed");

    // Complete frame, wrong header pair.
    let mut bad = build_frame(RSP_VERSION_STRING, b"9.99");
    bad[0] = 0x12;
    bad[1] = 0x34;
    trigger.port_mut().queue_reply(&bad);

    let err = trigger.query(&Command::GetVersion, TIMEOUT).unwrap_err();
    assert!(matches!(
        err,
        TriggerError::Protocol(ProtocolError::BadHeader { got: [0x12, 0x34] })
    ));
    assert_eq!(trigger.version_string(), "1.00");
}

#[test]
fn test_unknown_response_kind_is_an_error_not_a_no_op() {
    let mut trigger = trigger_with_reply(&build_frame(0x90, &[1, 2]));
    let err = trigger.query(&Command::GetStatus, TIMEOUT).unwrap_err();
    assert!(matches!(
        err,
        TriggerError::Protocol(ProtocolError::UnknownResponseKind(0x90))
    ));
    assert!(trigger.playing().is_empty());
}

#[test]
fn test_oversized_version_reply_is_rejected() {
    let config = TriggerConfig {
        version_capacity: 4,
        inter_byte_delay_ms: 0,
        ..TriggerConfig::default()
    };
    let mut port = ScriptedPort::new();
    port.queue_reply(&build_frame(RSP_VERSION_STRING, b"1.20.456-beta"));
    let mut trigger = AudioTrigger::new(port, config);

    let err = trigger.query(&Command::GetVersion, TIMEOUT).unwrap_err();
    assert!(matches!(
        err,
        TriggerError::ResponseTooLarge {
            len: 13,
            capacity: 4
        }
    ));
    assert!(trigger.version_bytes().is_empty());
}

// ============================================================================
// Fire-and-Forget and Composites
// ============================================================================

#[test]
fn test_fire_and_forget_writes_one_frame_and_skips_the_mirror() {
    let mut trigger = AudioTrigger::new(ScriptedPort::new(), test_config());
    trigger.track_play_solo(9).expect("send should succeed");

    let expected = Command::TrackControl {
        op: TrackOp::PlaySolo,
        track: 9,
    }
    .encode();
    assert_eq!(trigger.port().written(), expected);
    // Sends never flush or read; the mirror stays untouched.
    assert_eq!(trigger.port().drain_count(), 0);
    assert!(trigger.playing().is_empty());
    assert_eq!(trigger.voice_count(), 0);
}

#[test]
fn test_cross_fade_emits_four_frames_in_order() {
    let mut trigger = AudioTrigger::new(ScriptedPort::new(), test_config());
    trigger.cross_fade(10, 20, -6, 1500).expect("cross-fade");

    let expected: Vec<u8> = [
        Command::TrackGain {
            track: 20,
            gain_db: -40,
        },
        Command::TrackControl {
            op: TrackOp::PlayPoly,
            track: 20,
        },
        Command::TrackFade {
            track: 20,
            gain_db: -6,
            time_ms: 1500,
            stop_at_end: false,
        },
        Command::TrackFade {
            track: 10,
            gain_db: -40,
            time_ms: 1500,
            stop_at_end: true,
        },
    ]
    .iter()
    .flat_map(Command::encode)
    .collect();

    assert_eq!(trigger.port().written(), expected);
}

// ============================================================================
// Non-Blocking Poll
// ============================================================================

#[test]
fn test_request_then_poll_response() {
    let mut trigger = AudioTrigger::new(ScriptedPort::new(), test_config());
    trigger
        .request(&Command::GetStatus)
        .expect("request should succeed");

    // Nothing has arrived yet.
    assert!(!trigger.poll_response().expect("poll should not fail"));
    assert!(trigger.playing().is_empty());

    // The board answers between ticks.
    let mut payload = Vec::new();
    for track in [3u16, 11] {
        payload.extend_from_slice(&track.to_le_bytes());
    }
    trigger.port_mut().queue_reply(&build_frame(RSP_STATUS, &payload));

    assert!(trigger.poll_response().expect("poll should not fail"));
    assert_eq!(trigger.playing(), &[3, 11]);
}
