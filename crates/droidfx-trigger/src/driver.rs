//! High-level driver for the audio-trigger board.

use std::time::Duration;

use droidfx_trigger_protocol::{Command, Response, TrackOp};
use tracing::{debug, trace};

use crate::config::TriggerConfig;
use crate::error::TriggerError;
use crate::receiver::ResponseReceiver;
use crate::state::DeviceStateMirror;
use crate::transport::TransportPort;

/// Gain a cross-fade starts the incoming track at and fades the outgoing
/// track down to.
const CROSS_FADE_FLOOR_DB: i16 = -40;

/// Driver for one audio-trigger board on one transport.
///
/// The driver owns its transport, receiver and mirrored state outright;
/// construct it where the board is wired up and pass it (or lend it) to
/// whatever subsystem plays cues. One instance serves one board from one
/// execution context — there is no internal locking, and the `&mut self`
/// receivers are what keep request/response cycles, and the multi-frame
/// [`cross_fade`](Self::cross_fade) composite, from interleaving.
pub struct AudioTrigger<P: TransportPort> {
    port: P,
    receiver: ResponseReceiver,
    state: DeviceStateMirror,
    config: TriggerConfig,
}

impl<P: TransportPort> AudioTrigger<P> {
    /// Create a driver over `port` with the given configuration.
    pub fn new(port: P, config: TriggerConfig) -> Self {
        let receiver = ResponseReceiver::new(config.response_capacity, config.inter_byte_delay());
        let state = DeviceStateMirror::new(config.version_capacity);
        AudioTrigger {
            port,
            receiver,
            state,
            config,
        }
    }

    /// Create a driver with the default configuration.
    pub fn with_defaults(port: P) -> Self {
        Self::new(port, TriggerConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutable access to the underlying transport.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Tear the driver down and recover the transport.
    pub fn into_port(self) -> P {
        self.port
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Encode and write a command without waiting for anything back.
    ///
    /// This is the path for every non-query operation; it never reads
    /// from the transport and never touches the mirrored state.
    pub fn send_fire_and_forget(&mut self, command: &Command) -> Result<(), TriggerError> {
        let frame = command.encode();
        trace!("fire-and-forget cmd {}: {}", command.code(), hex::encode(&frame));
        self.port.write_bytes(&frame)?;
        Ok(())
    }

    /// Send a query command and block, bounded by `timeout`, for its
    /// response.
    ///
    /// On success the mirrored state has been updated; read it through
    /// the accessors. `timeout` bounds only the wait for the first
    /// response bytes — see [`ResponseReceiver`] for the two-phase
    /// receive contract.
    pub fn query(&mut self, command: &Command, timeout: Duration) -> Result<(), TriggerError> {
        debug_assert!(command.expects_response(), "query sent with a non-query command");
        let frame = command.encode();
        let received = self
            .receiver
            .request_and_wait(&mut self.port, &frame, timeout)?;
        let response = Response::decode(&received)?;
        self.state.apply(&response)
    }

    /// Send a query without waiting; pair with
    /// [`poll_response`](Self::poll_response) from a cooperative loop.
    pub fn request(&mut self, command: &Command) -> Result<(), TriggerError> {
        debug_assert!(command.expects_response(), "request sent with a non-query command");
        self.port.drain()?;
        self.port.write_bytes(&command.encode())?;
        Ok(())
    }

    /// Consume a pending response if a complete one has arrived.
    ///
    /// Returns `Ok(false)` while fewer than a minimum frame's worth of
    /// bytes are available; call again on a later tick. `Ok(true)` means
    /// a response was received, decoded and folded into the mirror.
    pub fn poll_response(&mut self) -> Result<bool, TriggerError> {
        let Some(received) = self.receiver.poll_frame(&mut self.port)? else {
            return Ok(false);
        };
        let response = Response::decode(&received)?;
        self.state.apply(&response)?;
        Ok(true)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Refresh the mirrored firmware version.
    pub fn get_version(&mut self) -> Result<(), TriggerError> {
        self.query(&Command::GetVersion, self.config.reply_timeout())
    }

    /// Refresh the mirrored voice and track counts.
    pub fn get_sys_info(&mut self) -> Result<(), TriggerError> {
        self.query(&Command::GetSysInfo, self.config.reply_timeout())
    }

    /// Refresh the mirrored playing-track list.
    pub fn get_status(&mut self) -> Result<(), TriggerError> {
        self.query(&Command::GetStatus, self.config.reply_timeout())
    }

    // ========================================================================
    // Playback control
    // ========================================================================

    /// Set the master output gain.
    pub fn master_gain(&mut self, gain_db: i16) -> Result<(), TriggerError> {
        self.send_fire_and_forget(&Command::MasterGain { gain_db })
    }

    /// Start a track, stopping everything else.
    pub fn track_play_solo(&mut self, track: u16) -> Result<(), TriggerError> {
        self.track_control(TrackOp::PlaySolo, track)
    }

    /// Start a track mixed with whatever is playing.
    pub fn track_play_poly(&mut self, track: u16) -> Result<(), TriggerError> {
        self.track_control(TrackOp::PlayPoly, track)
    }

    /// Stop one track.
    pub fn track_stop(&mut self, track: u16) -> Result<(), TriggerError> {
        self.track_control(TrackOp::Stop, track)
    }

    /// Pause one track.
    pub fn track_pause(&mut self, track: u16) -> Result<(), TriggerError> {
        self.track_control(TrackOp::Pause, track)
    }

    /// Resume one paused track.
    pub fn track_resume(&mut self, track: u16) -> Result<(), TriggerError> {
        self.track_control(TrackOp::Resume, track)
    }

    /// Enable or disable looping for a track.
    pub fn track_loop(&mut self, track: u16, enable: bool) -> Result<(), TriggerError> {
        let op = if enable { TrackOp::LoopOn } else { TrackOp::LoopOff };
        self.track_control(op, track)
    }

    /// Pre-load a track paused at its start.
    pub fn track_load(&mut self, track: u16) -> Result<(), TriggerError> {
        self.track_control(TrackOp::Load, track)
    }

    /// Apply any transport operation to one track.
    pub fn track_control(&mut self, op: TrackOp, track: u16) -> Result<(), TriggerError> {
        self.send_fire_and_forget(&Command::TrackControl { op, track })
    }

    /// Stop every playing track.
    pub fn stop_all(&mut self) -> Result<(), TriggerError> {
        self.send_fire_and_forget(&Command::StopAll)
    }

    /// Resume every paused track sample-synchronized.
    pub fn resume_all_in_sync(&mut self) -> Result<(), TriggerError> {
        self.send_fire_and_forget(&Command::ResumeAllInSync)
    }

    /// Set one track's gain.
    pub fn track_gain(&mut self, track: u16, gain_db: i16) -> Result<(), TriggerError> {
        self.send_fire_and_forget(&Command::TrackGain { track, gain_db })
    }

    /// Fade one track to a target gain over `time_ms`.
    pub fn track_fade(
        &mut self,
        track: u16,
        gain_db: i16,
        time_ms: u16,
        stop_at_end: bool,
    ) -> Result<(), TriggerError> {
        self.send_fire_and_forget(&Command::TrackFade {
            track,
            gain_db,
            time_ms,
            stop_at_end,
        })
    }

    /// Offset the playback samplerate.
    pub fn samplerate_offset(&mut self, offset: i16) -> Result<(), TriggerError> {
        self.send_fire_and_forget(&Command::SamplerateOffset { offset })
    }

    /// Overlap a fade-out of `from` with a fade-in of `to`.
    ///
    /// Four independent frames, written back to back: the incoming track
    /// is pulled down to the fade floor and started polyphonically, then
    /// faded up to `gain_db`, while the outgoing track fades to the floor
    /// and stops at the end of its fade. The exclusive borrow on the
    /// driver keeps other driver traffic off the transport until all four
    /// frames are written, but the board still processes them as separate
    /// commands — there is no transaction on the wire.
    pub fn cross_fade(
        &mut self,
        from: u16,
        to: u16,
        gain_db: i16,
        time_ms: u16,
    ) -> Result<(), TriggerError> {
        debug!("cross-fade {from} -> {to} over {time_ms} ms");
        self.track_gain(to, CROSS_FADE_FLOOR_DB)?;
        self.track_play_poly(to)?;
        self.track_fade(to, gain_db, time_ms, false)?;
        self.track_fade(from, CROSS_FADE_FLOOR_DB, time_ms, true)?;
        Ok(())
    }

    // ========================================================================
    // Mirrored state
    // ========================================================================

    /// The mirrored state itself, for callers that hold a view of it.
    pub fn state(&self) -> &DeviceStateMirror {
        &self.state
    }

    /// Raw mirrored version bytes.
    pub fn version_bytes(&self) -> &[u8] {
        self.state.version_bytes()
    }

    /// Mirrored version as text.
    pub fn version_string(&self) -> String {
        self.state.version_string()
    }

    /// Mirrored voice count.
    pub fn voice_count(&self) -> u8 {
        self.state.voice_count()
    }

    /// Mirrored track count.
    pub fn track_count(&self) -> u16 {
        self.state.track_count()
    }

    /// Mirrored playing-track list.
    pub fn playing(&self) -> &[u16] {
        self.state.playing()
    }
}
