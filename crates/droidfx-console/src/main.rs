//! Diagnostic console for the audio-trigger playback board.
//!
//! Connects over the UART-to-TCP bridge the robot controllers expose and
//! drives any single board operation from the command line. Queries print
//! the refreshed mirrored state; control commands are fire-and-forget.

mod logging;

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use droidfx_trigger::{AudioTrigger, TcpPort, TriggerConfig};
use droidfx_trigger_protocol::Command as TriggerCommand;

use crate::logging::{init_logging, LogLevel};

#[derive(Parser, Debug)]
#[command(name = "droidfx", version, about = "Audio-trigger board console")]
struct Cli {
    /// UART bridge address.
    #[arg(long, value_name = "HOST:PORT", default_value = "127.0.0.1:9100")]
    connect: String,

    /// Driver configuration file (YAML). Defaults are used if omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Query timeout, e.g. "500ms" or "2s".
    #[arg(long, value_name = "DURATION")]
    timeout: Option<String>,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Query the firmware version.
    Version,
    /// Query voice and track counts.
    Sysinfo,
    /// Query the currently playing tracks.
    Status,
    /// Start a track (mixed in, or alone with --solo).
    Play {
        track: u16,
        /// Stop everything else first.
        #[arg(long)]
        solo: bool,
    },
    /// Stop one track.
    Stop { track: u16 },
    /// Pause one track.
    Pause { track: u16 },
    /// Resume one paused track.
    Resume { track: u16 },
    /// Pre-load a track paused at its start.
    Load { track: u16 },
    /// Enable or disable looping for a track.
    Loop {
        track: u16,
        /// Disable instead of enable.
        #[arg(long)]
        off: bool,
    },
    /// Stop every playing track.
    StopAll,
    /// Resume every paused track in sample sync.
    ResumeAll,
    /// Set the master output gain in dB.
    MasterGain {
        #[arg(allow_negative_numbers = true)]
        gain_db: i16,
    },
    /// Set one track's gain in dB.
    TrackGain {
        track: u16,
        #[arg(allow_negative_numbers = true)]
        gain_db: i16,
    },
    /// Fade a track to a gain over a duration.
    Fade {
        track: u16,
        #[arg(allow_negative_numbers = true)]
        gain_db: i16,
        time_ms: u16,
        /// Stop the track when the fade completes.
        #[arg(long)]
        stop: bool,
    },
    /// Cross-fade from one track to another.
    Crossfade {
        from: u16,
        to: u16,
        #[arg(allow_negative_numbers = true)]
        gain_db: i16,
        time_ms: u16,
    },
    /// Offset the playback samplerate.
    SamplerateOffset {
        #[arg(allow_negative_numbers = true)]
        offset: i16,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli.config.as_deref())?;
    let timeout = match &cli.timeout {
        Some(text) => parse_duration(text)?,
        None => config.reply_timeout(),
    };

    info!("connecting to {}", cli.connect);
    let port = TcpPort::connect(&cli.connect)?;
    let mut trigger = AudioTrigger::new(port, config);

    match cli.command {
        Command::Version => {
            trigger.query(&TriggerCommand::GetVersion, timeout)?;
            println!("firmware version: {}", trigger.version_string());
        }
        Command::Sysinfo => {
            trigger.query(&TriggerCommand::GetSysInfo, timeout)?;
            println!(
                "{} voices, {} tracks",
                trigger.voice_count(),
                trigger.track_count()
            );
        }
        Command::Status => {
            trigger.query(&TriggerCommand::GetStatus, timeout)?;
            if trigger.playing().is_empty() {
                println!("nothing playing");
            } else {
                for track in trigger.playing() {
                    println!("playing: track {track}");
                }
            }
        }
        Command::Play { track, solo } => {
            if solo {
                trigger.track_play_solo(track)?;
            } else {
                trigger.track_play_poly(track)?;
            }
        }
        Command::Stop { track } => trigger.track_stop(track)?,
        Command::Pause { track } => trigger.track_pause(track)?,
        Command::Resume { track } => trigger.track_resume(track)?,
        Command::Load { track } => trigger.track_load(track)?,
        Command::Loop { track, off } => trigger.track_loop(track, !off)?,
        Command::StopAll => trigger.stop_all()?,
        Command::ResumeAll => trigger.resume_all_in_sync()?,
        Command::MasterGain { gain_db } => trigger.master_gain(gain_db)?,
        Command::TrackGain { track, gain_db } => trigger.track_gain(track, gain_db)?,
        Command::Fade {
            track,
            gain_db,
            time_ms,
            stop,
        } => trigger.track_fade(track, gain_db, time_ms, stop)?,
        Command::Crossfade {
            from,
            to,
            gain_db,
            time_ms,
        } => trigger.cross_fade(from, to, gain_db, time_ms)?,
        Command::SamplerateOffset { offset } => trigger.samplerate_offset(offset)?,
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<TriggerConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&text)?)
        }
        None => Ok(TriggerConfig::default()),
    }
}

fn parse_duration(input: &str) -> Result<Duration, Box<dyn Error>> {
    let input = input.trim();
    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "ms")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| format!("invalid duration value: {input}"))?;

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
