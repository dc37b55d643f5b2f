//! Entrain CLI — real-time binaural-beat player with live parameter control.
//!
//! After the stream starts, the main thread becomes the control thread: a
//! small stdin line protocol stands in for the sliders a UI host would have,
//! publishing through the same wait-free parameter path.

use std::error::Error;
use std::io::BufRead;
use std::time::Duration;

use cpal::traits::{DeviceTrait, StreamTrait};
use entrain_core::params::{BeatParams, DEFAULT_GAIN, DEFAULT_LEFT_HZ, DEFAULT_RIGHT_HZ};
use entrain_engine::realtime::{build_stream, choose_config, list_output_devices, output_device};
use entrain_engine::{BeatNode, Engine};

#[derive(Debug, Default)]
struct Args {
    list_devices: bool,
    device_name: Option<String>,
    sample_rate: Option<u32>,
    channels: Option<u16>,
    duration_sec: Option<u64>,
    left_hz: Option<f32>,
    right_hz: Option<f32>,
    beat_hz: Option<f32>,
    gain: Option<f32>,
}

fn parse_args() -> Args {
    let mut a = Args::default();
    for s in std::env::args().skip(1) {
        if s == "--list-devices" { a.list_devices = true; continue; }
        if let Some(rest) = s.strip_prefix("--device=")      { a.device_name = Some(rest.to_string()); continue; }
        if let Some(rest) = s.strip_prefix("--sample-rate=") { a.sample_rate = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--channels=")    { a.channels    = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--duration=")    { a.duration_sec= rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--left=")        { a.left_hz     = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--right=")       { a.right_hz    = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--beat=")        { a.beat_hz     = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--gain=")        { a.gain        = rest.parse().ok();      continue; }
        eprintln!("[warn] unknown arg: {s}");
    }
    a
}

/// Resolve the initial parameter set from the flags.
/// `--beat=` wins over `--right=`: right = left + beat.
fn initial_params(args: &Args) -> BeatParams {
    let left = args.left_hz.unwrap_or(DEFAULT_LEFT_HZ);
    let right = match args.beat_hz {
        Some(beat) => left + beat,
        None => args.right_hz.unwrap_or(DEFAULT_RIGHT_HZ),
    };
    BeatParams::new(left, right, args.gain.unwrap_or(DEFAULT_GAIN))
}

fn control_loop(ctl: &entrain_engine::SharedBeatParams) {
    println!("Live controls: left <hz> | right <hz> | beat <hz> | gain <0..1> | show | quit");
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let mut it = line.split_whitespace();
        let cmd = it.next().unwrap_or("");
        let val: Option<f32> = it.next().and_then(|v| v.parse().ok());
        match (cmd, val) {
            ("left", Some(hz)) => ctl.set_left_hz(hz),
            ("right", Some(hz)) => ctl.set_right_hz(hz),
            ("beat", Some(hz)) => {
                let left = ctl.snapshot().clamped().left_hz;
                ctl.set_right_hz(left + hz);
            }
            ("gain", Some(g)) => ctl.set_gain(g),
            ("show", _) => {
                let p = ctl.snapshot().clamped();
                println!(
                    "left {:.1} Hz | right {:.1} Hz | beat {:.1} Hz | gain {:.2}",
                    p.left_hz,
                    p.right_hz,
                    p.beat_hz(),
                    p.gain
                );
            }
            ("quit", _) | ("exit", _) => break,
            ("", _) => {}
            _ => eprintln!("[warn] unknown command: {line}"),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args();

    if args.list_devices {
        list_output_devices()?;
        return Ok(());
    }

    println!("entrain-cli — real-time binaural-beat player\n");

    let device = output_device(args.device_name.as_deref())?;
    let sup_cfg = choose_config(&device, args.sample_rate, args.channels)?;
    let sample_format = sup_cfg.sample_format();
    let mut cfg = sup_cfg.config();

    if let Some(sr) = args.sample_rate { cfg.sample_rate = cpal::SampleRate(sr); }
    if let Some(ch) = args.channels    { cfg.channels    = ch; }

    let sr_f32 = cfg.sample_rate.0 as f32;
    let params = initial_params(&args);

    let node = BeatNode::new(sr_f32);
    let ctl = node.params();
    ctl.publish(params);
    let engine = Engine::new(node, sr_f32);

    println!("Using device: {}", device.name()?);
    println!("Stream config: {:?} (sample_format: {:?})", cfg, sample_format);
    println!(
        "Left: {:.1} Hz | Right: {:.1} Hz | Beat: {:.1} Hz | Gain: {:.2}",
        params.left_hz,
        params.right_hz,
        params.beat_hz(),
        params.gain
    );
    if cfg.channels < 2 {
        eprintln!("[warn] device is not stereo; output will be silent (binaural needs 2 channels)");
    }
    if let Some(d) = args.duration_sec { println!("Auto-stop after {d} seconds"); }

    let err_fn = |e: cpal::StreamError| eprintln!("[cpal] stream error: {e}");

    let stream = match sample_format {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &cfg, engine, err_fn)?,
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &cfg, engine, err_fn)?,
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &cfg, engine, err_fn)?,
        other => return Err(format!("unsupported device sample format: {other:?}").into()),
    };

    stream.play()?;

    if let Some(d) = args.duration_sec {
        std::thread::sleep(Duration::from_secs(d));
        return Ok(());
    }

    control_loop(&ctl);
    Ok(())
}
