//! CPAL host glue: device selection, config matching, stream building.
//!
//! Lives behind the `realtime` feature so headless users of the engine (FFI
//! hosts, offline renderers, tests) never link an audio backend.
//!
//! The device callback is the realtime boundary: it latches parameters once,
//! pulls frames, converts samples, and keeps a cheap peak meter. Nothing in it
//! allocates, locks, or performs I/O beyond the once-per-second meter line on
//! stderr.

use std::error::Error;

use cpal::traits::{DeviceTrait, HostTrait};

use crate::graph::Engine;
use crate::node::BeatNode;

/// Print all output devices of the default host to stdout.
pub fn list_output_devices() -> Result<(), Box<dyn Error>> {
    let host = cpal::default_host();
    println!("Available output devices:");
    for dev in host.output_devices()? {
        println!("- {}", dev.name()?);
    }
    Ok(())
}

/// Default output device, or the named one if `name` is given.
pub fn output_device(name: Option<&str>) -> Result<cpal::Device, Box<dyn Error>> {
    let host = cpal::default_host();
    if let Some(name) = name {
        for d in host.output_devices()? {
            if d.name()? == *name {
                return Ok(d);
            }
        }
        return Err(format!("requested device not found: {name}").into());
    }
    host.default_output_device()
        .ok_or_else(|| "no default output device".into())
}

/// Choose a concrete stream config, preferring the requested sample rate and
/// channel count. Candidates are penalty-scored; the closest range wins.
pub fn choose_config(
    device: &cpal::Device,
    req_sr: Option<u32>,
    req_ch: Option<u16>,
) -> Result<cpal::SupportedStreamConfig, Box<dyn Error>> {
    // If nothing requested, default is already concrete.
    if req_sr.is_none() && req_ch.is_none() {
        return Ok(device.default_output_config()?);
    }

    // Pick a SupportedStreamConfigRange first.
    let mut best: Option<(u64, cpal::SupportedStreamConfigRange)> = None;
    for range in device.supported_output_configs()? {
        let ch = range.channels();
        let sr_min = range.min_sample_rate().0;
        let sr_max = range.max_sample_rate().0;

        let ch_pen = match req_ch {
            Some(c) => (i64::from(ch) - i64::from(c)).unsigned_abs(),
            None => 0,
        };
        let sr_pen = match req_sr {
            Some(sr) => {
                if (sr_min..=sr_max).contains(&sr) {
                    0
                } else {
                    u64::from(sr_min.abs_diff(sr).min(sr_max.abs_diff(sr)))
                }
            }
            None => 0,
        };

        let score = sr_pen.saturating_mul(1000) + ch_pen;
        if best.as_ref().map(|(s, _)| *s).map_or(true, |s| score < s) {
            best = Some((score, range));
        }
    }

    let (_, range) = best.ok_or_else(|| "no supported output configs".to_string())?;

    // Choose a concrete sample rate and convert the range into a concrete config.
    let pick_sr = match req_sr {
        Some(sr) => {
            let lo = range.min_sample_rate().0;
            let hi = range.max_sample_rate().0;
            cpal::SampleRate(sr.clamp(lo, hi))
        }
        None => range.max_sample_rate(),
    };

    Ok(range.with_sample_rate(pick_sr))
}

/// Build an output stream that drives an [`Engine<BeatNode>`].
///
/// Generic over the device sample format; samples are converted per frame.
/// If the negotiated config has fewer than 2 channels, every callback is a
/// silent no-op per the stereo destination contract (the stream stays alive,
/// the buffer is left untouched).
pub fn build_stream<T>(
    device: &cpal::Device,
    cfg: &cpal::StreamConfig,
    mut engine: Engine<BeatNode>,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, Box<dyn Error>>
where
    T: cpal::Sample + cpal::FromSample<f32> + cpal::SizedSample + Send + 'static,
{
    let sr = cfg.sample_rate.0 as f32;
    let channels = cfg.channels as usize;

    // ~1 second meter at requested rate
    let meter_interval = (cfg.sample_rate.0).max(1) as usize;
    let mut meter_count: usize = 0;
    let mut meter_peak: f32 = 0.0;

    let stream = device.build_output_stream(
        cfg,
        move |output: &mut [T], _| {
            if channels < 2 {
                return;
            }
            engine.begin_callback(sr);

            for frame in output.chunks_mut(channels) {
                let (l, r) = engine.next_frame();
                frame[0] = T::from_sample(l);
                if let Some(slot) = frame.get_mut(1) {
                    *slot = T::from_sample(r);
                }
                for extra in frame.iter_mut().skip(2) {
                    *extra = T::from_sample(0.0f32);
                }

                // naive peak meter over both ears
                let a = l.abs().max(r.abs());
                if a > meter_peak {
                    meter_peak = a;
                }
                meter_count += 1;
                if meter_count >= meter_interval {
                    eprintln!("[meter] peak ~ {:.3}", meter_peak);
                    meter_peak = 0.0;
                    meter_count = 0;
                }
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
