/// Sound engine: procedural 8-bit style sound effects via rodio.
///
/// All sounds are synthesised into sample buffers at init time.
/// Playback is fire-and-forget (non-blocking) via rodio's Sink.
///
/// Compile without the "sound" feature to disable audio entirely
/// (the stub SoundEngine does nothing).

#[cfg(feature = "sound")]
mod inner {
    use std::f32::consts::TAU;

    use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 22050;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_flap: Vec<f32>,
        sfx_score: Vec<f32>,
        sfx_level_up: Vec<f32>,
        sfx_crash: Vec<f32>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("audio disabled: {e}");
                    return None;
                }
            };

            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_flap: gen_flap(),
                sfx_score: gen_score(),
                sfx_level_up: gen_level_up(),
                sfx_crash: gen_crash(),
            })
        }

        fn play(&self, samples: &[f32]) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec()));
                sink.detach(); // fire-and-forget
            }
        }

        pub fn play_flap(&self) { self.play(&self.sfx_flap); }
        pub fn play_score(&self) { self.play(&self.sfx_score); }
        pub fn play_level_up(&self) { self.play(&self.sfx_level_up); }
        pub fn play_crash(&self) { self.play(&self.sfx_crash); }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators — all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    fn samples_for(duration: f32) -> usize {
        (SAMPLE_RATE as f32 * duration) as usize
    }

    /// Sine sweep from `f0` to `f1` with linear fade out.
    fn sweep(f0: f32, f1: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = samples_for(duration);
        let mut phase = 0.0_f32;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = f0 + (f1 - f0) * t;
                phase += freq / SAMPLE_RATE as f32;
                (phase * TAU).sin() * (1.0 - t) * volume
            })
            .collect()
    }

    /// Flap: short upward chirp
    fn gen_flap() -> Vec<f32> {
        sweep(400.0, 800.0, 0.08, 0.2)
    }

    /// Score: two-note blip E5→A5
    fn gen_score() -> Vec<f32> {
        let mut samples = sweep(659.0, 659.0, 0.06, 0.18);
        samples.extend(sweep(880.0, 880.0, 0.09, 0.18));
        samples
    }

    /// Difficulty raise: ascending arpeggio C5→E5→G5→C6
    fn gen_level_up() -> Vec<f32> {
        [523.0_f32, 659.0, 784.0, 1047.0]
            .iter()
            .flat_map(|&f| {
                let n = samples_for(0.07);
                (0..n).map(move |i| {
                    let t = i as f32 / SAMPLE_RATE as f32;
                    let env = 1.0 - (i as f32 / n as f32) * 0.4;
                    // Sine + 3rd harmonic for a squarer, retro tone
                    let wave = (t * f * TAU).sin() * 0.7 + (t * f * 3.0 * TAU).sin() * 0.3;
                    wave * env * 0.22
                })
            })
            .collect()
    }

    /// Crash: noise burst over a falling tone
    fn gen_crash() -> Vec<f32> {
        let tone = sweep(440.0, 110.0, 0.45, 0.3);
        let n = tone.len();
        let mut rng: u32 = 0x2545_f491;
        tone.into_iter()
            .enumerate()
            .map(|(i, s)| {
                rng = rng.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let env = (1.0 - i as f32 / n as f32).powf(2.0);
                s * 0.6 + noise * env * 0.15
            })
            .collect()
    }

}

// ════════════════════════════════════════════════════════════
//  Public API — compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_flap(&self) {}
    pub fn play_score(&self) {}
    pub fn play_level_up(&self) {}
    pub fn play_crash(&self) {}
}
