use std::f64::consts::PI;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::LookHeartError;

/// Isoelectric level every beat is drawn around.
pub const BASELINE: f64 = 50.0;
/// Output values are clamped into `[VALUE_MIN, VALUE_MAX]`.
pub const VALUE_MIN: f64 = 0.0;
pub const VALUE_MAX: f64 = 150.0;

/// Longest series `validate` accepts: 24 h at 1 kHz.
pub const MAX_POINTS: usize = 24 * 60 * 60 * 1000;

// --- 噪声参数 (异常心拍) ---
/// Probability that an abnormal sample receives the wide noise band.
const ECTOPIC_PROBABILITY: f64 = 0.1;
const ECTOPIC_NOISE_SPAN: f64 = 15.0;
const BASE_NOISE_SPAN: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveformPoint {
    /// Sample ordinal, starting at zero.
    pub index: usize,
    /// Clamped synthetic amplitude.
    pub value: f64,
}

pub type WaveformSeries = Vec<WaveformPoint>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaveformOptions {
    #[serde(rename = "duration")]
    pub duration_secs: f64,
    #[serde(rename = "heartRate")]
    pub heart_rate_bpm: f64,
    #[serde(rename = "samplingRate")]
    pub sampling_rate_hz: f64,
    pub abnormal: bool,
}

impl Default for WaveformOptions {
    fn default() -> Self {
        // Six seconds at 100 Hz, resting rate.
        Self {
            duration_secs: 6.0,
            heart_rate_bpm: 72.0,
            sampling_rate_hz: 100.0,
            abnormal: false,
        }
    }
}

impl WaveformOptions {
    pub fn with_heart_rate(heart_rate_bpm: f64, abnormal: bool) -> Self {
        Self {
            heart_rate_bpm,
            abnormal,
            ..Self::default()
        }
    }

    /// Number of samples a series generated with these options contains.
    pub fn num_points(&self) -> usize {
        (self.duration_secs * self.sampling_rate_hz).floor() as usize
    }

    /// Samples spanned by one cardiac cycle. Not necessarily integral.
    pub fn samples_per_beat(&self) -> f64 {
        60.0 / self.heart_rate_bpm * self.sampling_rate_hz
    }

    /// Check the preconditions `generate_waveform` relies on: positive,
    /// finite parameters and at most [`MAX_POINTS`] samples.
    pub fn validate(&self) -> Result<(), LookHeartError> {
        let fields = [
            ("duration", self.duration_secs),
            ("heartRate", self.heart_rate_bpm),
            ("samplingRate", self.sampling_rate_hz),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(LookHeartError::InvalidParameter { name, value });
            }
        }
        // Checked before the usize cast, which saturates.
        let requested = self.duration_secs * self.sampling_rate_hz;
        if requested >= (MAX_POINTS + 1) as f64 {
            return Err(LookHeartError::TooManySamples {
                requested,
                limit: MAX_POINTS,
            });
        }
        Ok(())
    }
}

// --- PQRST 波形 ---
/// Deflection added to the baseline at a given beat phase in `[0, 1)`.
///
/// P wave over `[0, 0.1)`, QRS complex over `[0.12, 0.22)`, T wave over
/// `[0.3, 0.5)`; everything else sits on the baseline.
pub fn pqrst_deflection(beat_phase: f64) -> f64 {
    if (0.0..0.1).contains(&beat_phase) {
        5.0 * (beat_phase / 0.1 * PI).sin()
    } else if (0.12..0.22).contains(&beat_phase) {
        let qrs_phase = (beat_phase - 0.12) / 0.1;
        if qrs_phase < 0.2 {
            -5.0
        } else if qrs_phase < 0.5 {
            70.0 * ((qrs_phase - 0.2) / 0.3 * PI).sin()
        } else {
            -10.0 * ((qrs_phase - 0.5) / 0.5 * PI).sin()
        }
    } else if (0.3..0.5).contains(&beat_phase) {
        10.0 * ((beat_phase - 0.3) / 0.2 * PI).sin()
    } else {
        0.0
    }
}

fn noise<R: Rng + ?Sized>(abnormal: bool, rng: &mut R) -> f64 {
    if abnormal && rng.gen::<f64>() < ECTOPIC_PROBABILITY {
        (rng.gen::<f64>() - 0.5) * ECTOPIC_NOISE_SPAN
    } else {
        (rng.gen::<f64>() - 0.5) * BASE_NOISE_SPAN
    }
}

/// Synthesise a PQRST-shaped series, drawing noise from `rng`.
///
/// Options are not validated; a non-positive heart rate or sampling rate
/// yields a degenerate series. Use [`WaveformOptions::validate`] first for
/// untrusted input.
pub fn generate_waveform<R: Rng + ?Sized>(options: &WaveformOptions, rng: &mut R) -> WaveformSeries {
    let num_points = options.num_points();
    let samples_per_beat = options.samples_per_beat();
    (0..num_points)
        .map(|index| {
            let beat_phase = (index as f64 % samples_per_beat) / samples_per_beat;
            let value = BASELINE + pqrst_deflection(beat_phase) + noise(options.abnormal, rng);
            WaveformPoint {
                index,
                value: value.clamp(VALUE_MIN, VALUE_MAX),
            }
        })
        .collect()
}

/// Same as [`generate_waveform`] with a `StdRng` seeded from `seed`.
pub fn generate_waveform_seeded(options: &WaveformOptions, seed: u64) -> WaveformSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_waveform(options, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::RngCore;
    use std::collections::VecDeque;
    /// Replays scripted `gen::<f64>()` results, then a fixed fallback; counts draws.
    struct ScriptedRng {
        script: VecDeque<f64>,
        fallback: f64,
        draws: usize,
    }
    impl ScriptedRng {
        fn new(script: &[f64], fallback: f64) -> Self {
            Self {
                script: script.iter().copied().collect(),
                fallback,
                draws: 0,
            }
        }
    }
    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            let v = self.script.pop_front().unwrap_or(self.fallback);
            // rand maps a u64 to f64 as (x >> 11) * 2^-53; round up so 0.1 stays >= 0.1.
            let mantissa = ((v * (1u64 << 53) as f64).ceil() as u64).min((1u64 << 53) - 1);
            mantissa << 11
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }
    #[test]
    fn ectopic_branch_adds_wide_noise() {
        let mut rng = ScriptedRng::new(&[0.05, 1.0], 0.5);
        let n = noise(true, &mut rng);
        assert!((n - 7.5).abs() < 1e-9, "got {n}");
        assert_eq!(rng.draws, 2);
        let mut rng = ScriptedRng::new(&[0.0999, 0.0], 0.5);
        assert_eq!(noise(true, &mut rng), -7.5);
    }
    #[test]
    fn abnormal_above_threshold_uses_base_band() {
        let mut rng = ScriptedRng::new(&[0.1, 1.0], 0.5);
        let n = noise(true, &mut rng);
        assert!((n - 1.0).abs() < 1e-9, "got {n}");
        assert_eq!(rng.draws, 2);
        let mut rng = ScriptedRng::new(&[0.5, 0.0], 0.5);
        assert_eq!(noise(true, &mut rng), -1.0);
    }
    #[test]
    fn normal_samples_draw_once() {
        let mut rng = ScriptedRng::new(&[0.05], 0.5);
        let n = noise(false, &mut rng);
        assert!((n + 0.9).abs() < 1e-9, "got {n}");
        assert_eq!(rng.draws, 1);
        let opts = WaveformOptions::default();
        let mut rng = ScriptedRng::new(&[], 0.05);
        let series = generate_waveform(&opts, &mut rng);
        assert_eq!(rng.draws, series.len());
    }
    #[test]
    fn abnormal_generation_applies_ectopic_noise() {
        // Every draw is 0.05: wide band on every sample, two draws each.
        let opts = WaveformOptions::with_heart_rate(72.0, true);
        let mut rng = ScriptedRng::new(&[], 0.05);
        let series = generate_waveform(&opts, &mut rng);
        assert_eq!(rng.draws, 2 * series.len());
        let flat = series[(0.7 * opts.samples_per_beat()) as usize].value;
        assert!((flat - (BASELINE - 6.75)).abs() < 1e-9, "got {flat}");
    }
    #[test]
    fn length_is_truncated_product() {
        let opts = WaveformOptions {
            duration_secs: 2.5,
            sampling_rate_hz: 33.0,
            ..WaveformOptions::default()
        };
        // 82.5 samples -> 82
        assert_eq!(generate_waveform_seeded(&opts, 1).len(), 82);
        assert_eq!(generate_waveform_seeded(&WaveformOptions::default(), 1).len(), 600);
    }
    #[test]
    fn indices_are_contiguous_and_values_clamped() {
        let opts = WaveformOptions::with_heart_rate(180.0, true);
        let series = generate_waveform_seeded(&opts, 7);
        for (expected, point) in series.iter().enumerate() {
            assert_eq!(point.index, expected);
            assert!((VALUE_MIN..=VALUE_MAX).contains(&point.value));
        }
    }
    #[test]
    fn seeded_generation_is_reproducible() {
        let opts = WaveformOptions::default();
        assert_eq!(generate_waveform_seeded(&opts, 42), generate_waveform_seeded(&opts, 42));
        let abnormal = WaveformOptions::with_heart_rate(140.0, true);
        assert_eq!(
            generate_waveform_seeded(&abnormal, 42),
            generate_waveform_seeded(&abnormal, 42)
        );
    }
    #[test]
    fn midpoint_noise_leaves_clean_pqrst_shape() {
        // StepRng(2^63, 0) always yields 0.5, so every noise term is zero.
        let mut rng = StepRng::new(1 << 63, 0);
        let opts = WaveformOptions::default();
        let series = generate_waveform(&opts, &mut rng);
        let spb = opts.samples_per_beat();
        let r_peak = series
            .iter()
            .take(spb as usize)
            .max_by(|a, b| a.value.total_cmp(&b.value))
            .unwrap();
        let phase = r_peak.index as f64 / spb;
        assert!((0.12..0.22).contains(&phase), "R peak at phase {phase}");
        assert!(r_peak.value > BASELINE + 60.0);
        // Isoelectric segment after the T wave.
        let flat = series[(0.7 * spb) as usize].value;
        assert!((flat - BASELINE).abs() < 1e-9);
    }
    #[test]
    fn deflection_windows() {
        assert!((pqrst_deflection(0.05) - 5.0).abs() < 1e-9);
        assert_eq!(pqrst_deflection(0.11), 0.0);
        assert_eq!(pqrst_deflection(0.125), -5.0);
        assert!((pqrst_deflection(0.155) - 70.0).abs() < 1e-6);
        assert!(pqrst_deflection(0.2) < 0.0);
        assert!((pqrst_deflection(0.4) - 10.0).abs() < 1e-9);
        assert_eq!(pqrst_deflection(0.9), 0.0);
    }
    #[test]
    fn validate_rejects_non_positive() {
        let bad = WaveformOptions {
            heart_rate_bpm: 0.0,
            ..WaveformOptions::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(LookHeartError::InvalidParameter { name: "heartRate", .. })
        ));
        assert!(WaveformOptions::default().validate().is_ok());
    }
    #[test]
    fn validate_caps_sample_count() {
        let at_limit = WaveformOptions {
            duration_secs: 86_400.0,
            sampling_rate_hz: 1000.0,
            ..WaveformOptions::default()
        };
        assert!(at_limit.validate().is_ok());
        let huge = WaveformOptions {
            duration_secs: 1e300,
            ..WaveformOptions::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(LookHeartError::TooManySamples { limit: MAX_POINTS, .. })
        ));
    }
}
