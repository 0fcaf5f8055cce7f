//! The in-memory audio clip model.
//!
//! Clips are mono f32 sample buffers at a fixed sample rate. They are
//! combined by appending samples (`+` or [`AudioClip::push`]) and shaped
//! with linear fades and silence. All clips flowing through one pipeline
//! share the pipeline's sample rate.

use std::ops::Add;
use std::time::Duration;

/// A mono audio buffer with a known sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioClip {
    /// Create a clip from raw mono samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// An empty clip at the given sample rate.
    pub fn empty(sample_rate: u32) -> Self {
        Self::new(Vec::new(), sample_rate)
    }

    /// A zero-amplitude clip of the given length.
    pub fn silent(duration: Duration, sample_rate: u32) -> Self {
        let len = (duration.as_secs_f64() * f64::from(sample_rate)).round() as usize;
        Self::new(vec![0.0; len], sample_rate)
    }

    /// The raw sample buffer.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// The sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the clip holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback duration of the clip.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / f64::from(self.sample_rate))
    }

    /// Apply a linear amplitude ramp from zero over the first `fade`.
    ///
    /// A fade longer than the clip ramps over the whole clip.
    #[must_use]
    pub fn fade_in(mut self, fade: Duration) -> Self {
        let n = self.fade_samples(fade);
        for (i, sample) in self.samples.iter_mut().take(n).enumerate() {
            *sample *= i as f32 / n as f32;
        }
        self
    }

    /// Apply a linear amplitude ramp to zero over the last `fade`.
    #[must_use]
    pub fn fade_out(mut self, fade: Duration) -> Self {
        let n = self.fade_samples(fade);
        let len = self.samples.len();
        for (i, sample) in self.samples.iter_mut().skip(len - n).enumerate() {
            *sample *= (n - i) as f32 / n as f32;
        }
        self
    }

    /// Append another clip's samples to this one.
    ///
    /// Both clips must share the same sample rate.
    pub fn push(&mut self, other: &AudioClip) {
        assert_eq!(
            self.sample_rate, other.sample_rate,
            "cannot append clips with different sample rates"
        );
        self.samples.extend_from_slice(&other.samples);
    }

    fn fade_samples(&self, fade: Duration) -> usize {
        let n = (fade.as_secs_f64() * f64::from(self.sample_rate)).round() as usize;
        n.min(self.samples.len())
    }
}

impl Add for AudioClip {
    type Output = AudioClip;

    fn add(mut self, other: AudioClip) -> AudioClip {
        self.push(&other);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 24_000;

    fn ones(len: usize) -> AudioClip {
        AudioClip::new(vec![1.0; len], RATE)
    }

    #[test]
    fn test_silent_len_and_duration() {
        let clip = AudioClip::silent(Duration::from_millis(500), RATE);
        assert_eq!(clip.len(), 12_000);
        assert_eq!(clip.duration(), Duration::from_millis(500));
        assert!(clip.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_empty_clip() {
        let clip = AudioClip::empty(RATE);
        assert!(clip.is_empty());
        assert_eq!(clip.duration(), Duration::ZERO);
    }

    #[test]
    fn test_fade_in_ramp() {
        let clip = ones(2_400).fade_in(Duration::from_millis(50));
        let samples = clip.samples();

        // 50ms at 24kHz is 1200 samples of ramp.
        assert_eq!(samples[0], 0.0);
        assert!(samples[600] > 0.4 && samples[600] < 0.6);
        assert_eq!(samples[1_200], 1.0);
        assert_eq!(samples[2_399], 1.0);
    }

    #[test]
    fn test_fade_out_ramp() {
        let clip = ones(2_400).fade_out(Duration::from_millis(50));
        let samples = clip.samples();

        assert_eq!(samples[0], 1.0);
        assert_eq!(samples[1_199], 1.0);
        assert!(samples[2_399] < 0.001);
    }

    #[test]
    fn test_fade_longer_than_clip() {
        let clip = ones(100).fade_in(Duration::from_secs(10));
        assert_eq!(clip.len(), 100);
        assert_eq!(clip.samples()[0], 0.0);
    }

    #[test]
    fn test_fade_on_empty_clip() {
        let clip = AudioClip::empty(RATE)
            .fade_in(Duration::from_millis(50))
            .fade_out(Duration::from_millis(50));
        assert!(clip.is_empty());
    }

    #[test]
    fn test_add_concatenates() {
        let combined = ones(100) + AudioClip::silent(Duration::from_millis(500), RATE) + ones(50);
        assert_eq!(combined.len(), 100 + 12_000 + 50);
        assert_eq!(combined.samples()[0], 1.0);
        assert_eq!(combined.samples()[100], 0.0);
    }

    #[test]
    fn test_push_accumulates() {
        let mut acc = AudioClip::empty(RATE);
        acc.push(&ones(10));
        acc.push(&ones(20));
        assert_eq!(acc.len(), 30);
    }

    #[test]
    #[should_panic(expected = "different sample rates")]
    fn test_push_rejects_rate_mismatch() {
        let mut acc = AudioClip::empty(RATE);
        acc.push(&AudioClip::new(vec![0.0], 44_100));
    }
}
