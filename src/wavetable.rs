//! Wavetable model: a frame-partitioned view over an immutable sample buffer.
//!
//! A wavetable holds a single decoded sample buffer and exposes it as a fixed
//! number of equal-length, contiguous, non-overlapping frames. Frames are lazy
//! windows into the shared buffer; nothing is copied and per-frame spectra are
//! recomputed on each access.

use anyhow::bail;
use rustfft::{num_complex::Complex, FftPlanner};
use std::sync::Arc;

/// A sample buffer partitioned into equal-length waveform frames.
pub struct Wavetable {
    samples: Arc<[f64]>,
    number_of_frames: usize,
    sample_rate: u32,
}

impl Wavetable {
    /// Builds a wavetable over `samples` with `number_of_frames` frames.
    ///
    /// # Errors
    /// - If the buffer is empty
    /// - If `number_of_frames` is zero
    /// - If `sample_rate` is zero
    /// - If `number_of_frames` does not evenly divide the buffer length
    pub fn new(
        samples: Vec<f64>,
        number_of_frames: usize,
        sample_rate: u32,
    ) -> Result<Self, anyhow::Error> {
        if samples.is_empty() {
            bail!("Sample buffer is empty");
        }
        if number_of_frames == 0 {
            bail!("Frame count must be at least 1");
        }
        if sample_rate == 0 {
            bail!("Sample rate must be positive");
        }
        if samples.len() % number_of_frames != 0 {
            bail!(
                "Frame count {} does not evenly divide {} samples",
                number_of_frames,
                samples.len()
            );
        }

        Ok(Wavetable {
            samples: samples.into(),
            number_of_frames,
            sample_rate,
        })
    }

    /// Total number of samples in the underlying buffer.
    pub fn total_samples(&self) -> usize {
        self.samples.len()
    }

    /// Number of frames the buffer is partitioned into.
    pub fn number_of_frames(&self) -> usize {
        self.number_of_frames
    }

    /// Samples per frame.
    pub fn frame_size(&self) -> usize {
        self.samples.len() / self.number_of_frames
    }

    /// Number of non-redundant spectrum bins per frame (DC through Nyquist).
    pub fn n_partials(&self) -> usize {
        self.frame_size() / 2 + 1
    }

    /// Sample rate of the underlying buffer, in samples per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Time-domain view of the whole buffer: `(time_axis, amplitude)` with
    /// `time_axis[i] = i / sample_rate`.
    pub fn time_domain(&self) -> (Vec<f64>, &[f64]) {
        let time_axis = time_axis(self.samples.len(), self.sample_rate);
        (time_axis, &self.samples[..])
    }

    /// Returns the frame at `index`.
    ///
    /// # Errors
    /// - If `index` is not below `number_of_frames`
    pub fn frame_at(&self, index: usize) -> Result<Frame, anyhow::Error> {
        if index >= self.number_of_frames {
            bail!(
                "Frame index {} out of range (wavetable has {} frames)",
                index,
                self.number_of_frames
            );
        }

        Ok(Frame {
            samples: Arc::clone(&self.samples),
            offset: index * self.frame_size(),
            len: self.frame_size(),
            sample_rate: self.sample_rate,
        })
    }

    /// Returns the frames selected by an explicit `start..stop` range with the
    /// given step. An empty range yields an empty vec.
    ///
    /// # Errors
    /// - If `step` is zero
    /// - If `stop` exceeds `number_of_frames`
    pub fn frames_in(
        &self,
        start: usize,
        stop: usize,
        step: usize,
    ) -> Result<Vec<Frame>, anyhow::Error> {
        if step == 0 {
            bail!("Frame range step must be at least 1");
        }
        if stop > self.number_of_frames {
            bail!(
                "Frame range stop {} out of range (wavetable has {} frames)",
                stop,
                self.number_of_frames
            );
        }

        (start..stop)
            .step_by(step)
            .map(|index| self.frame_at(index))
            .collect()
    }

    /// Iterates over all frames in index order.
    pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        // Every index below number_of_frames is valid by construction
        let frame_size = self.frame_size();
        (0..self.number_of_frames).map(move |index| Frame {
            samples: Arc::clone(&self.samples),
            offset: index * frame_size,
            len: frame_size,
            sample_rate: self.sample_rate,
        })
    }
}

/// One fixed-length waveform segment of a wavetable.
///
/// A frame is a window into the wavetable's shared buffer, identified by
/// offset and length. Its spectrum is derived on demand, never cached.
pub struct Frame {
    samples: Arc<[f64]>,
    offset: usize,
    len: usize,
    sample_rate: u32,
}

impl Frame {
    /// Raw samples of this frame.
    pub fn data(&self) -> &[f64] {
        &self.samples[self.offset..self.offset + self.len]
    }

    /// Number of samples in this frame.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-redundant spectrum bins for this frame.
    pub fn n_partials(&self) -> usize {
        self.len / 2 + 1
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Time-domain view: `(time_axis, amplitude)` with
    /// `time_axis[i] = i / sample_rate`.
    pub fn time_domain(&self) -> (Vec<f64>, &[f64]) {
        (time_axis(self.len, self.sample_rate), self.data())
    }

    /// Frequency-domain view: `(magnitude, phase)` of the real-input DFT of
    /// this frame, both of length `n_partials`.
    ///
    /// Uses the unnormalized forward transform and keeps the bins from DC
    /// through Nyquist; the upper half of the spectrum is redundant for
    /// real input.
    pub fn freq_domain(&self) -> (Vec<f64>, Vec<f64>) {
        let mut buffer: Vec<Complex<f64>> = self
            .data()
            .iter()
            .map(|&sample| Complex::new(sample, 0.0))
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer.len());
        fft.process(&mut buffer);

        let partials = &buffer[..self.n_partials()];
        let magnitude = partials.iter().map(|bin| bin.norm()).collect();
        let phase = partials.iter().map(|bin| bin.arg()).collect();

        (magnitude, phase)
    }
}

fn time_axis(len: usize, sample_rate: u32) -> Vec<f64> {
    (0..len).map(|i| i as f64 / sample_rate as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<f64> {
        (0..len).map(|i| i as f64).collect()
    }

    #[test]
    fn test_partitioning() {
        let wt = Wavetable::new(ramp(256), 4, 8000).unwrap();
        assert_eq!(wt.total_samples(), 256);
        assert_eq!(wt.number_of_frames(), 4);
        assert_eq!(wt.frame_size(), 64);
        assert_eq!(wt.n_partials(), 33);
    }

    #[test]
    fn test_rejects_degenerate_parameters() {
        assert!(Wavetable::new(vec![], 4, 8000).is_err());
        assert!(Wavetable::new(ramp(256), 0, 8000).is_err());
        assert!(Wavetable::new(ramp(256), 4, 0).is_err());
        // 5 does not divide 256
        assert!(Wavetable::new(ramp(256), 5, 8000).is_err());
    }

    #[test]
    fn test_frame_windows() {
        let wt = Wavetable::new(ramp(256), 4, 8000).unwrap();
        let frame = wt.frame_at(1).unwrap();
        assert_eq!(frame.len(), 64);
        assert!(!frame.is_empty());
        assert_eq!(frame.sample_rate(), 8000);
        assert_eq!(frame.data()[0], 64.0);
        assert_eq!(frame.data()[63], 127.0);
    }

    #[test]
    fn test_frame_index_out_of_range() {
        let wt = Wavetable::new(ramp(256), 4, 8000).unwrap();
        assert!(wt.frame_at(3).is_ok());
        assert!(wt.frame_at(4).is_err());
    }

    #[test]
    fn test_frames_round_trip() {
        let samples = ramp(256);
        let wt = Wavetable::new(samples.clone(), 8, 8000).unwrap();
        assert_eq!(wt.frames().count(), 8);
        let concatenated: Vec<f64> = wt.frames().flat_map(|f| f.data().to_vec()).collect();
        assert_eq!(concatenated, samples);
    }

    #[test]
    fn test_frames_in_range() {
        let wt = Wavetable::new(ramp(256), 8, 8000).unwrap();
        let frames = wt.frames_in(1, 7, 2).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].data()[0], 32.0);
        assert_eq!(frames[1].data()[0], 96.0);

        // Empty and invalid ranges
        assert!(wt.frames_in(4, 4, 1).unwrap().is_empty());
        assert!(wt.frames_in(6, 2, 1).unwrap().is_empty());
        assert!(wt.frames_in(0, 9, 1).is_err());
        assert!(wt.frames_in(0, 8, 0).is_err());
    }

    #[test]
    fn test_time_domain_axis() {
        let wt = Wavetable::new(ramp(256), 4, 8000).unwrap();
        let frame = wt.frame_at(0).unwrap();
        let (t, amplitude) = frame.time_domain();
        assert_eq!(t.len(), 64);
        assert_eq!(amplitude.len(), 64);
        assert_eq!(t[0], 0.0);
        assert!((t[1] - 1.0 / 8000.0).abs() < 1e-12);

        let (t_all, all) = wt.time_domain();
        assert_eq!(t_all.len(), 256);
        assert_eq!(all.len(), 256);
    }

    #[test]
    fn test_freq_domain_lengths() {
        let wt = Wavetable::new(ramp(256), 4, 8000).unwrap();
        let (magnitude, phase) = wt.frame_at(0).unwrap().freq_domain();
        assert_eq!(magnitude.len(), 33);
        assert_eq!(phase.len(), 33);
    }

    #[test]
    fn test_freq_domain_dc() {
        let wt = Wavetable::new(vec![1.0; 64], 1, 8000).unwrap();
        let (magnitude, _) = wt.frame_at(0).unwrap().freq_domain();
        // Unnormalized DFT: DC bin carries the sample sum
        assert!((magnitude[0] - 64.0).abs() < 1e-9);
        for bin in &magnitude[1..] {
            assert!(bin.abs() < 1e-9);
        }
    }

    #[test]
    fn test_freq_domain_sine_peak() {
        let samples: Vec<f64> = (0..64)
            .map(|i| (2.0 * std::f64::consts::PI * 4.0 * i as f64 / 64.0).sin())
            .collect();
        let wt = Wavetable::new(samples, 1, 8000).unwrap();
        let (magnitude, _) = wt.frame_at(0).unwrap().freq_domain();

        let peak_bin = magnitude
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak_bin, 4);
        // Half the energy of a unit sine lands in the positive-frequency bin
        assert!((magnitude[4] - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_odd_frame_size_partials() {
        let wt = Wavetable::new(ramp(27), 3, 8000).unwrap();
        assert_eq!(wt.frame_size(), 9);
        assert_eq!(wt.n_partials(), 5);
        let (magnitude, phase) = wt.frame_at(0).unwrap().freq_domain();
        assert_eq!(magnitude.len(), 5);
        assert_eq!(phase.len(), 5);
    }
}
