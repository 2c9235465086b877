//! YIN pitch detection
//!
//! Estimates the fundamental frequency of one analysis window using the YIN
//! algorithm: a squared-difference function over candidate lags, normalized
//! by its cumulative mean (CMNDF), searched for the first dip below an
//! absolute threshold.
//!
//! The difference function is evaluated through an FFT-based autocorrelation
//! identity rather than the direct O(W²) double loop; both forms produce the
//! same values up to floating-point rounding (checked against the direct form
//! in the test module).
//!
//! # Reference
//!
//! de Cheveigné, A., & Kawahara, H. (2002). YIN, a fundamental frequency
//! estimator for speech and music. *Journal of the Acoustical Society of
//! America*, 111(4), 1917-1930.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::config::AnalysisConfig;

/// Result of pitch estimation for one window
#[derive(Debug, Clone, Copy)]
pub struct PitchEstimate {
    /// Estimated fundamental in Hz, or -1.0 when no pitch was found
    pub frequency: f32,

    /// Periodicity confidence in [0, 1]; 0.0 when unvoiced
    pub probability: f32,
}

impl PitchEstimate {
    /// The unvoiced sentinel
    pub fn unvoiced() -> Self {
        Self {
            frequency: -1.0,
            probability: 0.0,
        }
    }

    /// True if a pitch was found
    pub fn is_voiced(&self) -> bool {
        self.frequency > 0.0
    }
}

/// YIN pitch detector with reusable FFT plans and scratch buffers
///
/// One detector is created per segment analysis and fed every frame window,
/// so plan construction and allocations happen once rather than per frame.
pub struct YinDetector {
    threshold: f32,
    fallback_ceiling: f32,
    min_frequency: f32,
    max_frequency: f32,

    fft_len: usize,
    fft: Arc<dyn Fft<f32>>,
    ifft: Arc<dyn Fft<f32>>,
    signal_spectrum: Vec<Complex<f32>>,
    head_spectrum: Vec<Complex<f32>>,
    prefix_energy: Vec<f32>,
    cmndf: Vec<f32>,
}

impl YinDetector {
    /// Create a detector sized for the configured analysis window
    pub fn new(config: &AnalysisConfig) -> Self {
        let integration = (config.window_size / 2).max(1);
        let fft_len = (2 * integration).next_power_of_two().max(2);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_len);
        let ifft = planner.plan_fft_inverse(fft_len);

        Self {
            threshold: config.yin_threshold,
            fallback_ceiling: config.yin_fallback_ceiling,
            min_frequency: config.min_frequency,
            max_frequency: config.max_frequency,
            fft_len,
            fft,
            ifft,
            signal_spectrum: vec![Complex::new(0.0, 0.0); fft_len],
            head_spectrum: vec![Complex::new(0.0, 0.0); fft_len],
            prefix_energy: Vec::new(),
            cmndf: Vec::new(),
        }
    }

    /// Estimate the fundamental frequency of one window
    ///
    /// # Arguments
    ///
    /// * `window` - Analysis window samples
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Returns
    ///
    /// A [`PitchEstimate`]. Windows too short to hold a candidate period,
    /// silent windows, and aperiodic noise all return the unvoiced sentinel.
    pub fn estimate(&mut self, window: &[f32], sample_rate: u32) -> PitchEstimate {
        // Integration window: lags are searched over the first half so that
        // buffer[j + tau] stays inside the window for every candidate.
        let w = window.len() / 2;
        if w < 4 || sample_rate == 0 {
            return PitchEstimate::unvoiced();
        }

        self.compute_cmndf(window, w);

        // Constrain candidate lags to the musical range. Small lags map to
        // high frequencies and vice versa.
        let min_tau = ((sample_rate as f32 / self.max_frequency) as usize).max(2);
        let max_tau = ((sample_rate as f32 / self.min_frequency) as usize).min(w - 2);
        if min_tau >= max_tau {
            return PitchEstimate::unvoiced();
        }

        // Absolute threshold search: the first dip below the threshold wins,
        // which favors the highest plausible frequency. From the crossing,
        // walk forward to the bottom of the valley.
        let mut tau_estimate = None;
        let mut tau = min_tau;
        while tau < max_tau {
            if self.cmndf[tau] < self.threshold {
                while tau + 1 < max_tau && self.cmndf[tau + 1] < self.cmndf[tau] {
                    tau += 1;
                }
                tau_estimate = Some(tau);
                break;
            }
            tau += 1;
        }

        // Fallback: take the global minimum over the search range, but only
        // accept a dip that still looks periodic. A best value above the
        // ceiling is noise.
        let tau_estimate = match tau_estimate {
            Some(t) => t,
            None => {
                let mut min_val = f32::MAX;
                let mut min_tau_idx = None;
                for t in min_tau..max_tau {
                    if self.cmndf[t] < min_val {
                        min_val = self.cmndf[t];
                        min_tau_idx = Some(t);
                    }
                }
                match min_tau_idx {
                    Some(t) if min_val < self.fallback_ceiling => t,
                    _ => return PitchEstimate::unvoiced(),
                }
            }
        };

        // Parabolic interpolation around the chosen lag for sub-sample
        // precision.
        let mut better_tau = tau_estimate as f32;
        if tau_estimate > 0 && tau_estimate < w - 1 {
            let s0 = self.cmndf[tau_estimate - 1];
            let s1 = self.cmndf[tau_estimate];
            let s2 = self.cmndf[tau_estimate + 1];
            let denominator = 2.0 * (2.0 * s1 - s2 - s0);
            if denominator.abs() > 1e-6 {
                better_tau += (s2 - s0) / denominator;
            }
        }

        PitchEstimate {
            frequency: sample_rate as f32 / better_tau,
            probability: 1.0 - self.cmndf[tau_estimate].min(1.0),
        }
    }

    /// Compute the cumulative mean normalized difference function over lags
    /// `[0, w)` into `self.cmndf`.
    ///
    /// Uses the identity
    /// `d(tau) = E(0, w) + E(tau, tau + w) - 2 * r(tau)` where `E` is a
    /// windowed energy (from a prefix sum) and `r` the cross-correlation of
    /// the window head against the full window, evaluated with one
    /// forward/inverse FFT pair.
    fn compute_cmndf(&mut self, window: &[f32], w: usize) {
        self.ensure_fft_len((2 * w).next_power_of_two().max(2));

        let signal = &window[..2 * w];

        self.signal_spectrum.fill(Complex::new(0.0, 0.0));
        for (slot, &sample) in self.signal_spectrum.iter_mut().zip(signal.iter()) {
            slot.re = sample;
        }
        self.head_spectrum.fill(Complex::new(0.0, 0.0));
        for (slot, &sample) in self.head_spectrum.iter_mut().zip(signal[..w].iter()) {
            slot.re = sample;
        }

        self.fft.process(&mut self.signal_spectrum);
        self.fft.process(&mut self.head_spectrum);

        // Cross-correlation theorem: IFFT(X * conj(H))[tau] = sum_j h[j] x[j + tau].
        // The zero padding above keeps indices j + tau < fft_len, so no
        // circular wrap contaminates the lags we read.
        for (x, h) in self.signal_spectrum.iter_mut().zip(self.head_spectrum.iter()) {
            *x *= h.conj();
        }
        self.ifft.process(&mut self.signal_spectrum);
        let scale = 1.0 / self.fft_len as f32;

        self.prefix_energy.resize(2 * w + 1, 0.0);
        self.prefix_energy[0] = 0.0;
        for (i, &sample) in signal.iter().enumerate() {
            self.prefix_energy[i + 1] = self.prefix_energy[i] + sample * sample;
        }

        self.cmndf.resize(w, 0.0);
        let head_energy = self.prefix_energy[w];

        // d(0) is identically zero; the normalized function starts at 1.
        self.cmndf[0] = 1.0;
        let mut running_sum = 0.0f32;
        for tau in 1..w {
            let lag_energy = self.prefix_energy[tau + w] - self.prefix_energy[tau];
            let correlation = self.signal_spectrum[tau].re * scale;
            let diff = (head_energy + lag_energy - 2.0 * correlation).max(0.0);

            running_sum += diff;
            self.cmndf[tau] = if running_sum == 0.0 {
                1.0
            } else {
                diff * tau as f32 / running_sum
            };
        }
    }

    fn ensure_fft_len(&mut self, fft_len: usize) {
        if self.fft_len == fft_len {
            return;
        }
        let mut planner = FftPlanner::new();
        self.fft = planner.plan_fft_forward(fft_len);
        self.ifft = planner.plan_fft_inverse(fft_len);
        self.fft_len = fft_len;
        self.signal_spectrum.resize(fft_len, Complex::new(0.0, 0.0));
        self.head_spectrum.resize(fft_len, Complex::new(0.0, 0.0));
    }
}
