//! wtview: a terminal wavetable viewer.
//!
//! Loads an audio file, reinterprets it as a wavetable of equal-length
//! frames, and opens an interactive visualization of each frame's waveform
//! and spectrum.

pub mod app;
pub mod audio;
pub mod cli;
pub mod commands;
pub mod logging;
pub mod viewer;
pub mod wavetable;
