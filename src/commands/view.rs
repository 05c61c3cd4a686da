//! Open the interactive wavetable viewer for an audio file.
//!
//! Decodes the file, wraps the samples as a wavetable with the requested
//! frame count, and hands the result to the viewer UI.

use crate::audio;
use crate::cli::OptionValue;
use crate::viewer;
use crate::wavetable::Wavetable;
use anyhow::{anyhow, bail};
use std::collections::HashMap;
use std::path::PathBuf;

/// The `view` command: an audio file to load and the number of wavetable
/// frames to partition it into.
#[derive(Debug)]
pub struct View {
    file_path: PathBuf,
    n_frames: usize,
}

impl View {
    /// Constructs the command from positional arguments.
    ///
    /// # Errors
    /// - If there are not exactly two positionals (file path, frame count)
    /// - If the frame count is not a positive integer
    pub fn from_positionals(positionals: &[String]) -> Result<Self, anyhow::Error> {
        let [file_path, n_frames] = positionals else {
            bail!(
                "'view' takes exactly two arguments: <file> <n_frames> (got {})",
                positionals.len()
            );
        };

        let n_frames = n_frames
            .parse::<usize>()
            .map_err(|_| anyhow!("Frame count must be a positive integer, got '{n_frames}'"))?;

        Ok(View {
            file_path: PathBuf::from(file_path),
            n_frames,
        })
    }

    /// Decodes the audio file, builds the wavetable, and runs the viewer
    /// until the user quits.
    ///
    /// No options are recognized yet; unrecognized options are logged and
    /// ignored so the surface stays open for extension.
    ///
    /// # Errors
    /// - If the file does not exist or cannot be decoded
    /// - If the wavetable parameters are invalid for the decoded buffer
    /// - If the viewer fails to initialize or render
    pub fn execute(self, options: &HashMap<String, OptionValue>) -> Result<(), anyhow::Error> {
        for key in options.keys() {
            tracing::warn!("Ignoring unrecognized option --{key}");
        }

        if !self.file_path.exists() {
            bail!("Audio file not found: {}", self.file_path.display());
        }

        tracing::info!(
            "Viewing '{}' as a {}-frame wavetable",
            self.file_path.display(),
            self.n_frames
        );

        let decoded = audio::decode_wav(&self.file_path)?;
        let wavetable = Wavetable::new(decoded.samples, self.n_frames, decoded.sample_rate)?;

        tracing::debug!(
            "Wavetable ready: {} samples, frame size {}, {} partials",
            wavetable.total_samples(),
            wavetable.frame_size(),
            wavetable.n_partials()
        );

        viewer::view_wavetable(&wavetable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_from_positionals() {
        let view = View::from_positionals(&strings(&["a.wav", "64"])).unwrap();
        assert_eq!(view.file_path, PathBuf::from("a.wav"));
        assert_eq!(view.n_frames, 64);
    }

    #[test]
    fn test_wrong_arity() {
        assert!(View::from_positionals(&[]).is_err());
        assert!(View::from_positionals(&strings(&["a.wav"])).is_err());
        assert!(View::from_positionals(&strings(&["a.wav", "64", "x"])).is_err());
    }

    #[test]
    fn test_non_numeric_frame_count() {
        let err = View::from_positionals(&strings(&["a.wav", "many"])).unwrap_err();
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn test_missing_file_fails() {
        let view =
            View::from_positionals(&strings(&["/nonexistent/missing.wav", "4"])).unwrap();
        assert!(view.execute(&HashMap::new()).is_err());
    }
}
