//! Interactive wavetable viewer.
//!
//! Renders a selected frame's time-domain waveform and magnitude/phase
//! spectrum, with a scrubber for moving through frames. All rendering and
//! input handling lives in the `ui` submodule; the wavetable model stays
//! unaware of how its data is displayed.

pub mod ui;

pub use ui::ViewerTui;

use crate::wavetable::Wavetable;

/// Opens the interactive viewer for `wavetable` and blocks until the user
/// quits.
///
/// # Errors
/// - If the terminal cannot be initialized
/// - If rendering fails
pub fn view_wavetable(wavetable: &Wavetable) -> Result<(), anyhow::Error> {
    let mut tui = ViewerTui::new()?;
    tui.run(wavetable)
}
