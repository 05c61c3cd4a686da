//! Terminal user interface for browsing wavetable frames.
//!
//! Shows the selected frame's waveform, its magnitude spectrum on a log
//! scale, its phase spectrum, and a whole-table overview with the current
//! frame window highlighted. A scrubber row tracks the frame position.

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LineGauge, Paragraph},
};
use std::io::{stdout, Stdout};
use std::time::Duration;

use crate::wavetable::Wavetable;

/// Maximum number of points fed into the whole-table overview chart.
/// Long buffers are decimated down to this budget before drawing.
const OVERVIEW_POINT_BUDGET: usize = 2048;

/// User input command while viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    /// Keep showing the current frame (no key pressed)
    Continue,
    /// Move the frame selection by the given amount
    Step(isize),
    /// Jump back to frame 0
    Reset,
    /// Leave the viewer
    Quit,
}

/// Terminal UI for interactive wavetable viewing.
///
/// Owns the terminal for its lifetime: raw mode and the alternate screen are
/// entered on construction and restored on drop.
pub struct ViewerTui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    frame_index: usize,
}

impl ViewerTui {
    /// Creates a new viewer TUI and enters alternate screen mode.
    ///
    /// # Errors
    /// - If terminal cannot be initialized
    /// - If raw mode cannot be enabled
    /// - If alternate screen cannot be entered
    pub fn new() -> Result<Self, anyhow::Error> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(ViewerTui {
            terminal,
            frame_index: 0,
        })
    }

    /// Runs the viewer loop until the user quits.
    ///
    /// # Errors
    /// - If terminal rendering fails
    /// - If input events cannot be read
    pub fn run(&mut self, wavetable: &Wavetable) -> Result<(), anyhow::Error> {
        let last_frame = wavetable.number_of_frames() - 1;

        loop {
            self.draw(wavetable)?;

            match poll_input()? {
                ViewerCommand::Continue => {}
                ViewerCommand::Step(delta) => {
                    let stepped = self.frame_index as isize + delta;
                    self.frame_index = stepped.clamp(0, last_frame as isize) as usize;
                }
                ViewerCommand::Reset => {
                    self.frame_index = 0;
                }
                ViewerCommand::Quit => break,
            }
        }

        Ok(())
    }

    /// Renders the four charts, the frame scrubber, and the key help footer.
    fn draw(&mut self, wavetable: &Wavetable) -> Result<(), anyhow::Error> {
        let frame_index = self.frame_index;
        let number_of_frames = wavetable.number_of_frames();
        let sample_rate = wavetable.sample_rate();

        let selected = wavetable.frame_at(frame_index)?;

        // Chart data is collected before the draw closure to avoid borrow issues
        let (time_axis, amplitude) = selected.time_domain();
        let time_points: Vec<(f64, f64)> = time_axis
            .iter()
            .zip(amplitude.iter())
            .map(|(&t, &a)| (t, a))
            .collect();
        let frame_duration = *time_axis.last().unwrap_or(&0.0);
        let amplitude_bounds = value_bounds(amplitude.iter().copied());

        let (magnitude, phase) = selected.freq_domain();
        let magnitude_points: Vec<(f64, f64)> = magnitude
            .iter()
            .enumerate()
            .map(|(bin, &m)| (bin as f64, m.max(1e-12).log10()))
            .collect();
        let magnitude_bounds = value_bounds(magnitude_points.iter().map(|&(_, y)| y));
        let phase_points: Vec<(f64, f64)> = phase
            .iter()
            .enumerate()
            .map(|(bin, &p)| (bin as f64, p))
            .collect();
        let last_partial = (wavetable.n_partials() - 1) as f64;

        let (table_axis, table_amplitude) = wavetable.time_domain();
        let decimation = (table_amplitude.len() / OVERVIEW_POINT_BUDGET).max(1);
        let overview_points: Vec<(f64, f64)> = table_amplitude
            .iter()
            .enumerate()
            .step_by(decimation)
            .map(|(i, &a)| (table_axis[i], a))
            .collect();
        let window_start = frame_index * wavetable.frame_size();
        let window_points: Vec<(f64, f64)> = (window_start..window_start + wavetable.frame_size())
            .step_by(decimation)
            .map(|i| (table_axis[i], table_amplitude[i]))
            .collect();
        let table_duration = *table_axis.last().unwrap_or(&0.0);
        let overview_bounds = value_bounds(table_amplitude.iter().copied());

        let scrubber_ratio = scrubber_ratio(frame_index, number_of_frames);
        let scrubber_label = format!("Frame {frame_index}/{}", number_of_frames - 1);

        self.terminal.draw(|frame| {
            let area = frame.area();

            let [charts_area, scrubber_area, footer_area] = Layout::vertical([
                Constraint::Min(8),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

            let [top_row, bottom_row] =
                Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(charts_area);
            let [time_area, magnitude_area] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(top_row);
            let [overview_area, phase_area] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(bottom_row);

            // Time domain: x(t) for the selected frame
            let time_dataset = Dataset::default()
                .name("x(t)")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(&time_points);
            let time_chart = Chart::new(vec![time_dataset])
                .block(
                    Block::default()
                        .title(format!("Frame {frame_index} · time domain"))
                        .borders(Borders::ALL),
                )
                .x_axis(
                    Axis::default()
                        .title("t (s)")
                        .bounds([0.0, frame_duration])
                        .labels(["0".to_string(), format!("{frame_duration:.4}")]),
                )
                .y_axis(
                    Axis::default()
                        .bounds(amplitude_bounds)
                        .labels(bound_labels(amplitude_bounds)),
                );
            frame.render_widget(time_chart, time_area);

            // Magnitude spectrum: |X(f)|, log scale, dot markers
            let magnitude_dataset = Dataset::default()
                .name("|X(f)|")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Blue))
                .data(&magnitude_points);
            let magnitude_chart = Chart::new(vec![magnitude_dataset])
                .block(
                    Block::default()
                        .title("Magnitude spectrum (log10)")
                        .borders(Borders::ALL),
                )
                .x_axis(
                    Axis::default()
                        .title("partial")
                        .bounds([0.0, last_partial])
                        .labels(["0".to_string(), format!("{last_partial:.0}")]),
                )
                .y_axis(
                    Axis::default()
                        .bounds(magnitude_bounds)
                        .labels(bound_labels(magnitude_bounds)),
                );
            frame.render_widget(magnitude_chart, magnitude_area);

            // Phase spectrum: arg X(f), dot markers
            let phase_dataset = Dataset::default()
                .name("phi(f)")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Blue))
                .data(&phase_points);
            let phase_bounds = [-std::f64::consts::PI, std::f64::consts::PI];
            let phase_chart = Chart::new(vec![phase_dataset])
                .block(
                    Block::default()
                        .title("Phase spectrum")
                        .borders(Borders::ALL),
                )
                .x_axis(
                    Axis::default()
                        .title("partial")
                        .bounds([0.0, last_partial])
                        .labels(["0".to_string(), format!("{last_partial:.0}")]),
                )
                .y_axis(
                    Axis::default()
                        .bounds(phase_bounds)
                        .labels(["-pi".to_string(), "0".to_string(), "pi".to_string()]),
                );
            frame.render_widget(phase_chart, phase_area);

            // Whole-table overview with the selected frame window highlighted
            let overview_dataset = Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::DarkGray))
                .data(&overview_points);
            let window_dataset = Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&window_points);
            let overview_chart = Chart::new(vec![overview_dataset, window_dataset])
                .block(
                    Block::default()
                        .title(format!(
                            "Wavetable · {number_of_frames} frames @ {sample_rate} Hz"
                        ))
                        .borders(Borders::ALL),
                )
                .x_axis(
                    Axis::default()
                        .title("t (s)")
                        .bounds([0.0, table_duration])
                        .labels(["0".to_string(), format!("{table_duration:.3}")]),
                )
                .y_axis(
                    Axis::default()
                        .bounds(overview_bounds)
                        .labels(bound_labels(overview_bounds)),
                );
            frame.render_widget(overview_chart, overview_area);

            let scrubber = LineGauge::default()
                .ratio(scrubber_ratio)
                .label(scrubber_label.clone())
                .filled_style(Style::default().fg(Color::Yellow))
                .unfilled_style(Style::default().fg(Color::DarkGray));
            frame.render_widget(scrubber, scrubber_area);

            let footer = Paragraph::new(
                " ←/→ frame · PgUp/PgDn ±10 · Home/r reset · q/Esc quit",
            )
            .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(footer, footer_area);
        })?;

        Ok(())
    }

    /// Cleans up terminal state and exits alternate screen mode.
    ///
    /// # Errors
    /// - If terminal mode cannot be disabled
    /// - If cursor cannot be shown
    pub fn cleanup(&mut self) -> Result<(), anyhow::Error> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for ViewerTui {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Polls for user input and maps it to a viewer command.
///
/// # Errors
/// - If input events cannot be read
fn poll_input() -> Result<ViewerCommand, anyhow::Error> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            return Ok(match key.code {
                KeyCode::Left => ViewerCommand::Step(-1),
                KeyCode::Right => ViewerCommand::Step(1),
                KeyCode::PageUp => ViewerCommand::Step(-10),
                KeyCode::PageDown => ViewerCommand::Step(10),
                KeyCode::Home | KeyCode::Char('r') => ViewerCommand::Reset,
                KeyCode::Char('q') | KeyCode::Esc => ViewerCommand::Quit,
                _ => ViewerCommand::Continue,
            });
        }
    }

    Ok(ViewerCommand::Continue)
}

/// Position of the frame scrubber as a ratio in `[0, 1]`.
///
/// A single-frame wavetable has nowhere to scrub, so the gauge stays empty
/// at frame 0 rather than drawing full.
fn scrubber_ratio(frame_index: usize, number_of_frames: usize) -> f64 {
    if number_of_frames > 1 {
        frame_index as f64 / (number_of_frames - 1) as f64
    } else {
        0.0
    }
}

/// Chart bounds for a value series, padded so flat data still has height.
fn value_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        min = min.min(value);
        max = max.max(value);
    }
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }

    let padding = ((max - min) * 0.05).max(0.05);
    [min - padding, max + padding]
}

fn bound_labels(bounds: [f64; 2]) -> Vec<String> {
    vec![format!("{:.2}", bounds[0]), format!("{:.2}", bounds[1])]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrubber_ratio() {
        assert_eq!(scrubber_ratio(0, 8), 0.0);
        assert_eq!(scrubber_ratio(7, 8), 1.0);
        assert!((scrubber_ratio(2, 5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_scrubber_ratio_single_frame() {
        assert_eq!(scrubber_ratio(0, 1), 0.0);
    }

    #[test]
    fn test_value_bounds_padding() {
        let bounds = value_bounds([-1.0, 0.0, 1.0].into_iter());
        assert!(bounds[0] < -1.0);
        assert!(bounds[1] > 1.0);
    }

    #[test]
    fn test_value_bounds_flat_data() {
        let bounds = value_bounds([0.5, 0.5].into_iter());
        assert!(bounds[1] - bounds[0] >= 0.1);
    }

    #[test]
    fn test_value_bounds_empty() {
        let bounds = value_bounds(std::iter::empty());
        assert_eq!(bounds, [-1.0, 1.0]);
    }
}
