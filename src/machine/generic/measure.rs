//! Measurement of the generator outputs over whole frames: pulse counts,
//! pulse widths and the size of the visible area.

use std::fmt;

use super::bench::Bench;
use super::timing::{Timing, TimingError};
use super::vsync::TimingState;

/// Run-length record of a single output over a window of clocks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SignalRuns {
    runs: Vec<(bool, u32)>,
}

impl SignalRuns {
    pub fn push(&mut self, value: bool) {
        match self.runs.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => self.runs.push((value, 1)),
        }
    }

    pub fn runs(&self) -> &[(bool, u32)] {
        &self.runs
    }

    /// Number of rising edges, counting a window that opens high as one.
    pub fn pulses(&self) -> usize {
        self.runs.iter().filter(|(value, _)| *value).count()
    }

    /// Lengths of the high runs that are bounded on both sides.
    pub fn complete_pulse_widths(&self) -> impl Iterator<Item = u32> + '_ {
        let inner = self.runs.len().saturating_sub(1);
        self.runs
            .iter()
            .take(inner)
            .skip(1)
            .filter(|(value, _)| *value)
            .map(|(_, count)| *count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    pub frame_ticks: u32,
    pub frame_ends: u32,
    pub hsync_pulses: usize,
    /// `None` when pulses disagree on width.
    pub hsync_width: Option<u32>,
    pub vsync_ticks: u32,
    /// HSYNC pulses that start while VSYNC is asserted.
    pub vsync_lines: u32,
    pub active_pixels: u32,
}

impl FrameReport {
    /// Reset a fresh generator, then clock it for exactly one frame.
    pub fn measure(timing: Timing) -> Result<Self, TimingError> {
        let mut bench = Bench::new(timing)?;
        bench.reset(1);

        let frame_ticks = timing.pixel_tot();
        let mut hsync = SignalRuns::default();
        let mut vsync = SignalRuns::default();
        let mut frame_ends = 0;
        let mut vsync_lines = 0;
        let mut active_pixels = 0;
        let mut prev = TimingState::default();

        let mut state = bench.state();
        for _ in 0..frame_ticks {
            hsync.push(state.hsync);
            vsync.push(state.vsync);
            active_pixels += state.video_active as u32;
            if state.vsync && state.hsync && !prev.hsync {
                vsync_lines += 1;
            }
            prev = state;
            state = bench.rising_edge();
            frame_ends += state.frame_end as u32;
        }

        let mut widths = hsync.complete_pulse_widths();
        let first = widths.next();
        let hsync_width = first.filter(|w| widths.all(|n| n == *w));

        Ok(Self {
            frame_ticks,
            frame_ends,
            hsync_pulses: hsync.pulses(),
            hsync_width,
            vsync_ticks: vsync
                .runs()
                .iter()
                .filter(|(value, _)| *value)
                .map(|(_, count)| count)
                .sum(),
            vsync_lines,
            active_pixels,
        })
    }
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "frame:  {} clocks, {} frame end(s)",
            self.frame_ticks, self.frame_ends
        )?;
        match self.hsync_width {
            Some(width) => writeln!(
                f,
                "hsync:  {} pulses of {} clocks",
                self.hsync_pulses, width
            )?,
            None => writeln!(f, "hsync:  {} pulses of uneven width", self.hsync_pulses)?,
        }
        writeln!(
            f,
            "vsync:  {} clocks, {} lines",
            self.vsync_ticks, self.vsync_lines
        )?;
        write!(f, "active: {} pixels", self.active_pixels)
    }
}
