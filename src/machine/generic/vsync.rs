use std::fmt;

use tracing::trace;

use super::timing::{Timing, TimingError};

/// The registered outputs of the sync generator after a clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimingState {
    pub h_pos: u16,
    pub v_pos: u16,
    pub hsync: bool,
    pub vsync: bool,
    pub video_active: bool,
    /// High for the single clock on which the raster wrapped back to (0, 0).
    pub frame_end: bool,
}

impl TimingState {
    /// Framebuffer coordinate of the current pixel, if it is visible.
    pub fn pixel(&self) -> Option<(u16, u16)> {
        self.video_active.then_some((self.h_pos, self.v_pos))
    }

    /// The outputs in testbench probe order:
    /// `[hsync, vsync, video_active, pix_x, pix_y, frame_end]`.
    pub fn probe(&self) -> [u16; 6] {
        [
            self.hsync as u16,
            self.vsync as u16,
            self.video_active as u16,
            self.h_pos,
            self.v_pos,
            self.frame_end as u16,
        ]
    }
}

impl fmt::Display for TimingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={:3} y={:3} hsync={} vsync={} active={} frame_end={}",
            self.h_pos,
            self.v_pos,
            self.hsync as u8,
            self.vsync as u8,
            self.video_active as u8,
            self.frame_end as u8,
        )
    }
}

/// Raster counters for a VGA-style sync generator. One call to
/// [`SyncGen::tick`] is one rising edge of the pixel clock.
#[derive(Debug)]
pub struct SyncGen {
    t: Timing,
    h_max: u16,
    v_max: u16,
    state: TimingState,
}

impl SyncGen {
    pub fn new(t: Timing) -> Result<Self, TimingError> {
        t.validate()?;
        let mut new = Self {
            t,
            h_max: t.h_max(),
            v_max: t.v_max(),
            state: TimingState::default(),
        };
        new.state = new.outputs(0, 0, false);
        Ok(new)
    }

    /// The outputs published by the most recent clock edge.
    pub fn state(&self) -> TimingState {
        self.state
    }

    /// Force the counters to a raster position. `frame_end` reads low
    /// afterwards since no wrap happened.
    pub fn set_position(&mut self, h_pos: u16, v_pos: u16) -> Result<(), TimingError> {
        if h_pos > self.h_max || v_pos > self.v_max {
            return Err(TimingError::PositionOutOfRange { h_pos, v_pos });
        }
        self.state = self.outputs(h_pos, v_pos, false);
        Ok(())
    }

    /// Advance by one pixel clock, sampling `reset` on the edge. Returns the
    /// outputs as registered on this edge.
    pub fn tick(&mut self, reset: bool) -> TimingState {
        let (h_pos, v_pos, wrapped) = self.next_position(reset);
        if wrapped {
            trace!("Frame wrap");
        }
        self.state = self.outputs(h_pos, v_pos, wrapped);
        self.state
    }

    /// Next counter values from the current ones. The third value is true
    /// when the raster wrapped from the last position back to the first.
    fn next_position(&self, reset: bool) -> (u16, u16, bool) {
        let TimingState { h_pos, v_pos, .. } = self.state;
        if reset {
            return (0, 0, false);
        }
        if h_pos != self.h_max {
            return (h_pos + 1, v_pos, false);
        }
        if v_pos != self.v_max {
            return (0, v_pos + 1, false);
        }
        (0, 0, true)
    }

    fn outputs(&self, h_pos: u16, v_pos: u16, frame_end: bool) -> TimingState {
        let t = &self.t;
        TimingState {
            h_pos,
            v_pos,
            hsync: (t.h_sync_start()..=t.h_sync_end()).contains(&h_pos),
            vsync: (t.v_sync_start()..=t.v_sync_end()).contains(&v_pos),
            video_active: h_pos < t.h_active && v_pos < t.v_active,
            frame_end,
        }
    }
}
