//! Video modes for the VGA output. The 640x480 mode is the one the game
//! renderer addresses; the 800x600 mode is kept for boards with a 40MHz
//! pixel clock.

use crate::machine::generic::timing::Timing;
use crate::machine::generic::vsync::TimingState;

pub const TIMING_640X480: Timing = Timing {
    h_active: 640,
    h_fp: 16,
    h_sync: 96,
    h_bp: 48, // Htot = 800
    v_active: 480,
    v_fp: 10,
    v_sync: 2,
    v_bp: 33, // Vtot = 525
};

pub const TIMING_800X600: Timing = Timing {
    h_active: 800,
    h_fp: 40,
    h_sync: 128,
    h_bp: 88, // Htot = 1056
    v_active: 600,
    v_fp: 1,
    v_sync: 4,
    v_bp: 23, // Vtot = 628
};

/// Level of a sync pin while the sync pulse is asserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    pub fn level(self, asserted: bool) -> bool {
        match self {
            Polarity::ActiveHigh => asserted,
            Polarity::ActiveLow => !asserted,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VideoMode {
    pub name: &'static str,
    pub timing: Timing,
    pub pixel_clock_hz: u32,
    pub h_polarity: Polarity,
    pub v_polarity: Polarity,
}

pub const VGA_640X480_60: VideoMode = VideoMode {
    name: "640x480@60",
    timing: TIMING_640X480,
    pixel_clock_hz: 25_175_000,
    h_polarity: Polarity::ActiveLow,
    v_polarity: Polarity::ActiveLow,
};

pub const SVGA_800X600_60: VideoMode = VideoMode {
    name: "800x600@60",
    timing: TIMING_800X600,
    pixel_clock_hz: 40_000_000,
    h_polarity: Polarity::ActiveHigh,
    v_polarity: Polarity::ActiveHigh,
};

impl VideoMode {
    pub fn line_rate_hz(&self) -> f64 {
        self.pixel_clock_hz as f64 / self.timing.htot() as f64
    }

    pub fn refresh_hz(&self) -> f64 {
        self.pixel_clock_hz as f64 / self.timing.pixel_tot() as f64
    }

    /// HSYNC pin level for a set of outputs.
    pub fn hsync_level(&self, state: &TimingState) -> bool {
        self.h_polarity.level(state.hsync)
    }

    /// VSYNC pin level for a set of outputs.
    pub fn vsync_level(&self, state: &TimingState) -> bool {
        self.v_polarity.level(state.vsync)
    }
}
