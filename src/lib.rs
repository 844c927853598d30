//! Cycle-exact model of the VGA sync generator: raster counters, sync
//! pulses, blanking and the frame-end strobe, plus a clocked bench for
//! driving it.

pub mod host;
pub mod machine;

pub use machine::generic::bench::Bench;
pub use machine::generic::measure::{FrameReport, SignalRuns};
pub use machine::generic::timing::{Axis, Timing, TimingConstants, TimingError};
pub use machine::generic::vsync::{SyncGen, TimingState};
pub use machine::vga::video::{Polarity, VideoMode};
