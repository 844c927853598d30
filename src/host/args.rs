use clap::{Args, ValueEnum};

use crate::machine::generic::timing::{Timing, TimingError};
use crate::machine::vga::video::{SVGA_800X600_60, VGA_640X480_60, VideoMode};

/// Built-in video modes selectable from the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    #[default]
    #[value(name = "640x480")]
    Vga640x480,
    #[value(name = "800x600")]
    Svga800x600,
}

impl Mode {
    pub fn video_mode(self) -> VideoMode {
        match self {
            Mode::Vga640x480 => VGA_640X480_60,
            Mode::Svga800x600 => SVGA_800X600_60,
        }
    }
}

/// Overrides for the timing of the selected mode. Derived values, when
/// given, must agree with the ones computed from the base values.
#[derive(Args, Clone, Debug, Default)]
pub struct TimingArgs {
    /// Visible pixels per line (H_DISPLAY)
    #[arg(long)]
    pub h_display: Option<u16>,

    /// Horizontal front porch (H_FRONT)
    #[arg(long)]
    pub h_front: Option<u16>,

    /// Horizontal sync width (H_SYNC)
    #[arg(long)]
    pub h_sync: Option<u16>,

    /// Horizontal back porch (H_BACK)
    #[arg(long)]
    pub h_back: Option<u16>,

    /// Visible lines per frame (V_DISPLAY)
    #[arg(long)]
    pub v_display: Option<u16>,

    /// Vertical bottom border (V_BOTTOM)
    #[arg(long)]
    pub v_bottom: Option<u16>,

    /// Vertical sync width in lines (V_SYNC)
    #[arg(long)]
    pub v_sync: Option<u16>,

    /// Vertical top border (V_TOP)
    #[arg(long)]
    pub v_top: Option<u16>,

    /// Expected H_MAX
    #[arg(long)]
    pub h_max: Option<u16>,

    /// Expected H_SYNC_START
    #[arg(long)]
    pub h_sync_start: Option<u16>,

    /// Expected H_SYNC_END
    #[arg(long)]
    pub h_sync_end: Option<u16>,

    /// Expected V_MAX
    #[arg(long)]
    pub v_max: Option<u16>,

    /// Expected V_SYNC_START
    #[arg(long)]
    pub v_sync_start: Option<u16>,

    /// Expected V_SYNC_END
    #[arg(long)]
    pub v_sync_end: Option<u16>,
}

impl TimingArgs {
    /// Apply the overrides to `base` and check the result.
    pub fn resolve(&self, base: Timing) -> Result<Timing, TimingError> {
        let timing = Timing {
            h_active: self.h_display.unwrap_or(base.h_active),
            h_fp: self.h_front.unwrap_or(base.h_fp),
            h_sync: self.h_sync.unwrap_or(base.h_sync),
            h_bp: self.h_back.unwrap_or(base.h_bp),
            v_active: self.v_display.unwrap_or(base.v_active),
            v_fp: self.v_bottom.unwrap_or(base.v_fp),
            v_sync: self.v_sync.unwrap_or(base.v_sync),
            v_bp: self.v_top.unwrap_or(base.v_bp),
        };
        timing.validate()?;

        let mut constants = timing.constants();
        if let Some(v) = self.h_max {
            constants.h_max = v;
        }
        if let Some(v) = self.h_sync_start {
            constants.h_sync_start = v;
        }
        if let Some(v) = self.h_sync_end {
            constants.h_sync_end = v;
        }
        if let Some(v) = self.v_max {
            constants.v_max = v;
        }
        if let Some(v) = self.v_sync_start {
            constants.v_sync_start = v;
        }
        if let Some(v) = self.v_sync_end {
            constants.v_sync_end = v;
        }
        Timing::try_from(constants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::vga::video::TIMING_640X480;
    use clap::Parser;

    #[derive(Parser)]
    struct TestArgs {
        #[arg(long, value_enum, default_value_t)]
        mode: Mode,

        #[command(flatten)]
        timing: TimingArgs,
    }

    fn parse(args: &[&str]) -> TestArgs {
        TestArgs::try_parse_from(std::iter::once("vga-sync").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults_to_640x480() {
        let args = parse(&[]);
        assert_eq!(args.mode, Mode::Vga640x480);
        let timing = args.timing.resolve(args.mode.video_mode().timing).unwrap();
        assert_eq!(timing, TIMING_640X480);
    }

    #[test]
    fn test_consistent_derived_values_accepted() {
        let args = parse(&[
            "--h-max",
            "799",
            "--h-sync-start",
            "656",
            "--v-sync-end",
            "491",
        ]);
        assert_eq!(args.timing.resolve(TIMING_640X480), Ok(TIMING_640X480));
    }

    #[test]
    fn test_base_override_moves_derived_values() {
        let args = parse(&["--h-front", "24", "--h-sync-start", "664"]);
        let timing = args.timing.resolve(TIMING_640X480).unwrap();
        assert_eq!(timing.h_sync_start(), 664);
        assert_eq!(timing.h_max(), 807);
    }

    #[test]
    fn test_display_override_flags() {
        let args = parse(&["--h-display", "320", "--v-display", "240"]);
        let timing = args.timing.resolve(TIMING_640X480).unwrap();
        assert_eq!(timing.h_active, 320);
        assert_eq!(timing.v_active, 240);
        assert_eq!(timing.h_sync_start(), 336);
        assert_eq!(timing.v_sync_start(), 250);
    }

    #[test]
    fn test_contradicting_derived_value_rejected() {
        let args = parse(&["--v-max", "525"]);
        assert_eq!(
            args.timing.resolve(TIMING_640X480),
            Err(TimingError::Mismatch {
                field: "V_MAX",
                expected: 524,
                found: 525
            })
        );
    }

    #[test]
    fn test_zero_sync_rejected() {
        let args = parse(&["--mode", "800x600", "--h-sync", "0"]);
        assert!(matches!(
            args.timing.resolve(args.mode.video_mode().timing),
            Err(TimingError::ZeroWidth { .. })
        ));
    }
}
