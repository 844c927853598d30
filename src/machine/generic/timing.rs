use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub h_active: u16,
    pub h_fp: u16,
    pub h_sync: u16,
    pub h_bp: u16, // h_active + h_fp + h_sync + h_bp = Htot

    pub v_active: u16,
    pub v_fp: u16,   // bottom border
    pub v_sync: u16, // lines of vertical sync
    pub v_bp: u16,   // top border, v_active + v_fp + v_sync + v_bp = Vtot
}

/// Which counter a timing parameter belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimingError {
    /// The active region or sync pulse has no width, so the raster would
    /// have no visible area or `SYNC_END < SYNC_START`.
    ZeroWidth { axis: Axis, field: &'static str },
    /// The sum of the regions does not fit in the counter.
    Overflow { axis: Axis },
    /// A derived constant was supplied that disagrees with the base values.
    Mismatch {
        field: &'static str,
        expected: u16,
        found: u16,
    },
    /// A raster position outside `[0, H_MAX] x [0, V_MAX]`.
    PositionOutOfRange { h_pos: u16, v_pos: u16 },
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingError::ZeroWidth { axis, field } => {
                write!(f, "{axis} {field} must be at least one clock")
            }
            TimingError::Overflow { axis } => {
                write!(f, "{axis} total does not fit in a 16-bit counter")
            }
            TimingError::Mismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "{field} is {found} but the base timing gives {expected}"
            ),
            TimingError::PositionOutOfRange { h_pos, v_pos } => {
                write!(f, "position ({h_pos}, {v_pos}) is outside the raster")
            }
        }
    }
}

impl std::error::Error for TimingError {}

impl Timing {
    /// Checks that the timing describes a well-formed raster. Every accessor
    /// below assumes this has passed.
    pub fn validate(&self) -> Result<(), TimingError> {
        for (axis, active, sync) in [
            (Axis::Horizontal, self.h_active, self.h_sync),
            (Axis::Vertical, self.v_active, self.v_sync),
        ] {
            if active == 0 {
                return Err(TimingError::ZeroWidth {
                    axis,
                    field: "display",
                });
            }
            if sync == 0 {
                return Err(TimingError::ZeroWidth {
                    axis,
                    field: "sync",
                });
            }
        }
        let fits = |parts: [u16; 4]| {
            parts
                .into_iter()
                .try_fold(0_u16, |acc, part| acc.checked_add(part))
                .is_some()
        };
        if !fits([self.h_active, self.h_fp, self.h_sync, self.h_bp]) {
            return Err(TimingError::Overflow {
                axis: Axis::Horizontal,
            });
        }
        if !fits([self.v_active, self.v_fp, self.v_sync, self.v_bp]) {
            return Err(TimingError::Overflow {
                axis: Axis::Vertical,
            });
        }
        Ok(())
    }

    pub fn htot(&self) -> u16 {
        self.h_active + self.h_fp + self.h_sync + self.h_bp
    }
    pub fn vtot(&self) -> u16 {
        self.v_active + self.v_fp + self.v_sync + self.v_bp
    }
    pub fn pixel_tot(&self) -> u32 {
        self.htot() as u32 * self.vtot() as u32
    }

    pub fn h_max(&self) -> u16 {
        self.htot() - 1
    }
    pub fn v_max(&self) -> u16 {
        self.vtot() - 1
    }

    // Sync sits after the front porch: active -> fp -> sync -> bp.
    pub fn h_sync_start(&self) -> u16 {
        self.h_active + self.h_fp
    }
    pub fn h_sync_end(&self) -> u16 {
        self.h_sync_start() + self.h_sync - 1
    }
    pub fn v_sync_start(&self) -> u16 {
        self.v_active + self.v_fp
    }
    pub fn v_sync_end(&self) -> u16 {
        self.v_sync_start() + self.v_sync - 1
    }

    pub fn constants(&self) -> TimingConstants {
        TimingConstants {
            h_display: self.h_active,
            h_back: self.h_bp,
            h_front: self.h_fp,
            h_sync: self.h_sync,
            h_max: self.h_max(),
            h_sync_start: self.h_sync_start(),
            h_sync_end: self.h_sync_end(),
            v_display: self.v_active,
            v_top: self.v_bp,
            v_bottom: self.v_fp,
            v_sync: self.v_sync,
            v_max: self.v_max(),
            v_sync_start: self.v_sync_start(),
            v_sync_end: self.v_sync_end(),
        }
    }
}

/// The flat set of named constants a sync generator is usually described
/// with. The last three of each axis are derived from the first four.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingConstants {
    pub h_display: u16,
    pub h_back: u16,
    pub h_front: u16,
    pub h_sync: u16,
    pub h_max: u16,
    pub h_sync_start: u16,
    pub h_sync_end: u16,

    pub v_display: u16,
    pub v_top: u16,
    pub v_bottom: u16,
    pub v_sync: u16,
    pub v_max: u16,
    pub v_sync_start: u16,
    pub v_sync_end: u16,
}

impl TryFrom<TimingConstants> for Timing {
    type Error = TimingError;

    fn try_from(c: TimingConstants) -> Result<Self, Self::Error> {
        let timing = Timing {
            h_active: c.h_display,
            h_fp: c.h_front,
            h_sync: c.h_sync,
            h_bp: c.h_back,
            v_active: c.v_display,
            v_fp: c.v_bottom,
            v_sync: c.v_sync,
            v_bp: c.v_top,
        };
        timing.validate()?;

        let derived = timing.constants();
        for (field, expected, found) in [
            ("H_MAX", derived.h_max, c.h_max),
            ("H_SYNC_START", derived.h_sync_start, c.h_sync_start),
            ("H_SYNC_END", derived.h_sync_end, c.h_sync_end),
            ("V_MAX", derived.v_max, c.v_max),
            ("V_SYNC_START", derived.v_sync_start, c.v_sync_start),
            ("V_SYNC_END", derived.v_sync_end, c.v_sync_end),
        ] {
            if expected != found {
                return Err(TimingError::Mismatch {
                    field,
                    expected,
                    found,
                });
            }
        }
        Ok(timing)
    }
}

impl fmt::Display for TimingConstants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "H_DISPLAY    = {}", self.h_display)?;
        writeln!(f, "H_BACK       = {}", self.h_back)?;
        writeln!(f, "H_FRONT      = {}", self.h_front)?;
        writeln!(f, "H_SYNC       = {}", self.h_sync)?;
        writeln!(f, "H_MAX        = {}", self.h_max)?;
        writeln!(f, "H_SYNC_START = {}", self.h_sync_start)?;
        writeln!(f, "H_SYNC_END   = {}", self.h_sync_end)?;
        writeln!(f, "V_DISPLAY    = {}", self.v_display)?;
        writeln!(f, "V_TOP        = {}", self.v_top)?;
        writeln!(f, "V_BOTTOM     = {}", self.v_bottom)?;
        writeln!(f, "V_SYNC       = {}", self.v_sync)?;
        writeln!(f, "V_MAX        = {}", self.v_max)?;
        writeln!(f, "V_SYNC_START = {}", self.v_sync_start)?;
        write!(f, "V_SYNC_END   = {}", self.v_sync_end)
    }
}
