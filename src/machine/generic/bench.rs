use tracing::{debug, info};

use super::timing::{Timing, TimingError};
use super::vsync::{SyncGen, TimingState};

/// Drives a [`SyncGen`] from a clock loop with a reset line, the same way a
/// testbench drives the circuit.
pub struct Bench {
    sync_gen: SyncGen,
    reset: bool,
    cycles: u64,
}

impl Bench {
    pub fn new(timing: Timing) -> Result<Self, TimingError> {
        Ok(Self {
            sync_gen: SyncGen::new(timing)?,
            reset: false,
            cycles: 0,
        })
    }

    /// Clock edges driven since the bench was created.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn state(&self) -> TimingState {
        self.sync_gen.state()
    }

    pub fn set_reset(&mut self, asserted: bool) {
        if self.reset != asserted {
            debug!("Reset {}", if asserted { "asserted" } else { "released" });
        }
        self.reset = asserted;
    }

    /// Hold reset for `duration` clocks, then release it. Reset is always
    /// held for at least one clock.
    pub fn reset(&mut self, duration: u32) -> TimingState {
        let duration = duration.max(1);
        self.set_reset(true);
        self.clock_cycles(duration as u64);
        self.set_reset(false);
        info!("Reset complete after {} cycles", duration);
        self.state()
    }

    pub fn rising_edge(&mut self) -> TimingState {
        self.cycles += 1;
        self.sync_gen.tick(self.reset)
    }

    pub fn clock_cycles(&mut self, n: u64) -> TimingState {
        for _ in 0..n {
            self.rising_edge();
        }
        self.state()
    }

    /// Clock until `done` holds for the published outputs, giving up after
    /// `timeout` edges. Returns the number of edges taken.
    pub fn wait_until(
        &mut self,
        mut done: impl FnMut(&TimingState) -> bool,
        timeout: u64,
    ) -> Option<u64> {
        for n in 0..=timeout {
            if done(&self.state()) {
                return Some(n);
            }
            if n < timeout {
                self.rising_edge();
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::vga::video::TIMING_640X480;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn bench() -> Bench {
        let mut bench = Bench::new(TIMING_640X480).unwrap();
        bench.clock_cycles(1);
        bench
    }

    #[test]
    fn test_reset() {
        let mut bench = bench();
        let state = bench.reset(1);
        assert_eq!(state.probe(), [0, 0, 1, 0, 0, 0]);

        let state = bench.clock_cycles(1);
        assert_eq!(state.probe(), [0, 0, 1, 1, 0, 0]);
        assert_eq!(bench.cycles(), 3);
    }

    #[test]
    fn test_zero_length_reset_still_clocks() {
        let mut bench = bench();
        bench.clock_cycles(700);
        let state = bench.reset(0);
        assert_eq!(state.probe(), [0, 0, 1, 0, 0, 0]);
        assert_eq!(bench.cycles(), 702);
    }

    #[test]
    fn test_random_reset_mid_scan() {
        let mut rng = StdRng::seed_from_u64(0x7e57);
        for _ in 0..16 {
            let pre = rng.random_range(1..800);
            let duration = rng.random_range(1..800);
            let post = rng.random_range(1..800);

            let mut bench = bench();
            bench.clock_cycles(pre);
            let state = bench.reset(duration);
            assert_eq!(state.probe(), [0, 0, 1, 0, 0, 0]);

            let state = bench.clock_cycles(post);
            let hsync = (656..=751).contains(&post);
            let active = post < 640;
            assert_eq!(
                state.probe(),
                [hsync as u16, 0, active as u16, post as u16, 0, 0],
                "pre={pre} duration={duration} post={post}"
            );
        }
    }

    #[test]
    fn test_vertical_counter_random() {
        let mut rng = StdRng::seed_from_u64(0x7e58);
        for _ in 0..8 {
            let cycles = rng.random_range(1..=799 * 50);
            let mut bench = bench();
            bench.reset(1);
            let state = bench.clock_cycles(cycles);
            assert_eq!(state.v_pos as u64, cycles / 800, "after {cycles} cycles");
        }
    }

    #[test]
    fn test_hsync_start_and_width() {
        let mut bench = bench();
        bench.reset(1);
        let waited = bench.wait_until(|s| s.h_pos == 656, 1000);
        assert_eq!(waited, Some(656));
        assert!(bench.state().hsync);

        let width = bench.wait_until(|s| !s.hsync, 1000);
        assert_eq!(width, Some(96));
    }

    #[test]
    fn test_vsync_start_and_width() {
        let mut bench = bench();
        bench.reset(1);
        let waited = bench.wait_until(|s| s.vsync, 420_000);
        assert_eq!(waited, Some(490 * 800));
        assert_eq!(bench.state().v_pos, 490);

        let width = bench.wait_until(|s| !s.vsync, 420_000);
        assert_eq!(width, Some(2 * 800));
    }

    #[test]
    fn test_wait_until_timeout() {
        let mut bench = bench();
        bench.reset(1);
        assert_eq!(bench.wait_until(|s| s.v_pos == 1, 10), None);
        assert_eq!(bench.state().h_pos, 10);
    }
}
