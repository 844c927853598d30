use crate::machine::generic::bench::Bench;
use crate::machine::generic::vsync::TimingState;

/// Clock the bench for `skip + ticks` edges, asserting reset on the edges
/// listed in `reset_at` (counted from the start of the run). Every edge after
/// the first `skip` is handed to `sample`. Returns the number of completed
/// frames seen.
pub fn run(
    bench: &mut Bench,
    skip: u64,
    ticks: u64,
    reset_at: &[u64],
    mut sample: impl FnMut(u64, &TimingState),
) -> u64 {
    let mut frames = 0;
    for edge in 0..end_edge(skip, ticks) {
        bench.set_reset(reset_at.contains(&edge));
        let state = bench.rising_edge();
        frames += state.frame_end as u64;
        if edge >= skip {
            sample(edge, &state);
        }
    }
    bench.set_reset(false);
    frames
}

/// Edge count for a run; saturates instead of wrapping on huge requests.
fn end_edge(skip: u64, ticks: u64) -> u64 {
    skip.saturating_add(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::vga::video::TIMING_640X480;

    #[test]
    fn test_samples_after_skip() {
        let mut bench = Bench::new(TIMING_640X480).unwrap();
        bench.reset(1);
        let mut seen = Vec::new();
        let frames = run(&mut bench, 654, 4, &[], |edge, state| {
            seen.push((edge, state.h_pos, state.hsync));
        });
        assert_eq!(frames, 0);
        assert_eq!(
            seen,
            vec![
                (654, 655, false),
                (655, 656, true),
                (656, 657, true),
                (657, 658, true)
            ]
        );
    }

    #[test]
    fn test_reset_during_run() {
        let mut bench = Bench::new(TIMING_640X480).unwrap();
        bench.reset(1);
        let mut seen = Vec::new();
        run(&mut bench, 0, 6, &[2, 3], |_, state| seen.push(state.h_pos));
        assert_eq!(seen, vec![1, 2, 0, 0, 1, 2]);
    }

    #[test]
    fn test_end_edge_saturates() {
        assert_eq!(end_edge(654, 4), 658);
        assert_eq!(end_edge(u64::MAX, 1), u64::MAX);
        assert_eq!(end_edge(10, u64::MAX), u64::MAX);
    }

    #[test]
    fn test_counts_frames() {
        let mut bench = Bench::new(TIMING_640X480).unwrap();
        bench.reset(1);
        let frames = run(&mut bench, 3 * 420_000, 1, &[], |_, _| {});
        assert_eq!(frames, 3);
    }
}
