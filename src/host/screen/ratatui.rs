use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::machine::generic::timing::Timing;
use crate::machine::generic::vsync::{SyncGen, TimingState};

/// What the generator is doing at a raster position. Later variants win when
/// several land in one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Region {
    Blank,
    Active,
    HSync,
    VSync,
}

impl Region {
    pub fn of(state: &TimingState) -> Self {
        if state.vsync {
            Region::VSync
        } else if state.hsync {
            Region::HSync
        } else if state.video_active {
            Region::Active
        } else {
            Region::Blank
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Region::Blank => '.',
            Region::Active => '#',
            Region::HSync => 'h',
            Region::VSync => 'v',
        }
    }

    fn style(self) -> Style {
        match self {
            Region::Blank => Style::default().fg(Color::DarkGray),
            Region::Active => Style::default().fg(Color::Green),
            Region::HSync => Style::default().fg(Color::Yellow),
            Region::VSync => Style::default().fg(Color::Magenta),
        }
    }
}

/// One frame of the raster scaled down into the widget area.
pub struct RasterMap {
    timing: Timing,
}

impl RasterMap {
    pub fn new(timing: Timing) -> Self {
        Self { timing }
    }
}

impl Widget for RasterMap {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let Ok(mut sync_gen) = SyncGen::new(self.timing) else {
            return;
        };

        let width = area.width as usize;
        let htot = self.timing.htot() as usize;
        let vtot = self.timing.vtot() as usize;
        let mut cells = vec![Region::Blank; width * area.height as usize];

        let mut state = sync_gen.tick(true);
        for _ in 0..self.timing.pixel_tot() {
            let col = state.h_pos as usize * width / htot;
            let row = state.v_pos as usize * area.height as usize / vtot;
            let cell = &mut cells[row * width + col];
            *cell = (*cell).max(Region::of(&state));
            state = sync_gen.tick(false);
        }

        for (i, region) in cells.into_iter().enumerate() {
            let x = area.x + (i % width) as u16;
            let y = area.y + (i / width) as u16;
            buf[(x, y)]
                .set_char(region.symbol())
                .set_style(region.style());
        }
    }
}

/// Render a raster map to plain text, one line per row.
pub fn raster_text(timing: Timing, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    RasterMap::new(timing).render(area, &mut buf);
    (0..height)
        .map(|y| (0..width).map(|x| buf[(x, y)].symbol()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::vga::video::TIMING_640X480;

    #[test]
    fn test_640x480_map() {
        // 10 clocks per column, 25 lines per row
        let lines = raster_text(TIMING_640X480, 80, 21);
        assert_eq!(lines.len(), 21);

        let top = &lines[0];
        assert_eq!(&top[..64], "#".repeat(64));
        assert_eq!(&top[64..65], ".");
        assert_eq!(&top[65..76], "h".repeat(11));
        assert_eq!(&top[76..], "....");

        assert_eq!(lines[19], "v".repeat(80));
        assert!(lines[20].starts_with(&".".repeat(65)), "{}", lines[20]);
    }

    #[test]
    fn test_empty_area() {
        assert!(raster_text(TIMING_640X480, 0, 0).is_empty());
    }
}
