/// Height in pixels of the status band drawn above the grid.
pub const STATUS_BAND_HEIGHT: u32 = 56;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLine {
    Vertical { x: u32, top: u32, bottom: u32 },
    Horizontal { y: u32, left: u32, right: u32 },
}

/// Pixel geometry of the grid for one window size. Cheap to build, so it is
/// recomputed from the live window dimensions on every draw and click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    width: u32,
    height: u32,
    divisions: usize,
    cell_size: u32,
}

impl Layout {
    pub fn new(width: u32, height: u32, divisions: usize) -> Self {
        let usable_height = height.saturating_sub(STATUS_BAND_HEIGHT);
        let cell_size = match u32::try_from(divisions) {
            Ok(0) | Err(_) => 0,
            Ok(divisions) => width.min(usable_height) / divisions,
        };

        Self {
            width,
            height,
            divisions,
            cell_size,
        }
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Top-left pixel of cell (0, 0).
    pub fn origin(&self) -> (u32, u32) {
        (0, STATUS_BAND_HEIGHT)
    }

    /// Side length of the drawn grid in pixels.
    pub fn extent(&self) -> u32 {
        self.cell_size * self.divisions as u32
    }

    /// Grid coordinates under a pixel, if it falls inside the grid.
    pub fn cell_at(&self, px: f64, py: f64) -> Option<(usize, usize)> {
        if self.cell_size == 0 || px < 0.0 || py < 0.0 {
            return None;
        }
        let (origin_x, origin_y) = self.origin();
        let px = px as u32;
        let py = py as u32;
        if px < origin_x || py < origin_y {
            return None;
        }

        let x = ((px - origin_x) / self.cell_size) as usize;
        let y = ((py - origin_y) / self.cell_size) as usize;
        (x < self.divisions && y < self.divisions).then_some((x, y))
    }

    pub fn cell_rect(&self, x: usize, y: usize) -> PixelRect {
        let (origin_x, origin_y) = self.origin();
        PixelRect {
            x: origin_x + x as u32 * self.cell_size,
            y: origin_y + y as u32 * self.cell_size,
            width: self.cell_size,
            height: self.cell_size,
        }
    }

    /// `divisions` vertical and `divisions` horizontal lines, one after every
    /// column and row, so the right and bottom edges are closed.
    pub fn grid_lines(&self) -> Vec<GridLine> {
        if self.cell_size == 0 {
            return Vec::new();
        }
        let (origin_x, origin_y) = self.origin();
        let extent = self.extent();
        let mut lines = Vec::with_capacity(self.divisions * 2);

        for i in 1..=self.divisions as u32 {
            lines.push(GridLine::Vertical {
                x: origin_x + i * self.cell_size,
                top: origin_y,
                bottom: origin_y + extent,
            });
        }
        for i in 1..=self.divisions as u32 {
            lines.push(GridLine::Horizontal {
                y: origin_y + i * self.cell_size,
                left: origin_x,
                right: origin_x + extent,
            });
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: u32, grid_height: u32, divisions: usize) -> Layout {
        Layout::new(width, grid_height + STATUS_BAND_HEIGHT, divisions)
    }

    #[test]
    fn cell_size_fits_smaller_dimension() {
        assert_eq!(layout(500, 500, 50).cell_size(), 10);
        assert_eq!(layout(1000, 300, 50).cell_size(), 6);
        assert_eq!(layout(99, 500, 10).cell_size(), 9);
    }

    #[test]
    fn cell_size_tracks_resize() {
        assert_eq!(layout(200, 200, 10).cell_size(), 20);
        assert_eq!(layout(400, 400, 10).cell_size(), 40);
    }

    #[test]
    fn tiny_window_has_no_cells() {
        let layout = layout(5, 5, 10);
        assert_eq!(layout.cell_size(), 0);
        assert_eq!(layout.cell_at(1.0, STATUS_BAND_HEIGHT as f64 + 1.0), None);
        assert!(layout.grid_lines().is_empty());
    }

    #[test]
    fn short_window_does_not_underflow() {
        let layout = Layout::new(500, 10, 10);
        assert_eq!(layout.cell_size(), 0);
    }

    #[test]
    fn cell_at_divides_by_cell_size() {
        let layout = layout(100, 100, 10);
        let top = STATUS_BAND_HEIGHT as f64;
        assert_eq!(layout.cell_at(0.0, top), Some((0, 0)));
        assert_eq!(layout.cell_at(9.9, top + 9.9), Some((0, 0)));
        assert_eq!(layout.cell_at(25.0, top + 31.0), Some((2, 3)));
        assert_eq!(layout.cell_at(99.0, top + 99.0), Some((9, 9)));
    }

    #[test]
    fn cell_at_rejects_outside_pixels() {
        let layout = layout(300, 100, 10);
        let top = STATUS_BAND_HEIGHT as f64;
        assert_eq!(layout.cell_at(5.0, top - 1.0), None);
        assert_eq!(layout.cell_at(150.0, top + 5.0), None);
        assert_eq!(layout.cell_at(5.0, top + 100.0), None);
        assert_eq!(layout.cell_at(-1.0, top), None);
    }

    #[test]
    fn cell_rect_offsets_by_band() {
        let layout = layout(100, 100, 10);
        assert_eq!(
            layout.cell_rect(2, 3),
            PixelRect {
                x: 20,
                y: STATUS_BAND_HEIGHT + 30,
                width: 10,
                height: 10,
            }
        );
    }

    #[test]
    fn grid_lines_close_every_row_and_column() {
        let layout = layout(40, 40, 4);
        let lines = layout.grid_lines();
        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[0],
            GridLine::Vertical {
                x: 10,
                top: STATUS_BAND_HEIGHT,
                bottom: STATUS_BAND_HEIGHT + 40,
            }
        );
        assert_eq!(
            lines[7],
            GridLine::Horizontal {
                y: STATUS_BAND_HEIGHT + 40,
                left: 0,
                right: 40,
            }
        );
    }
}
