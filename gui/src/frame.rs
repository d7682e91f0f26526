use bytemuck::{Pod, Zeroable};
use shared::grid::Grid;
use shared::layout::{GridLine, Layout, PixelRect};
use shared::telemetry::Status;

use crate::font::{glyph_bits, FONT_HEIGHT, FONT_WIDTH};

const LIVE_CELL: [f32; 3] = [0.0, 0.0, 0.0];
// X11 "gray92"
const GRID_LINE: [f32; 3] = [0.92, 0.92, 0.92];
const RUNNING_TEXT: [f32; 3] = [0.0, 0.8, 0.0];
const PAUSED_TEXT: [f32; 3] = [0.9, 0.0, 0.0];
const TELEMETRY_TEXT: [f32; 3] = [0.0, 0.0, 0.9];

const LINE_WIDTH: f32 = 1.0;
const TEXT_SCALE: f32 = 2.0;
const TEXT_MARGIN: f32 = 8.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

#[derive(Copy, Clone)]
struct Rect {
    min: [f32; 2],
    max: [f32; 2],
}

impl From<PixelRect> for Rect {
    fn from(rect: PixelRect) -> Self {
        Rect {
            min: [rect.x as f32, rect.y as f32],
            max: [(rect.x + rect.width) as f32, (rect.y + rect.height) as f32],
        }
    }
}

/// Vertices reserved up front, both in the frame list and the GPU buffer.
pub const INITIAL_VERTEX_CAPACITY: usize = 4096;

/// Reusable vertex list for one frame.
pub struct FrameBuilder {
    vertices: Vec<Vertex>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(INITIAL_VERTEX_CAPACITY),
        }
    }

    pub fn build(&mut self, grid: &Grid, status: Status, window_size: (u32, u32)) -> &[Vertex] {
        self.vertices.clear();
        draw_cells(&mut self.vertices, grid, window_size);
        draw_grid_lines(&mut self.vertices, grid.divisions(), window_size);
        draw_status_text(&mut self.vertices, status, window_size);
        &self.vertices
    }
}

/// Live cells as filled squares sized from the current window dimensions.
pub fn draw_cells(vertices: &mut Vec<Vertex>, grid: &Grid, window_size: (u32, u32)) {
    let layout = Layout::new(window_size.0, window_size.1, grid.divisions());
    if layout.cell_size() == 0 {
        return;
    }
    for (x, y) in grid.alive_cells() {
        push_rect(vertices, layout.cell_rect(x, y).into(), LIVE_CELL, window_size);
    }
}

pub fn draw_grid_lines(vertices: &mut Vec<Vertex>, divisions: usize, window_size: (u32, u32)) {
    let layout = Layout::new(window_size.0, window_size.1, divisions);
    for line in layout.grid_lines() {
        let rect = match line {
            GridLine::Vertical { x, top, bottom } => Rect {
                min: [x as f32 - LINE_WIDTH, top as f32],
                max: [x as f32, bottom as f32],
            },
            GridLine::Horizontal { y, left, right } => Rect {
                min: [left as f32, y as f32 - LINE_WIDTH],
                max: [right as f32, y as f32],
            },
        };
        push_rect(vertices, rect, GRID_LINE, window_size);
    }
}

/// Run state on the first line, rate and tick count on the second.
pub fn draw_status_text(vertices: &mut Vec<Vertex>, status: Status, window_size: (u32, u32)) {
    let state_color = if status.running { RUNNING_TEXT } else { PAUSED_TEXT };
    let line_height = FONT_HEIGHT as f32 * TEXT_SCALE;

    draw_text(
        vertices,
        status.status_line(),
        [TEXT_MARGIN, TEXT_MARGIN],
        state_color,
        window_size,
    );
    draw_text(
        vertices,
        &status.telemetry_line(),
        [TEXT_MARGIN, TEXT_MARGIN * 2.0 + line_height],
        TELEMETRY_TEXT,
        window_size,
    );
}

fn draw_text(vertices: &mut Vec<Vertex>, text: &str, origin: [f32; 2], color: [f32; 3], window_size: (u32, u32)) {
    let advance = (FONT_WIDTH as f32 + 1.0) * TEXT_SCALE;
    let mut cursor_x = origin[0];

    for ch in text.chars() {
        if let Some(rows) = glyph_bits(ch) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..FONT_WIDTH {
                    if (bits >> (FONT_WIDTH - 1 - col)) & 1 == 1 {
                        let rect = Rect {
                            min: [
                                cursor_x + col as f32 * TEXT_SCALE,
                                origin[1] + row as f32 * TEXT_SCALE,
                            ],
                            max: [
                                cursor_x + (col as f32 + 1.0) * TEXT_SCALE,
                                origin[1] + (row as f32 + 1.0) * TEXT_SCALE,
                            ],
                        };
                        push_rect(vertices, rect, color, window_size);
                    }
                }
            }
        }
        cursor_x += advance;
    }
}

fn push_rect(vertices: &mut Vec<Vertex>, rect: Rect, color: [f32; 3], window_size: (u32, u32)) {
    let width = window_size.0.max(1) as f32;
    let height = window_size.1.max(1) as f32;
    let x0 = to_ndc(rect.min[0], width);
    let y0 = to_ndc_y(rect.min[1], height);
    let x1 = to_ndc(rect.max[0], width);
    let y1 = to_ndc_y(rect.max[1], height);

    vertices.push(Vertex { position: [x0, y1], color });
    vertices.push(Vertex { position: [x1, y1], color });
    vertices.push(Vertex { position: [x0, y0], color });
    vertices.push(Vertex { position: [x0, y0], color });
    vertices.push(Vertex { position: [x1, y1], color });
    vertices.push(Vertex { position: [x1, y0], color });
}

fn to_ndc(x: f32, width: f32) -> f32 {
    (x / width) * 2.0 - 1.0
}

fn to_ndc_y(y: f32, height: f32) -> f32 {
    1.0 - (y / height) * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::grid::CellState::Alive;
    use shared::layout::STATUS_BAND_HEIGHT;

    const SIZE: (u32, u32) = (100, 100 + STATUS_BAND_HEIGHT);

    fn paused(tick_count: u64) -> Status {
        Status {
            running: false,
            ticks_per_second: 1,
            tick_count,
        }
    }

    #[test]
    fn one_quad_per_live_cell() {
        let mut grid = Grid::new(10);
        let mut vertices = Vec::new();
        draw_cells(&mut vertices, &grid, SIZE);
        assert!(vertices.is_empty());

        grid.set(0, 0, Alive);
        grid.set(9, 9, Alive);
        draw_cells(&mut vertices, &grid, SIZE);
        assert_eq!(vertices.len(), 12);
        assert!(vertices.iter().all(|v| v.color == LIVE_CELL));
    }

    #[test]
    fn cell_quads_stay_on_screen() {
        let mut grid = Grid::new(10);
        grid.set(9, 9, Alive);
        let mut vertices = Vec::new();
        draw_cells(&mut vertices, &grid, SIZE);
        for vertex in &vertices {
            assert!((-1.0..=1.0).contains(&vertex.position[0]));
            assert!((-1.0..=1.0).contains(&vertex.position[1]));
        }
    }

    #[test]
    fn cells_scale_with_window() {
        let mut grid = Grid::new(10);
        grid.set(0, 0, Alive);

        let mut small = Vec::new();
        draw_cells(&mut small, &grid, SIZE);
        let mut large = Vec::new();
        draw_cells(&mut large, &grid, (200, 200 + STATUS_BAND_HEIGHT));

        // Right edge of cell (0, 0) is 10% of the width in both windows.
        assert_eq!(small[1].position[0], large[1].position[0]);
    }

    #[test]
    fn grid_lines_two_per_division() {
        let mut vertices = Vec::new();
        draw_grid_lines(&mut vertices, 10, SIZE);
        assert_eq!(vertices.len(), 20 * 6);
    }

    #[test]
    fn status_color_follows_run_state() {
        let mut vertices = Vec::new();
        draw_status_text(&mut vertices, paused(0), SIZE);
        assert!(vertices.iter().any(|v| v.color == PAUSED_TEXT));
        assert!(vertices.iter().any(|v| v.color == TELEMETRY_TEXT));
        assert!(!vertices.iter().any(|v| v.color == RUNNING_TEXT));
    }

    #[test]
    fn longer_tick_count_draws_more() {
        let mut short = Vec::new();
        draw_status_text(&mut short, paused(1), SIZE);
        let mut long = Vec::new();
        draw_status_text(&mut long, paused(11), SIZE);
        assert!(long.len() > short.len());
    }

    #[test]
    fn new_builder_reserves_initial_capacity() {
        let builder = FrameBuilder::new();
        assert!(builder.vertices.capacity() >= INITIAL_VERTEX_CAPACITY);
        assert!(builder.vertices.is_empty());
    }

    #[test]
    fn build_reuses_buffer() {
        let mut builder = FrameBuilder::new();
        let grid = Grid::new(4);
        let first = builder.build(&grid, paused(0), SIZE).len();
        let second = builder.build(&grid, paused(0), SIZE).len();
        assert_eq!(first, second);
    }
}
