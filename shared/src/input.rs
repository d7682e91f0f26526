use std::time::Instant;

use log::debug;

use crate::layout::Layout;
use crate::simulation::Simulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Up,
    Down,
    Escape,
    Char(char),
    Other,
}

/// Window-system independent input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Window became visible again; carries its dimensions re-read on exposure.
    Exposed { width: u32, height: u32 },
    Resized { width: u32, height: u32 },
    /// Primary button press at a pixel position.
    ButtonPress { x: f64, y: f64 },
    KeyPress(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Redraw,
    Ignored,
    Quit,
}

/// Applies input events to a [`Simulation`], tracking the live window size
/// needed to map clicks onto cells.
#[derive(Debug, Clone)]
pub struct InputProcessor {
    width: u32,
    height: u32,
}

impl InputProcessor {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn layout(&self, divisions: usize) -> Layout {
        Layout::new(self.width, self.height, divisions)
    }

    pub fn process(&mut self, event: Event, sim: &mut Simulation, now: Instant) -> Response {
        match event {
            Event::Exposed { width, height } | Event::Resized { width, height } => {
                self.width = width;
                self.height = height;
                Response::Redraw
            }
            Event::ButtonPress { x, y } => {
                if sim.is_running() {
                    return Response::Ignored;
                }
                match self.layout(sim.divisions()).cell_at(x, y) {
                    Some((cell_x, cell_y)) if sim.toggle_cell(cell_x, cell_y) => Response::Redraw,
                    _ => {
                        debug!("click at ({x:.0}, {y:.0}) outside the grid");
                        Response::Ignored
                    }
                }
            }
            Event::KeyPress(key) => self.process_key(key, sim, now),
        }
    }

    fn process_key(&mut self, key: Key, sim: &mut Simulation, now: Instant) -> Response {
        let key = match key {
            Key::Char(ch) => Key::Char(ch.to_ascii_lowercase()),
            other => other,
        };

        match key {
            Key::Space => sim.toggle_running(now),
            Key::Up | Key::Char('+') | Key::Char('=') => sim.increase_rate(),
            Key::Down | Key::Char('-') => sim.decrease_rate(),
            Key::Char('r') => {
                if !sim.randomize() {
                    return Response::Ignored;
                }
            }
            Key::Char('c') => {
                if !sim.clear() {
                    return Response::Ignored;
                }
            }
            Key::Escape => return Response::Quit,
            _ => return Response::Ignored,
        }

        Response::Redraw
    }
}
