/**
* A cell with exactly three live neighbors is alive in the next generation.
* A cell with exactly two live neighbors keeps its current state.
* Any other count leaves the cell dead.
* Neighbors that would fall outside the grid subtract the cell's own value
* from the count instead of being treated as dead.
*/

pub mod config;
pub mod grid;
pub mod input;
pub mod layout;
pub mod scheduler;
pub mod simulation;
pub mod telemetry;
