//! Per-agent short-range walking state.

use sg_core::Cell;

/// The walking state for a single agent.
///
/// An agent is either **idle** (`moving = false`) or **walking** toward
/// `destination`, one cell per tick.  `needs_path` is raised whenever a job
/// that wants travel is started; the sim's path-request phase clears it by
/// routing the request through the movement interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathState {
    /// `true` while the agent is walking toward `destination`.
    pub moving: bool,

    /// The cell being walked to.  `None` when idle.
    pub destination: Option<Cell>,

    /// A job asked for a route that has not been requested yet.
    pub needs_path: bool,
}

impl PathState {
    /// Begin walking to `cell`.
    #[inline]
    pub fn start(&mut self, cell: Cell) {
        self.moving = true;
        self.destination = Some(cell);
        self.needs_path = false;
    }

    /// Stop walking and forget the destination.
    #[inline]
    pub fn stop(&mut self) {
        self.moving = false;
        self.destination = None;
    }

    /// `true` if the agent is walking with `cell` as its immediate target.
    #[inline]
    pub fn is_heading_to(&self, cell: Cell) -> bool {
        self.moving && self.destination == Some(cell)
    }
}
