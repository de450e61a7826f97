//! Plain data row types written by output backends.

/// One agent passing through a portal pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeleportRow {
    pub tick:     u64,
    pub agent_id: u32,
    pub from_x:   i32,
    pub from_z:   i32,
    pub to_x:     i32,
    pub to_z:     i32,
}

/// One movement request seen by the interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptionRow {
    pub tick:     u64,
    pub agent_id: u32,
    pub dest_x:   i32,
    pub dest_z:   i32,
    pub handled:  bool,
    /// Path cost when one was computed; empty otherwise.
    pub cost:     Option<u32>,
    /// Pass-through reason, or `"handled"`.
    pub reason:   String,
}

/// One non-idle portal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalEventRow {
    pub tick:      u64,
    pub portal_id: Option<u32>,
    /// `expired`, `teleported`, or `blocked`.
    pub kind:      &'static str,
    pub agent_id:  Option<u32>,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub live_portals:   u64,
    pub stunned_agents: u64,
}
