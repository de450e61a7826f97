//! Fire-and-forget effect and notification sinks.
//!
//! The core never reads anything back from a sink.  A sink that fails
//! returns an [`EffectError`]; the caller logs it and carries on, so a
//! broken renderer can never strand an agent mid-teleport.

use thiserror::Error;

use sg_core::{AgentId, Cell, Tick};

/// A visual or audio cue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Outer-ring flash where a portal was just placed.
    PlacementRing { cell: Cell },
    /// Flash attached to the agent as it enters.
    EntryFlash { agent: AgentId, cell: Cell },
    EntrySound { cell: Cell },
    ExitFlash { cell: Cell },
    ExitSound { cell: Cell },
}

/// The "teleport occurred" broadcast.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TeleportEvent {
    pub tick:  Tick,
    pub agent: AgentId,
    pub from:  Cell,
    pub to:    Cell,
}

#[derive(Debug, Error)]
#[error("effect playback failed: {0}")]
pub struct EffectError(pub String);

/// Receiver for cues and teleport notifications.
///
/// Both methods default to doing nothing.
pub trait EffectSink {
    fn play(&mut self, _effect: &Effect) -> Result<(), EffectError> {
        Ok(())
    }

    fn teleported(&mut self, _event: &TeleportEvent) -> Result<(), EffectError> {
        Ok(())
    }
}

/// A sink that ignores everything.
pub struct NoopEffects;

impl EffectSink for NoopEffects {}

/// A sink that keeps everything it receives, in order.
#[derive(Default, Debug)]
pub struct RecordingSink {
    pub effects:   Vec<Effect>,
    pub teleports: Vec<TeleportEvent>,
}

impl EffectSink for RecordingSink {
    fn play(&mut self, effect: &Effect) -> Result<(), EffectError> {
        self.effects.push(effect.clone());
        Ok(())
    }

    fn teleported(&mut self, event: &TeleportEvent) -> Result<(), EffectError> {
        self.teleports.push(*event);
        Ok(())
    }
}
