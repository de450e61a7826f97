//! Agent jobs: the task an agent is currently carrying out.

use serde::{Deserialize, Serialize};

use sg_core::Target;

/// What kind of task a job is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    /// Walk to `Job::target`.
    Goto,
    /// Stand still.
    Wait,
}

/// How hurried the agent is while working a job.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    /// Passive/default pace.
    #[default]
    Walk,
    Jog,
    Sprint,
}

/// Why the previous job ended when a new one is started.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JobCondition {
    Succeeded,
    /// The old job was cut off by an outside system.
    InterruptForced,
}

/// A task with an optional destination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub kind:    JobKind,
    pub target:  Target,
    pub urgency: Urgency,
}

impl Job {
    /// A `Goto` job at default urgency.
    pub fn goto(target: impl Into<Target>) -> Self {
        Self { kind: JobKind::Goto, target: target.into(), urgency: Urgency::Walk }
    }

    pub fn wait() -> Self {
        Self { kind: JobKind::Wait, target: Target::None, urgency: Urgency::Walk }
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// `true` if this job wants the agent walking somewhere.
    #[inline]
    pub fn wants_travel(&self) -> bool {
        self.kind == JobKind::Goto && self.target.is_valid()
    }
}
