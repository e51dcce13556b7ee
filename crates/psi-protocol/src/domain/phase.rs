//! Phase state machine of a protocol run

use std::fmt;

/// Where a protocol run stands.
///
/// ```text
/// Init -> SetupDone -> OnlineDone -> Intersected
///   \________\______________\______> Aborted
/// ```
///
/// There are no back-transitions. `Intersected` and `Aborted` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Server key exists, nothing exchanged yet
    Init,
    /// Server signed its set and exported its filter
    SetupDone,
    /// Client blinded its set and holds the server's signatures
    OnlineDone,
    /// Client evaluated membership; the result is available
    Intersected,
    /// A phase failed; the run and its blinding factors are discarded
    Aborted,
}

impl Phase {
    /// The phase a successful step moves to, if any
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Init => Some(Phase::SetupDone),
            Phase::SetupDone => Some(Phase::OnlineDone),
            Phase::OnlineDone => Some(Phase::Intersected),
            Phase::Intersected | Phase::Aborted => None,
        }
    }

    /// No further transitions are possible
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Init => "INIT",
            Phase::SetupDone => "SETUP_DONE",
            Phase::OnlineDone => "ONLINE_DONE",
            Phase::Intersected => "INTERSECTED",
            Phase::Aborted => "ABORTED",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
