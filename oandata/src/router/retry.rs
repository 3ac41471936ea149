use oandata_core::{CandleFragment, OandataError};

/// Position of one sub-range in its bounded attempt loop.
///
/// `Pending` re-enters itself on failure while attempts remain, otherwise it
/// moves to `Aborted`. `Succeeded` and `Aborted` are terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptState {
    /// Attempt number `attempt` (1-based) is about to be made.
    Pending { attempt: u32 },
    /// A provider call returned a fragment, possibly empty.
    Succeeded(CandleFragment),
    /// Every allowed attempt failed.
    Aborted { attempts: u32, last: OandataError },
}

/// Outcome of a single provider call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Fetched(CandleFragment),
    Failed(OandataError),
}

impl AttemptState {
    pub const fn start() -> Self {
        Self::Pending { attempt: 1 }
    }

    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending { .. })
    }

    /// Advance on the outcome of the attempt just made. Terminal states absorb
    /// further events unchanged.
    pub fn handle(self, bound: u32, event: Event) -> Self {
        match (self, event) {
            (Self::Pending { .. }, Event::Fetched(fragment)) => Self::Succeeded(fragment),
            (Self::Pending { attempt }, Event::Failed(error)) => {
                if attempt < bound {
                    Self::Pending {
                        attempt: attempt + 1,
                    }
                } else {
                    Self::Aborted {
                        attempts: attempt,
                        last: error,
                    }
                }
            }
            (terminal, _) => terminal,
        }
    }
}
