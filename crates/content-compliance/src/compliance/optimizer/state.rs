use serde::{Deserialize, Serialize};

/// How an optimization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Satisfied,
    Exhausted,
    Cancelled,
}

/// Loop position. `retries` counts remediation passes started so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerState {
    Evaluating { retries: usize },
    Remediating { retries: usize },
    Satisfied { retries: usize },
    Exhausted { retries: usize },
    Cancelled { retries: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerEvent {
    Evaluated { satisfied: bool },
    Remediated,
    CancellationRequested,
}

impl OptimizerState {
    pub const INITIAL: OptimizerState = OptimizerState::Evaluating { retries: 0 };

    pub fn retries(self) -> usize {
        match self {
            Self::Evaluating { retries }
            | Self::Remediating { retries }
            | Self::Satisfied { retries }
            | Self::Exhausted { retries }
            | Self::Cancelled { retries } => retries,
        }
    }

    pub fn termination(self) -> Option<Termination> {
        match self {
            Self::Satisfied { .. } => Some(Termination::Satisfied),
            Self::Exhausted { .. } => Some(Termination::Exhausted),
            Self::Cancelled { .. } => Some(Termination::Cancelled),
            Self::Evaluating { .. } | Self::Remediating { .. } => None,
        }
    }
}

/// Pure transition function. Terminal states absorb every event; events that do not
/// apply to the current state leave it unchanged.
pub fn reduce(state: OptimizerState, event: OptimizerEvent, max_retries: usize) -> OptimizerState {
    use OptimizerEvent as E;
    use OptimizerState as S;

    match (state, event) {
        (S::Evaluating { retries }, E::Evaluated { satisfied: true }) => S::Satisfied { retries },
        (S::Evaluating { retries }, E::Evaluated { satisfied: false }) if retries >= max_retries => {
            S::Exhausted { retries }
        }
        (S::Evaluating { retries }, E::Evaluated { satisfied: false }) => S::Remediating {
            retries: retries + 1,
        },
        (S::Remediating { retries }, E::Remediated) => S::Evaluating { retries },
        // The pass that was about to start never ran.
        (S::Remediating { retries }, E::CancellationRequested) => S::Cancelled {
            retries: retries.saturating_sub(1),
        },
        (S::Evaluating { retries }, E::CancellationRequested) => S::Cancelled { retries },
        (state, _) => state,
    }
}
