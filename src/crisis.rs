use tracing::debug;

/// How a crisis scenario ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrisisResolution {
    Response { option: u8 },
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrisisState {
    #[default]
    Pending,
    Resolved(CrisisResolution),
}

/// Countdown state for one crisis scenario. The core holds no real timer;
/// the event loop reports expiry and user input, and whichever arrives
/// first wins. The losing transition is a no-op.
#[derive(Debug)]
pub struct CrisisClock {
    scenario_id: String,
    deadline_ms: u64,
    timeout_penalty: i32,
    state: CrisisState,
}

impl CrisisClock {
    pub fn new(scenario_id: &str, deadline_ms: u64, timeout_penalty: i32) -> Self {
        Self {
            scenario_id: scenario_id.to_string(),
            deadline_ms,
            timeout_penalty,
            state: CrisisState::Pending,
        }
    }

    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    pub fn state(&self) -> CrisisState {
        self.state
    }

    pub fn is_resolved(&self) -> bool {
        self.state != CrisisState::Pending
    }

    /// Returns true only if this response won the race.
    pub fn resolve_response(&mut self, option: u8) -> bool {
        if self.is_resolved() {
            debug!(
                "Late response to '{}' ignored; scenario already resolved",
                self.scenario_id
            );
            return false;
        }
        self.state = CrisisState::Resolved(CrisisResolution::Response { option });
        true
    }

    /// Returns the non-response penalty exactly once; later expiry signals
    /// and responses are ignored.
    pub fn resolve_timeout(&mut self) -> Option<i32> {
        if self.is_resolved() {
            return None;
        }
        self.state = CrisisState::Resolved(CrisisResolution::Timeout);
        debug!(
            "Scenario '{}' timed out; applying penalty {}",
            self.scenario_id, self.timeout_penalty
        );
        Some(self.timeout_penalty)
    }
}
