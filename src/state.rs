use crate::api::batch::{FetchOutcome, ResultBag};
use crate::api::query::{PlanError, build_queries};

/// Lifecycle of the dashboard data.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    /// A batch is in flight. The last completed outcome stays visible until
    /// this cycle settles.
    Fetching {
        cycle: u64,
        previous: Option<FetchOutcome>,
    },
    Done(FetchOutcome),
}

/// Owns the single current [`FetchOutcome`].
///
/// Every fetch gets a cycle number. Only the most recently started cycle may
/// settle the state; results from older cycles that finish late are dropped.
#[derive(Debug, Default)]
pub struct DashboardState {
    state: FetchState,
    last_cycle: u64,
    username: Option<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.state, FetchState::Fetching { .. })
    }

    /// Username of the most recently started fetch.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The outcome the dashboard should display right now.
    pub fn current_outcome(&self) -> Option<&FetchOutcome> {
        match &self.state {
            FetchState::Idle => None,
            FetchState::Fetching { previous, .. } => previous.as_ref(),
            FetchState::Done(outcome) => Some(outcome),
        }
    }

    /// Enter `Fetching` for `username` and return the new cycle number.
    ///
    /// Blank usernames are rejected and leave the state untouched.
    pub fn start_fetch(&mut self, username: &str) -> Result<u64, PlanError> {
        build_queries(username)?;

        self.last_cycle += 1;
        let previous = match std::mem::take(&mut self.state) {
            FetchState::Idle => None,
            FetchState::Fetching { previous, .. } => previous,
            FetchState::Done(outcome) => Some(outcome),
        };
        self.state = FetchState::Fetching {
            cycle: self.last_cycle,
            previous,
        };
        self.username = Some(username.trim().to_string());
        tracing::debug!(cycle = self.last_cycle, username, "fetch started");
        Ok(self.last_cycle)
    }

    /// Settle `cycle` with a full result bag. Returns `false` if stale.
    pub fn on_success(&mut self, cycle: u64, bag: ResultBag) -> bool {
        self.settle(cycle, FetchOutcome::Success(bag))
    }

    /// Settle `cycle` as failed. Any earlier success is discarded.
    pub fn on_failure(&mut self, cycle: u64, reason: String) -> bool {
        self.settle(cycle, FetchOutcome::Failure(reason))
    }

    /// Route a batch outcome to [`Self::on_success`] or [`Self::on_failure`].
    pub fn on_outcome(&mut self, cycle: u64, outcome: FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::Success(bag) => self.on_success(cycle, bag),
            FetchOutcome::Failure(reason) => self.on_failure(cycle, reason),
        }
    }

    fn settle(&mut self, cycle: u64, outcome: FetchOutcome) -> bool {
        match self.state {
            FetchState::Fetching { cycle: current, .. } if current == cycle => {
                self.state = FetchState::Done(outcome);
                true
            }
            _ => {
                tracing::debug!(cycle, latest = self.last_cycle, "discarding stale batch");
                false
            }
        }
    }
}
