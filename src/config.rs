//! Simulation configuration.

/// Default distance under which two endpoints are the same junction.
pub const DEFAULT_MERGE_RADIUS: f64 = 25.0;

/// Default cap on logic propagation sweeps.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default budget of component traversals for the closed-loop search.
pub const DEFAULT_MAX_SEARCH_STEPS: usize = 10_000;

/// Configuration shared by both circuit models.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Endpoints strictly closer than this are merged into one junction.
    pub merge_radius: f64,
    /// Maximum logic propagation sweeps before values are accepted as-is.
    pub max_iterations: usize,
    /// Maximum component traversals a single loop search may perform.
    pub max_search_steps: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            merge_radius: DEFAULT_MERGE_RADIUS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_search_steps: DEFAULT_MAX_SEARCH_STEPS,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merge radius.
    pub fn with_merge_radius(mut self, merge_radius: f64) -> Self {
        self.merge_radius = merge_radius;
        self
    }

    /// Set the logic propagation sweep cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the loop search step budget.
    ///
    /// Dense parallel networks can have exponentially many simple paths; the
    /// budget keeps a single `simulate()` call bounded.
    pub fn with_max_search_steps(mut self, max_search_steps: usize) -> Self {
        self.max_search_steps = max_search_steps;
        self
    }
}
