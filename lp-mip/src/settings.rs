//! Configuration settings for the branch-and-bound solver.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use lp_core::SimplexOptions;

/// Branch-and-bound solver settings.
#[derive(Debug, Clone)]
pub struct MipSettings {
    // === Termination criteria ===
    /// Maximum number of nodes to explore.
    pub max_nodes: u64,

    /// Time limit in milliseconds (None = unlimited).
    pub time_limit_ms: Option<u64>,

    /// Integer feasibility tolerance.
    /// A variable counts as integer if |x - round(x)| <= int_feas_tol.
    pub int_feas_tol: f64,

    // === Relaxation solver ===
    /// Options for the per-node LP relaxation solves.
    pub simplex: SimplexOptions,

    // === Cancellation ===
    /// Cooperative cancellation flag, polled between node expansions.
    /// Setting it makes the solve return promptly with an interrupted
    /// status carrying the best incumbent found so far.
    pub cancel: Option<Arc<AtomicBool>>,

    // === Output ===
    /// Emit progress information through the `log` facade.
    pub verbose: bool,

    /// Log frequency (report every N nodes).
    pub log_freq: u64,
}

impl Default for MipSettings {
    fn default() -> Self {
        Self {
            max_nodes: 1_000_000,
            time_limit_ms: None,
            int_feas_tol: 1e-6,
            simplex: SimplexOptions::default(),
            cancel: None,
            verbose: false,
            log_freq: 100,
        }
    }
}

impl MipSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        let mut s = Self::default();
        s.verbose = true;
        s.log_freq = 1;
        s
    }

    /// Set the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_ms = Some((seconds * 1000.0) as u64);
        self
    }

    /// Set the maximum node count.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = nodes;
        self
    }

    /// Attach a cancellation flag.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }
}
