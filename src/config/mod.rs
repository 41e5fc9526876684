/*!
Configuration of the analyses.

Primary configuration is a [Config] structure, with one sub-structure per analysis.
The command-line front end maps flags onto a configuration; library callers build one
directly, usually starting from [Default].
*/

use std::time::Duration;

/// The primary configuration structure.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Configuration of gate recognition.
    pub gates: GateConfig,

    /// Configuration of the Weisfeiler-Leman hash.
    pub wl: WlConfig,
}

/// Configuration of [gate recognition](crate::gates).
#[derive(Clone, Debug)]
pub struct GateConfig {
    /// Recognize gates by clause patterns (equivalence, and, or, full encodings).
    pub patterns: bool,

    /// Recognize gates by semantic equivalence checks through the oracle.
    pub semantic: bool,

    /// The number of root selection rounds.
    ///
    /// Root estimation is repeated, as recognized gates can expose fresh roots.
    pub tries: u32,

    /// An optional wall-clock budget for the analysis.
    ///
    /// On excess the analysis stops and the partial gate formula is reported as incomplete.
    pub time_limit: Option<Duration>,
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfig {
            patterns: true,
            semantic: true,
            tries: 1,
            time_limit: None,
        }
    }
}

/// Configuration of the [Weisfeiler-Leman hash](crate::identify::wl).
///
/// The half-iteration accounting follows the refinement structure: each full iteration
/// refines literal colors from clause colors, and `depth` counts *half* iterations, so the
/// refinement loop runs at most `depth / 2` times (strictly less, checked before each step).
#[derive(Clone, Debug)]
pub struct WlConfig {
    /// Maximum half-iterations.
    ///
    /// An even depth ends on a variable-level hash, an odd depth on a clause-level hash.
    pub depth: u32,

    /// The first iteration in which the fixed-point check runs.
    ///
    /// Early iterations rarely hit a fixed point, and the check is not free.
    pub first_progress_check_iteration: u32,

    /// Replace the first iteration's clause colors by a hash of the clause size.
    ///
    /// Sound, as every literal holds the same initial color.
    pub optimize_first_iteration: bool,

    /// Append parse time, calculation time, memory, and iteration count to the result.
    pub measurements: bool,
}

impl Default for WlConfig {
    fn default() -> Self {
        WlConfig {
            depth: 13,
            first_progress_check_iteration: 3,
            optimize_first_iteration: true,
            measurements: false,
        }
    }
}
