/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information when extending the library and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    pub const PARSE: &str = "parse";
    pub const GATES: &str = "gates";
    pub const ORACLE: &str = "oracle";
    pub const WL: &str = "wl";
}
