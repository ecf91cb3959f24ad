/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [solve machine](crate::procedures::solve)
    pub const SOLVE: &str = "solve";

    /// Logs related to [unification](crate::procedures::unify)
    pub const UNIFY: &str = "unify";

    /// Logs related to backtracking
    pub const BACKTRACK: &str = "backtrack";

    /// Logs related to the [clause database](crate::db::clause)
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to [reading source text](crate::builder)
    pub const PARSER: &str = "parser";

    /// Logs related to [arithmetic evaluation](crate::procedures::evaluate)
    pub const EVALUATE: &str = "evaluate";
}
