/// Counts for various things which count, roughly.
#[derive(Default)]
pub struct Counters {
    /// A count of every goal dispatched by the solve machine.
    pub total_goals: usize,

    /// A count of every time an alternative was sought, whether entering a predicate or recovering from failure.
    pub total_backtracks: usize,

    /// A count of clauses renamed to fresh variables.
    pub total_renames: usize,

    /// A count of solutions yielded, across all queries.
    pub total_solutions: usize,

    /// A count of clauses added, whether from source or by `assert`.
    pub clauses_added: usize,

    /// A count of queries started.
    pub queries: usize,
}
