/*!
The context --- to which clauses are added and within which queries take place.

# Example
```rust
# use stoat_prolog::config::Config;
# use stoat_prolog::context::Context;
let mut ctx = Context::from_config(Config::default());

ctx.load("parent(tom, bob). parent(bob, ann).").unwrap();

let solutions = ctx
    .query("parent(tom, Who).")
    .unwrap()
    .collect::<Result<Vec<_>, _>>()
    .unwrap();

assert_eq!(solutions.len(), 1);
assert_eq!(solutions[0].to_string(), "Who = bob");
```
*/

mod counters;
pub use counters::Counters;

use crate::{
    config::Config,
    db::{bindings::BindingDB, clause::ClauseDB},
    structures::operators::OperatorTable,
};

/// The state of a context.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContextState {
    /// The context allows for configuration.
    Configuration,

    /// The context allows input, with no query in progress.
    Input,

    /// A query holds the context, with its solution stream not yet dropped.
    Solving,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Input => write!(f, "Input"),
            Self::Solving => write!(f, "Solving"),
        }
    }
}

/// A context: a stored program, a binding store, and the configuration both work under.
pub struct Context {
    /// The configuration of the context.
    pub config: Config,

    /// Counters related to the context.
    pub counters: Counters,

    /// The clause database.
    pub clause_db: ClauseDB,

    /// The binding store, with its trail.
    pub bindings: BindingDB,

    /// The operator registry used when reading and printing terms.
    pub operators: OperatorTable,

    /// The state of the context.
    pub state: ContextState,
}

impl Context {
    /// Creates a context from some given configuration.
    pub fn from_config(config: Config) -> Self {
        let mut ctx = Self {
            counters: Counters::default(),
            clause_db: ClauseDB::default(),
            bindings: BindingDB::default(),
            operators: OperatorTable::default(),
            state: ContextState::Configuration,

            config,
        };

        if ctx.config.prelude.value {
            ctx.load(crate::builder::PRELUDE)
                .expect("! Prelude failed to load");
            ctx.state = ContextState::Configuration;
        }

        ctx
    }

    /// Discards all clauses and bindings, returning the context to a clean state.
    ///
    /// The configuration is kept, and the prelude is reloaded if configured.
    pub fn reset(&mut self) {
        self.clause_db.clear();
        self.bindings.clear();
        self.counters = Counters::default();
        self.state = ContextState::Configuration;

        if self.config.prelude.value {
            self.load(crate::builder::PRELUDE)
                .expect("! Prelude failed to load");
            self.state = ContextState::Configuration;
        }
    }
}
