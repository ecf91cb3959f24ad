/*!
Configuration of a context.

All configuration for a context is contained within the context.
Each option records its valid range and the last [context state](crate::context::ContextState) at which revising it is sound.
*/

mod config_option;
pub use config_option::ConfigOption;

use crate::context::ContextState;

/// The primary configuration structure.
#[derive(Clone)]
pub struct Config {
    /// Check that a variable does not occur in a term before binding the variable to the term.
    ///
    /// Prevents `X = f(X)` from building a term which loops under later dereference.
    pub occurs_check: ConfigOption<bool>,

    /// Load the prelude (`member/2`, `append/3`) when the context is created.
    pub prelude: ConfigOption<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            occurs_check: ConfigOption {
                name: "occurs_check",
                min: false,
                max: true,
                max_state: ContextState::Input,
                value: true,
            },

            prelude: ConfigOption {
                name: "prelude",
                min: false,
                max: true,
                max_state: ContextState::Configuration,
                value: true,
            },
        }
    }
}
