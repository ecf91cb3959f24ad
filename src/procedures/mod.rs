/*!
The algorithms of a resolution, factored into a collection of procedures.

- [unify](unify) makes two terms structurally identical by binding variables, trailing every binding.
- [rename](rename) standardizes a clause apart before use, replacing its variables with fresh ones.
- [solve](solve) drives the search: a goal-stack machine with explicit choicepoints, yielding one environment per solution.
- [evaluate](evaluate) reduces arithmetic expression terms to numbers for `is/2` and the numeric comparisons.
- [builtins](builtins) dispatches the built-in predicates the machine does not treat as control constructs.
*/

pub mod builtins;
pub mod evaluate;
pub mod rename;
pub mod solve;
pub mod unify;
