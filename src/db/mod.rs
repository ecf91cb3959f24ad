/*!
Databases holding the mutable state of a resolution.

- [The clause database](crate::db::clause)
  + The stored program: for each predicate, the clauses given for it, in insertion order.
    Clause order within a predicate is the resolution order.
- [The binding store](crate::db::bindings)
  + The current substitution: for each variable, its bound term, if any.
    Every binding is recorded on [the trail](crate::db::trail) so the store can be rewound to any earlier mark.
*/

pub mod bindings;
pub mod clause;
mod keys;
pub use keys::PredicateKey;
pub mod trail;
