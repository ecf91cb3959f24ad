/*!
A Prolog interpreter built around a backtracking resolution engine.

stoat_prolog executes Horn-clause logic programs: a program is a sequence of facts and rules, a query is a goal, and the engine enumerates every substitution for the query variables under which the goal is a consequence of the program, backtracking through alternative clauses on demand.

The library is developed to help researchers, developers, or anyone curious, to investigate logic programming runtimes, whether as a novice or through implementing novel ideas.

# Orientation

The library is designed around the core structure of a [context].

Programs are added by [loading source text](crate::context::Context::load), and goals are put with [query](crate::context::Context::query), which returns a lazy stream of solutions --- the engine makes progress only when the stream is advanced, and dropping the stream mid-way releases every binding the query made.

Internally, and at a high level, a solve is viewed in terms of manipulation of, and relationships between, a handful of databases which instantiate core theoretical objects.
Notably:
- A program is stored in a clause database, grouped by predicate, in insertion order.
- A substitution is stored in a binding store, with every binding recorded on a trail so backtracking can rewind to any earlier mark.

Goals consume clauses, clauses (after renaming) extend the substitution, and failed alternatives rewind it, until the goal stack empties and the substitution is a solution.

Useful starting points, then, may be:
- The [solve machine](crate::procedures::solve) to inspect the dynamics of a resolution.
- The [database module](crate::db) to inspect the data considered during a resolution.
- The [structures] to familiarise yourself with the abstract elements of a solve and their representation (terms, clauses, operators, etc.)
- The [configuration](crate::config) to see what features are supported.

# Examples

+ Load a small family tree and enumerate a predicate over it.

```rust
use stoat_prolog::{config::Config, context::Context};

let mut ctx = Context::from_config(Config::default());

ctx.load(
    "parent(tom, bob). parent(tom, liz).
     parent(bob, ann). parent(bob, pat).
     grandparent(X, Z) :- parent(X, Y), parent(Y, Z).",
)
.unwrap();

let grandchildren = ctx
    .query("grandparent(tom, G).")
    .unwrap()
    .map(|solution| solution.unwrap().value("G").unwrap().to_string())
    .collect::<Vec<_>>();

assert_eq!(grandchildren, ["ann", "pat"]);
```

+ Arithmetic follows the standard operator table.

```rust
use stoat_prolog::{config::Config, context::Context};

let mut ctx = Context::from_config(Config::default());

let solutions = ctx
    .query("X is 2 + 3 * 4.")
    .unwrap()
    .collect::<Result<Vec<_>, _>>()
    .unwrap();

assert_eq!(solutions.len(), 1);
assert_eq!(solutions[0].to_string(), "X = 14");
```

# Logs

To help diagnose issues (somewhat) detailed calls to [log!](log) are made, and a variety of targets are defined in order to help narrow output to relevant parts of the library.
As logging is only built on request, and further can be requested by level, logs are verbose.

The targets are listed in [misc::log].
*/

#![allow(clippy::collapsible_else_if)]
#![allow(clippy::single_match)]

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod reports;

pub mod db;

pub mod misc;
