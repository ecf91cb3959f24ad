use stoat_prolog::{config::Config, context::Context};

fn context_with(source: &str) -> Context {
    let mut ctx = Context::from_config(Config::default());
    ctx.load(source).unwrap();
    ctx
}

fn values(ctx: &mut Context, query: &str, name: &str) -> Vec<String> {
    ctx.query(query)
        .unwrap()
        .map(|solution| solution.unwrap().value(name).unwrap().to_string())
        .collect()
}

fn solution_count(ctx: &mut Context, query: &str) -> usize {
    ctx.query(query).unwrap().map(|s| s.unwrap()).count()
}

mod cut {
    use super::*;

    const MAX: &str = "
        max(X, Y, X) :- X >= Y, !.
        max(_, Y, Y).
    ";

    #[test]
    fn commits_to_the_first_clause() {
        let mut ctx = context_with(MAX);
        assert_eq!(values(&mut ctx, "max(5, 3, M).", "M"), ["5"]);
    }

    #[test]
    fn second_clause_reached_on_failure_before_cut() {
        let mut ctx = context_with(MAX);
        assert_eq!(values(&mut ctx, "max(2, 7, M).", "M"), ["7"]);
    }

    #[test]
    fn prunes_choicepoints_to_its_left() {
        let mut ctx = context_with("p(1). p(2). p(3). first(X) :- p(X), !.");
        assert_eq!(values(&mut ctx, "first(X).", "X"), ["1"]);
    }

    #[test]
    fn is_local_to_the_clause_body() {
        let mut ctx = context_with("p(1). p(2). q(X) :- p(X), !.");
        // A cut inside q does not prune the caller's alternatives for p.
        assert_eq!(values(&mut ctx, "p(X), q(Y).", "X"), ["1", "2"]);
    }

    #[test]
    fn prunes_a_disjunction_in_the_same_body() {
        let mut ctx = context_with("r(X) :- (X = a ; X = b), !.");
        assert_eq!(values(&mut ctx, "r(X).", "X"), ["a"]);
    }

    #[test]
    fn bare_cut_succeeds_once() {
        let mut ctx = context_with("p(1).");
        assert_eq!(solution_count(&mut ctx, "!."), 1);
    }
}

mod negation {
    use super::*;

    const LIKES: &str = "likes(mary, wine). likes(john, wine).";

    #[test]
    fn unprovable_goal_negates_to_one_solution() {
        let mut ctx = context_with(LIKES);
        let solutions = ctx
            .query("\\+ likes(tom, wine).")
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(solutions.len(), 1);
        assert!(solutions[0].is_empty());
    }

    #[test]
    fn provable_goal_negates_to_none() {
        let mut ctx = context_with(LIKES);
        assert_eq!(solution_count(&mut ctx, "\\+ likes(mary, wine)."), 0);
    }

    #[test]
    fn leaves_no_bindings_behind() {
        let mut ctx = context_with(LIKES);
        // The inner proof binds X, the rewind releases it, and the caller sees X free.
        let solutions = ctx
            .query("\\+ \\+ likes(X, wine), X = tom.")
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].value("X").unwrap().to_string(), "tom");
    }
}

mod disjunction {
    use super::*;

    #[test]
    fn branches_in_order() {
        let mut ctx = context_with("p(1).");
        assert_eq!(values(&mut ctx, "(X = a ; X = b).", "X"), ["a", "b"]);
    }

    #[test]
    fn failed_left_branch_reaches_the_right() {
        let mut ctx = context_with("p(1).");
        assert_eq!(values(&mut ctx, "(fail ; X = b).", "X"), ["b"]);
    }

    #[test]
    fn nests() {
        let mut ctx = context_with("p(1).");
        assert_eq!(
            values(&mut ctx, "(X = a ; (X = b ; X = c)).", "X"),
            ["a", "b", "c"]
        );
    }
}

mod if_then_else {
    use super::*;

    #[test]
    fn then_branch_on_condition_success() {
        let mut ctx = context_with("p(1).");
        assert_eq!(values(&mut ctx, "(1 < 2 -> X = yes ; X = no).", "X"), ["yes"]);
    }

    #[test]
    fn else_branch_on_condition_failure() {
        let mut ctx = context_with("p(1).");
        assert_eq!(values(&mut ctx, "(2 < 1 -> X = yes ; X = no).", "X"), ["no"]);
    }

    #[test]
    fn commits_to_the_first_condition_solution() {
        let mut ctx = context_with("p(1).");
        // No backtracking into the condition: one solution, from the first member.
        assert_eq!(
            values(&mut ctx, "(member(X, [1, 2, 3]) -> Y = X ; Y = none).", "Y"),
            ["1"]
        );
    }

    #[test]
    fn then_branch_backtracks_normally() {
        let mut ctx = context_with("p(1).");
        assert_eq!(
            values(&mut ctx, "(1 < 2 -> member(X, [a, b]) ; X = no).", "X"),
            ["a", "b"]
        );
    }

    #[test]
    fn bare_if_then_fails_without_else() {
        let mut ctx = context_with("p(1).");
        assert_eq!(solution_count(&mut ctx, "(2 < 1 -> true)."), 0);
        assert_eq!(solution_count(&mut ctx, "(1 < 2 -> true)."), 1);
    }

    #[test]
    fn condition_bindings_reach_the_then_branch() {
        let mut ctx = context_with("age(ann, 7).");
        assert_eq!(
            values(&mut ctx, "(age(ann, A) -> X = A ; X = unknown).", "X"),
            ["7"]
        );
    }
}

mod meta_call {
    use super::*;

    #[test]
    fn call_runs_its_argument() {
        let mut ctx = context_with("p(1). p(2).");
        assert_eq!(values(&mut ctx, "call(p(X)).", "X"), ["1", "2"]);
    }

    #[test]
    fn call_of_a_bound_variable() {
        let mut ctx = context_with("p(1). p(2).");
        assert_eq!(values(&mut ctx, "G = p(X), call(G).", "X"), ["1", "2"]);
    }

    #[test]
    fn cut_inside_call_is_local() {
        let mut ctx = context_with("p(1). p(2).");
        // The cut prunes inside the called goal only.
        assert_eq!(values(&mut ctx, "p(X), call((p(Y), !)).", "X"), ["1", "2"]);
    }
}
