//! The interactive loop.
//!
//! Input starting with `:` is a command; anything else is a query.
//! After each solution the loop waits: `;` asks for the next solution, anything
//! else abandons the stream.

use std::io::Write;

use stoat_prolog::context::Context;

/// What the caller should do after a command.
enum Flow {
    Continue,
    Quit,
}

/// Runs the REPL until `:quit`/`:exit` or end of input.
pub fn run(ctx: &mut Context, mut files: Vec<String>) {
    let stdin = std::io::stdin();

    loop {
        print!("?- ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input.starts_with(':') {
            match command(ctx, &mut files, input) {
                Flow::Continue => continue,
                Flow::Quit => break,
            }
        }

        query(ctx, input);
    }
}

fn query(ctx: &mut Context, input: &str) {
    let answers = match ctx.query(input) {
        Ok(answers) => answers,
        Err(e) => {
            println!("error: {e}");
            return;
        }
    };

    let stdin = std::io::stdin();
    let mut found_any = false;

    for answer in answers {
        match answer {
            Err(e) => {
                println!("error: {e}");
                return;
            }

            Ok(solution) => {
                found_any = true;
                print!("{solution} ");
                let _ = std::io::stdout().flush();

                let mut line = String::new();
                match stdin.read_line(&mut line) {
                    Ok(0) | Err(_) => return,
                    Ok(_) => {}
                }
                if line.trim() != ";" {
                    return;
                }
            }
        }
    }

    if found_any {
        println!("no more solutions.");
    } else {
        println!("false.");
    }
}

fn command(ctx: &mut Context, files: &mut Vec<String>, input: &str) -> Flow {
    let mut words = input.split_whitespace();

    match words.next() {
        Some(":help") => {
            println!(":help              this text");
            println!(":quit, :exit       leave");
            println!(":load <file>       load a source file");
            println!(":reload            reset, then load every file again");
            println!(":show_rules        list the stored clauses");
            println!(":clear             discard all clauses");
            println!(":status            counters and database sizes");
            println!("<goal>.            query; ';' for the next solution");
        }

        Some(":quit") | Some(":exit") => return Flow::Quit,

        Some(":load") => match words.next() {
            None => println!(":load requires a file"),
            Some(file) => {
                if load_file(ctx, file) {
                    files.push(file.to_string());
                }
            }
        },

        Some(":reload") => {
            ctx.reset();
            for file in files.iter() {
                load_file(ctx, file);
            }
        }

        Some(":clear") => {
            ctx.reset();
            println!("% cleared");
        }

        Some(":show_rules") => {
            for predicate in ctx.clause_db.predicates() {
                for clause in &predicate.clauses {
                    println!("{clause}");
                }
            }
        }

        Some(":status") => {
            println!("state:      {}", ctx.state);
            println!("predicates: {}", ctx.clause_db.predicate_count());
            println!("clauses:    {}", ctx.clause_db.clause_count());
            println!("queries:    {}", ctx.counters.queries);
            println!("solutions:  {}", ctx.counters.total_solutions);
            println!("goals:      {}", ctx.counters.total_goals);
            println!("backtracks: {}", ctx.counters.total_backtracks);
            println!("renames:    {}", ctx.counters.total_renames);
        }

        Some(unknown) => println!("unknown command {unknown}, try :help"),

        None => {}
    }

    Flow::Continue
}

fn load_file(ctx: &mut Context, file: &str) -> bool {
    let text = match std::fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            println!("% {file}: {e}");
            return false;
        }
    };

    match ctx.load(&text) {
        Ok(count) => {
            println!("% loaded {file} ({count} clauses)");
            true
        }
        Err(e) => {
            println!("% {file}: {e}");
            false
        }
    }
}
