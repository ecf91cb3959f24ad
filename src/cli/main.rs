/*!
A simple CLI interface to the library.

# Use

```sh
stoat_cli [--option(=value)]* [file.pl]*
```

Files are loaded in order, then an interactive REPL starts.

## Options

No configuration option is required.
Though, of note:

- `--goal=<text>` proves the goal once, prints every solution, and exits without a REPL.
- `--occurs_check=<bool>` toggles the occurs-check during unification.
- `--prelude=<bool>` toggles loading `member/2` and `append/3` at startup.

For full documentation of the supported options, see the source of [parse_args].
*/

use stoat_prolog::{config::Config, context::Context};

mod parse_args;
use parse_args::{parse_args, CliConfig};

mod repl;

/// Entrypoint to the CLI.
fn main() {
    let mut cli_options = CliConfig::default();
    let mut cfg = Config::default();

    let args: Vec<String> = std::env::args().collect();
    parse_args(&args, &mut cfg, &mut cli_options);

    let mut ctx: Context = Context::from_config(cfg);

    for file in &cli_options.files {
        let text = match std::fs::read_to_string(file) {
            Ok(text) => text,
            Err(e) => {
                println!("% {file}: {e}");
                std::process::exit(1);
            }
        };

        match ctx.load(&text) {
            Ok(count) => println!("% loaded {file} ({count} clauses)"),
            Err(e) => {
                println!("% {file}: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Some(goal) = cli_options.goal.take() {
        let answers = match ctx.query(&goal) {
            Ok(answers) => answers,
            Err(e) => {
                println!("error: {e}");
                std::process::exit(1);
            }
        };

        for answer in answers {
            match answer {
                Ok(solution) => println!("{solution}"),
                Err(e) => {
                    println!("error: {e}");
                    std::process::exit(2);
                }
            }
        }
        return;
    }

    repl::run(&mut ctx, cli_options.files.clone());
}
