use stoat_prolog::config::Config;

/// Options of the CLI itself, as opposed to the engine configuration.
#[derive(Default)]
pub struct CliConfig {
    /// Source files to load before the REPL starts, in order.
    pub files: Vec<String>,

    /// A goal to run once instead of starting the REPL.
    pub goal: Option<String>,
}

/// Parse CLI arguments to a [Config] struct or a [CliConfig] struct.
///
/// If an unrecognised argument or invalid option is found a message is sent and the process is terminated.
pub fn parse_args(args: &[String], cfg: &mut Config, cli_options: &mut CliConfig) {
    'arg_examination: for arg in args.iter().skip(1) {
        if !arg.starts_with("--") {
            cli_options.files.push(arg.clone());
            continue 'arg_examination;
        }

        let mut split = arg.splitn(2, '=');
        match split.next() {
            Some("--goal") => {
                if let Some(request) = split.next() {
                    cli_options.goal = Some(request.to_string());
                    continue 'arg_examination;
                }

                println!("goal requires a value");
                std::process::exit(1);
            }

            Some("--occurs_check") => {
                let (min, max) = cfg.occurs_check.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<bool>() {
                        if min <= value && value <= max {
                            println!("% occurs_check set to: {value}");
                            cfg.occurs_check.value = value;
                            continue 'arg_examination;
                        }
                    }
                }

                println!("occurs_check requires a value between {min} and {max}");
                std::process::exit(1);
            }

            Some("--prelude") => {
                let (min, max) = cfg.prelude.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<bool>() {
                        if min <= value && value <= max {
                            println!("% prelude set to: {value}");
                            cfg.prelude.value = value;
                            continue 'arg_examination;
                        }
                    }
                }

                println!("prelude requires a value between {min} and {max}");
                std::process::exit(1);
            }

            Some(_) | None => {
                println!("Unable to parse argument: {arg:?}");
                std::process::exit(1);
            }
        }
    }
}
