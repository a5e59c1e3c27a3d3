//! Wayfarer CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use wayfarer_runtime::{Repl, Reply, RuntimeConfig, Session, demo, serialize};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    runtime: RuntimeConfig,
    files: Vec<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            flag @ "--as" => {
                i += 1;
                config.runtime = config.runtime.with_start_as(value(args, i, flag)?);
            }
            flag @ "--load" => {
                i += 1;
                config.runtime = config.runtime.with_snapshot_path(value(args, i, flag)?);
            }
            flag @ "--log" => {
                i += 1;
                config.runtime = config.runtime.with_log_filter(value(args, i, flag)?);
            }
            flag @ "--capacity" => {
                i += 1;
                let raw = value(args, i, flag)?;
                let capacity = raw
                    .parse()
                    .map_err(|_| format!("invalid --capacity value: {raw}"))?;
                config.runtime = config.runtime.with_inventory_capacity(capacity);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    if config.batch_mode {
        config.runtime = config.runtime.with_banner(false).with_prompt("");
    }
    Ok(config)
}

fn init_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(&args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("wayfarer {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let runtime = config.runtime;
    init_logging(&runtime.log_filter);

    let world = match &runtime.snapshot_path {
        Some(path) if path.exists() => serialize::load_from_file(path)?,
        _ => demo::build_world_with_capacity(runtime.inventory_capacity)?.world,
    };
    let mut repl = Repl::new()?
        .with_session(Session::with_world(world))
        .with_config(&runtime);

    if let Some(name) = &runtime.start_as {
        let reply = repl.eval(&format!(":as {name}"))?;
        print_reply(reply);
    }

    for file in &config.files {
        for line in repl.eval_file(file)? {
            println!("{line}");
        }
    }

    if config.batch_mode {
        return Ok(());
    }

    if !config.files.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(())
}

fn print_reply(reply: Reply) {
    if let Reply::Lines(lines) = reply {
        for line in lines {
            println!("{line}");
        }
    }
}

fn print_help() {
    println!(
        "\x1b[1mWayfarer\x1b[0m - Text world interaction core

\x1b[1mUSAGE:\x1b[0m
    wayfarer [OPTIONS] [SCRIPTS...]

\x1b[1mARGUMENTS:\x1b[0m
    [SCRIPTS...]    Files of commands to run before starting the REPL

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -b, --batch        Run scripts and exit (no REPL)
    --as NAME          Play as NAME from the start
    --load PATH        Load a world snapshot instead of the demo world
    --log FILTER       Log filter when RUST_LOG is unset (default: warn)
    --capacity N       Inventory capacity for demo characters

\x1b[1mEXAMPLES:\x1b[0m
    wayfarer                         Start the REPL on the demo world
    wayfarer --as alice              Start playing Alice
    wayfarer -b --as alice tour.txt  Run tour.txt as Alice and exit
    wayfarer --load keep.msgpack     Resume a saved world

\x1b[1mREPL COMMANDS:\x1b[0m
    :as NAME             Play as a character
    :connect NAME        Connect a character
    :disconnect NAME     Disconnect a character
    :save [PATH]         Save the world
    :load [PATH]         Load a saved world
    :help                List meta commands
    Ctrl+D               Exit REPL"
    );
}
