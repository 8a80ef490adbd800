use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use fake_compiler::config::Config;
use fake_compiler::log::{Classification, LogSequence};
use fake_compiler::protocol;
use fake_compiler::session::{RunOutcome, Session};
use fake_compiler::{Language, Result};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fake_compiler=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let serve = args.iter().any(|a| a == "--serve" || a == "--protocol");
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);

    let result = Config::load(config_path.as_deref()).and_then(|config| {
        if serve {
            protocol::run_protocol_mode(config)
        } else {
            run_interactive_mode(config)
        }
    });

    if let Err(e) = result {
        eprintln!("fake-compiler: {}", e);
        process::exit(1);
    }
}

const HELP: &str = "\
Commands:
  run                 run the current source
  clear               clear the output
  lang <tag>          switch to python, java or html (discards edits)
  edit <line>...      replace the source, one argument per line
  load <path>         replace the source with a file's contents
  indent <offset>     insert the indent at a byte offset
  show                print the source
  highlight           print the highlighted markup
  help | quit";

fn print_log(log: &LogSequence) {
    for entry in log.entries() {
        let tag = match entry.classification {
            Classification::Info => "info",
            Classification::Success => " ok ",
            Classification::Error => "err ",
            Classification::Warning => "warn",
            Classification::Output => "    ",
        };
        println!("[{}] {}", tag, entry.text);
    }
}

fn run_interactive_mode(config: Config) -> Result<()> {
    let mut session = Session::with_memory_host(config);
    eprintln!(
        "fake-compiler ({}). Type 'help' for commands.",
        session.state().language.display_name()
    );

    let stdin = io::stdin();
    loop {
        eprint!("{}> ", session.state().language);
        io::stderr().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let Some(words) = shlex::split(input.trim()) else {
            eprintln!("unbalanced quotes");
            continue;
        };
        let Some((cmd, rest)) = words.split_first() else {
            continue;
        };

        match (cmd.as_str(), rest) {
            ("run" | "r", _) => match session.run()? {
                Some(RunOutcome::Log(log)) => print_log(&log),
                Some(RunOutcome::Surface(id)) => println!(
                    "rendered {} bytes into surface #{}",
                    session.state().source.len(),
                    id.0
                ),
                Some(RunOutcome::Cancelled) | None => println!("run cancelled"),
            },
            ("clear" | "c", _) => session.clear(),
            ("lang", [tag]) => match tag.parse::<Language>() {
                Ok(language) => session.switch_language(language),
                Err(e) => eprintln!("{}", e),
            },
            ("edit", lines) => session.edit(lines.join("\n")),
            ("load", [path]) => match fs::read_to_string(path) {
                Ok(text) => session.edit(text),
                Err(e) => eprintln!("cannot read {}: {}", path, e),
            },
            ("indent", [offset]) => match offset.parse::<usize>() {
                Ok(offset) => {
                    let cursor = session.insert_indent(offset, offset);
                    println!("cursor at {}", cursor);
                }
                Err(_) => eprintln!("invalid offset: {}", offset),
            },
            ("show", _) => {
                for (i, line) in session.state().source.lines().enumerate() {
                    println!("{:>4} | {}", i + 1, line);
                }
            }
            ("highlight", _) => println!("{}", session.highlight()),
            ("help" | "h", _) => eprintln!("{}", HELP),
            ("quit" | "q" | "exit", _) => break,
            _ => eprintln!("unknown command: {} (try 'help')", input.trim()),
        }
    }

    Ok(())
}
