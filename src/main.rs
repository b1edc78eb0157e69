//! Command-line front end: answer the arguments once, or run a stdin REPL.

mod turn_report;

use cakap::{ChatEngine, EngineOptions, RuleSet, TurnError};
use std::io::{self, BufRead, IsTerminal, Write};
use turn_report::Palette;

const USAGE: &str = "\
cakap - bot obrolan berbasis aturan

USAGE:
    cakap [OPTIONS] [MESSAGE]...

With a MESSAGE the bot answers once and exits; without one it reads
messages from stdin, one per line.

OPTIONS:
    --rules <FILE>    load rule definitions from a JSON file
    --seed <N>        seed the engine RNG (reproducible runs)
    --json            print each turn as a JSON object
    --color           force ANSI colors on
    --no-color        force ANSI colors off
    -h, --help        print this help
    -V, --version     print the version

Set RUST_LOG=cakap=debug for a trace of match resolution.
";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cakap=warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut rules_path: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut messages: Vec<String> = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{USAGE}");
                return Ok(());
            }
            "-V" | "--version" => {
                println!("cakap {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--json" => json = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--rules" => {
                rules_path = Some(args.next().ok_or("--rules needs a file path")?);
            }
            "--seed" => {
                let value = args.next().ok_or("--seed needs a number")?;
                seed = Some(value.parse().map_err(|_| format!("invalid seed '{value}'"))?);
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option '{other}' (try --help)").into());
            }
            other => messages.push(other.to_string()),
        }
    }

    let rules = match rules_path {
        Some(path) => RuleSet::from_path(path)?,
        None => RuleSet::builtin(),
    };
    let mut engine = ChatEngine::new(rules, EngineOptions { seed, reference_time: None });
    let palette = Palette::new(color && !json);

    if !messages.is_empty() {
        return respond_once(&mut engine, &messages.join(" "), json, &palette);
    }
    repl(&mut engine, json, &palette)
}

fn respond_once(
    engine: &mut ChatEngine,
    message: &str,
    json: bool,
    palette: &Palette,
) -> Result<(), Box<dyn std::error::Error>> {
    match engine.respond(message) {
        Ok(turn) => {
            if json {
                println!("{}", serde_json::to_string(&turn)?);
            } else {
                turn_report::print_turn(&turn, palette);
            }
        }
        Err(TurnError::EmptyUtterance) => eprintln!("(pesan kosong diabaikan)"),
    }
    Ok(())
}

fn repl(
    engine: &mut ChatEngine,
    json: bool,
    palette: &Palette,
) -> Result<(), Box<dyn std::error::Error>> {
    let interactive = io::stdin().is_terminal();
    if interactive && !json {
        println!("cakap {} (Ctrl-D untuk keluar)", env!("CARGO_PKG_VERSION"));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        if interactive && !json {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        respond_once(engine, line.trim(), json, palette)?;
    }
    Ok(())
}
