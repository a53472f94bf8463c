//! Demo suite driver for the engine.
//!
//! Runs a small built-in suite (a math group, an edge-case group with an
//! expected failure and a skip, and a root cleanup hook) and exits with
//! the concluded status.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use harness::Runner;
use harness::cleanup::CleanupScope;
use harness::event::EventSink;
use harness::report::{JsonReporter, TextReporter};
use harness::{exit_codes, logging};

#[derive(Parser)]
#[command(name = "harness", version, about = "Run the built-in demo suite")]
struct Cli {
    /// Output format for suite events.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let outcome = match cli.format {
        Format::Text => run_demo(TextReporter::stdout()),
        Format::Json => run_demo(JsonReporter::stdout()),
    };
    match outcome {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::USAGE);
        }
    }
}

fn run_demo<S: EventSink>(sink: S) -> Result<i32> {
    let mut runner = Runner::new(sink);
    runner.on_cleanup(
        |test| tracing::debug!(test = %test.name, status = %test.status, "cleaning up"),
        CleanupScope::Inherited,
    )?;

    runner.open_group("math operations")?;
    runner.run_test("addition works", false, |t| t.check(2 + 2 == 4))?;
    runner.run_test("subtraction works", false, |t| {
        let result = 10 - 3;
        t.check(result == 7);
        t.check(result != 6)
    })?;
    runner.close_group()?;

    runner.open_group("edge cases")?;
    runner.run_test("failure is expected", true, |t| {
        let x = 5;
        t.check(x == 10)
    })?;
    runner.skip_test("skipped test")?;
    runner.close_group()?;

    let conclusion = runner.conclude()?;
    Ok(conclusion.exit_code())
}
