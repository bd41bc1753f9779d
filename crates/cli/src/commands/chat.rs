//! The interactive storefront session.
//!
//! The loop is written over generic `BufRead`/`Write` so integration tests
//! drive whole conversations through in-memory buffers; `run` wires it to
//! stdin/stdout. One line in, one `Agent:`-prefixed line out, until `quit`
//! or end of input.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Result;
use rand::Rng;
use tracing::Level;

use shopmate_agent::{AdminTurn, Agent, Turn};
use shopmate_core::{AppConfig, LoadOptions, LogFormat};

pub fn run() -> ExitCode {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("configuration error: {error}");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);

    let mut agent = Agent::new(&config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    match run_session(&mut agent, &mut stdin.lock(), &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("session error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &AppConfig) {
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

/// Drive one full session over any line source and sink. The shell owns the
/// read/exit loop: `quit` (case-insensitive) or end of input terminates; the
/// agent owns everything else.
pub fn run_session<G, R, W>(agent: &mut Agent<G>, input: &mut R, output: &mut W) -> Result<()>
where
    G: Rng,
    R: BufRead,
    W: Write,
{
    writeln!(output, "Welcome to Shopmate. Type 'quit' to exit.")?;
    loop {
        write!(output, "You: ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            writeln!(output, "End of input reached. Exiting.")?;
            return Ok(());
        };
        let query = line.trim();
        if query.eq_ignore_ascii_case("quit") {
            return Ok(());
        }

        match agent.handle(query) {
            Turn::Reply(response) => writeln!(output, "Agent: {response}")?,
            Turn::Dashboard => {
                run_dashboard(agent, input, output)?;
                let response = agent.close_dashboard(query);
                writeln!(output, "Agent: {response}")?;
            }
        }
    }
}

/// Nested blocking admin sub-session. Prints command output directly and
/// returns control only on `exit` or end of input.
fn run_dashboard<G, R, W>(agent: &mut Agent<G>, input: &mut R, output: &mut W) -> Result<()>
where
    G: Rng,
    R: BufRead,
    W: Write,
{
    writeln!(output, "Entering Admin Dashboard. Type 'exit' to leave.")?;
    loop {
        write!(output, "Admin: ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            writeln!(output, "End of input in dashboard. Exiting.")?;
            return Ok(());
        };
        match agent.handle_admin(line.trim()) {
            AdminTurn::Exit => return Ok(()),
            AdminTurn::Output(text) => writeln!(output, "{text}")?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    let bytes = input.read_line(&mut line)?;
    Ok((bytes > 0).then_some(line))
}
