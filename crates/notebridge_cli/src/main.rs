//! CLI smoke entry point.
//!
//! # Responsibility
//! - Replay intent deliveries from stdin against an in-process host.
//! - Print each result envelope and the final note list as JSON lines.
//!
//! Input format: one delivery per line, `<IntentName> <context JSON>`.
//! Blank lines and lines starting with `#` are skipped.

use notebridge_core::{
    init_logging_with, session_bridge, InteropHost, LocalHost, LogConfig, SessionBridge,
};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match LogConfig::from_env() {
        Ok(Some(config)) => {
            if let Err(err) = init_logging_with(&config) {
                eprintln!("notebridge_cli: logging disabled: {err}");
            }
        }
        Ok(None) => {}
        Err(err) => eprintln!("notebridge_cli: logging disabled: {err}"),
    }

    let mut bridge = session_bridge();
    let mut host = LocalHost::connected();
    if !bridge.initialize(Some(&mut host as &mut dyn InteropHost)) {
        eprintln!("notebridge_cli: interop bridge failed to register intents");
        return ExitCode::FAILURE;
    }

    match replay(io::stdin().lock(), io::stdout().lock(), &mut bridge) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("notebridge_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn replay(input: impl BufRead, mut output: impl Write, bridge: &mut SessionBridge) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (intent, raw_context) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        let result = bridge.dispatch_raw(intent, raw_context.trim());
        writeln!(output, "{}", result.to_value())?;
    }

    let notes = serde_json::to_string(bridge.notes()).map_err(io::Error::other)?;
    writeln!(output, "{notes}")?;
    output.flush()
}
