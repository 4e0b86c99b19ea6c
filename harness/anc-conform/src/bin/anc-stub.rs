//! A scriptable stand-in for the `ancc` compiler, used by the runner's own tests.
//!
//! This binary is test tooling only. It is not part of the runner's user-facing surface.
//!
//! Invoked as `anc-stub run <case>`, it reads its behaviour from lines of the case file itself:
//!
//! ```text
//! # stub-exit: 1                  exit code, 0 when absent
//! # stub-stderr: error: boom      one line of standard error, repeatable
//! # stub-stdout: hello            one line of standard output, repeatable
//! # stub-sleep-ms: 500            sleep before doing anything else
//! # stub-touch: /tmp/marker       create this file after sleeping
//! # stub-linger-ms: 5000          leave a helper process holding stderr open this long
//! ```
//!
//! The helper is the stub itself, re-invoked as `anc-stub linger <ms>`.
//!
//! Misuse exits with code 2 and a usage message, like a real compiler driver would.

use std::collections::VecDeque;
use std::io::Write;
use std::process::{Command, ExitCode, Stdio};
use std::time::Duration;

const USAGE: &str = "usage: anc-stub run <case> | anc-stub linger <ms>";

#[derive(Default)]
struct Script {
    exit_code: u8,
    stderr: Vec<String>,
    stdout: Vec<String>,
    sleep: Option<Duration>,
    touch: Vec<String>,
    linger: Option<Duration>,
}

impl Script {
    fn parse(contents: &str) -> Result<Self, String> {
        let mut script = Script::default();
        for line in contents.lines() {
            let Some((key, value)) = line
                .strip_prefix("# stub-")
                .and_then(|rest| rest.split_once(':'))
            else {
                continue;
            };
            let value = value.trim();
            match key {
                "exit" => {
                    script.exit_code = value
                        .parse()
                        .map_err(|_| format!("invalid stub exit code '{value}'"))?
                }
                "stderr" => script.stderr.push(value.to_owned()),
                "stdout" => script.stdout.push(value.to_owned()),
                "sleep-ms" => {
                    let millis = value
                        .parse()
                        .map_err(|_| format!("invalid stub sleep '{value}'"))?;
                    script.sleep = Some(Duration::from_millis(millis));
                }
                "touch" => script.touch.push(value.to_owned()),
                "linger-ms" => {
                    let millis = value
                        .parse()
                        .map_err(|_| format!("invalid stub linger '{value}'"))?;
                    script.linger = Some(Duration::from_millis(millis));
                }
                _ => return Err(format!("unknown stub directive '{key}'")),
            }
        }
        Ok(script)
    }
}

fn main() -> ExitCode {
    // Collect the program arguments, and discard the program name.
    let mut args = std::env::args().collect::<VecDeque<_>>();
    args.pop_front();

    let command = args.pop_front();
    let operand = args.pop_front();
    let result = match (command.as_deref(), operand, args.is_empty()) {
        (Some("run"), Some(path), true) => run(&path),
        (Some("linger"), Some(millis), true) => linger(&millis),
        _ => Err(USAGE.to_owned()),
    };
    result.unwrap_or_else(|message| {
        eprintln!("anc-stub: {message}");
        ExitCode::from(2)
    })
}

fn linger(millis: &str) -> Result<ExitCode, String> {
    let millis = millis
        .parse()
        .map_err(|_| format!("invalid linger '{millis}'"))?;
    std::thread::sleep(Duration::from_millis(millis));
    Ok(ExitCode::SUCCESS)
}

fn run(path: &str) -> Result<ExitCode, String> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    let script = Script::parse(&contents)?;

    if let Some(duration) = script.sleep {
        std::thread::sleep(duration);
    }
    for marker in &script.touch {
        std::fs::write(marker, "").map_err(|e| format!("cannot touch {marker}: {e}"))?;
    }
    if let Some(duration) = script.linger {
        // The helper inherits our stderr and is deliberately not waited on.
        let exe = std::env::current_exe().map_err(|e| format!("cannot locate self: {e}"))?;
        Command::new(exe)
            .arg("linger")
            .arg(duration.as_millis().to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| format!("cannot spawn linger helper: {e}"))?;
    }
    let mut stdout = std::io::stdout().lock();
    for line in &script.stdout {
        let _ = writeln!(stdout, "{line}");
    }
    let mut stderr = std::io::stderr().lock();
    for line in &script.stderr {
        let _ = writeln!(stderr, "{line}");
    }
    Ok(ExitCode::from(script.exit_code))
}
