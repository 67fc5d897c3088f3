//! Line-driven session loop used by the `konbini-shell` binary.
//!
//! Each input line is one [`Message`] in its text form (plus `logout`).
//! After every line the shell's status line is written to `out`.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::app::{Flow, Shell};
use crate::message::Message;

/// Feed `input` to `shell` until EOF or a quit. Returns how the session ended.
pub fn run_session<R, W>(shell: &mut Shell, input: R, mut out: W) -> std::io::Result<Flow>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", shell.status_line())?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let flow = step(shell, &line);
        writeln!(out, "{}", shell.status_line())?;
        if flow == Flow::Quit {
            out.flush()?;
            return Ok(Flow::Quit);
        }
    }
    out.flush()?;
    Ok(Flow::Continue)
}

fn step(shell: &mut Shell, line: &str) -> Flow {
    if line.trim() == "logout" {
        return match shell.logout() {
            Ok(cmd) => shell.drain(cmd),
            Err(err) => {
                warn!(error = %err, "logout failed");
                Flow::Continue
            }
        };
    }
    match Message::parse(line) {
        Ok(msg) => {
            info!(message = ?msg, "dispatch");
            let cmd = shell.dispatch(msg);
            shell.drain(cmd)
        }
        Err(err) => {
            warn!(line, error = %err, "unparsed input");
            Flow::Continue
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::io::Cursor;

    use konbini_router::Params;

    use super::*;
    use crate::screens;

    fn shell() -> Shell {
        let mut shell = Shell::new();
        screens::register_all(&mut shell).unwrap();
        shell.start(screens::HOME, Params::new()).unwrap();
        shell
    }

    fn run(input: &str) -> (Flow, Vec<String>, Shell) {
        let mut shell = shell();
        let mut out = Vec::new();
        let flow = run_session(&mut shell, Cursor::new(input), &mut out).unwrap();
        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect();
        (flow, lines, shell)
    }

    #[test]
    fn prints_a_status_line_per_message() {
        let (flow, lines, _) = run("select 2\n\nback\n");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("| [home]"), "{}", lines[0]);
        assert!(lines[1].starts_with("Bentos |"), "{}", lines[1]);
        assert!(lines[2].ends_with("| [home] -> bentos"), "{}", lines[2]);
    }

    #[test]
    fn quit_ends_the_session_early() {
        let (flow, lines, shell) = run("quit\nselect 1\n");
        assert_eq!(flow, Flow::Quit);
        assert_eq!(lines.len(), 2);
        assert_eq!(shell.current_route(), Some("home"));
    }

    #[test]
    fn bad_lines_are_skipped() {
        let (flow, lines, shell) = run("dance\nselect x\n");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(lines.len(), 3);
        assert_eq!(shell.history_string(), "[home]");
    }

    #[test]
    fn logout_line_resets_history() {
        let (_, lines, shell) = run("select 2\nselect 0\nlogout\n");
        assert_eq!(shell.history_string(), "[home]");
        assert!(lines[3].ends_with("! signed out"), "{}", lines[3]);
    }
}
