//! Operator prompts on the terminal.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use msf_engine::{Choice, DecisionPoint, Oracle, OracleError};

/// Asks on stderr and reads answers from stdin on a background thread, so a
/// silent operator can be timed out.
pub struct ConsoleOracle {
    lines: Receiver<io::Result<String>>,
    timeout: Option<Duration>,
    /// A question timed out; whatever the operator typed for it is stale.
    expired: bool,
}

impl ConsoleOracle {
    /// `None` waits forever.
    pub fn spawn(timeout: Option<Duration>) -> Self {
        let (send, lines) = unbounded();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                if send.send(line).is_err() {
                    break;
                }
            }
        });
        Self::new(lines, timeout)
    }

    pub fn new(lines: Receiver<io::Result<String>>, timeout: Option<Duration>) -> Self {
        Self { lines, timeout, expired: false }
    }

    fn next_line(&mut self) -> Result<String, OracleError> {
        let line = match self.timeout {
            Some(timeout) => self.lines.recv_timeout(timeout).map_err(|err| match err {
                RecvTimeoutError::Timeout => {
                    self.expired = true;
                    OracleError::Timeout(timeout)
                }
                RecvTimeoutError::Disconnected => OracleError::InputClosed,
            })?,
            None => self.lines.recv().map_err(|_| OracleError::InputClosed)?,
        };
        line.map_err(|err| OracleError::Io(err.to_string()))
    }

    fn drop_stale_lines(&mut self) {
        if self.expired {
            let stale = self.lines.try_iter().count();
            if stale > 0 {
                log::debug!("dropped {} late answer(s)", stale);
            }
            self.expired = false;
        }
    }
}

impl Oracle for ConsoleOracle {
    fn decide(&mut self, point: &DecisionPoint) -> Result<Choice, OracleError> {
        self.drop_stale_lines();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "\n[{}] {}", point.head, point.prompt);
        for option in &point.options {
            let _ = writeln!(stderr, "  {}", option);
        }

        loop {
            let _ = write!(stderr, "> ");
            let _ = stderr.flush();

            let line = self.next_line()?;
            if let Some(choice) = point.choice_for_key(&line) {
                log::debug!("operator chose {:?} for {:?}", choice, point.kind);
                return Ok(choice);
            }
            let keys: Vec<String> = point.options.iter().map(|o| o.key().to_string()).collect();
            let _ = writeln!(stderr, "please type one of: {}", keys.join(", "));
        }
    }
}
