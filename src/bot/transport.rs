use std::convert::Infallible;
use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use super::{Reply, Router};

/// Destination for outbound replies.
pub trait ReplySink {
    type Error: std::fmt::Display;

    fn deliver(&mut self, reply: Reply) -> Result<(), Self::Error>;
}

/// Collects replies in memory.
impl ReplySink for Vec<Reply> {
    type Error = Infallible;

    fn deliver(&mut self, reply: Reply) -> Result<(), Self::Error> {
        self.push(reply);
        Ok(())
    }
}

/// Writes replies as plain text, with the keyboard rendered as button rows.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReplySink for ConsoleSink<W> {
    type Error = io::Error;

    fn deliver(&mut self, reply: Reply) -> Result<(), Self::Error> {
        writeln!(self.out, "{}", reply.text)?;
        if let Some(keyboard) = &reply.keyboard {
            writeln!(self.out)?;
            for row in keyboard {
                let buttons: Vec<String> = row.iter().map(|b| format!("[{b}]")).collect();
                writeln!(self.out, "{}", buttons.join(" "))?;
            }
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Console chat loop: one message per input line until EOF.
///
/// Delivery failures are logged and the loop keeps reading.
pub fn run_console<R: BufRead, W: Write>(router: &Router, input: R, output: W) -> io::Result<()> {
    let mut sink = ConsoleSink::new(output);
    info!("console chat started");
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Err(e) = router.handle(&line, &mut sink) {
            warn!(error = %e, "failed to deliver reply");
        }
    }
    info!("console chat finished");
    Ok(())
}
