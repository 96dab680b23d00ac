use std::convert::TryFrom;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, trace};

pub mod params;
pub mod volume;

pub use params::{Dimension, SessionParameters};
pub use volume::ZeroVolume;

#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("input ended before all parameters were read")]
    UnexpectedEof,
    #[error("expected an integer, found byte {byte:#04x}")]
    Malformed { byte: u8 },
    #[error("integer {token} does not fit in 32 bits")]
    OutOfRange { token: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingQueries,
    Finalizing,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Total queries answered so far.
    Answered(usize),
    /// A query was answered but no request line followed it.
    InputExhausted,
    Finalized { rows: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub answered: usize,
    pub input_exhausted: bool,
    pub rows: usize,
}

pub struct StubResponder<R, W> {
    params: SessionParameters,
    input: R,
    output: W,
    phase: Phase,
    answered: usize,
    input_exhausted: bool,
    discard: Vec<u8>,
}

impl<R: BufRead, W: Write> StubResponder<R, W> {
    pub fn new(params: SessionParameters, input: R, output: W) -> Self {
        StubResponder {
            params,
            input,
            output,
            phase: Phase::AwaitingQueries,
            answered: 0,
            input_exhausted: false,
            discard: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    fn query_limit(&self) -> usize {
        usize::try_from(self.params.query_count).unwrap_or(0)
    }

    fn answer(&mut self) -> Result<()> {
        self.output
            .write_all(self.params.dimension.zero_tuple().as_bytes())?;
        self.output.flush()?;
        self.output.write_all(b"\n")?;
        self.output.flush()?;
        Ok(())
    }

    /// Returns true if a request line was there to discard.
    fn discard_request(&mut self) -> Result<bool> {
        self.discard.clear();
        let read = self.input.read_until(b'\n', &mut self.discard)?;
        Ok(read > 0)
    }

    /// Advances the machine by one transition. `Ok(None)` means it is done.
    pub fn step(&mut self) -> Result<Option<Event>> {
        use Phase::*;
        match self.phase {
            AwaitingQueries if self.answered < self.query_limit() => {
                self.answer()?;
                self.answered += 1;
                let answered = self.answered;
                trace!(answered, "answered query");

                if self.discard_request()? {
                    Ok(Some(Event::Answered(answered)))
                } else {
                    debug!(answered, "input exhausted, finalizing early");
                    self.input_exhausted = true;
                    self.phase = Finalizing;
                    Ok(Some(Event::InputExhausted))
                }
            }
            AwaitingQueries => {
                self.phase = Finalizing;
                self.step()
            }
            Finalizing => {
                let volume = ZeroVolume::new(self.params.dimension, self.params.size);
                let rows = volume.write_to(&mut self.output)?;
                debug!(rows, extent = volume.extent, "wrote zero volume");
                self.phase = Done;
                Ok(Some(Event::Finalized { rows }))
            }
            Done => Ok(None),
        }
    }

    pub fn run(mut self) -> Result<Summary> {
        let mut rows = 0;
        while let Some(event) = self.step()? {
            if let Event::Finalized { rows: written } = event {
                rows = written;
            }
        }

        Ok(Summary {
            answered: self.answered,
            input_exhausted: self.input_exhausted,
            rows,
        })
    }
}

/// Reads the session parameters from `input` and plays the whole session.
///
/// Unreadable parameters end the session quietly with `Ok(None)` and no
/// output; only I/O failures are reported as errors.
pub fn respond(mut input: impl BufRead, output: impl Write) -> Result<Option<Summary>> {
    let params = match SessionParameters::read(&mut input) {
        Ok(params) => params,
        Err(Error::Io(e)) => return Err(Error::Io(e)),
        Err(e) => {
            debug!(reason = %e, "no session parameters, nothing to do");
            return Ok(None);
        }
    };
    debug!(?params, "session parameters");

    StubResponder::new(params, input, output).run().map(Some)
}
