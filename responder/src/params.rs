use crate::{Error, Result};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::io::BufRead;
use std::str::FromStr;

#[derive(FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Line = 1,
    Grid = 2,
    Cube = 3,
}

impl From<i32> for Dimension {
    /// Anything that isn't 1 or 2 is answered as a cube.
    fn from(raw: i32) -> Self {
        Dimension::from_i32(raw).unwrap_or(Dimension::Cube)
    }
}

impl Dimension {
    pub fn zero_tuple(&self) -> &'static str {
        use Dimension::*;
        match self {
            Line => "0",
            Grid => "0,0",
            Cube => "0,0,0",
        }
    }

    /// Number of axes, and of zeros in the tuple.
    pub fn arity(&self) -> usize {
        use Dimension::*;
        match self {
            Line => 1,
            Grid => 2,
            Cube => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionParameters {
    pub dimension: Dimension,
    pub size: i32,
    pub query_count: i32,
}

impl SessionParameters {
    /// Reads `d n q`. The reader is left right after the last digit of `q`,
    /// so whatever remains on that line is still unread.
    pub fn read(reader: &mut impl BufRead) -> Result<SessionParameters> {
        let dimension = read_int(reader)?;
        let size = read_int(reader)?;
        let query_count = read_int(reader)?;

        Ok(SessionParameters {
            dimension: dimension.into(),
            size,
            query_count,
        })
    }
}

fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn peek(reader: &mut impl BufRead) -> Result<Option<u8>> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => break Ok(buf.first().copied()),
            Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => break Err(e.into()),
        }
    }
}

fn read_int(reader: &mut impl BufRead) -> Result<i32> {
    while let Some(byte) = peek(reader)? {
        if !is_space(byte) {
            break;
        }
        reader.consume(1);
    }

    let mut token = String::new();
    if let Some(sign @ b'+') | Some(sign @ b'-') = peek(reader)? {
        token.push(sign as char);
        reader.consume(1);
    }

    while let Some(byte) = peek(reader)? {
        if !byte.is_ascii_digit() {
            break;
        }
        token.push(byte as char);
        reader.consume(1);
    }

    if !token.bytes().any(|b| b.is_ascii_digit()) {
        return match peek(reader)? {
            None => Err(Error::UnexpectedEof),
            Some(byte) => Err(Error::Malformed { byte }),
        };
    }

    i32::from_str(&token).map_err(|_| Error::OutOfRange { token })
}
