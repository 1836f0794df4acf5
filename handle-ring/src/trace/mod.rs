pub mod binary;
pub mod text;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::Error;

/// A single recorded ring operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Push(u64),
    Pop,
    Peek(i64),
}

#[derive(FromPrimitive, ToPrimitive, Debug)]
pub(crate) enum OpCode {
    Push = 0x00000001,
    Pop = 0x00000002,
    Peek = 0x00000003,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Op::Push(x) => write!(f, "push {}", x),
            Op::Pop => write!(f, "pop"),
            Op::Peek(x) => write!(f, "peek {}", x),
        }
    }
}

/// A sequence of ring operations, optionally with the capacity it was recorded on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    pub capacity: Option<usize>,
    pub ops: Vec<Op>,
}

/// A trace loaded from disk.
pub struct TraceFile {
    pub path: PathBuf,
    pub trace: Trace,
}

impl TraceFile {
    /// Load a trace, telling the binary format from text by its magic bytes.
    ///
    /// If the file does not exist a FileNotAvailable error will be returned.
    pub fn open(filename: PathBuf) -> Result<Self, Error> {
        if !filename.exists() {
            let filename_string = filename.display().to_string();
            return Err(Error::FileNotAvailable(filename_string));
        }

        let trace = read_trace(&filename)?;
        log::info!(
            "Loaded {} ops from {}",
            trace.ops.len(),
            filename.display()
        );
        Ok(Self {
            path: filename,
            trace,
        })
    }
}

fn read_trace(filename: &Path) -> Result<Trace, Error> {
    let bytes = std::fs::read(filename)?;
    if binary::is_binary(&bytes) {
        binary::decode(&bytes)
    } else {
        let source = std::str::from_utf8(&bytes).map_err(|_| {
            Error::InvalidTrace(format!(
                "{} is neither a binary trace nor UTF-8 text",
                filename.display()
            ))
        })?;
        text::parse(source)
    }
}
