use std::io;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    BadParam(String),
    #[error("Unable to allocate a ring of {0} slots.")]
    OutOfResource(usize),
    #[error("File {0} does not exist.")]
    FileNotAvailable(String),
    #[error("IO error.")]
    IOError(#[from] io::Error),
    #[error("Unknown op code in trace.")]
    WrongEnumVariant,
    #[error("{0}")]
    InvalidTrace(String),
    #[error("{0}")]
    InvalidDescriptor(String),
}
