#[macro_use]
extern crate num_derive;
extern crate byteorder;

pub mod components;
pub mod errors;
pub mod replay;
pub mod ring_buffer;
pub mod trace;

#[cfg(feature = "python")]
mod python;

pub use ring_buffer::RingBuffer;
