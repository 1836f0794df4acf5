use std::convert::TryFrom;
use std::fmt;

use crate::errors::Error;
use crate::ring_buffer::RingBuffer;
use crate::trace::{Op, Trace};

/// Parameters for the replay algorithm
///
/// # Parameters
///    - capacity: Ring capacity in slots. Overrides the capacity stored in the trace.
///    - drain: Pop whatever is left in the ring once the trace is exhausted.
#[derive(Debug, Copy, Clone, Default)]
pub struct ReplayParams {
    pub capacity: Option<usize>,
    pub drain: bool,
}

/// What a single op returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pushed { value: u64, evicted: Option<u64> },
    Popped(Option<u64>),
    Peeked { offset: i64, value: Option<u64> },
}

/// Result from the replay algorithm
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub capacity: usize,
    pub outcomes: Vec<Outcome>,
    pub evictions: usize,
    /// Live entries left after the last op, oldest first. Only filled when draining.
    pub remaining: Vec<u64>,
}

fn show(value: &Option<u64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::from("-"),
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Pushed { value, evicted } => {
                write!(f, "push {} -> {}", value, show(evicted))
            }
            Outcome::Popped(x) => write!(f, "pop -> {}", show(x)),
            Outcome::Peeked { offset, value } => {
                write!(f, "peek {} -> {}", offset, show(value))
            }
        }
    }
}

struct Replay<'a> {
    ring: RingBuffer<u64>,
    ops: &'a [Op],
    params: ReplayParams,
}

impl<'a> Replay<'a> {
    fn compute(mut self) -> ReplayResult {
        let mut outcomes = Vec::with_capacity(self.ops.len());
        let mut evictions = 0;

        for (idx, op) in self.ops.iter().enumerate() {
            let outcome = match *op {
                Op::Push(value) => {
                    let evicted = self.ring.push(value);
                    if let Some(old) = evicted {
                        evictions += 1;
                        log::debug!("op {}: push {} evicted {}", idx, value, old);
                    }
                    Outcome::Pushed { value, evicted }
                }
                Op::Pop => Outcome::Popped(self.ring.pop()),
                Op::Peek(offset) => {
                    // offsets beyond isize never name a slot
                    let value = match isize::try_from(offset) {
                        Ok(offset) => self.ring.peek(offset).copied(),
                        Err(_) if offset < 0 => self.ring.peek(-1).copied(),
                        Err(_) => None,
                    };
                    Outcome::Peeked { offset, value }
                }
            };
            outcomes.push(outcome);
        }

        let remaining = if self.params.drain {
            self.ring.drain().collect()
        } else {
            vec![]
        };

        ReplayResult {
            capacity: self.ring.capacity(),
            outcomes,
            evictions,
            remaining,
        }
    }
}

/// Run every op of `trace` against a fresh `RingBuffer<u64>`.
///
/// The ring capacity comes from `params`, falling back to the one recorded in the
/// trace. A trace with neither is rejected with `BadParam`.
pub fn replay(trace: &Trace, params: &ReplayParams) -> Result<ReplayResult, Error> {
    let capacity = params.capacity.or(trace.capacity).ok_or_else(|| {
        Error::BadParam(String::from(
            "no ring capacity given and none recorded in the trace",
        ))
    })?;

    log::info!(
        "Replaying {} ops on a ring of {} slots",
        trace.ops.len(),
        capacity
    );
    let replay = Replay {
        ring: RingBuffer::init(capacity)?,
        ops: &trace.ops,
        params: *params,
    };
    Ok(replay.compute())
}
