use std::fmt::Write;

use crate::errors::Error;
use crate::trace::{Op, Trace};

fn invalid(line_no: usize, msg: &str) -> Error {
    Error::InvalidTrace(format!("line {}: {}", line_no, msg))
}

/// Parse a text trace.
///
/// One op per line: `push N`, `pop`, `peek N` or `capacity N`. Everything after a
/// `#` is ignored, as are blank lines.
pub fn parse(source: &str) -> Result<Trace, Error> {
    let mut trace = Trace::default();

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        let mut words = line.split_whitespace();
        let keyword = match words.next() {
            Some(w) => w,
            None => continue,
        };
        let argument = words.next();
        if words.next().is_some() {
            return Err(invalid(line_no, "too many arguments"));
        }

        match (keyword, argument) {
            ("push", Some(x)) => {
                let value = x
                    .parse::<u64>()
                    .map_err(|_| invalid(line_no, "push takes an unsigned value"))?;
                trace.ops.push(Op::Push(value));
            }
            ("pop", None) => trace.ops.push(Op::Pop),
            ("peek", Some(x)) => {
                let offset = x
                    .parse::<i64>()
                    .map_err(|_| invalid(line_no, "peek takes an integer offset"))?;
                trace.ops.push(Op::Peek(offset));
            }
            ("capacity", Some(x)) => {
                if trace.capacity.is_some() {
                    return Err(invalid(line_no, "capacity given twice"));
                }
                let capacity = x
                    .parse::<usize>()
                    .map_err(|_| invalid(line_no, "capacity takes a slot count"))?;
                trace.capacity = Some(capacity);
            }
            ("push", None) | ("peek", None) | ("capacity", None) => {
                return Err(invalid(line_no, "missing argument"));
            }
            ("pop", Some(_)) => return Err(invalid(line_no, "pop takes no argument")),
            (other, _) => {
                return Err(invalid(line_no, &format!("unknown op `{}`", other)));
            }
        }
    }

    Ok(trace)
}

/// Render a trace in the format `parse` reads.
pub fn render(trace: &Trace) -> String {
    let mut out = String::new();
    if let Some(capacity) = trace.capacity {
        // writing into a String cannot fail
        let _ = writeln!(out, "capacity {}", capacity);
    }
    for op in &trace.ops {
        let _ = writeln!(out, "{}", op);
    }
    out
}
