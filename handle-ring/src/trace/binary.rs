use std::convert::TryFrom;
use std::io::Write;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use num_traits::{FromPrimitive, ToPrimitive};

use crate::errors::Error;
use crate::trace::{Op, OpCode, Trace};

// Layout, all little endian:
//   header  | magic [u8; 8] | version u32 | capacity u32 (0 = unknown) |
//   record  | op code u32   | operand i64 |
pub const MAGIC: &[u8; 8] = b"HRTRACE\0";
pub const VERSION: u32 = 1;
const HEADER_LEN: usize = 16;
const RECORD_LEN: usize = 12;

pub fn is_binary(bytes: &[u8]) -> bool {
    bytes.starts_with(MAGIC)
}

pub fn decode(bytes: &[u8]) -> Result<Trace, Error> {
    if !is_binary(bytes) {
        return Err(Error::InvalidTrace(String::from("Missing trace magic")));
    }
    if bytes.len() < HEADER_LEN {
        return Err(Error::InvalidTrace(String::from("Truncated trace header")));
    }

    let mut header = &bytes[MAGIC.len()..HEADER_LEN];
    let version = header.read_u32::<LittleEndian>()?;
    if version != VERSION {
        return Err(Error::InvalidTrace(format!(
            "Unsupported trace version {}",
            version
        )));
    }
    let capacity = header.read_u32::<LittleEndian>()?;

    let mut records = &bytes[HEADER_LEN..];
    let trailing = records.len() % RECORD_LEN;
    if trailing != 0 {
        return Err(Error::InvalidTrace(format!(
            "Trailing {} bytes after the last record",
            trailing
        )));
    }

    let mut ops = Vec::with_capacity(records.len() / RECORD_LEN);
    while !records.is_empty() {
        let code = records.read_u32::<LittleEndian>()?;
        let operand = records.read_i64::<LittleEndian>()?;

        let op_code: Option<OpCode> = FromPrimitive::from_u32(code);
        let op = match op_code.ok_or(Error::WrongEnumVariant)? {
            OpCode::Push => Op::Push(operand as u64),
            OpCode::Pop => Op::Pop,
            OpCode::Peek => Op::Peek(operand),
        };
        ops.push(op);
    }

    Ok(Trace {
        capacity: if capacity == 0 {
            None
        } else {
            Some(capacity as usize)
        },
        ops,
    })
}

pub fn write<W: Write>(writer: &mut W, trace: &Trace) -> Result<(), Error> {
    let capacity = match trace.capacity {
        None => 0,
        Some(c) => u32::try_from(c).map_err(|_| {
            Error::BadParam(format!("capacity {} does not fit a binary trace", c))
        })?,
    };

    writer.write_all(MAGIC)?;
    writer.write_u32::<LittleEndian>(VERSION)?;
    writer.write_u32::<LittleEndian>(capacity)?;

    for op in &trace.ops {
        let (op_code, operand) = match *op {
            Op::Push(x) => (OpCode::Push, x as i64),
            Op::Pop => (OpCode::Pop, 0),
            Op::Peek(x) => (OpCode::Peek, x),
        };
        let code = op_code.to_u32().ok_or(Error::WrongEnumVariant)?;
        writer.write_u32::<LittleEndian>(code)?;
        writer.write_i64::<LittleEndian>(operand)?;
    }
    Ok(())
}

pub fn encode(trace: &Trace) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + RECORD_LEN * trace.ops.len());
    write(&mut bytes, trace)?;
    Ok(bytes)
}
