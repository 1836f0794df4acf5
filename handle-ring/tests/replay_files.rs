use std::fs;
use std::path::PathBuf;

use handle_ring::errors::Error;
use handle_ring::replay::{replay, Outcome, ReplayParams};
use handle_ring::trace::{binary, Op, Trace, TraceFile};

const EVICTION_TRACE: &str = "\
capacity 3
push 10
push 11
push 12
push 13   # evicts 10
peek 0
peek -1
pop
pop
";

#[test]
fn text_and_binary_traces_replay_identically() {
    let dir = tempfile::tempdir().unwrap();
    let text_path = dir.path().join("eviction.txt");
    let binary_path = dir.path().join("eviction.hrt");
    fs::write(&text_path, EVICTION_TRACE).unwrap();

    let from_text = TraceFile::open(text_path).unwrap();
    fs::write(&binary_path, binary::encode(&from_text.trace).unwrap()).unwrap();
    let from_binary = TraceFile::open(binary_path).unwrap();
    assert_eq!(from_text.trace, from_binary.trace);

    let params = ReplayParams {
        capacity: None,
        drain: true,
    };
    let a = replay(&from_text.trace, &params).unwrap();
    let b = replay(&from_binary.trace, &params).unwrap();
    assert_eq!(a.outcomes, b.outcomes);

    assert_eq!(a.evictions, 1);
    assert_eq!(
        &a.outcomes[3..],
        &[
            Outcome::Pushed {
                value: 13,
                evicted: Some(10)
            },
            Outcome::Peeked {
                offset: 0,
                value: Some(11)
            },
            Outcome::Peeked {
                offset: -1,
                value: Some(13)
            },
            Outcome::Popped(Some(11)),
            Outcome::Popped(Some(12)),
        ]
    );
    assert_eq!(a.remaining, vec![13]);
}

#[test]
fn missing_trace_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing: PathBuf = dir.path().join("nope.txt");
    assert!(matches!(
        TraceFile::open(missing),
        Err(Error::FileNotAvailable(_))
    ));
}

#[test]
fn garbage_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.bin");
    fs::write(&path, [0xFFu8, 0xFE, 0x00, 0x81]).unwrap();
    assert!(matches!(
        TraceFile::open(path),
        Err(Error::InvalidTrace(_))
    ));
}

#[test]
fn long_trace_keeps_only_the_newest_entries() {
    let trace = Trace {
        capacity: Some(4),
        ops: (0..100).map(Op::Push).collect(),
    };
    let params = ReplayParams {
        capacity: None,
        drain: true,
    };
    let result = replay(&trace, &params).unwrap();
    assert_eq!(result.evictions, 96);
    assert_eq!(result.remaining, vec![96, 97, 98, 99]);
}
