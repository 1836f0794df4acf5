use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use log::LevelFilter;

use handle_ring::components::PriorityItem;
use handle_ring::replay::{replay, ReplayParams};
use handle_ring::trace::{binary, text, TraceFile};

fn init_logger(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

fn run_replay(args: &ArgMatches) -> Result<()> {
    let filename = PathBuf::from(args.value_of("TRACE").context("missing trace path")?);
    let capacity = args
        .value_of("capacity")
        .map(str::parse::<usize>)
        .transpose()
        .context("--capacity must be a slot count")?;
    let params = ReplayParams {
        capacity,
        drain: args.is_present("drain"),
    };

    let trace_file = TraceFile::open(filename.clone())
        .with_context(|| format!("could not load trace {}", filename.display()))?;

    let start = Instant::now();
    let result = replay(&trace_file.trace, &params)?;
    log::info!("replay took {:?}", start.elapsed());

    for (idx, outcome) in result.outcomes.iter().enumerate() {
        println!("{:>6}  {}", idx, outcome);
    }
    println!(
        "{} ops on {} slots, {} evictions",
        result.outcomes.len(),
        result.capacity,
        result.evictions
    );
    if params.drain {
        println!("remaining: {:?}", result.remaining);
    }
    Ok(())
}

fn run_encode(args: &ArgMatches) -> Result<()> {
    let input = PathBuf::from(args.value_of("INPUT").context("missing input path")?);
    let output = PathBuf::from(args.value_of("OUTPUT").context("missing output path")?);

    let trace_file = TraceFile::open(input.clone())
        .with_context(|| format!("could not load trace {}", input.display()))?;

    let file = fs::File::create(&output)
        .with_context(|| format!("could not create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    if args.is_present("text") {
        writer.write_all(text::render(&trace_file.trace).as_bytes())?;
    } else {
        binary::write(&mut writer, &trace_file.trace)?;
    }
    writer.flush()?;

    log::info!(
        "Wrote {} ops to {}",
        trace_file.trace.ops.len(),
        output.display()
    );
    Ok(())
}

fn run_rank(args: &ArgMatches) -> Result<()> {
    let mut items = args
        .values_of("ITEM")
        .context("no components given")?
        .map(|item| {
            item.parse::<PriorityItem>()
                .with_context(|| format!("could not parse component `{}`", item))
        })
        .collect::<Result<Vec<_>>>()?;

    items.sort();
    for item in &items {
        println!("{}  (release {})", item, item.component.release);
    }
    Ok(())
}

pub fn main() -> Result<()> {
    let matches = App::new("hring")
        .version(crate_version!())
        .about("Replay and inspect fixed capacity handle rings")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more, repeat for debug output"),
        )
        .subcommand(
            SubCommand::with_name("replay")
                .about("Run a trace against a ring and print what every op returned")
                .arg(Arg::with_name("TRACE").required(true).index(1))
                .arg(
                    Arg::with_name("capacity")
                        .short("c")
                        .long("capacity")
                        .takes_value(true)
                        .help("Ring capacity in slots, overrides the trace"),
                )
                .arg(
                    Arg::with_name("drain")
                        .long("drain")
                        .help("Pop everything left once the trace ends"),
                ),
        )
        .subcommand(
            SubCommand::with_name("encode")
                .about("Convert a trace to the binary format")
                .arg(Arg::with_name("INPUT").required(true).index(1))
                .arg(Arg::with_name("OUTPUT").required(true).index(2))
                .arg(
                    Arg::with_name("text")
                        .long("text")
                        .help("Write the text format instead"),
                ),
        )
        .subcommand(
            SubCommand::with_name("rank")
                .about("Sort priority:type.name.major.minor[.release] items, preferred first")
                .arg(
                    Arg::with_name("ITEM")
                        .required(true)
                        .multiple(true)
                        .index(1),
                ),
        )
        .get_matches();

    init_logger(matches.occurrences_of("verbose"));

    match matches.subcommand() {
        ("replay", Some(args)) => run_replay(args),
        ("encode", Some(args)) => run_encode(args),
        ("rank", Some(args)) => run_rank(args),
        _ => unreachable!("clap enforces a subcommand"),
    }
}
