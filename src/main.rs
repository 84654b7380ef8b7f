use anyhow::{bail, Context, Result};
use block_compactor::compact;
use block_compactor::util::{CompactionStats, Timer};

const USAGE: &str = "usage: block-compactor [-b|--block-size N] <HEX_BUFFER> [OFFSET|null ...]";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    block_size: usize,
    buffer: Vec<u8>,
    references: Vec<Option<usize>>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Compact(Args),
    Help,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let mut args = args.into_iter();
    let mut block_size = 1;
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-b" | "--block-size" => {
                let value = args.next().context("missing value for --block-size")?;
                block_size = value
                    .parse()
                    .with_context(|| format!("invalid block size: {value}"))?;
            }
            "-h" | "--help" => return Ok(Command::Help),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let buffer = match positional.next() {
        Some(hex) => parse_hex(&hex)?,
        None => bail!(USAGE),
    };
    let references = positional
        .map(|r| parse_reference(&r))
        .collect::<Result<Vec<_>>>()?;

    Ok(Command::Compact(Args {
        block_size,
        buffer,
        references,
    }))
}

/// Parses a hex string, ignoring whitespace and `_` separators.
fn parse_hex(hex: &str) -> Result<Vec<u8>> {
    let digits: Vec<char> = hex
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();
    if digits.len() % 2 != 0 {
        bail!("hex buffer has an odd number of digits ({})", digits.len());
    }
    digits
        .chunks(2)
        .map(|pair| {
            let byte: String = pair.iter().collect();
            u8::from_str_radix(&byte, 16).with_context(|| format!("invalid hex byte: {byte}"))
        })
        .collect()
}

fn parse_reference(reference: &str) -> Result<Option<usize>> {
    if reference.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    let offset = reference
        .parse()
        .with_context(|| format!("invalid reference offset: {reference}"))?;
    Ok(Some(offset))
}

fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn run(args: Args) -> Result<()> {
    let Args {
        block_size,
        mut buffer,
        mut references,
    } = args;

    // a zero-length buffer is accepted whatever the block size
    let (report, elapsed) = Timer::time(|| compact(&mut buffer, &mut references, block_size));
    let report = report.context("compaction rejected")?;
    log::info!("{:?} in {:?}", report, elapsed);

    let mut stats = CompactionStats::new();
    stats.record(&report, elapsed);
    stats.summary();

    println!("buffer:     {}", to_hex(&buffer));
    let references: Vec<String> = references
        .iter()
        .map(|r| r.map_or_else(|| "null".to_string(), |o| o.to_string()))
        .collect();
    println!("references: [{}]", references.join(", "));
    Ok(())
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = parse_args(std::env::args().skip(1)).and_then(|command| match command {
        Command::Compact(args) => run(args),
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
    });
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
