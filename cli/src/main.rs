use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use clap::Parser;
use flatjson::ParseOptions;

#[derive(Parser, Debug)]
#[command(name = "flatjson", version, about = "JSON checker and pretty-printer")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Validate only; print nothing on success.
    #[arg(short, long)]
    check: bool,

    /// Print compact output instead of pretty-printed.
    #[arg(long)]
    compact: bool,

    /// Object key count above which keys are sorted for fast lookup.
    #[arg(long, value_name = "count", default_value_t = flatjson::DEFAULT_KEY_SORT_THRESHOLD)]
    sort_threshold: usize,

    /// Keep object keys in document order (disables sorted lookup).
    #[arg(long)]
    no_sort_keys: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let bytes = read_input(args.input.as_deref())
        .map_err(|err| format!("cannot read input: {err}"))?;

    let threshold = if args.no_sort_keys {
        None
    } else {
        Some(args.sort_threshold)
    };
    let options = ParseOptions::new().with_key_sort_threshold(threshold);
    let doc = flatjson::parse_with_options(bytes, &options).map_err(|err| err.to_string())?;

    if args.check {
        return Ok(());
    }

    let value = doc.to_json_value();
    let rendered = if args.compact {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    }
    .map_err(|err| format!("cannot render output: {err}"))?;
    println!("{rendered}");
    Ok(())
}

fn read_input(path: Option<&str>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) if path != "-" => fs::read(path),
        _ => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}
