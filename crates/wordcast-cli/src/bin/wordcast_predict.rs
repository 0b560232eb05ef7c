// wordcast-predict: Suggest next words for partial sentences.
//
// Corrects each line, resolves its last two words and prints the ranked
// continuations with their full context:
//   S: full context    (count, source)
// or, when nothing can be predicted:
//   N: corrected line
//
// Usage:
//   wordcast-predict [-d DATA_PATH] [OPTIONS] [WORD...]
//
// Options:
//   -d, --data-path PATH     Directory containing the corpus CSV files
//   -n, --max-candidates N   Suggestions per tier (default: 3)
//   --word-boundary          Bigram keys must start with the whole word
//   -v, --verbose            Debug logging on stderr
//   -h, --help               Print help

use std::io::{self, BufRead, Write};

use wordcast_engine::handle::PredictorHandle;
use wordcast_engine::{BigramMatch, PredictorOptions};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (data_path, args) = wordcast_cli::parse_data_path(&args);
    let (verbose, args) = wordcast_cli::parse_verbose(&args);

    if wordcast_cli::wants_help(&args) {
        println!("wordcast-predict: Suggest next words for partial sentences.");
        println!();
        println!("Usage: wordcast-predict [-d DATA_PATH] [OPTIONS] [WORD...]");
        println!();
        println!("If WORD arguments are given, they form one input line.");
        println!("Otherwise reads lines from stdin. Prints:");
        println!("  S: full context    (count, source)");
        println!("  N: corrected line  (no prediction)");
        println!();
        println!("Options:");
        println!("  -d, --data-path PATH     Directory containing the corpus CSV files");
        println!("  -n, --max-candidates N   Suggestions per tier (default: 3)");
        println!("  --word-boundary          Bigram keys must start with the whole word");
        println!("  -v, --verbose            Debug logging on stderr");
        println!("  -h, --help               Print this help");
        return;
    }

    wordcast_cli::init_logging(verbose);

    let mut options = PredictorOptions::default();
    let mut words: Vec<String> = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "-n" || arg == "--max-candidates" {
            let Some(value) = args.get(i + 1) else {
                wordcast_cli::fatal("--max-candidates requires a value");
            };
            options.max_candidates = value
                .parse()
                .unwrap_or_else(|_| wordcast_cli::fatal("invalid number for --max-candidates"));
            skip_next = true;
        } else if arg == "--word-boundary" {
            options.bigram_match = BigramMatch::WordBoundary;
        } else if !arg.starts_with('-') {
            words.push(arg.clone());
        }
    }

    let handle = wordcast_cli::load_handle(data_path.as_deref(), options)
        .unwrap_or_else(|e| wordcast_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            predict_line(&handle, &line, &mut out);
        }
    } else {
        predict_line(&handle, &words.join(" "), &mut out);
    }
}

fn predict_line(handle: &PredictorHandle, line: &str, out: &mut impl Write) {
    let completion = handle.complete(line);
    let Some(source) = completion.source else {
        let _ = writeln!(out, "N: {}", completion.fallback);
        return;
    };
    let source = source.as_str();
    for suggestion in &completion.suggestions {
        let _ = writeln!(
            out,
            "S: {}    ({}, {source})",
            suggestion.full_context, suggestion.count
        );
    }
}
