// wordcast-correct: Resolve every word of each input line.
//
// Prints one row per token followed by the corrected line:
//   R: token -> word    (stage, probability)
//   U: token            (unresolved word)
//   K: token            (not a word, kept as typed)
//   C: corrected line
//
// Usage:
//   wordcast-correct [-d DATA_PATH] [OPTIONS] [WORD...]
//
// Options:
//   -d, --data-path PATH   Directory containing the corpus CSV files
//   -a, --all              Also list the other candidates of the winning stage
//   -v, --verbose          Debug logging on stderr
//   -h, --help             Print help

use std::io::{self, BufRead, Write};

use wordcast_core::enums::TokenKind;
use wordcast_engine::PredictorOptions;
use wordcast_engine::handle::PredictorHandle;
use wordcast_engine::processor::join_corrections;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (data_path, args) = wordcast_cli::parse_data_path(&args);
    let (verbose, args) = wordcast_cli::parse_verbose(&args);

    if wordcast_cli::wants_help(&args) {
        println!("wordcast-correct: Resolve every word of each input line.");
        println!();
        println!("Usage: wordcast-correct [-d DATA_PATH] [OPTIONS] [WORD...]");
        println!();
        println!("If WORD arguments are given, they form one input line.");
        println!("Otherwise reads lines from stdin. Prints:");
        println!("  R: token -> word    (stage, probability)");
        println!("  U: token            (unresolved word)");
        println!("  K: token            (not a word)");
        println!("  C: corrected line");
        println!();
        println!("Options:");
        println!("  -d, --data-path PATH   Directory containing the corpus CSV files");
        println!("  -a, --all              Also list the other candidates");
        println!("  -v, --verbose          Debug logging on stderr");
        println!("  -h, --help             Print this help");
        return;
    }

    wordcast_cli::init_logging(verbose);

    let show_all = args.iter().any(|a| a == "-a" || a == "--all");
    let words: Vec<String> = args.iter().filter(|a| !a.starts_with('-')).cloned().collect();

    let handle = wordcast_cli::load_handle(data_path.as_deref(), PredictorOptions::default())
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
            correct_line(&handle, &line, show_all, &mut out);
        }
    } else {
        correct_line(&handle, &words.join(" "), show_all, &mut out);
    }
}

fn correct_line(handle: &PredictorHandle, line: &str, show_all: bool, out: &mut impl Write) {
    let corrections = handle.corrections(line);
    for correction in &corrections {
        let token = &correction.token.text;
        match &correction.resolution {
            Some(resolution) => {
                let _ = writeln!(
                    out,
                    "R: {token} -> {}    ({}, {:.6})",
                    resolution.word(),
                    resolution.stage.as_str(),
                    resolution.probability()
                );
                if show_all {
                    for candidate in resolution.candidates.iter().skip(1) {
                        let _ = writeln!(out, "   {} ({:.6})", candidate.word, candidate.score);
                    }
                }
            }
            None if correction.token.kind == TokenKind::Word => {
                let _ = writeln!(out, "U: {token}");
            }
            None => {
                let _ = writeln!(out, "K: {token}");
            }
        }
    }
    let _ = writeln!(out, "C: {}", join_corrections(&corrections).trim_end());
}
