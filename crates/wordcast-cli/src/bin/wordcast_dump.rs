// wordcast-dump: List a loaded corpus in order.
//
// Prints `key,count` lines: the lexicon alphabetically, or an n-gram index
// in ascending key order by walking its leaf chain.
//
// Usage:
//   wordcast-dump [-d DATA_PATH] [OPTIONS] unigrams|bigrams|trigrams
//
// Options:
//   -d, --data-path PATH   Directory containing the corpus CSV files
//   -s, --stats            Print sizes and tree heights instead of entries
//   -v, --verbose          Debug logging on stderr
//   -h, --help             Print help

use std::io::{self, Write};

use wordcast_core::enums::NgramOrder;
use wordcast_engine::PredictorOptions;
use wordcast_engine::handle::PredictorHandle;
use wordcast_engine::ngram::NgramIndex;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (data_path, args) = wordcast_cli::parse_data_path(&args);
    let (verbose, args) = wordcast_cli::parse_verbose(&args);

    if wordcast_cli::wants_help(&args) {
        println!("wordcast-dump: List a loaded corpus in order.");
        println!();
        println!("Usage: wordcast-dump [-d DATA_PATH] [OPTIONS] unigrams|bigrams|trigrams");
        println!();
        println!("Options:");
        println!("  -d, --data-path PATH   Directory containing the corpus CSV files");
        println!("  -s, --stats            Print sizes and tree heights instead of entries");
        println!("  -v, --verbose          Debug logging on stderr");
        println!("  -h, --help             Print this help");
        return;
    }

    wordcast_cli::init_logging(verbose);

    let stats_only = args.iter().any(|a| a == "-s" || a == "--stats");
    let target = args.iter().find(|a| !a.starts_with('-')).map(String::as_str);

    let handle = wordcast_cli::load_handle(data_path.as_deref(), PredictorOptions::default())
        .unwrap_or_else(|e| wordcast_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if stats_only {
        print_stats(&handle, &mut out);
        return;
    }

    match target {
        Some("unigrams") => {
            for (word, count) in handle.lexicon().words() {
                let _ = writeln!(out, "{word},{count}");
            }
        }
        Some("bigrams") => dump_index(handle.bigrams(), &mut out),
        Some("trigrams") => dump_index(handle.trigrams(), &mut out),
        Some(other) => wordcast_cli::fatal(&format!(
            "unknown corpus '{other}' (expected unigrams, bigrams or trigrams)"
        )),
        None => wordcast_cli::fatal("missing corpus name (see --help)"),
    }
}

fn dump_index(index: &NgramIndex, out: &mut impl Write) {
    for (key, count) in index.scan_all() {
        let _ = writeln!(out, "{key},{count}");
    }
}

fn print_stats(handle: &PredictorHandle, out: &mut impl Write) {
    let lexicon = handle.lexicon();
    let _ = writeln!(
        out,
        "unigrams: {} words, total count {}",
        lexicon.len(),
        lexicon.total_count()
    );
    let indexes = [
        ("bigrams", NgramOrder::Bigram, handle.bigrams()),
        ("trigrams", NgramOrder::Trigram, handle.trigrams()),
    ];
    for (name, order, index) in indexes {
        let _ = writeln!(
            out,
            "{name}: {} keys of {} words, total count {}, height {}",
            index.len(),
            order.n(),
            index.total_count(),
            index.height()
        );
    }
}
