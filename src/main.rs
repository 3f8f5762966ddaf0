// Command line front end for the parallel Huffman codec.

use std::env;
use std::process;
use std::thread::available_parallelism;

fn default_num_threads() -> usize {
    available_parallelism().map(|n| n.get()).unwrap_or(1).saturating_sub(1).max(1)
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // positional arguments: command, input path, output path
    let mut positional: Vec<String> = vec![];
    let mut num_threads: Option<usize> = None;

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-t" {
            i += 1;
            let value = args.get(i).unwrap_or_else(|| {
                eprintln!("-t requires a thread count");
                process::exit(1);
            });
            num_threads = Some(value.parse().unwrap_or_else(|_| {
                eprintln!("-t expects an integer thread count");
                process::exit(1);
            }));
        } else {
            positional.push(arg.clone());
        }
        i += 1;
    }

    if positional.len() != 3 {
        println!("Usage: huffpar <c|d> <input> <output> [-t num_threads]");
        return;
    }
    let (command, input_path, output_path) = (&positional[0], &positional[1], &positional[2]);

    let num_threads = num_threads.unwrap_or_else(default_num_threads);
    let result = match command.as_str() {
        "d" => huffpar::decompress(input_path, output_path, num_threads),
        _ => huffpar::compress(input_path, output_path, num_threads),
    };

    if let Err(e) = result {
        eprintln!("huffpar: {}", e);
        process::exit(1);
    }
}
