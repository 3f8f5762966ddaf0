// Parallel Huffman file codec.
//
// Partitions an input file across a pool of worker threads so that
// codebook construction is the only serial phase: a concurrent
// frequency-counting reducer, a tree/codebook builder, a block-parallel
// bit-packing encoder with a block-offset index, and a block-parallel
// decoder that uses that index to decode independent segments in
// parallel. The whole input and output are materialized in memory; there
// is no streaming mode.

mod bitstream;
mod codebook;
mod container;
mod decoder;
mod encoder;
pub mod error;
mod histogram;
mod pool;
mod tree;

use std::fs;
use std::time::Instant;

pub use error::{Error, Result};

use codebook::build_codebook;
use container::Container;
use histogram::count_frequencies;
use pool::WorkPool;
use tree::build_tree;

/// Reads `in_path`, compresses it with `num_threads` workers, and writes
/// the container to `out_path`.
pub fn compress(in_path: &str, out_path: &str, num_threads: usize) -> Result<()> {
    let now = Instant::now();

    let pool = WorkPool::new(num_threads)?;
    let input = fs::read(in_path).map_err(|e| Error::io(in_path, e))?;

    let histogram = count_frequencies(&pool, &input);
    let root = build_tree(&histogram);
    let table = build_codebook(&root);
    let encoded = encoder::encode(&pool, &table, &input);

    let container = container::write(&table, &encoded.block_index, encoded.padding, &encoded.bytes);
    fs::write(out_path, container).map_err(|e| Error::io(out_path, e))?;

    eprintln!(
        "compressed {} -> {} with {} threads in {:.2?}",
        in_path,
        out_path,
        pool.num_threads(),
        now.elapsed()
    );
    Ok(())
}

/// Reverses `compress`: reads the container at `in_path` and writes the
/// reconstructed file to `out_path`.
pub fn decompress(in_path: &str, out_path: &str, num_threads: usize) -> Result<()> {
    let now = Instant::now();

    let pool = WorkPool::new(num_threads)?;
    let data = fs::read(in_path).map_err(|e| Error::io(in_path, e))?;

    let Container { decoding_table, padding, block_index, payload } = container::parse(&data)?;
    let output = decoder::decode(&pool, &decoding_table, &payload, &block_index, padding)?;

    fs::write(out_path, output).map_err(|e| Error::io(out_path, e))?;

    eprintln!(
        "decompressed {} -> {} with {} threads in {:.2?}",
        in_path,
        out_path,
        pool.num_threads(),
        now.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        let mut path = env::temp_dir();
        path.push(format!("huffpar-lib-test-{}-{}", std::process::id(), name));
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn compress_then_decompress_round_trips() {
        let input_path = temp_path("input");
        let archive_path = temp_path("archive");
        let output_path = temp_path("output");

        fs::write(&input_path, b"the quick brown fox jumps over the lazy dog").unwrap();

        compress(&input_path, &archive_path, 3).unwrap();
        decompress(&archive_path, &output_path, 2).unwrap();

        let original = fs::read(&input_path).unwrap();
        let roundtripped = fs::read(&output_path).unwrap();
        assert_eq!(original, roundtripped);

        let _ = fs::remove_file(&input_path);
        let _ = fs::remove_file(&archive_path);
        let _ = fs::remove_file(&output_path);
    }

    #[test]
    fn zero_threads_is_an_invalid_argument() {
        let err = compress("does-not-matter", "does-not-matter", 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn missing_input_file_is_an_io_error() {
        let err = compress("/no/such/path/for-huffpar-tests", "/tmp/huffpar-unused", 1).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
