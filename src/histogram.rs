// Concurrent frequency-counting reducer (C2): a byte histogram over the
// input, computed by mapping fixed-size blocks in parallel and folding the
// per-block histograms on the coordinating thread.

use crate::pool::WorkPool;

pub const TABLE_SIZE: usize = 256;
pub const BLOCK_SIZE: usize = 500;

pub type Histogram = [u64; TABLE_SIZE];

pub fn count_frequencies(pool: &WorkPool, input: &[u8]) -> Histogram {
    let num_blocks = input.len() / BLOCK_SIZE;
    let (leading, tail) = input.split_at(num_blocks * BLOCK_SIZE);

    let blocks: Vec<&[u8]> = leading.chunks(BLOCK_SIZE).collect();
    let block_histograms = pool.map(&blocks, |block| count_block(block));

    // the tail is counted on the submitting thread, same as every other
    // per-block task the coordinator keeps for itself
    let mut histogram = count_block(tail);
    for block_histogram in &block_histograms {
        for symbol in 0..TABLE_SIZE {
            histogram[symbol] += block_histogram[symbol];
        }
    }
    histogram
}

fn count_block(block: &[u8]) -> Histogram {
    let mut histogram = [0u64; TABLE_SIZE];
    for &byte in block {
        histogram[byte as usize] += 1;
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_zero_sum() {
        let pool = WorkPool::new(2).unwrap();
        let histogram = count_frequencies(&pool, &[]);
        assert_eq!(histogram.iter().sum::<u64>(), 0);
    }

    #[test]
    fn sum_of_counts_equals_input_length() {
        let pool = WorkPool::new(3).unwrap();
        let input: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
        let histogram = count_frequencies(&pool, &input);
        assert_eq!(histogram.iter().sum::<u64>(), input.len() as u64);
    }

    #[test]
    fn counts_match_naive_tally_across_block_boundary() {
        let pool = WorkPool::new(4).unwrap();
        let input = b"aaaaaaaaaabbbbbbbbbbccccccccccdddddddddd".repeat(30);
        let histogram = count_frequencies(&pool, &input);
        let mut expected = [0u64; TABLE_SIZE];
        for &b in &input {
            expected[b as usize] += 1;
        }
        assert_eq!(histogram, expected);
    }
}
