// Parallel encoder (C5): maps bytes to codes in fixed-size blocks,
// concatenates the block bitstrings while recording each one's bit length
// in the block-offset index, pads to a byte boundary, then packs the
// padded bitstream to bytes -- itself a separate parallel pass over
// byte-aligned chunks of the bit-vector.

use crate::bitstream::BitVec;
use crate::codebook::EncodingTable;
use crate::histogram::BLOCK_SIZE;
use crate::pool::WorkPool;

pub struct EncodedPayload {
    pub bytes: Vec<u8>,
    pub block_index: Vec<usize>,
    pub padding: u8,
}

pub fn encode(pool: &WorkPool, table: &EncodingTable, input: &[u8]) -> EncodedPayload {
    let num_blocks = input.len() / BLOCK_SIZE;
    let (leading, tail) = input.split_at(num_blocks * BLOCK_SIZE);

    let blocks: Vec<&[u8]> = leading.chunks(BLOCK_SIZE).collect();
    let block_bits = pool.map(&blocks, |block| encode_block(table, block));
    let tail_bits = encode_block(table, tail);

    let mut bits = BitVec::with_bit_capacity(input.len() * 2);
    let mut block_index = Vec::with_capacity(block_bits.len());
    for block in &block_bits {
        block_index.push(block.len());
        bits.append(block);
    }
    bits.append(&tail_bits);

    let padding = pad(&mut bits);
    let bytes = pack(pool, &bits);

    EncodedPayload { bytes, block_index, padding }
}

fn encode_block(table: &EncodingTable, block: &[u8]) -> BitVec {
    let mut bits = BitVec::with_bit_capacity(block.len() * 2);
    for &byte in block {
        let code = table.get(&byte).expect("every input byte has a codebook entry");
        bits.push_bits(code);
    }
    bits
}

// always returns a value in [1, 8]: a stream that's already byte-aligned
// still gets a full padding byte, so the decoder's subtract-padding step
// stays uniform.
fn pad(bits: &mut BitVec) -> u8 {
    let remainder = bits.len() % 8;
    let padding = 8 - remainder;
    bits.append_zeros(padding);
    padding as u8
}

const PACK_CHUNK_BYTES: usize = BLOCK_SIZE;

fn pack(pool: &WorkPool, bits: &BitVec) -> Vec<u8> {
    debug_assert_eq!(bits.len() % 8, 0, "bit-vector must be padded before packing");

    let chunk_bits = PACK_CHUNK_BYTES * 8;
    let num_chunks = bits.len() / chunk_bits;
    let chunk_starts: Vec<usize> = (0..num_chunks).map(|i| i * chunk_bits).collect();

    let packed_chunks = pool.map(&chunk_starts, |&start| bits.slice(start, start + chunk_bits).into_bytes());

    let mut out = Vec::with_capacity(bits.len() / 8);
    for chunk in packed_chunks {
        out.extend_from_slice(&chunk);
    }
    let tail_start = num_chunks * chunk_bits;
    out.extend_from_slice(&bits.slice(tail_start, bits.len()).into_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codebook::build_codebook;
    use crate::histogram::count_frequencies;
    use crate::tree::build_tree;

    fn encode_str(pool: &WorkPool, input: &[u8]) -> EncodedPayload {
        let histogram = count_frequencies(pool, input);
        let table = build_codebook(&build_tree(&histogram));
        encode(pool, &table, input)
    }

    #[test]
    fn single_symbol_input_matches_s1() {
        let pool = WorkPool::new(2).unwrap();
        let encoded = encode_str(&pool, b"aaaaaaaa");
        assert_eq!(encoded.padding, 8);
        assert_eq!(encoded.bytes, vec![0x00, 0x00]);
        assert!(encoded.block_index.is_empty());
    }

    #[test]
    fn empty_input_matches_s2() {
        let pool = WorkPool::new(2).unwrap();
        let encoded = encode_str(&pool, b"");
        assert_eq!(encoded.padding, 8);
        assert_eq!(encoded.bytes, vec![0x00]);
        assert!(encoded.block_index.is_empty());
    }

    #[test]
    fn two_symbol_input_matches_s3() {
        let pool = WorkPool::new(2).unwrap();
        let encoded = encode_str(&pool, b"ab");
        assert_eq!(encoded.padding, 6);
        assert_eq!(encoded.bytes.len(), 1);
    }

    #[test]
    fn block_index_has_one_entry_per_leading_block() {
        let pool = WorkPool::new(4).unwrap();
        // 4096 bytes over a block size of 500 -> 8 leading blocks, 96-byte tail
        let input: Vec<u8> = (0..4096u32).map(|i| if i % 2 == 0 { b'a' } else { b'b' }).collect();
        let encoded = encode_str(&pool, &input);
        assert_eq!(encoded.block_index.len(), 8);
    }

    #[test]
    fn packing_is_consistent_across_thread_counts() {
        let input: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let mut outputs = Vec::new();
        for threads in [1usize, 3, 7] {
            let pool = WorkPool::new(threads).unwrap();
            outputs.push(encode_str(&pool, &input).bytes);
        }
        assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
