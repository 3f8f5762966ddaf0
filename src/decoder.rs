// Parallel decoder (C7): unpacks bytes to bits, strips padding, splits the
// result by the block-offset index, then decodes each block independently
// by prefix-matching against the inverse codebook.

use crate::bitstream::BitVec;
use crate::codebook::DecodingTable;
use crate::error::{Error, Result};
use crate::histogram::BLOCK_SIZE;
use crate::pool::WorkPool;

pub fn decode(
    pool: &WorkPool,
    decoding_table: &DecodingTable,
    payload: &[u8],
    block_index: &[usize],
    padding: u8,
) -> Result<Vec<u8>> {
    if !(1..=8).contains(&padding) {
        return Err(Error::corrupt(format!("padding {} is out of range [1,8]", padding)));
    }

    let mut bits = unpack(pool, payload);
    if (padding as usize) > bits.len() {
        return Err(Error::corrupt("padding exceeds payload bit length"));
    }
    bits.truncate(padding as usize);

    let sum_index = block_index
        .iter()
        .try_fold(0usize, |acc, &len| acc.checked_add(len))
        .ok_or_else(|| Error::corrupt("block-offset index overflows"))?;
    if sum_index > bits.len() {
        return Err(Error::corrupt("block-offset index exceeds decoded payload"));
    }

    let mut segments = Vec::with_capacity(block_index.len() + 1);
    let mut start = 0;
    for &len in block_index {
        segments.push(bits.slice(start, start + len));
        start += len;
    }
    segments.push(bits.slice(start, bits.len()));

    let decoded_blocks = pool.map(&segments, |segment| decode_segment(decoding_table, segment));

    let mut output = Vec::new();
    for block in decoded_blocks {
        output.extend(block?);
    }
    Ok(output)
}

fn unpack(pool: &WorkPool, payload: &[u8]) -> BitVec {
    let num_blocks = payload.len() / BLOCK_SIZE;
    let (leading, tail) = payload.split_at(num_blocks * BLOCK_SIZE);

    let blocks: Vec<&[u8]> = leading.chunks(BLOCK_SIZE).collect();
    let block_bits = pool.map(&blocks, |block| BitVec::from_bytes(block));

    let mut bits = BitVec::with_bit_capacity(payload.len() * 8);
    for block in &block_bits {
        bits.append(block);
    }
    bits.append(&BitVec::from_bytes(tail));
    bits
}

// deterministic automaton: accumulate bits into `current` until it matches
// a codebook key, emit the symbol, reset. A nonempty `current` at the end
// of the segment means a block boundary split a codeword -- a contract
// violation the encoder guarantees never happens, so this only fires on a
// genuinely corrupt container.
fn decode_segment(table: &DecodingTable, segment: &BitVec) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    let mut current: Vec<bool> = Vec::new();
    for i in 0..segment.len() {
        current.push(segment.get(i));
        if let Some(&symbol) = table.get(&current) {
            output.push(symbol);
            current.clear();
        }
    }
    if !current.is_empty() {
        return Err(Error::corrupt("unresolved code prefix at end of block"));
    }
    Ok(output)
}
