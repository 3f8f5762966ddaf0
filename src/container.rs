// Container writer/reader (C6): self-describing header (codebook line,
// padding line, index line, each newline-terminated) followed by the raw
// payload bytes.

use std::collections::HashMap;

use crate::codebook::{DecodingTable, EncodingTable};
use crate::error::{Error, Result};

pub struct Container {
    pub decoding_table: DecodingTable,
    pub padding: u8,
    pub block_index: Vec<usize>,
    pub payload: Vec<u8>,
}

pub fn write(table: &EncodingTable, block_index: &[usize], padding: u8, payload: &[u8]) -> Vec<u8> {
    let mut header = String::new();

    // stable (symbol-ascending) order so compress() is deterministic across runs
    let mut symbols: Vec<&u8> = table.keys().collect();
    symbols.sort();
    for symbol in symbols {
        for &bit in &table[symbol] {
            header.push(if bit { '1' } else { '0' });
        }
        header.push(' ');
        header.push_str(&symbol.to_string());
        header.push(' ');
    }
    header.push('\n');

    header.push_str(&padding.to_string());
    header.push('\n');

    for &len in block_index {
        header.push_str(&len.to_string());
        header.push(' ');
    }
    header.push('\n');

    let mut bytes = header.into_bytes();
    bytes.extend_from_slice(payload);
    bytes
}

pub fn parse(data: &[u8]) -> Result<Container> {
    let mut start = 0;
    let mut lines = Vec::with_capacity(3);
    for _ in 0..3 {
        let newline = data[start..]
            .iter()
            .position(|&b| b == b'\n')
            .ok_or_else(|| Error::corrupt("header is missing a newline-terminated line"))?;
        lines.push(&data[start..start + newline]);
        start += newline + 1;
    }
    let payload = data[start..].to_vec();

    let codebook_line = as_ascii(lines[0], "codebook line")?;
    let padding_line = as_ascii(lines[1], "padding line")?;
    let index_line = as_ascii(lines[2], "index line")?;

    let decoding_table = parse_codebook(codebook_line)?;
    let padding: u8 = padding_line
        .trim()
        .parse()
        .map_err(|_| Error::corrupt("padding line is not an integer"))?;
    if !(1..=8).contains(&padding) {
        return Err(Error::corrupt(format!("padding {} is out of range [1,8]", padding)));
    }
    let block_index = parse_index(index_line)?;

    Ok(Container { decoding_table, padding, block_index, payload })
}

fn as_ascii<'a>(bytes: &'a [u8], what: &str) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|_| Error::corrupt(format!("{} is not valid ASCII", what)))
}

fn parse_codebook(line: &str) -> Result<DecodingTable> {
    let mut table = HashMap::new();
    let mut tokens = line.split_whitespace();
    while let Some(code) = tokens.next() {
        let symbol = tokens
            .next()
            .ok_or_else(|| Error::corrupt("codebook line has a code with no paired symbol"))?;
        let symbol: u8 = symbol
            .parse()
            .map_err(|_| Error::corrupt("codebook symbol is not a byte value"))?;

        let mut bits = Vec::with_capacity(code.len());
        for c in code.chars() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return Err(Error::corrupt("codebook code contains a non-bit character")),
            }
        }
        if bits.is_empty() {
            return Err(Error::corrupt("codebook code is empty"));
        }
        table.insert(bits, symbol);
    }
    Ok(table)
}

fn parse_index(line: &str) -> Result<Vec<usize>> {
    line.split_whitespace()
        .map(|token| token.parse::<usize>().map_err(|_| Error::corrupt("index entry is not an integer")))
        .collect()
}
