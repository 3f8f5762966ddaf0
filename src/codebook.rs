// Codebook builder (C4): walks the tree accumulating a code string per
// node (left = 0, right = 1), inserting (symbol -> code) at each leaf. The
// single-leaf tree is special-cased to the one-bit code "0" rather than
// walked, per the degenerate case in the data model.

use std::collections::HashMap;

use crate::tree::Node;

pub type EncodingTable = HashMap<u8, Vec<bool>>;
pub type DecodingTable = HashMap<Vec<bool>, u8>;

pub fn build_codebook(root: &Option<Box<Node>>) -> EncodingTable {
    let mut table = HashMap::new();
    let root = match root {
        Some(root) => root,
        None => return table,
    };

    if root.is_leaf() {
        table.insert(root.symbol, vec![false]);
        return table;
    }

    walk(root, Vec::new(), &mut table);
    table
}

fn walk(node: &Node, code: Vec<bool>, table: &mut EncodingTable) {
    if node.is_leaf() {
        table.insert(node.symbol, code);
        return;
    }
    if let Some(left) = &node.left {
        let mut left_code = code.clone();
        left_code.push(false);
        walk(left, left_code, table);
    }
    if let Some(right) = &node.right {
        let mut right_code = code;
        right_code.push(true);
        walk(right, right_code, table);
    }
}

/// Inverts the codebook. Bijective by construction since a codebook maps
/// each symbol to a distinct prefix-free code.
pub fn invert(table: &EncodingTable) -> DecodingTable {
    table.iter().map(|(&symbol, code)| (code.clone(), symbol)).collect()
}
