use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    pub qty: u32,
    pub item: String,
}

impl BomLine {
    pub fn new(qty: u32, item: impl Into<String>) -> Self {
        Self {
            qty,
            item: item.into(),
        }
    }
}

/// Merge duplicate items, summing quantities. Output is sorted by item name
/// so the bill of materials is stable across runs.
pub fn merge_bom<'a>(lines: impl IntoIterator<Item = &'a BomLine>) -> Vec<BomLine> {
    let mut merged: BTreeMap<String, u32> = BTreeMap::new();
    for line in lines {
        *merged.entry(line.item.clone()).or_insert(0) += line.qty;
    }
    merged
        .into_iter()
        .map(|(item, qty)| BomLine { qty, item })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_items_are_summed_and_sorted() {
        let lines = vec![
            BomLine::new(2, "bolt M4x25"),
            BomLine::new(1, "bearing LM8UU"),
            BomLine::new(2, "bolt M4x25"),
        ];
        let merged = merge_bom(&lines);
        assert_eq!(
            merged,
            vec![
                BomLine::new(1, "bearing LM8UU"),
                BomLine::new(4, "bolt M4x25"),
            ]
        );
    }
}
