//! Normalized set of cells approximating a region.

use crate::cellid::CellId;

/// A sorted, duplicate-free set of cell ids in which no cell is a
/// descendant of another and every complete sibling quadruple is
/// merged into its parent.
///
/// Two equal regions always normalize to the same union, so unions
/// compare by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellUnion {
    ids: Vec<CellId>,
}

impl CellUnion {
    /// Builds a union from arbitrary cell ids, normalizing them.
    pub fn from_cell_ids(mut ids: Vec<CellId>) -> Self {
        ids.sort_unstable();
        let mut out: Vec<CellId> = Vec::with_capacity(ids.len());
        for mut id in ids {
            if let Some(last) = out.last() {
                if last.contains(&id) {
                    continue;
                }
            }
            while let Some(last) = out.last() {
                if id.contains(last) {
                    out.pop();
                } else {
                    break;
                }
            }
            // Merge complete sibling quadruples. The XOR identity is
            // necessary but not sufficient: the three previous ids
            // must also share this id's parent, checked with a mask
            // over the bits above the sibling positions.
            while out.len() >= 3 && !id.is_face() {
                let n = out.len();
                if (out[n - 3].id() ^ out[n - 2].id() ^ out[n - 1].id()) != id.id() {
                    break;
                }
                let mask = id.lsb() << 1;
                let mask = !(mask.wrapping_add(mask << 1));
                let parent_bits = id.id() & mask;
                if (out[n - 3].id() & mask) != parent_bits
                    || (out[n - 2].id() & mask) != parent_bits
                    || (out[n - 1].id() & mask) != parent_bits
                {
                    break;
                }
                out.truncate(n - 3);
                id = id.parent_at(id.level() - 1);
            }
            out.push(id);
        }
        CellUnion { ids: out }
    }

    pub fn cell_ids(&self) -> &[CellId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True iff `id` is a member of the union or a descendant of one.
    pub fn contains(&self, id: &CellId) -> bool {
        match self.ids.binary_search(id) {
            Ok(_) => true,
            Err(pos) => {
                if pos < self.ids.len() && self.ids[pos].range_min() <= *id {
                    return true;
                }
                pos > 0 && self.ids[pos - 1].range_max() >= *id
            }
        }
    }

    pub fn into_cell_ids(self) -> Vec<CellId> {
        self.ids
    }
}
