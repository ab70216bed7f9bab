//! The level pairing rule.
//!
//! Nodes `2i` and `2i + 1` of a level produce node `i` of the next level. A
//! level of odd length leaves its last node unpaired; the duplication policy
//! decides whether it is hashed with itself or carried up unchanged. Both the
//! tree builder and the proof walk consult [`pairing`], so they always agree
//! on how a trailing node was handled.

use crate::{
    HashError,
    hash::{HashFunc, hash_pair},
    proof::Side,
};

/// How the node at some index reaches its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pairing {
    /// Hashed together with the node at `sibling`, which lies on `side`.
    Pair { sibling: usize, side: Side },
    /// Lone trailing node, hashed with itself.
    Duplicate,
    /// Lone trailing node, copied into the next level without hashing.
    Promote,
}

/// Pairing of node `index` in a level of `len` nodes.
///
/// `len` must be at least 2; a single node is the root and has no parent.
pub(crate) fn pairing(index: usize, len: usize, no_duplicates: bool) -> Pairing {
    debug_assert!(len >= 2 && index < len);
    if index % 2 == 1 {
        Pairing::Pair {
            sibling: index - 1,
            side: Side::Left,
        }
    } else if index + 1 < len {
        Pairing::Pair {
            sibling: index + 1,
            side: Side::Right,
        }
    } else if no_duplicates {
        Pairing::Promote
    } else {
        Pairing::Duplicate
    }
}

/// Number of nodes in the level above a level of `len` nodes.
#[inline]
pub(crate) fn parent_len(len: usize) -> usize {
    len.div_ceil(2)
}

/// Compute node `parent` of the level above `level`.
pub(crate) fn parent_hash(
    level: &[Vec<u8>],
    parent: usize,
    no_duplicates: bool,
    hash_func: &HashFunc,
) -> Result<Vec<u8>, HashError> {
    let left = 2 * parent;
    match pairing(left, level.len(), no_duplicates) {
        Pairing::Pair { sibling, .. } => hash_pair(hash_func, &level[left], &level[sibling]),
        Pairing::Duplicate => hash_pair(hash_func, &level[left], &level[left]),
        Pairing::Promote => Ok(level[left].clone()),
    }
}

/// Number of levels, leaves and root included, for `leaf_count` leaves.
pub(crate) fn level_count(leaf_count: usize) -> usize {
    let mut len = leaf_count;
    let mut count = 1;
    while len > 1 {
        len = parent_len(len);
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_even_level() {
        assert_eq!(
            pairing(0, 4, false),
            Pairing::Pair {
                sibling: 1,
                side: Side::Right
            }
        );
        assert_eq!(
            pairing(3, 4, true),
            Pairing::Pair {
                sibling: 2,
                side: Side::Left
            }
        );
    }

    #[test]
    fn test_pairing_odd_trailing_node() {
        assert_eq!(pairing(4, 5, false), Pairing::Duplicate);
        assert_eq!(pairing(4, 5, true), Pairing::Promote);
        // Non-trailing nodes of an odd level pair normally.
        assert_eq!(
            pairing(2, 5, true),
            Pairing::Pair {
                sibling: 3,
                side: Side::Right
            }
        );
    }

    #[test]
    fn test_parent_hash_policies() {
        let hash_func = HashFunc::sha256();
        let level = vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()];

        let dup = parent_hash(&level, 1, false, &hash_func).expect("hash");
        assert_eq!(dup, hash_func.hash(b"cc").expect("hash"));

        let promoted = parent_hash(&level, 1, true, &hash_func).expect("hash");
        assert_eq!(promoted, b"c".to_vec());

        let pair = parent_hash(&level, 0, true, &hash_func).expect("hash");
        assert_eq!(pair, hash_func.hash(b"ab").expect("hash"));
    }

    #[test]
    fn test_level_count() {
        assert_eq!(level_count(2), 2);
        assert_eq!(level_count(3), 3);
        assert_eq!(level_count(4), 3);
        assert_eq!(level_count(5), 4);
        assert_eq!(level_count(8), 4);
        assert_eq!(level_count(9), 5);
    }
}
