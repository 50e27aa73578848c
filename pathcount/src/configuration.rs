use std::collections::HashSet;

use smallvec::SmallVec;

use crate::error::Error;

/// Sentinel: no partial path crosses this column of the frontier.
pub const NO_PARTNER: i16 = -1;

/// Inline capacity before a Configuration spills to the heap. Grids up to
/// this many columns never allocate; wider grids work identically, just
/// with a heap-backed SmallVec.
const INLINE_WIDTH: usize = 16;

/// An encoding of an endpoint-pairing on a row-wide frontier.
///
/// Slot `i` holds the column of its partner, `i` itself (a self-pair, one
/// dangling end already fixed at the global start/end), or `NO_PARTNER`.
/// See the involution invariant documented on `sanity_check`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Configuration {
    slots: SmallVec<[i16; INLINE_WIDTH]>,
}

impl Configuration {
    /// A configuration of the given width with no partial paths crossing
    /// the frontier anywhere.
    pub fn empty(width: usize) -> Self {
        Configuration {
            slots: smallvec::smallvec![NO_PARTNER; width],
        }
    }

    /// Construct from a label vector: equal non-zero labels pair their two
    /// columns, label 0 is `NO_PARTNER`, and a label occurring exactly once
    /// yields a self-pair. A label occurring a third time violates the
    /// input's own invariant (only two ends exist per path) and is an
    /// assertion failure, not a recoverable error.
    pub fn from_labels(labels: &[u32]) -> Self {
        let mut config = Configuration {
            slots: smallvec::smallvec![NO_PARTNER; labels.len()],
        };
        let mut seen: HashSet<u32> = HashSet::new();

        for col in 0..labels.len() {
            let label = labels[col];
            if label == 0 {
                continue;
            }

            let other_col = labels[col + 1..]
                .iter()
                .position(|&l| l == label)
                .map(|i| col + 1 + i);

            match other_col {
                Some(other) => {
                    config.slots[col] = other as i16;
                    config.slots[other] = col as i16;
                }
                None if !seen.contains(&label) => {
                    config.slots[col] = col as i16;
                }
                None => {
                    // Last occurrence of a label that already has a
                    // partner: the pairing was written when its first
                    // occurrence was processed, nothing left to do here.
                }
            }

            // A label's third occurrence corrupts the pairing: processing
            // its *second* occurrence searches forward, finds the third,
            // and re-links the second to it, leaving the first occurrence
            // pointing at a column that no longer points back. Checking
            // after every column catches that the moment it happens.
            debug_assert!(
                config.sanity_check(),
                "label {label} appears more than twice in {labels:?}"
            );

            seen.insert(label);
        }

        config
    }

    /// Parse a canonical string form (see `to_canonical_string`) back into
    /// a Configuration.
    pub fn from_str(s: &str) -> Result<Self, Error> {
        let labels: Result<Vec<u32>, Error> = s
            .chars()
            .map(|c| c.to_digit(10).ok_or(Error::InvalidDigit(c)))
            .collect();
        Ok(Self::from_labels(&labels?))
    }

    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Canonical string form: walk columns left-to-right, assigning path
    /// ids in first-appearance order. Round-trips through `from_str`.
    pub fn to_canonical_string(&self) -> String {
        let mut path_ids = vec![0u32; self.slots.len()];
        let mut next_label = 0u32;

        for col in 0..self.slots.len() {
            let partner = self.slots[col];
            if partner == NO_PARTNER {
                continue;
            }
            if (partner as usize) < col {
                path_ids[col] = path_ids[partner as usize];
            } else {
                next_label += 1;
                path_ids[col] = next_label;
            }
        }

        debug_assert!(next_label < 10, "more than 9 distinct paths on the frontier");

        path_ids.iter().map(|id| char::from_digit(*id, 10).unwrap()).collect()
    }

    /// Connects two endpoints at columns `a` and `b` on the frontier.
    /// `a <= b` is a precondition; `a == b` is legal (marks a vertical
    /// exit) and is a no-op when the slot is new or already self-paired.
    pub fn link(&mut self, a: usize, b: usize) {
        debug_assert!(self.sanity_check());
        debug_assert!(a <= b);

        let pa = self.slots[a];
        let pb = self.slots[b];

        if pa == NO_PARTNER && pb == NO_PARTNER {
            // split: open a new path.
            self.slots[a] = b as i16;
            self.slots[b] = a as i16;
        } else if a == b {
            // no-op: the slot is new (pa == NO_PARTNER) or already
            // self-paired (pa == a), both of which `link`'s caller uses to
            // mean "record a vertical exit here, nothing else to do."
        } else if a as i16 == pb {
            debug_assert_eq!(b as i16, pa);
            // close: the path closes on itself. The enumerator rejects
            // premature closures before calling link, so reaching this
            // arm means the closure is the legal final action.
            self.slots[a] = NO_PARTNER;
            self.slots[b] = NO_PARTNER;
        } else if pa == NO_PARTNER {
            self.adjust_path(pb, b, a);
        } else if pb == NO_PARTNER {
            self.adjust_path(pa, a, b);
        } else {
            // merge: join the two paths `a` and `b` belong to.
            self.slots[pa as usize] = pb;
            self.slots[pb as usize] = pa;
            self.slots[a] = NO_PARTNER;
            self.slots[b] = NO_PARTNER;
            if pa == a as i16 {
                self.slots[pb as usize] = pb;
            } else if pb == b as i16 {
                self.slots[pa as usize] = pa;
            }
        }

        debug_assert!(self.sanity_check());
    }

    /// Move the dangling end currently at `col_from` (whose partner is
    /// `partner`) over to `col_to`.
    fn adjust_path(&mut self, partner: i16, col_from: usize, col_to: usize) {
        self.slots[col_from] = NO_PARTNER;
        if partner as usize == col_from {
            self.slots[col_to] = col_to as i16;
        } else {
            self.slots[partner as usize] = col_to as i16;
            self.slots[col_to] = partner;
        }
    }

    /// Drop every column whose `keep` entry is false; a remaining partner
    /// of a dropped column becomes a self-pair. Idempotent under repeated
    /// application with the same `keep`.
    pub fn mask(&mut self, keep: &[bool]) {
        debug_assert!(self.sanity_check());
        debug_assert_eq!(keep.len(), self.slots.len());

        for col in 0..self.slots.len() {
            if keep[col] {
                continue;
            }

            let partner = self.slots[col];
            self.slots[col] = NO_PARTNER;
            if partner != NO_PARTNER && partner as usize != col {
                self.slots[partner as usize] = partner;
            }
        }

        debug_assert!(self.sanity_check());
    }

    /// True iff linking `a` and `b` (`a < b`) would close a loop rather
    /// than extend or merge a path.
    pub fn link_would_close(&self, a: usize, b: usize) -> bool {
        debug_assert!(a < b);
        self.slots[b] == a as i16
    }

    /// True iff a partial path already enters column `c` from above.
    pub fn col_advances(&self, c: usize) -> bool {
        self.slots[c] != NO_PARTNER
    }

    /// Involution invariant: every non-sentinel slot's partner points back.
    fn sanity_check(&self) -> bool {
        for i in 0..self.slots.len() {
            let p = self.slots[i];
            if p == NO_PARTNER {
                continue;
            }
            if self.slots[p as usize] != i as i16 {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_links(start: &str, links: &[(usize, usize)], expected: &str) {
        let mut c = Configuration::from_str(start).unwrap();
        assert_eq!(c.to_canonical_string(), start);
        for &(a, b) in links {
            c.link(a, b);
        }
        assert_eq!(c.to_canonical_string(), expected);
    }

    #[test]
    fn link_scenarios() {
        run_links("1221", &[(2, 3)], "1100");
        run_links("120201", &[(1, 2), (3, 5)], "101000");
        run_links("1002332", &[(0, 2), (5, 6)], "0012200");
        run_links("12233", &[(2, 3)], "12002");
        run_links("0000", &[(1, 2)], "0110");
        run_links("0000", &[(0, 1), (2, 3)], "1122");
        run_links("1221", &[(1, 2)], "1001");
        run_links("100", &[(0, 0)], "100");
        run_links("000", &[(0, 0)], "100");
        run_links("010", &[(1, 1)], "010");
        run_links("000", &[(1, 1)], "010");
        run_links("10220", &[(0, 1), (3, 4)], "01202");
        run_links("1234432", &[(2, 3), (5, 6)], "1200200");
        run_links("1202", &[(0, 1)], "0001");
    }

    fn mask_from_str(s: &str) -> Vec<bool> {
        s.chars().map(|c| c != '0').collect()
    }

    #[test]
    fn mask_scenario() {
        let mut c = Configuration::from_str("01202").unwrap();
        c.link(0, 1);
        c.mask(&mask_from_str("10101"));
        c.link(2, 3);
        c.mask(&mask_from_str("10011"));
        assert_eq!(c.to_canonical_string(), "10022");
    }

    #[test]
    fn mask_is_idempotent() {
        let keep = mask_from_str("1010");
        let mut once = Configuration::from_str("1221").unwrap();
        once.mask(&keep);
        let mut twice = once.clone();
        twice.mask(&keep);
        assert_eq!(once, twice);
    }

    #[test]
    fn round_trip() {
        for s in ["1221", "120201", "1002332", "0000", "1202"] {
            let c = Configuration::from_str(s).unwrap();
            assert_eq!(c.to_canonical_string(), s);
        }
    }

    #[test]
    fn link_would_close_matches_close_case() {
        let mut c = Configuration::from_str("1221").unwrap();
        // columns 1 and 2 are partners (both labeled 2): linking them closes.
        assert!(c.link_would_close(1, 2));
        c.link(1, 2);
        assert_eq!(c.to_canonical_string(), "1001");
    }

    #[test]
    fn invalid_digit_is_an_error() {
        assert!(matches!(Configuration::from_str("12x0"), Err(Error::InvalidDigit('x'))));
    }
}
