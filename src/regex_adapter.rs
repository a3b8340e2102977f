//! A boundary-only adapter exposing a rope as a random-access character
//! sequence for a host regex engine (`SPEC_FULL.md` §4.7). No regex engine
//! is wired in here — this module only provides the random-access surface
//! such an engine would consume, in the spirit of `regex_cursor`-style
//! adapters over rope/tree text buffers.

use crate::iter::Chars;
use crate::node::{Node, NodeLink};

/// Services `get(k)` for increasing-then-occasionally-backtracking access
/// patterns (typical of a backtracking or bounded-lookbehind regex engine)
/// by riding a forward cursor: advancing it for increasing `k`, calling
/// `move_backwards` for small backtracks, and falling back to `Rope::get`
/// (a plain tree descent) when the cursor's history doesn't reach far
/// enough back.
pub struct RandomAccess {
    root: NodeLink,
    cursor: Chars,
}

impl RandomAccess {
    pub(crate) fn new(root: NodeLink) -> Self {
        let cursor = Chars::new(root.clone(), 0).unwrap_or_else(|_| {
            Chars::new(Node::empty(), 0).expect("empty rope cursor never fails")
        });
        RandomAccess { root, cursor }
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.len() == 0
    }

    /// Returns the character at `k`, or `None` if out of range.
    pub fn get(&mut self, k: usize) -> Option<char> {
        if k >= self.root.len() {
            return None;
        }
        let pos = self.cursor.pos();
        if k == pos {
            let c = self.cursor.next();
            // restore position for a subsequent re-read of the same index
            if c.is_some() {
                let _ = self.cursor.move_backwards(1);
            }
            return c;
        }
        if k > pos {
            if self.cursor.skip(k - pos).is_ok() {
                let c = self.cursor.next();
                if c.is_some() {
                    let _ = self.cursor.move_backwards(1);
                }
                return c;
            }
        } else if self.cursor.can_move_backwards(pos - k) {
            self.cursor.move_backwards(pos - k).ok()?;
            let c = self.cursor.next();
            if c.is_some() {
                let _ = self.cursor.move_backwards(1);
            }
            return c;
        }
        // history doesn't reach: fall back to a direct tree descent and
        // leave the cursor's position untouched.
        self.root.get(k)
    }

    /// Drops the cursor's backward-movement history, forcing subsequent
    /// backward `get`s through the `Rope::get` fallback path. Exposed for
    /// testing the fallback deliberately; a host engine would never need
    /// to call this itself.
    pub fn forget_history(&mut self) {
        self.cursor.forget_history();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::balance::concatenate;

    #[cfg(feature = "atomic")]
    use std::sync::Arc as Handle;
    #[cfg(not(feature = "atomic"))]
    use std::rc::Rc as Handle;

    fn leaf(s: &str) -> NodeLink {
        let chars: Vec<char> = s.chars().collect();
        Node::flat(Handle::from(chars))
    }

    #[test]
    fn forward_then_backtrack_within_history() {
        let r = concatenate(leaf("hello "), leaf("world"));
        let mut ra = RandomAccess::new(r);
        assert_eq!(ra.get(0), Some('h'));
        assert_eq!(ra.get(6), Some('w'));
        assert_eq!(ra.get(1), Some('e'));
    }

    #[test]
    fn falls_back_to_rope_get_when_history_is_discarded() {
        let r = concatenate(leaf("hello "), leaf("world"));
        let mut ra = RandomAccess::new(r);
        assert_eq!(ra.get(8), Some('r'));
        ra.forget_history();
        // backward access now can't use cursor history; must fall back
        assert_eq!(ra.get(0), Some('h'));
    }

    #[test]
    fn out_of_range_is_none() {
        let r = leaf("abc");
        let mut ra = RandomAccess::new(r);
        assert_eq!(ra.get(3), None);
    }
}
