//! Pattern search over a rope (`SPEC_FULL.md` §4.6): single-character
//! `index_of`, a Boyer-Moore-Horspool substring search driven by the
//! forward cursor's `skip`/`move_backwards`, and anchored
//! `starts_with`/`ends_with` checks.

use crate::iter::forward;
use crate::node::NodeLink;

/// First index at or after `from` where `ch` occurs, or `None`.
pub(crate) fn index_of_char(root: &NodeLink, ch: char, from: usize) -> Option<usize> {
    let mut cursor = forward(root.clone(), from).ok()?;
    let mut i = from;
    while let Some(c) = cursor.next() {
        if c == ch {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Bad-character shift table for Boyer-Moore-Horspool search.
fn bad_char_table(pattern: &[char]) -> std::collections::HashMap<char, usize> {
    let m = pattern.len();
    let mut table = std::collections::HashMap::with_capacity(m);
    for (i, &c) in pattern[..m - 1].iter().enumerate() {
        table.insert(c, m - 1 - i);
    }
    table
}

/// First index at or after `from` where `pattern` occurs, or `None` if it
/// never does. Empty patterns match at `from` immediately.
pub(crate) fn index_of_seq(root: &NodeLink, pattern: &[char], from: usize) -> Option<usize> {
    let len = root.len();
    let m = pattern.len();
    if m == 0 {
        return if from <= len { Some(from) } else { None };
    }
    if from + m > len {
        return None;
    }
    let shifts = bad_char_table(pattern);
    let mut window_start = from;
    while window_start + m <= len {
        // Compare the window right-to-left so a mismatch can use the
        // bad-character shift immediately.
        let mut cursor = forward(root.clone(), window_start).ok()?;
        let window: Vec<char> = (0..m).filter_map(|_| cursor.next()).collect();
        if window.len() < m {
            return None;
        }
        let mut mismatch_at = None;
        for i in (0..m).rev() {
            if window[i] != pattern[i] {
                mismatch_at = Some(i);
                break;
            }
        }
        match mismatch_at {
            None => return Some(window_start),
            Some(_) => {
                let bad = window[m - 1];
                let shift = shifts.get(&bad).copied().unwrap_or(m).max(1);
                window_start += shift;
            }
        }
    }
    None
}

pub(crate) fn starts_with(root: &NodeLink, prefix: &[char], offset: usize) -> bool {
    if offset + prefix.len() > root.len() {
        return false;
    }
    match forward(root.clone(), offset) {
        Ok(cursor) => cursor.take(prefix.len()).eq(prefix.iter().copied()),
        Err(_) => false,
    }
}

/// True if the rope, truncated to `offset` characters, ends with `suffix`.
pub(crate) fn ends_with(root: &NodeLink, suffix: &[char], offset: usize) -> bool {
    if suffix.len() > offset {
        return false;
    }
    let start = offset - suffix.len();
    match forward(root.clone(), start) {
        Ok(cursor) => cursor.take(suffix.len()).eq(suffix.iter().copied()),
        Err(_) => false,
    }
}
