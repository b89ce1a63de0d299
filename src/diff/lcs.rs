use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::Range;

/// Kind of edit covering a pair of ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// One alignment step: `old[old_range]` relates to `new[new_range]` as `tag` says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opcode {
    pub tag: OpTag,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

/// Align two sequences along a longest common subsequence.
///
/// Elements compare as opaque units with `==`. The opcodes cover both
/// sequences completely and in order; adjacent equal runs are merged, and a gap
/// between two matches becomes `Replace` when both sides are non-empty,
/// otherwise `Delete` or `Insert`.
///
/// Memory stays linear in `old.len() + new.len()`.
pub fn opcodes<T: Hash + Eq>(old: &[T], new: &[T]) -> Vec<Opcode> {
    let matches = longest_common_subsequence(old, new);

    let mut ops: Vec<Opcode> = Vec::new();
    let (mut i, mut j) = (0, 0);

    for (mi, mj) in matches {
        push_gap(&mut ops, i..mi, j..mj);

        match ops.last_mut() {
            Some(last) if last.tag == OpTag::Equal && last.old.end == mi && last.new.end == mj => {
                last.old.end += 1;
                last.new.end += 1;
            }
            _ => ops.push(Opcode {
                tag: OpTag::Equal,
                old: mi..mi + 1,
                new: mj..mj + 1,
            }),
        }

        i = mi + 1;
        j = mj + 1;
    }
    push_gap(&mut ops, i..old.len(), j..new.len());

    ops
}

fn push_gap(ops: &mut Vec<Opcode>, old: Range<usize>, new: Range<usize>) {
    let tag = match (old.is_empty(), new.is_empty()) {
        (true, true) => return,
        (false, false) => OpTag::Replace,
        (false, true) => OpTag::Delete,
        (true, false) => OpTag::Insert,
    };
    ops.push(Opcode { tag, old, new });
}

/// Index pairs of one longest common subsequence, increasing in both coordinates.
///
/// The common prefix and suffix are matched directly. In the middle, elements
/// that never occur on the other side cannot be part of any common
/// subsequence and are dropped before the alignment proper.
fn longest_common_subsequence<T: Hash + Eq>(old: &[T], new: &[T]) -> Vec<(usize, usize)> {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];

    let mut pairs: Vec<(usize, usize)> = (0..prefix).map(|k| (k, k)).collect();

    // Intern the middle elements so the alignment compares small integers
    let mut ids: HashMap<&T, u32> = HashMap::new();
    for item in new_mid {
        let next = ids.len() as u32;
        ids.entry(item).or_insert(next);
    }
    let old_kept: Vec<(usize, u32)> = old_mid
        .iter()
        .enumerate()
        .filter_map(|(k, item)| ids.get(item).map(|&id| (k, id)))
        .collect();
    let shared: HashSet<u32> = old_kept.iter().map(|&(_, id)| id).collect();
    let new_kept: Vec<(usize, u32)> = new_mid
        .iter()
        .enumerate()
        .filter_map(|(k, item)| ids.get(item).filter(|id| shared.contains(id)).map(|&id| (k, id)))
        .collect();

    let old_ids: Vec<u32> = old_kept.iter().map(|&(_, id)| id).collect();
    let new_ids: Vec<u32> = new_kept.iter().map(|&(_, id)| id).collect();
    let mut aligned = Vec::new();
    hirschberg(&old_ids, &new_ids, 0, 0, &mut aligned);

    pairs.extend(
        aligned
            .into_iter()
            .map(|(a, b)| (prefix + old_kept[a].0, prefix + new_kept[b].0)),
    );

    let (old_tail, new_tail) = (old.len() - suffix, new.len() - suffix);
    pairs.extend((0..suffix).map(|k| (old_tail + k, new_tail + k)));

    pairs
}

/// Linear-space LCS: split `a` in half, find where the best alignment crosses
/// `b`, and recurse on both quadrants. Pairs are pushed in increasing order,
/// offset by `a0`/`b0`.
fn hirschberg(a: &[u32], b: &[u32], a0: usize, b0: usize, out: &mut Vec<(usize, usize)>) {
    if a.is_empty() || b.is_empty() {
        return;
    }
    if a.len() == 1 {
        if let Some(k) = b.iter().position(|&y| y == a[0]) {
            out.push((a0, b0 + k));
        }
        return;
    }

    let mid = a.len() / 2;
    let front = lcs_lengths(&a[..mid], b, false);
    let back = lcs_lengths(&a[mid..], b, true);

    let m = b.len();
    let mut split = 0;
    let mut best = 0;
    for k in 0..=m {
        let total = front[k] + back[m - k];
        if total > best {
            best = total;
            split = k;
        }
    }

    hirschberg(&a[..mid], &b[..split], a0, b0, out);
    hirschberg(&a[mid..], &b[split..], a0 + mid, b0 + split, out);
}

/// Last row of the LCS table of `a` against every prefix of `b`, or with
/// `reverse`, of reversed `a` against every suffix of `b` (indexed by suffix length).
fn lcs_lengths(a: &[u32], b: &[u32], reverse: bool) -> Vec<usize> {
    let (n, m) = (a.len(), b.len());
    let mut prev = vec![0usize; m + 1];
    let mut curr = vec![0usize; m + 1];

    for i in 0..n {
        let x = if reverse { a[n - 1 - i] } else { a[i] };
        for j in 0..m {
            let y = if reverse { b[m - 1 - j] } else { b[j] };
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev
}
