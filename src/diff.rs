use itertools::Itertools;

/// How a run of characters relates the typed text to the reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffKind {
    /// Present in both texts, in order.
    Matched,
    /// Present in the typed text only.
    Inserted,
    /// Present in the reference only.
    Removed,
}

/// A maximal run of consecutive characters sharing one `DiffKind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub kind: DiffKind,
    pub len: usize,
}

/// Align `typed` against `reference` character by character.
///
/// The alignment maximizes the number of `Matched` characters (the longest
/// common subsequence), so a stray insertion or omission early in the text
/// does not cascade into mismatches for everything after it. The segments
/// partition both inputs: every reference char lands in exactly one
/// `Matched` or `Removed` segment, every typed char in exactly one `Matched`
/// or `Inserted` segment. Table ties are broken the same way every time, so
/// the output is deterministic.
pub fn diff_chars(reference: &str, typed: &str) -> Vec<Segment> {
    let ref_chars: Vec<char> = reference.chars().collect();
    let typed_chars: Vec<char> = typed.chars().collect();
    let n = ref_chars.len();
    let m = typed_chars.len();

    // lcs[i][j] = LCS length of reference[..i] and typed[..j].
    let mut lcs = vec![vec![0u32; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            lcs[i][j] = if ref_chars[i - 1] == typed_chars[j - 1] {
                lcs[i - 1][j - 1] + 1
            } else {
                lcs[i - 1][j].max(lcs[i][j - 1])
            };
        }
    }

    // Walk the table back to front, one op per character. On a tie the
    // typed char is consumed first.
    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && ref_chars[i - 1] == typed_chars[j - 1] {
            ops.push(DiffKind::Matched);
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lcs[i][j - 1] >= lcs[i - 1][j]) {
            ops.push(DiffKind::Inserted);
            j -= 1;
        } else {
            ops.push(DiffKind::Removed);
            i -= 1;
        }
    }
    ops.reverse();

    let mut segments = Vec::new();
    for (kind, run) in &ops.into_iter().chunk_by(|kind| *kind) {
        segments.push(Segment {
            kind,
            len: run.count(),
        });
    }
    segments
}

/// Total length of the `Matched` segments, i.e. how many characters the
/// typed text got right as the accuracy metric counts them.
pub fn matched_count(reference: &str, typed: &str) -> usize {
    diff_chars(reference, typed)
        .iter()
        .filter(|s| s.kind == DiffKind::Matched)
        .map(|s| s.len)
        .sum()
}
