//! Retention policy for snapshot folders
//!
//! Snapshot names sort chronologically, so retention only needs the names.

/// Pick the snapshot folders to delete so that at most `keep` remain
///
/// Names are ordered newest first; the first `keep` survive and the rest are
/// returned, newest of the evicted first.
pub fn folders_to_evict<I, S>(names: I, keep: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
    names.sort_by(|a, b| b.cmp(a));
    names.into_iter().skip(keep).collect()
}
