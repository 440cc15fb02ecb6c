//! Merging configured externals into the collected asset list.

use super::{AssetDescriptor, Manifest, Position};

/// Merge externals into collected assets.
///
/// `Before` externals go to a front cursor that advances after each insert,
/// so they keep their relative order ahead of every collected asset.
/// `After` and unpositioned externals are appended to the tail in input order.
///
/// ```text
/// collected = [c1, c2]
/// externals = [e1 before, e2 after, e3 before]
/// manifest  = [e1, e3, c1, c2, e2]
/// ```
pub fn merge_manifest(collected: Vec<AssetDescriptor>, externals: &[AssetDescriptor]) -> Manifest {
    let mut front = Vec::with_capacity(externals.len() + collected.len());
    let mut tail = Vec::new();

    for external in externals {
        match external.position {
            Some(Position::Before) => front.push(external.clone()),
            Some(Position::After) | None => tail.push(external.clone()),
        }
    }

    front.extend(collected);
    front.extend(tail);
    Manifest::new(front)
}
