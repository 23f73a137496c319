//! Set logic for configlet assignment.
//!
//! Pure functions over ordered configlet lists. Nothing here performs I/O;
//! callers fetch the current and requested sets through the
//! [`Directory`](crate::Directory) and hand them in.
//!
//! Membership is decided by [`same_configlet`], not by `PartialEq`: the
//! device listing and the by-name lookup populate `config` differently, so
//! structural equality would treat one configlet as two.

use cvpctl_api::Configlet;

/// Whether `a` and `b` refer to the same remote configlet.
///
/// Compares `key` when both sides have one, otherwise `name`. The config
/// text never participates.
pub fn same_configlet(a: &Configlet, b: &Configlet) -> bool {
    if a.key.is_empty() || b.key.is_empty() {
        a.name == b.name
    } else {
        a.key == b.key
    }
}

/// Whether `list` holds a configlet matching `item`.
pub fn contains(list: &[Configlet], item: &Configlet) -> bool {
    list.iter().any(|c| same_configlet(c, item))
}

/// `current` followed by each `requested` configlet not already in `current`.
///
/// `current` keeps its order and comes first. Requested items are only
/// checked against `current`, not against each other.
pub fn merge(current: &[Configlet], requested: &[Configlet]) -> Vec<Configlet> {
    let mut all = current.to_vec();
    all.extend(
        requested
            .iter()
            .filter(|c| !contains(current, c))
            .cloned(),
    );
    all
}

/// Every configlet of `all` that is not in `to_remove`, in `all`'s order.
pub fn filter_out(all: &[Configlet], to_remove: &[Configlet]) -> Vec<Configlet> {
    all.iter()
        .filter(|c| !contains(to_remove, c))
        .cloned()
        .collect()
}

/// Split `current` into `(remaining, excluded)` for a removal.
///
/// `excluded` is the part of `current` matching `removal`, so the two
/// halves together are exactly `current` and never overlap. Removal
/// entries not assigned to the device appear in neither.
pub fn partition_removal(
    current: &[Configlet],
    removal: &[Configlet],
) -> (Vec<Configlet>, Vec<Configlet>) {
    current
        .iter()
        .cloned()
        .partition(|c| !contains(removal, c))
}

pub fn names_of(list: &[Configlet]) -> Vec<String> {
    list.iter().map(|c| c.name.clone()).collect()
}

pub fn keys_of(list: &[Configlet]) -> Vec<String> {
    list.iter().map(|c| c.key.clone()).collect()
}
