// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fuzzy facility name resolution for the import pipeline.

use crate::types::Facility;

/// The largest edit distance accepted as a fuzzy facility match.
pub const MAX_FUZZY_DISTANCE: usize = 2;

/// The outcome of resolving a free-text facility name against a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacilityMatch {
    /// The name matched a registered facility exactly (after trimming and
    /// case folding).
    Exact(Facility),
    /// The name was within [`MAX_FUZZY_DISTANCE`] edits of a registered
    /// facility. The candidate must be confirmed before being assigned.
    Fuzzy {
        /// The closest registered facility.
        facility: Facility,
        /// The edit distance to that facility's name.
        distance: usize,
    },
    /// No registered facility was close enough.
    NoMatch,
}

/// Levenshtein distance between two strings, computed over Unicode scalar
/// values with the standard two-row dynamic program.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let substitution_cost: usize = usize::from(a_char != b_char);
            current[j + 1] = (previous[j] + substitution_cost)
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}

/// Resolves a free-text facility name against an organization's registry.
///
/// Matching is case-insensitive and ignores leading and trailing whitespace.
/// An exact match wins outright. Otherwise the registry is scanned for the
/// smallest edit distance; a candidate within [`MAX_FUZZY_DISTANCE`] is
/// returned as fuzzy, with ties broken by registry order (first registered
/// wins). An empty or whitespace-only input never matches.
#[must_use]
pub fn resolve_facility(input: &str, registry: &[Facility]) -> FacilityMatch {
    let needle: String = input.trim().to_lowercase();
    if needle.is_empty() {
        return FacilityMatch::NoMatch;
    }

    let mut best: Option<(usize, usize)> = None;
    for (index, facility) in registry.iter().enumerate() {
        let candidate: String = facility.name.trim().to_lowercase();
        if candidate == needle {
            return FacilityMatch::Exact(facility.clone());
        }
        let distance: usize = edit_distance(&needle, &candidate);
        if distance <= MAX_FUZZY_DISTANCE {
            let better: bool = match best {
                Some((best_distance, _)) => distance < best_distance,
                None => true,
            };
            if better {
                best = Some((distance, index));
            }
        }
    }

    match best {
        Some((distance, index)) => FacilityMatch::Fuzzy {
            facility: registry[index].clone(),
            distance,
        },
        None => FacilityMatch::NoMatch,
    }
}
