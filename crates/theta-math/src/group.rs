// ─────────────────────────────────────────────────────────────────────
// Theta Solver — Group
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Finite truncation of the group generated by two Möbius transformations.
//!
//! Elements are grown as reduced words over {S1, S2, S1⁻¹, S2⁻¹}: each new
//! generation right-multiplies every word of the previous generation by the
//! three letters that do not cancel its last letter. After `depth`
//! generations the words are flattened in generation order and near-equal
//! elements are removed.

use crate::mobius::Transform;
use crate::numeric::{delete_duplicates, pow_sum};
use log::debug;

/// Last letter of a reduced word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    Gen1,
    Gen2,
    Inv1,
    Inv2,
}

impl Letter {
    pub const ALL: [Letter; 4] = [Letter::Gen1, Letter::Gen2, Letter::Inv1, Letter::Inv2];

    /// Letters that may follow `self` without immediate cancellation,
    /// in emission order.
    pub const fn successors(self) -> [Letter; 3] {
        match self {
            Letter::Gen1 => [Letter::Gen1, Letter::Gen2, Letter::Inv2],
            Letter::Gen2 => [Letter::Gen1, Letter::Gen2, Letter::Inv1],
            Letter::Inv1 => [Letter::Gen2, Letter::Inv1, Letter::Inv2],
            Letter::Inv2 => [Letter::Gen1, Letter::Inv1, Letter::Inv2],
        }
    }

    pub const fn inverse(self) -> Letter {
        match self {
            Letter::Gen1 => Letter::Inv1,
            Letter::Gen2 => Letter::Inv2,
            Letter::Inv1 => Letter::Gen1,
            Letter::Inv2 => Letter::Gen2,
        }
    }
}

/// The four letters bound to concrete transformations.
#[derive(Debug, Clone, Copy)]
pub struct Generators {
    pub s1: Transform,
    pub s2: Transform,
    pub i1: Transform,
    pub i2: Transform,
}

impl Generators {
    /// Inverses are taken as adjugates of `s1`, `s2`.
    pub fn new(s1: Transform, s2: Transform) -> Self {
        Generators {
            s1,
            s2,
            i1: s1.invert(),
            i2: s2.invert(),
        }
    }

    pub fn get(&self, letter: Letter) -> &Transform {
        match letter {
            Letter::Gen1 => &self.s1,
            Letter::Gen2 => &self.s2,
            Letter::Inv1 => &self.i1,
            Letter::Inv2 => &self.i2,
        }
    }
}

/// Number of words generated before dedup: the identity plus
/// 4·3^k words of length k+1 for every k in 0..=depth.
pub fn word_count(depth: u32) -> usize {
    1 + 4 * pow_sum(3, 0, depth)
}

/// Deduplicated group elements, identity first.
#[derive(Debug, Clone)]
pub struct GroupElements {
    elements: Vec<Transform>,
    generated: usize,
}

impl GroupElements {
    pub fn as_slice(&self) -> &[Transform] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element count before dedup.
    pub fn generated(&self) -> usize {
        self.generated
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transform> {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a GroupElements {
    type Item = &'a Transform;
    type IntoIter = std::slice::Iter<'a, Transform>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// All reduced words of length ≤ depth+1 in generation order, not deduplicated.
pub fn generate_words(gens: &Generators, depth: u32) -> Vec<Transform> {
    let mut words = Vec::with_capacity(word_count(depth));
    words.push(Transform::identity());

    let mut frontier: Vec<(Transform, Letter)> =
        Letter::ALL.iter().map(|&l| (*gens.get(l), l)).collect();
    words.extend(frontier.iter().map(|(f, _)| *f));

    for _ in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * 3);
        for (word, last) in &frontier {
            for letter in last.successors() {
                next.push((word.compose(gens.get(letter)), letter));
            }
        }
        words.extend(next.iter().map(|(f, _)| *f));
        frontier = next;
    }

    words
}

/// Remove elements whose unit-determinant representative lies within `tol`
/// of an earlier kept one.
pub fn dedup_transforms(words: &mut Vec<Transform>, tol: f64) {
    // Normalize once; keep each word paired with its representative.
    let mut paired: Vec<(Transform, Transform)> =
        words.iter().map(|f| (*f, f.normalize())).collect();
    delete_duplicates(&mut paired, |(_, x), (_, y)| x.distance(y) <= tol);
    *words = paired.into_iter().map(|(f, _)| f).collect();
}

/// Grow the group to `depth` generations and deduplicate with tolerance `tol`.
pub fn generate_group(gens: &Generators, depth: u32, tol: f64) -> GroupElements {
    let mut elements = generate_words(gens, depth);
    let generated = elements.len();
    dedup_transforms(&mut elements, tol);
    debug!(
        "group depth={depth}: {generated} words, {} distinct (tol={tol:e})",
        elements.len()
    );
    GroupElements {
        elements,
        generated,
    }
}
