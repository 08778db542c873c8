use clasp_core::{ClaspError, IndexChord, IntervalChord, RngHandle, Sign};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::array::{ChordHandle, IndexArray};
use crate::diagram::ClaspDiagram;
use crate::validate::{validate_array, validate_matrix};

/// Generates a random valid matrix with `n` chords.
///
/// Circle points are shuffled and paired off, so every perfect matching of
/// the `2n` points can appear. Signs are fair coin flips and heights a
/// uniform permutation of `1..=n`.
pub fn random_valid_matrix(
    n: usize,
    rng: &mut RngHandle,
) -> Result<Vec<IntervalChord>, ClaspError> {
    let pairs = random_pairing(n, rng);
    let heights = random_heights(n, rng);
    let mut matrix: Vec<IntervalChord> = pairs
        .into_iter()
        .zip(heights)
        .map(|((start, end), height)| IntervalChord::new(start, end, random_sign(rng), height))
        .collect();
    matrix.sort_by_key(|chord| chord.start);
    validate_matrix(&matrix)?;
    Ok(matrix)
}

/// Generates a random valid array with `n` chords.
///
/// Built directly on the circle: the slot partner of every point is drawn
/// first, then chords are numbered by first occurrence.
pub fn random_valid_array(n: usize, rng: &mut RngHandle) -> Result<IndexArray, ClaspError> {
    let mut partner = vec![0usize; 2 * n];
    for (a, b) in random_pairing(n, rng) {
        partner[a] = b;
        partner[b] = a;
    }
    let heights = random_heights(n, rng);

    let mut array = IndexArray::new();
    let mut handles: Vec<Option<ChordHandle>> = vec![None; 2 * n];
    for position in 0..2 * n {
        let handle = match handles[position] {
            Some(handle) => handle,
            None => {
                let index = array.occurrences().len() + 1;
                let chord = IndexChord::new(index, random_sign(rng), heights[index - 1]);
                let handle = array.intern(chord);
                handles[partner[position]] = Some(handle);
                handle
            }
        };
        array.push_slot(handle);
    }
    validate_array(&array)?;
    Ok(array)
}

/// Generates `count` diagrams with `n` chords each.
///
/// Diagram `k` draws from substream `k` of `master_seed`, so the output
/// depends only on the arguments.
pub fn random_diagrams(
    count: usize,
    n: usize,
    master_seed: u64,
) -> Result<Vec<ClaspDiagram>, ClaspError> {
    (0..count as u64)
        .map(|k| {
            let mut rng = RngHandle::substream(master_seed, k);
            ClaspDiagram::from_matrix(random_valid_matrix(n, &mut rng)?)
        })
        .collect()
}

fn random_pairing(n: usize, rng: &mut RngHandle) -> Vec<(usize, usize)> {
    let mut points: Vec<usize> = (0..2 * n).collect();
    points.shuffle(rng);
    points
        .chunks_exact(2)
        .map(|pair| (pair[0].min(pair[1]), pair[0].max(pair[1])))
        .collect()
}

fn random_heights(n: usize, rng: &mut RngHandle) -> Vec<usize> {
    let mut heights: Vec<usize> = (1..=n).collect();
    heights.shuffle(rng);
    heights
}

fn random_sign(rng: &mut RngHandle) -> Sign {
    if rng.gen_bool(0.5) {
        Sign::Positive
    } else {
        Sign::Negative
    }
}
