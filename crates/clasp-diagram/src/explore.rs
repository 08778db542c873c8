use clasp_core::{ClaspError, RngHandle, Sign};
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::config::{ExplorationConfig, InvariantCheck, MoveConfig};
use crate::diagram::ClaspDiagram;
use crate::moves::{Move, MoveKind, MOVE_TABLE};

/// Enumerates every parameterised move whose preconditions hold on `diagram`.
///
/// Moves are listed in move table order. Insertions cover every anchor
/// point, height and sign, plus the wraparound position. Under
/// [`InvariantCheck::Exact`], erasing or inserting a positive chord is left
/// out, since it negates the polynomial.
pub fn applicable_moves(diagram: &ClaspDiagram, config: &MoveConfig) -> Vec<Move> {
    let n = diagram.chord_count();
    let mut moves = Vec::new();

    for i in 1..=n {
        for j in i + 1..=n {
            moves.push(Move::ExchangeHeights { i, j });
        }
    }
    moves.push(Move::CyclicShift);
    moves.push(Move::InverseCyclicShift);
    for i in 1..=n {
        moves.push(Move::EraseIsolatedChord { i });
    }
    for height in 1..=n + 1 {
        for sign in [Sign::Positive, Sign::Negative] {
            for after_point in -1..diagram.point_count() as isize {
                moves.push(Move::AddIsolatedChord {
                    after_point,
                    sign,
                    height,
                    wraparound: false,
                });
            }
            moves.push(Move::AddIsolatedChord {
                after_point: -1,
                sign,
                height,
                wraparound: true,
            });
        }
    }

    moves.retain(|mv| mv.check(diagram, config).is_ok());
    if config.invariant_check == InvariantCheck::Exact {
        moves.retain(|mv| !negates_polynomial(diagram, mv));
    }
    moves
}

/// Whether `mv` adds or removes a positive isolated chord, which contributes
/// a diagonal factor of `-1` to the skein determinant.
fn negates_polynomial(diagram: &ClaspDiagram, mv: &Move) -> bool {
    match *mv {
        Move::EraseIsolatedChord { i } => diagram
            .chord(i)
            .map_or(false, |chord| chord.sign == Sign::Positive),
        Move::AddIsolatedChord { sign, .. } => sign == Sign::Positive,
        _ => false,
    }
}

/// Applies `config.steps` random moves starting from `start`.
///
/// Each step draws a move family uniformly among the families with an
/// applicable instance, then an instance uniformly within the family.
/// Insertions are withheld once the diagram holds `config.max_chords`
/// chords. The returned trajectory starts with `start` and has
/// `config.steps + 1` entries, all sharing the Alexander polynomial of
/// `start` up to sign.
pub fn random_walk(
    start: &ClaspDiagram,
    config: &ExplorationConfig,
    rng: &mut RngHandle,
) -> Result<Vec<ClaspDiagram>, ClaspError> {
    let mut trajectory = Vec::with_capacity(config.steps + 1);
    trajectory.push(start.clone());
    let mut current = start.clone();

    for step in 0..config.steps {
        let candidates = applicable_moves(&current, &config.moves);
        let kinds: Vec<MoveKind> = MOVE_TABLE
            .iter()
            .map(|(_, kind)| *kind)
            .filter(|kind| {
                *kind != MoveKind::AddIsolatedChord || current.chord_count() < config.max_chords
            })
            .filter(|kind| candidates.iter().any(|mv| mv.kind() == *kind))
            .collect();

        // Move B always applies, so a family is always available.
        if let Some(kind) = kinds.choose(rng) {
            let family: Vec<&Move> = candidates.iter().filter(|mv| mv.kind() == *kind).collect();
            if let Some(mv) = family.choose(rng) {
                current = mv.apply(&current, &config.moves)?;
                trace!(step, %mv, "walk step");
            }
        }
        trajectory.push(current.clone());
    }

    debug!(
        seed = rng.seed(),
        steps = config.steps,
        final_chords = current.chord_count(),
        "random walk finished"
    );
    Ok(trajectory)
}
