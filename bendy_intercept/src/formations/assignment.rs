//! One-to-one defender to slot assignment minimising total squared travel.
//!
//! Small teams are solved exactly by walking every permutation in
//! lexicographic order with a pruned running cost, so ties always resolve to
//! the lexicographically first permutation. Larger teams go through the
//! Kuhn-Munkres algorithm instead.
use pathfinding::kuhn_munkres::kuhn_munkres_min;
use pathfinding::matrix::Matrix;
use tracing::trace;

use crate::Point;

/// Largest team solved by exhaustive search (8! = 40320 permutations)
pub const BRUTE_FORCE_LIMIT: usize = 8;

/// Squared distances are scaled by this before being rounded for the
/// integer-weighted Kuhn-Munkres solver.
const COST_SCALE: f64 = 1e6;

/// Returns `slot_to_agent`, where `slot_to_agent[slot]` is the index into
/// `agents` assigned to `slots[slot]`.
///
/// Both slices must have the same length.
pub fn assign_min_cost(agents: &[Point], slots: &[Point]) -> Vec<usize> {
    debug_assert_eq!(agents.len(), slots.len());
    let n = agents.len().min(slots.len());
    if n <= BRUTE_FORCE_LIMIT {
        brute_force(&agents[..n], &slots[..n])
    } else {
        kuhn_munkres(&agents[..n], &slots[..n])
    }
}

/// Total squared distance of an assignment
pub fn assignment_cost(agents: &[Point], slots: &[Point], slot_to_agent: &[usize]) -> f64 {
    slot_to_agent
        .iter()
        .enumerate()
        .map(|(slot, agent)| (agents[*agent] - slots[slot]).norm_squared())
        .sum()
}

fn brute_force(agents: &[Point], slots: &[Point]) -> Vec<usize> {
    let n = agents.len();
    let mut perm: Vec<usize> = (0..n).collect();
    let mut best_perm = perm.clone();
    let mut best_cost = f64::INFINITY;

    loop {
        let mut cost = 0.0;
        let mut pruned = false;
        for (slot, agent) in perm.iter().enumerate() {
            cost += (agents[*agent] - slots[slot]).norm_squared();
            if cost >= best_cost {
                pruned = true;
                break;
            }
        }
        if !pruned {
            best_cost = cost;
            best_perm.copy_from_slice(&perm);
        }
        if !next_permutation(&mut perm) {
            break;
        }
    }
    trace!(cost = best_cost, assignment = ?best_perm, "exhaustive assignment");
    best_perm
}

fn kuhn_munkres(agents: &[Point], slots: &[Point]) -> Vec<usize> {
    let n = agents.len();
    // rows are slots, columns are agents
    let weights = Matrix::from_fn(n, n, |(slot, agent)| {
        ((agents[agent] - slots[slot]).norm_squared() * COST_SCALE).round() as i64
    });
    let (cost, slot_to_agent) = kuhn_munkres_min(&weights);
    trace!(cost, "kuhn-munkres assignment");
    slot_to_agent
}

/// Rearranges `perm` into the next lexicographic permutation. Returns false
/// (leaving `perm` untouched) once the last permutation has been reached.
pub fn next_permutation(perm: &mut [usize]) -> bool {
    if perm.len() < 2 {
        return false;
    }
    let mut i = perm.len() - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = perm.len() - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}
