/// Guards the cosine denominator against zero-norm vectors.
pub const EPSILON: f32 = 1e-8;

/// `(v·q) / (‖v‖·‖q‖ + ε)`. A zero vector scores 0 against anything.
pub fn cosine(v: &[f32], q: &[f32]) -> f32 {
    let dot: f32 = v.iter().zip(q).map(|(a, b)| a * b).sum();
    dot / (norm(v) * norm(q) + EPSILON)
}

pub fn norm(v: &[f32]) -> f32 { v.iter().map(|x| x * x).sum::<f32>().sqrt() }

/// Positions of the `k` largest scores, highest first. Equal scores keep
/// their original order: `sort_by` is stable and the comparator is a true
/// descending one (not an ascending sort reversed afterwards).
pub fn top_k_stable(scores: &[f32], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order.truncate(k);
    order
}
