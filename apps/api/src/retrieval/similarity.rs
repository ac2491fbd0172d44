//! Cosine similarity and top-K ranking. Pure, no I/O.

use std::cmp::Ordering;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("dimension mismatch: expected {expected}, got {actual} (candidate {index})")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        index: usize,
    },
}

/// A ranked candidate payload with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<P> {
    pub payload: P,
    pub similarity: f32,
}

/// Cosine similarity of two equal-length vectors.
///
/// A zero-norm operand has no direction; its similarity to anything is 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, RankError> {
    if a.len() != b.len() {
        return Err(RankError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
            index: 0,
        });
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0) as f32)
}

/// Ranks `candidates` by cosine similarity to `query` and keeps the best `k`.
///
/// Ordering is descending by similarity; equal scores keep their input order.
/// Any candidate whose length differs from the query fails the whole call.
pub fn rank<V, P, I>(query: &[f32], candidates: I, k: usize) -> Result<Vec<Ranked<P>>, RankError>
where
    V: AsRef<[f32]>,
    I: IntoIterator<Item = (V, P)>,
{
    let mut scored = Vec::new();
    for (index, (vector, payload)) in candidates.into_iter().enumerate() {
        let similarity = cosine_similarity(query, vector.as_ref()).map_err(|e| match e {
            RankError::DimensionMismatch {
                expected, actual, ..
            } => RankError::DimensionMismatch {
                expected,
                actual,
                index,
            },
        })?;
        scored.push(Ranked {
            similarity,
            payload,
        });
    }

    if k == 0 {
        return Ok(Vec::new());
    }

    // Vec::sort_by is stable, which gives the tie-break on input order.
    scored.sort_by(|a, b| descending(a.similarity, b.similarity));
    scored.truncate(k);
    Ok(scored)
}

/// Descending order with NaN (non-finite input vectors) sorted last.
fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
