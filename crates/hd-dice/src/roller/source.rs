//! Pluggable randomness for the roller.

use std::collections::VecDeque;
use std::future::Future;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies die faces to a roller.
///
/// Each roller (and each nested sub-roller) awaits exactly one call per
/// roll, asking for one face per die in formula order. Local sources are
/// ready immediately; a remote source may suspend until its faces arrive.
pub trait DieSource {
    /// Return one face in `1..=faces[i]` for every entry of `faces`.
    fn roll_dice(&mut self, faces: &[u32]) -> impl Future<Output = Vec<u32>> + Send;
}

/// Draws faces from any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// A reproducible source seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> DieSource for RngSource<R> {
    async fn roll_dice(&mut self, faces: &[u32]) -> Vec<u32> {
        faces
            .iter()
            .map(|&sides| self.0.random_range(1..=sides.max(1)))
            .collect()
    }
}

/// Replays a fixed sequence of faces.
///
/// Values are clamped into the requested die's range. Once the script runs
/// out, every further die shows `fallback`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    faces: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedSource {
    /// Replay `faces` in order, then show 1s.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            fallback: 1,
        }
    }

    /// Set the face shown once the script is exhausted.
    pub fn with_fallback(mut self, face: u32) -> Self {
        self.fallback = face;
        self
    }

    /// Faces not yet consumed.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DieSource for ScriptedSource {
    async fn roll_dice(&mut self, faces: &[u32]) -> Vec<u32> {
        faces
            .iter()
            .map(|&sides| {
                let face = self.faces.pop_front().unwrap_or(self.fallback);
                face.clamp(1, sides.max(1))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rng_source_in_range() {
        let mut source = RngSource::seeded(42);
        let faces = source.roll_dice(&[6; 50]).await;
        assert_eq!(faces.len(), 50);
        assert!(faces.iter().all(|f| (1..=6).contains(f)));
    }

    #[tokio::test]
    async fn rng_source_deterministic() {
        let a = RngSource::seeded(7).roll_dice(&[6; 10]).await;
        let b = RngSource::seeded(7).roll_dice(&[6; 10]).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn scripted_replays_then_falls_back() {
        let mut source = ScriptedSource::new([4, 9, 0]).with_fallback(2);
        assert_eq!(source.roll_dice(&[6, 6, 6, 6]).await, vec![4, 6, 1, 2]);
        assert_eq!(source.remaining(), 0);
    }
}
