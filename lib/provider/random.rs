use super::{Provider, ProviderError};
use crate::chess::Position;
use crate::rules::{Rules, Standard};
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::instrument;

/// A [`Provider`] that plays random, but stable, legal moves.
///
/// The choice depends only on the seed, the position, and how many moves were requested before.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Random {
    seed: u64,
    requests: u64,
}

impl Random {
    /// Constructs [`Random`] with the given seed.
    pub fn new(seed: u64) -> Self {
        Random { seed, requests: 0 }
    }
}

#[async_trait]
impl Provider for Random {
    #[instrument(level = "debug", skip(self, pos), ret, err, fields(%pos))]
    async fn play(&mut self, pos: &Position) -> Result<String, ProviderError> {
        let moves = Standard.legal_moves(pos);
        if moves.is_empty() {
            return Err(ProviderError::Refused("there are no legal moves".into()));
        }

        let mut hasher = DefaultHasher::new();
        (self.seed, self.requests, pos.zobrist()).hash(&mut hasher);
        self.requests += 1;

        let idx = (hasher.finish() % moves.len() as u64) as usize;
        Ok(moves[idx].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;
    use tokio::runtime;

    #[proptest]
    fn plays_legal_moves(#[filter(!Standard.legal_moves(&#pos).is_empty())] pos: Position, seed: u64) {
        let rt = runtime::Builder::new_multi_thread().build()?;
        let token = rt.block_on(Random::new(seed).play(&pos))?;
        assert!(Standard.legal_moves(&pos).contains(&token.parse()?));
    }

    #[proptest]
    fn choice_is_stable(#[filter(!Standard.legal_moves(&#pos).is_empty())] pos: Position, seed: u64) {
        let rt = runtime::Builder::new_multi_thread().build()?;
        assert_eq!(
            rt.block_on(Random::new(seed).play(&pos))?,
            rt.block_on(Random::new(seed).play(&pos))?
        );
    }

    #[test]
    fn refuses_to_move_in_terminal_positions() {
        let rt = runtime::Builder::new_multi_thread().build().unwrap();
        let pos: Position = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(matches!(
            rt.block_on(Random::default().play(&pos)),
            Err(ProviderError::Refused(_))
        ));
    }
}
