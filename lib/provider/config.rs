use super::{Provider, ProviderError, Random, Remote, Uci, UciOptions};
use crate::{chess::Position, util::Build, util::Process};
use async_trait::async_trait;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{fmt, io, str::FromStr, time::Duration};

/// Runtime configuration for a [`Player`].
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum ProviderConfig {
    /// A child process that speaks JSON lines.
    Process(String),

    /// A child process that speaks UCI.
    Uci(
        String,
        #[serde(default, with = "humantime_serde")]
        #[cfg_attr(test, strategy(proptest::option::of(
            proptest::strategy::Strategy::prop_map(0u64..3_600_000, Duration::from_millis)
        )))]
        Option<Duration>,
        #[serde(default)] UciOptions,
    ),

    /// The in-process pseudo-random mover.
    Random {
        #[serde(default)]
        seed: u64,
    },
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Random { seed: 0 }
    }
}

impl fmt::Display for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = ron::ser::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// The reason why parsing [`ProviderConfig`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse provider configuration")]
pub struct ParseProviderConfigError(ron::de::SpannedError);

impl FromStr for ProviderConfig {
    type Err = ParseProviderConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

/// A generic [`Provider`].
#[derive(Debug, From)]
pub enum Player {
    Remote(Remote<Process>),
    Uci(Uci<Process>),
    Random(Random),
}

#[async_trait]
impl Provider for Player {
    async fn play(&mut self, pos: &Position) -> Result<String, ProviderError> {
        match self {
            Player::Remote(p) => p.play(pos).await,
            Player::Uci(p) => p.play(pos).await,
            Player::Random(p) => p.play(pos).await,
        }
    }
}

impl Build for ProviderConfig {
    type Output = Player;
    type Error = io::Error;

    fn build(self) -> Result<Self::Output, Self::Error> {
        match self {
            ProviderConfig::Process(path) => Ok(Remote::new(Process::spawn(&path)?).into()),
            ProviderConfig::Uci(path, movetime, options) => {
                Ok(Uci::new(Process::spawn(&path)?, movetime, options).into())
            }
            ProviderConfig::Random { seed } => Ok(Random::new(seed).into()),
        }
    }
}
