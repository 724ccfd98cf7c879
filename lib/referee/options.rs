use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroUsize, str::FromStr, time::Duration};

/// Configuration for the [`Referee`][`super::Referee`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Options {
    /// How many consecutive faults a side may commit before it forfeits.
    pub max_retries: NonZeroUsize,

    /// How long to wait for a provider to answer.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// How long to wait before asking again after a fault.
    #[serde(with = "humantime_serde")]
    pub backoff: Duration,

    /// How long to wait after each move.
    #[serde(with = "humantime_serde")]
    pub pace: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_retries: NonZeroUsize::new(5).unwrap_or(NonZeroUsize::MIN),
            timeout: Duration::from_secs(90),
            backoff: Duration::from_secs(1),
            pace: Duration::ZERO,
        }
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = ron::ser::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// The reason why parsing [`Options`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse referee options")]
pub struct ParseOptionsError(ron::de::SpannedError);

impl FromStr for Options {
    type Err = ParseOptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Options {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        let millis = || (0u64..3_600_000).prop_map(Duration::from_millis);
        (1usize..100, millis(), millis(), millis())
            .prop_filter_map("zero retries", |(r, timeout, backoff, pace)| {
                Some(Options {
                    max_retries: NonZeroUsize::new(r)?,
                    timeout,
                    backoff,
                    pace,
                })
            })
            .boxed()
    }
}
