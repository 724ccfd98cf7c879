use crate::chess::{Color, Move, Outcome, ParsePositionError, Position, Record};
use crate::{provider::Provider, rules::IllegalMove, rules::Rules, spectator::Spectator};
use derive_more::{Constructor, Display, Error};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{field::display, info, instrument, trace, warn, Span};

mod fault;
mod options;
mod state;
mod validator;

pub use fault::*;
pub use options::*;
pub use state::*;
pub use validator::*;

/// The reason why the [`Referee`] aborted the game.
///
/// The game so far is still available as a [`Record`] whose outcome is [`Outcome::Unknown`].
#[derive(Debug, Display, Error)]
pub enum RefereeError {
    #[display(fmt = "the current position could not be parsed back")]
    ParsePosition {
        source: ParsePositionError,
        #[error(not(source))]
        record: Record,
    },

    #[display(fmt = "a move reported legal could not be applied")]
    Bookkeeping {
        source: IllegalMove,
        #[error(not(source))]
        record: Record,
    },
}

impl RefereeError {
    /// The game up to the point it was aborted.
    pub fn record(&self) -> &Record {
        match self {
            RefereeError::ParsePosition { record, .. } => record,
            RefereeError::Bookkeeping { record, .. } => record,
        }
    }

    /// Converts into the game up to the point it was aborted.
    pub fn into_record(self) -> Record {
        match self {
            RefereeError::ParsePosition { record, .. } => record,
            RefereeError::Bookkeeping { record, .. } => record,
        }
    }
}

#[derive(Debug, Display, Copy, Clone, Eq, PartialEq)]
enum Phase {
    #[display(fmt = "awaiting a move from the {} player", _0)]
    AwaitingMove(Color),
    #[display(fmt = "applying `{}` by the {} player", _1, _0)]
    Applying(Color, Move),
    #[display(fmt = "game over, {}", _0)]
    Terminal(Outcome),
}

/// Arbitrates a game of chess between two [`Provider`]s.
#[derive(Debug, Default, Clone, Constructor)]
pub struct Referee<R: Rules> {
    rules: R,
    options: Options,
}

impl<R: Rules> Referee<R> {
    /// The configured [`Options`].
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Plays a game from `start` until it is over.
    ///
    /// The `spectator` is shown every position reached and is torn down once the game ends,
    /// regardless of how it ends.
    #[instrument(level = "debug", skip(self, white, black, spectator), err,
        fields(%start, outcome))]
    pub async fn play<W, B, S>(
        &self,
        start: Position,
        white: &mut W,
        black: &mut B,
        spectator: &mut S,
    ) -> Result<Record, RefereeError>
    where
        W: Provider + ?Sized,
        B: Provider + ?Sized,
        S: Spectator + ?Sized,
    {
        let mut state = GameState::new(start);
        let mut phase = Phase::AwaitingMove(state.position().turn());
        spectator.render(state.position());

        let outcome = loop {
            trace!(%phase);
            phase = match phase {
                Phase::Terminal(o) => break o,

                Phase::AwaitingMove(side) => {
                    let pos = match self.rules.parse(&state.position().to_string()) {
                        Ok(pos) => pos,
                        Err(source) => {
                            spectator.teardown();
                            let record = state.into_record(Outcome::Unknown);
                            return Err(RefereeError::ParsePosition { source, record });
                        }
                    };

                    if let Some(o) = self.rules.outcome(&pos, state.repetitions()) {
                        Phase::Terminal(o)
                    } else {
                        let request = match side {
                            Color::White => white.play(&pos),
                            Color::Black => black.play(&pos),
                        };

                        let (token, result) = match timeout(self.options.timeout, request).await {
                            Err(_) => (None, Err(Fault::ProviderTimeout(self.options.timeout))),
                            Ok(Err(e)) => (None, Err(Fault::ProviderTransport(e))),
                            Ok(Ok(token)) => {
                                let result = validate(&self.rules, &pos, side, &token);
                                (Some(token), result)
                            }
                        };

                        match result {
                            Ok(m) => {
                                state.reset_failures(side);
                                Phase::Applying(side, m)
                            }

                            Err(fault) => {
                                let failures = state.record_failure(side);
                                warn!(%side, token = token.as_deref().unwrap_or(""), %fault, failures, "rejected");

                                if failures >= self.options.max_retries.get() {
                                    Phase::Terminal(Outcome::FailureExhausted(side))
                                } else {
                                    pause(self.options.backoff).await;
                                    Phase::AwaitingMove(side)
                                }
                            }
                        }
                    }
                }

                Phase::Applying(side, m) => match self.rules.apply(state.position(), m) {
                    Err(source) => {
                        spectator.teardown();
                        let record = state.into_record(Outcome::Unknown);
                        return Err(RefereeError::Bookkeeping { source, record });
                    }

                    Ok((next, san)) => {
                        info!(%side, %m, %san, "applied");
                        state.apply(side, m, next, san);
                        spectator.render(state.position());
                        pause(self.options.pace).await;
                        Phase::AwaitingMove(!side)
                    }
                },
            };
        };

        Span::current().record("outcome", display(outcome));
        spectator.teardown();
        Ok(state.into_record(outcome))
    }
}

async fn pause(d: Duration) {
    if !d.is_zero() {
        sleep(d).await;
    }
}
