use super::{Provider, ProviderError};
use crate::{chess::Position, util::Io};
use async_trait::async_trait;
use derive_more::DebugCustom;
use anyhow::{bail, Context, Error as Anyhow};
use std::{collections::HashMap, fmt::Debug, future::Future, io, pin::Pin, time::Duration};
use tokio::{runtime, task::block_in_place};
use tracing::{error, instrument};
use vampirc_uci::{self as uci, UciFen, UciMessage};

/// Engine options set during the handshake.
pub type UciOptions = HashMap<String, Option<String>>;

type Handshake<T> = Pin<Box<dyn Future<Output = io::Result<T>> + Send + 'static>>;

#[derive(DebugCustom)]
#[debug(bound = "T: Debug")]
enum Lazy<T> {
    #[debug(fmt = "{:?}", _0)]
    Initialized(T),
    #[debug(fmt = "?")]
    Uninitialized(Handshake<T>),
    #[debug(fmt = "!")]
    Failed,
}

impl<T> Lazy<T> {
    async fn get_or_init(&mut self) -> io::Result<&mut T> {
        if let Lazy::Uninitialized(f) = self {
            match f.await {
                Ok(v) => *self = Lazy::Initialized(v),
                Err(e) => {
                    *self = Lazy::Failed;
                    return Err(e);
                }
            }
        }

        match self {
            Lazy::Initialized(v) => Ok(v),
            _ => Err(io::Error::new(
                io::ErrorKind::Other,
                "the engine failed to initialize",
            )),
        }
    }
}

/// A [`Provider`] backed by an engine that speaks the [Universal Chess Interface].
///
/// The handshake is deferred until the first move is requested.
/// A search that was abandoned midway is stopped, and its `bestmove` discarded,
/// before the engine is asked about the next position.
///
/// [Universal Chess Interface]: https://www.chessprogramming.org/UCI
#[derive(Debug)]
pub struct Uci<T: Io> {
    io: Lazy<T>,
    movetime: Option<Duration>,
    searching: bool,
}

impl<T: Io + Send + 'static> Uci<T> {
    /// Constructs [`Uci`] that thinks for `movetime` per move, if set, and with the given [`UciOptions`].
    pub fn new(mut io: T, movetime: Option<Duration>, options: UciOptions) -> Self {
        Uci {
            movetime,
            searching: false,
            io: Lazy::Uninitialized(Box::pin(async move {
                io.send(&UciMessage::Uci.to_string()).await?;
                io.flush().await?;

                while !matches!(uci::parse_one(io.recv().await?.trim()), UciMessage::UciOk) {}

                for (name, value) in options {
                    let set_option = UciMessage::SetOption { name, value };
                    io.send(&set_option.to_string()).await?;
                }

                io.send(&UciMessage::UciNewGame.to_string()).await?;
                io.send(&UciMessage::IsReady.to_string()).await?;
                io.flush().await?;

                while !matches!(uci::parse_one(io.recv().await?.trim()), UciMessage::ReadyOk) {}

                Ok(io)
            })),
        }
    }
}

#[async_trait]
impl<T: Io + Send + 'static> Provider for Uci<T> {
    #[instrument(level = "debug", skip(self, pos), ret, err, fields(%pos))]
    async fn play(&mut self, pos: &Position) -> Result<String, ProviderError> {
        let position = UciMessage::Position {
            startpos: false,
            fen: Some(UciFen(pos.to_string())),
            moves: Vec::new(),
        };

        let go = match self.movetime {
            None => UciMessage::go(),
            Some(t) => UciMessage::go_movetime(
                uci::Duration::from_std(t).unwrap_or_else(|_| uci::Duration::max_value()),
            ),
        };

        let io = self.io.get_or_init().await?;

        if self.searching {
            io.send(&UciMessage::Stop.to_string()).await?;
            io.flush().await?;

            while !matches!(
                uci::parse_one(io.recv().await?.trim()),
                UciMessage::BestMove { .. }
            ) {}

            self.searching = false;
        }

        io.send(&position.to_string()).await?;
        self.searching = true;
        io.send(&go.to_string()).await?;
        io.flush().await?;

        loop {
            if let UciMessage::BestMove { best_move, .. } = uci::parse_one(io.recv().await?.trim())
            {
                self.searching = false;
                break Ok(best_move.to_string());
            }
        }
    }
}

impl<T: Io> Drop for Uci<T> {
    #[instrument(level = "trace", skip(self))]
    fn drop(&mut self) {
        let io = match &mut self.io {
            Lazy::Initialized(io) => io,
            _ => return,
        };

        let result: Result<(), Anyhow> = runtime::Handle::try_current()
            .map_err(Anyhow::from)
            .and_then(|handle| {
                if handle.runtime_flavor() != runtime::RuntimeFlavor::MultiThread {
                    bail!("blocking requires a multi-threaded runtime");
                }

                block_in_place(|| {
                    handle.block_on(async {
                        io.send(&UciMessage::Stop.to_string()).await?;
                        io.send(&UciMessage::Quit.to_string()).await?;
                        io.flush().await?;
                        Ok::<_, Anyhow>(())
                    })
                })
            });

        if let Err(e) = result.context("failed to gracefully shutdown the uci engine") {
            error!("{:?}", e);
        }
    }
}
