use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::Position;
use lib::provider::ProviderConfig;
use lib::referee::{Options, Referee};
use lib::rules::Standard;
use lib::spectator::{Silent, Spectator, Terminal};
use lib::util::Build;
use std::{fs, path::PathBuf};
use tracing::{info, instrument};

/// Referee a game of chess between two players.
///
/// The game record is printed to stdout and saved as PGN, even if the game is aborted.
#[derive(Debug, Parser)]
pub struct Play {
    /// Referee options, e.g. `(max_retries: 5, timeout: "90s", backoff: "1s", pace: "0s")`.
    #[clap(short, long, default_value_t)]
    options: Options,

    /// The starting position in FEN.
    #[clap(long, default_value_t)]
    fen: Position,

    /// Where to save the game record.
    #[clap(long, default_value = "game_record.pgn")]
    pgn: PathBuf,

    /// Draw the board on stderr after every move.
    #[clap(long)]
    board: bool,

    /// The player with the white pieces, e.g. `process("./agent")`.
    white: ProviderConfig,

    /// The player with the black pieces, e.g. `uci("stockfish", Some("1s"))`.
    black: ProviderConfig,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let mut white = self.white.clone().build().context("failed to start the white player")?;
        let mut black = self.black.clone().build().context("failed to start the black player")?;

        let mut spectator: Box<dyn Spectator> = if self.board {
            Box::new(Terminal::stderr())
        } else {
            Box::new(Silent)
        };

        let referee = Referee::new(Standard, self.options);
        let result = referee
            .play(self.fen, &mut white, &mut black, spectator.as_mut())
            .await;

        let (mut record, aborted) = match result {
            Ok(record) => (record, None),
            Err(e) => (e.record().clone(), Some(e)),
        };

        record.white = self.white.to_string();
        record.black = self.black.to_string();

        info!(outcome = %record.outcome, moves = record.moves.len());
        println!("{}\n", record);

        fs::write(&self.pgn, format!("{}\n", record))
            .with_context(|| format!("failed to save the game record to `{}`", self.pgn.display()))?;

        match aborted {
            None => Ok(()),
            Some(e) => Err(Anyhow::new(e).context("the game was aborted")),
        }
    }
}
