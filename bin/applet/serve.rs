use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::Color;
use lib::provider::{answer, ProviderConfig};
use lib::rules::Standard;
use lib::util::{Build, Io, Pipe};
use std::io::ErrorKind;
use tracing::{debug, instrument};

/// Answer move requests on stdin on behalf of one side of the board.
///
/// Each line is a request `{"fen": "<FEN>"}`, answered by either
/// `{"uci": "<move>"}` or `{"error": "<message>"}` on stdout.
#[derive(Debug, Parser)]
pub struct Serve {
    /// The side this server plays for.
    #[clap(short, long)]
    side: Color,

    /// The provider that picks the moves.
    #[clap(default_value_t)]
    provider: ProviderConfig,
}

impl Serve {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let mut provider = self
            .provider
            .build()
            .context("failed to start the provider")?;

        let mut io = Pipe::stdio();

        loop {
            let request = match io.recv().await {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break Ok(()),
                Err(e) => break Err(Anyhow::new(e).context("failed to read the request")),
            };

            if request.trim().is_empty() {
                continue;
            }

            let response = answer(&Standard, self.side, &mut provider, &request).await;
            debug!(?response);

            io.send(&serde_json::to_string(&response)?).await?;
            io.flush().await?;
        }
    }
}
