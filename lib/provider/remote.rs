use super::{Provider, ProviderError, Request, Response};
use crate::{chess::Position, util::Io};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// A [`Provider`] that speaks JSON lines over an [`Io`] channel.
///
/// Each move is requested as `{"fen": "<FEN>"}` and answered by a single [`Response`] line.
/// Replies arrive in request order, so answers to abandoned requests are skipped.
#[derive(Debug)]
pub struct Remote<T: Io> {
    io: T,
    pending: usize,
}

impl<T: Io> Remote<T> {
    pub fn new(io: T) -> Self {
        Remote { io, pending: 0 }
    }
}

#[async_trait]
impl<T: Io + Send> Provider for Remote<T> {
    #[instrument(level = "debug", skip(self, pos), ret, err, fields(%pos))]
    async fn play(&mut self, pos: &Position) -> Result<String, ProviderError> {
        let request = serde_json::to_string(&Request {
            fen: pos.to_string(),
        })?;

        self.pending += 1;
        self.io.send(&request).await?;
        self.io.flush().await?;

        while self.pending > 1 {
            let stale = self.io.recv().await?;
            self.pending -= 1;
            debug!(%stale, "discarded the answer to an abandoned request");
        }

        let line = self.io.recv().await?;
        self.pending -= 1;
        if line.trim().is_empty() {
            return Err(ProviderError::Empty);
        }

        match serde_json::from_str(line.trim())? {
            Response::Uci(token) if token.trim().is_empty() => Err(ProviderError::Empty),
            Response::Uci(token) => Ok(token),
            Response::Error(msg) => Err(ProviderError::Refused(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{MockIo, Pipe};
    use mockall::Sequence;
    use std::{future::ready, io, time::Duration};
    use test_strategy::proptest;
    use tokio::io::{duplex, split};
    use tokio::runtime;
    use tokio::time::{sleep, timeout};

    fn remote(pos: &Position, answer: io::Result<String>) -> Remote<MockIo> {
        let mut io = MockIo::new();
        let mut seq = Sequence::new();

        let request = format!(r#"{{"fen":"{}"}}"#, pos);
        io.expect_send()
            .once()
            .in_sequence(&mut seq)
            .withf(move |msg| msg == request)
            .returning(|_| Box::pin(ready(Ok(()))));

        io.expect_flush()
            .once()
            .in_sequence(&mut seq)
            .returning(|| Box::pin(ready(Ok(()))));

        let mut answer = Some(answer);
        io.expect_recv()
            .once()
            .in_sequence(&mut seq)
            .returning(move || Box::pin(ready(answer.take().unwrap_or(Ok(String::new())))));

        Remote::new(io)
    }

    #[proptest]
    fn returns_the_token_verbatim(pos: Position, #[strategy("[a-z0-9]{1,8}")] token: String) {
        let rt = runtime::Builder::new_multi_thread().build()?;
        let mut provider = remote(&pos, Ok(format!(r#"{{"uci":"{token}"}}"#)));
        assert_eq!(rt.block_on(provider.play(&pos))?, token);
    }

    #[proptest]
    fn explicit_errors_are_refusals(pos: Position, #[strategy("[a-z ]*")] msg: String) {
        let rt = runtime::Builder::new_multi_thread().build()?;
        let mut provider = remote(&pos, Ok(format!(r#"{{"error":"{msg}"}}"#)));
        assert!(matches!(
            rt.block_on(provider.play(&pos)),
            Err(ProviderError::Refused(m)) if m == msg
        ));
    }

    #[proptest]
    fn blank_answers_are_empty(pos: Position, #[strategy("[ \t]*")] blank: String) {
        let rt = runtime::Builder::new_multi_thread().build()?;

        let mut provider = remote(&pos, Ok(blank.clone()));
        assert!(matches!(
            rt.block_on(provider.play(&pos)),
            Err(ProviderError::Empty)
        ));

        let mut provider = remote(&pos, Ok(format!(r#"{{"uci":"{blank}"}}"#)));
        assert!(matches!(
            rt.block_on(provider.play(&pos)),
            Err(ProviderError::Empty)
        ));
    }

    #[proptest]
    fn unintelligible_answers_are_protocol_errors(pos: Position) {
        let rt = runtime::Builder::new_multi_thread().build()?;
        let mut provider = remote(&pos, Ok("e2e4".into()));
        assert!(matches!(
            rt.block_on(provider.play(&pos)),
            Err(ProviderError::Protocol(_))
        ));
    }

    #[proptest]
    fn io_failures_are_propagated(pos: Position) {
        let rt = runtime::Builder::new_multi_thread().build()?;
        let mut provider = remote(&pos, Err(io::ErrorKind::UnexpectedEof.into()));
        assert!(matches!(
            rt.block_on(provider.play(&pos)),
            Err(ProviderError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof
        ));
    }

    #[test]
    fn answers_to_abandoned_requests_are_discarded() {
        let rt = runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();

        let start = Position::default();
        let next: Position = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
            .parse()
            .unwrap();

        rt.block_on(async {
            let (client, server) = duplex(1024);

            let (r, w) = split(server);
            let mut server = Pipe::new(w, r);
            let initial = start.to_string();
            tokio::spawn(async move {
                let mut delay = Some(Duration::from_millis(300));
                while let Ok(line) = server.recv().await {
                    let request: Request = serde_json::from_str(&line).unwrap();
                    if let Some(d) = delay.take() {
                        sleep(d).await;
                    }

                    let token = if request.fen == initial { "e2e4" } else { "g1f3" };
                    let response = serde_json::to_string(&Response::Uci(token.into())).unwrap();
                    server.send(&response).await.unwrap();
                    server.flush().await.unwrap();
                }
            });

            let (r, w) = split(client);
            let mut provider = Remote::new(Pipe::new(w, r));

            assert!(timeout(Duration::from_millis(50), provider.play(&start))
                .await
                .is_err());

            assert_eq!(provider.play(&start).await.unwrap(), "e2e4");
            assert_eq!(provider.play(&next).await.unwrap(), "g1f3");
            assert_eq!(provider.pending, 0);
        });
    }

    #[test]
    fn abandoned_requests_are_drained_before_the_next_answer() {
        let rt = runtime::Builder::new_multi_thread().build().unwrap();
        let pos = Position::default();

        let mut io = MockIo::new();
        let mut seq = Sequence::new();

        io.expect_send()
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(ready(Ok(()))));

        io.expect_flush()
            .once()
            .in_sequence(&mut seq)
            .returning(|| Box::pin(ready(Ok(()))));

        io.expect_recv()
            .times(3)
            .in_sequence(&mut seq)
            .returning(|| Box::pin(ready(Ok(r#"{"uci":"a2a3"}"#.into()))));

        io.expect_recv()
            .once()
            .in_sequence(&mut seq)
            .returning(|| Box::pin(ready(Ok(r#"{"uci":"e2e4"}"#.into()))));

        let mut provider = Remote { io, pending: 3 };
        assert_eq!(rt.block_on(provider.play(&pos)).unwrap(), "e2e4");
        assert_eq!(provider.pending, 0);
    }
}
