use super::Provider;
use crate::chess::Color;
use crate::rules::Rules;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// A request for a move in the given position.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Request {
    pub fen: String,
}

/// The answer to a [`Request`].
///
/// Serialized as either `{"uci": "<move>"}` or `{"error": "<message>"}`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Uci(String),
    Error(String),
}

/// Answers a serialized [`Request`] on behalf of `side`, using `provider` to pick the move.
///
/// Requests that cannot be parsed, or that ask for a move when it is not `side`'s turn,
/// are answered with [`Response::Error`] without consulting `provider`.
#[instrument(level = "debug", skip(rules, provider), ret)]
pub async fn answer<R, P>(rules: &R, side: Color, provider: &mut P, request: &str) -> Response
where
    R: Rules + ?Sized,
    P: Provider + Send + ?Sized,
{
    let Request { fen } = match serde_json::from_str(request.trim()) {
        Ok(r) => r,
        Err(e) => {
            warn!(%e, "malformed request");
            return Response::Error(format!("malformed request: {e}"));
        }
    };

    let pos = match rules.parse(&fen) {
        Ok(pos) => pos,
        Err(e) => return Response::Error(format!("invalid FEN `{fen}`: {e}")),
    };

    if pos.turn() != side {
        return Response::Error(format!("it is not the {side} player's turn"));
    }

    match provider.play(&pos).await {
        Ok(token) => Response::Uci(token),
        Err(e) => Response::Error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Position;
    use crate::provider::{MockProvider, ProviderError};
    use crate::rules::Standard;
    use std::future::ready;
    use test_strategy::proptest;
    use tokio::runtime;

    #[test]
    fn responses_are_externally_tagged() {
        assert_eq!(
            serde_json::to_string(&Response::Uci("e2e4".into())).unwrap(),
            r#"{"uci":"e2e4"}"#
        );

        assert_eq!(
            serde_json::from_str::<Response>(r#"{"error": "no idea"}"#).unwrap(),
            Response::Error("no idea".into())
        );
    }

    #[test]
    fn requests_carry_the_fen() {
        let fen = Position::default().to_string();
        assert_eq!(
            serde_json::to_string(&Request { fen: fen.clone() }).unwrap(),
            format!(r#"{{"fen":"{fen}"}}"#)
        );
    }

    #[proptest]
    fn answer_relays_the_provider_move(
        #[filter(!Standard.legal_moves(&#pos).is_empty())] pos: Position,
        token: String,
    ) {
        let rt = runtime::Builder::new_multi_thread().build()?;

        let mut provider = MockProvider::new();
        let t = token.clone();
        provider
            .expect_play()
            .once()
            .returning(move |_| Box::pin(ready(Ok(t.clone()))));

        let request = serde_json::to_string(&Request {
            fen: pos.to_string(),
        })?;

        assert_eq!(
            rt.block_on(answer(&Standard, pos.turn(), &mut provider, &request)),
            Response::Uci(token)
        );
    }

    #[proptest]
    fn answer_rejects_requests_for_the_other_side(pos: Position) {
        let rt = runtime::Builder::new_multi_thread().build()?;

        let mut provider = MockProvider::new();
        provider.expect_play().never();

        let request = serde_json::to_string(&Request {
            fen: pos.to_string(),
        })?;

        assert!(matches!(
            rt.block_on(answer(&Standard, !pos.turn(), &mut provider, &request)),
            Response::Error(_)
        ));
    }

    #[test]
    fn answer_rejects_invalid_fen() {
        let rt = runtime::Builder::new_multi_thread().build().unwrap();

        let mut provider = MockProvider::new();
        provider.expect_play().never();

        let request = r#"{"fen": "not a position"}"#;
        assert!(matches!(
            rt.block_on(answer(&Standard, Color::White, &mut provider, request)),
            Response::Error(_)
        ));
    }

    #[test]
    fn answer_rejects_malformed_requests() {
        let rt = runtime::Builder::new_multi_thread().build().unwrap();

        let mut provider = MockProvider::new();
        provider.expect_play().never();

        assert!(matches!(
            rt.block_on(answer(&Standard, Color::White, &mut provider, "e2e4")),
            Response::Error(_)
        ));
    }

    #[test]
    fn answer_reports_provider_failures() {
        let rt = runtime::Builder::new_multi_thread().build().unwrap();

        let mut provider = MockProvider::new();
        provider
            .expect_play()
            .once()
            .returning(|_| Box::pin(ready(Err(ProviderError::Empty))));

        let request = serde_json::to_string(&Request {
            fen: Position::default().to_string(),
        })
        .unwrap();

        assert_eq!(
            rt.block_on(answer(&Standard, Color::White, &mut provider, &request)),
            Response::Error(ProviderError::Empty.to_string())
        );
    }
}
