use crate::chess::{Color, Move, Outcome, Position, Record, San, Zobrist};
use std::collections::HashMap;

/// A move that was applied to the game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ply {
    pub side: Color,
    pub played: Move,
    pub san: San,
}

/// The authoritative state of a game in progress.
///
/// The position only ever changes by [applying](`GameState::apply`) a move.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    start: Position,
    position: Position,
    history: Vec<Ply>,
    failures: [usize; 2],
    seen: HashMap<Zobrist, usize>,
}

fn slot(side: Color) -> usize {
    match side {
        Color::White => 0,
        Color::Black => 1,
    }
}

impl GameState {
    /// Starts a game from the given [`Position`].
    pub fn new(start: Position) -> Self {
        let seen = HashMap::from([(start.zobrist(), 1)]);
        GameState {
            position: start.clone(),
            start,
            history: Vec::new(),
            failures: [0; 2],
            seen,
        }
    }

    /// The position the game started from.
    pub fn start(&self) -> &Position {
        &self.start
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The moves applied so far, in order.
    pub fn history(&self) -> &[Ply] {
        &self.history
    }

    /// How many faults `side` committed in a row.
    pub fn failures(&self, side: Color) -> usize {
        self.failures[slot(side)]
    }

    /// Records one more fault by `side`, returning how many it committed in a row.
    pub fn record_failure(&mut self, side: Color) -> usize {
        let n = &mut self.failures[slot(side)];
        *n += 1;
        *n
    }

    /// Forgets the faults committed by `side`.
    pub fn reset_failures(&mut self, side: Color) {
        self.failures[slot(side)] = 0;
    }

    /// How many times the current position has occurred, including now.
    pub fn repetitions(&self) -> usize {
        self.seen
            .get(&self.position.zobrist())
            .copied()
            .unwrap_or(0)
    }

    /// Appends a move to the history, `next` being the position it leads to.
    pub fn apply(&mut self, side: Color, played: Move, next: Position, san: San) {
        *self.seen.entry(next.zobrist()).or_insert(0) += 1;
        self.history.push(Ply { side, played, san });
        self.position = next;
    }

    /// Converts the game into its [`Record`].
    pub fn into_record(self, outcome: Outcome) -> Record {
        Record {
            start: self.start,
            moves: self.history.into_iter().map(|p| p.san).collect(),
            outcome,
            ..Record::default()
        }
    }
}
