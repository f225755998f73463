//! Decision trail tokenizer.
//!
//! A trail is a whitespace-separated token stream. A rule reference is a
//! decimal id followed by one outcome letter, either fused (`12d`) or split
//! across two tokens (`12 d`). In the split form the outcome token's last
//! character is the code and any digits before it are ignored. A lone `F`
//! terminates the trail when no rule decided.

use super::Outcome;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    Rule { id: u32, outcome: Outcome },
    Fallthrough,
}

impl TraceEvent {
    pub fn outcome(self) -> Outcome {
        match self {
            TraceEvent::Rule { outcome, .. } => outcome,
            TraceEvent::Fallthrough => Outcome::Fallthrough,
        }
    }

    pub fn rule_id(self) -> Option<u32> {
        match self {
            TraceEvent::Rule { id, .. } => Some(id),
            TraceEvent::Fallthrough => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum State<'a> {
    ExpectIdOrF,
    /// Saw a bare id at token `position`; the next token carries its outcome.
    ExpectOutcome {
        id: u32,
        token: &'a str,
        position: usize,
    },
}

fn malformed(position: usize, token: &str, reason: &'static str) -> Error {
    Error::MalformedTrace {
        position,
        token: token.to_string(),
        reason,
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_id(position: usize, token: &str, digits: &str) -> Result<u32> {
    digits
        .parse()
        .map_err(|_| malformed(position, token, "rule id out of range"))
}

/// Split a token into everything-but-the-last-char and the last char.
fn split_last(token: &str) -> Option<(&str, char)> {
    let (idx, c) = token.char_indices().next_back()?;
    Some((&token[..idx], c))
}

/// Decode a trail into events, in the order the rules were considered.
pub fn decode(trail: &str) -> Result<Vec<TraceEvent>> {
    let mut events = Vec::new();
    let mut state = State::ExpectIdOrF;

    for (i, token) in trail.split_whitespace().enumerate() {
        let position = i + 1;
        state = match state {
            State::ExpectIdOrF => {
                if token == "F" {
                    events.push(TraceEvent::Fallthrough);
                    State::ExpectIdOrF
                } else if all_digits(token) {
                    State::ExpectOutcome {
                        id: parse_id(position, token, token)?,
                        token,
                        position,
                    }
                } else {
                    let Some((digits, code)) = split_last(token) else {
                        return Err(malformed(position, token, "empty token"));
                    };
                    if digits.is_empty() || !all_digits(digits) {
                        return Err(malformed(position, token, "expected rule id or F"));
                    }
                    let outcome = Outcome::from_rule_code(code)
                        .ok_or_else(|| malformed(position, token, "unknown outcome code"))?;
                    events.push(TraceEvent::Rule {
                        id: parse_id(position, token, digits)?,
                        outcome,
                    });
                    State::ExpectIdOrF
                }
            }
            State::ExpectOutcome { id, .. } => {
                let Some((rest, code)) = split_last(token) else {
                    return Err(malformed(position, token, "empty token"));
                };
                if !all_digits(rest) {
                    return Err(malformed(position, token, "expected outcome code"));
                }
                let outcome = Outcome::from_rule_code(code)
                    .ok_or_else(|| malformed(position, token, "unknown outcome code"))?;
                events.push(TraceEvent::Rule { id, outcome });
                State::ExpectIdOrF
            }
        };
    }

    if let State::ExpectOutcome { token, position, .. } = state {
        return Err(malformed(position, token, "rule id without outcome code"));
    }
    Ok(events)
}
