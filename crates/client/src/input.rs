//! Line-based keyboard input.
//!
//! Actions: `m` move, `a` attack, `l` loot, `s` skip, `q` quit.
//! Directions: `w` north, `a` west, `s` south, `d` east. Full words
//! (`attack`, `north`, ...) are accepted too.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use skirmish_core::{ActionKind, ActionPrompt, CardinalDirection, DirectionPurpose, InputSource};

/// Reads one command per line and writes prompts to `writer`.
///
/// End of input or `q` raises the hang-up flag; the session stops at the
/// next round boundary.
pub struct LineInput<R, W> {
    reader: R,
    writer: W,
    hangup: Arc<AtomicBool>,
}

impl LineInput<io::StdinLock<'static>, io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            hangup: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag that becomes true once the player quits or input ends.
    pub fn hangup_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.hangup)
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        if self.hangup.load(Ordering::Relaxed) {
            return None;
        }
        if let Err(err) = write!(self.writer, "{question} > ").and_then(|()| self.writer.flush()) {
            tracing::warn!(%err, "failed to write prompt");
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                tracing::info!("input closed");
                self.hangup.store(true, Ordering::Relaxed);
                None
            }
            Ok(_) => Some(line.trim().to_ascii_lowercase()),
            Err(err) => {
                tracing::warn!(%err, "failed to read input");
                self.hangup.store(true, Ordering::Relaxed);
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> InputSource for LineInput<R, W> {
    fn choose_action(&mut self, prompt: &ActionPrompt) -> Option<ActionKind> {
        let mut question = format!(
            "{} (HP {}) at {}: [m]ove [a]ttack [l]oot [s]kip [q]uit",
            prompt.name, prompt.hp, prompt.position
        );
        if prompt.can_loot {
            question.push_str(" | something to loot here");
        }
        if prompt.can_attack {
            question.push_str(" | enemy adjacent");
        }

        let answer = self.ask(&question)?;
        if matches!(answer.as_str(), "q" | "quit") {
            self.hangup.store(true, Ordering::Relaxed);
            return Some(ActionKind::Skip);
        }
        parse_action(&answer)
    }

    fn choose_direction(&mut self, purpose: DirectionPurpose) -> Option<CardinalDirection> {
        let answer = self.ask(&format!("{purpose} direction: [w] north [a] west [s] south [d] east"))?;
        parse_direction(&answer)
    }
}

pub fn parse_action(input: &str) -> Option<ActionKind> {
    match input {
        "m" => Some(ActionKind::Move),
        "a" => Some(ActionKind::Attack),
        "l" => Some(ActionKind::Loot),
        "s" => Some(ActionKind::Skip),
        other => ActionKind::from_str(other).ok(),
    }
}

pub fn parse_direction(input: &str) -> Option<CardinalDirection> {
    match input {
        "w" | "n" | "up" => Some(CardinalDirection::North),
        "a" | "left" => Some(CardinalDirection::West),
        "s" | "down" => Some(CardinalDirection::South),
        "d" | "e" | "right" => Some(CardinalDirection::East),
        other => CardinalDirection::from_str(other).ok(),
    }
}

#[cfg(test)]
mod tests {
    use skirmish_core::{CreatureId, Position};

    use super::*;

    fn prompt() -> ActionPrompt {
        ActionPrompt {
            actor: CreatureId::PLAYER,
            name: "Hero".to_owned(),
            position: Position::new(1, 1),
            hp: 100,
            can_loot: true,
            can_attack: false,
        }
    }

    #[test]
    fn letters_and_words_both_parse() {
        assert_eq!(parse_action("m"), Some(ActionKind::Move));
        assert_eq!(parse_action("attack"), Some(ActionKind::Attack));
        assert_eq!(parse_action("dance"), None);
        assert_eq!(parse_direction("a"), Some(CardinalDirection::West));
        assert_eq!(parse_direction("south"), Some(CardinalDirection::South));
        assert_eq!(parse_direction("x"), None);
    }

    #[test]
    fn reads_action_then_direction() {
        let mut input = LineInput::new("M\n d \n".as_bytes(), Vec::new());

        assert_eq!(input.choose_action(&prompt()), Some(ActionKind::Move));
        assert_eq!(
            input.choose_direction(DirectionPurpose::Move),
            Some(CardinalDirection::East)
        );

        let shown = String::from_utf8(input.writer.clone()).unwrap();
        assert!(shown.contains("Hero (HP 100) at (1, 1)"));
        assert!(shown.contains("something to loot here"));
    }

    #[test]
    fn end_of_input_hangs_up() {
        let mut input = LineInput::new("".as_bytes(), Vec::new());
        let hangup = input.hangup_flag();

        assert_eq!(input.choose_action(&prompt()), None);
        assert!(hangup.load(Ordering::Relaxed));
        assert_eq!(input.choose_direction(DirectionPurpose::Attack), None);
    }

    #[test]
    fn quit_skips_and_hangs_up() {
        let mut input = LineInput::new("q\n".as_bytes(), io::sink());
        let hangup = input.hangup_flag();

        assert_eq!(input.choose_action(&prompt()), Some(ActionKind::Skip));
        assert!(hangup.load(Ordering::Relaxed));
    }
}
