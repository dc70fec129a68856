//! Terminal rendering with crossterm.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, PrintStyledContent, Stylize};
use skirmish_core::{RenderSink, WorldSnapshot};

/// Draws each frame as a bordered grid followed by a status line.
///
/// ```text
/// +-------+
/// |.x.....|
/// |...#.C.|
/// +-------+
/// Hero  HP 100/100  at (1, 0)  |  3 creatures, 2 objects
/// ```
pub struct TerminalRenderer<W> {
    out: W,
    color: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    fn glyph_color(glyph: char) -> Option<Color> {
        match glyph {
            WorldSnapshot::FOCUS_GLYPH => Some(Color::Green),
            WorldSnapshot::CREATURE_GLYPH => Some(Color::Red),
            WorldSnapshot::OBJECT_GLYPH => Some(Color::Yellow),
            WorldSnapshot::WALL_GLYPH => Some(Color::DarkGrey),
            _ => None,
        }
    }

    fn draw_row(&mut self, row: &str) -> io::Result<()> {
        queue!(self.out, Print('|'))?;
        for glyph in row.chars() {
            match Self::glyph_color(glyph).filter(|_| self.color) {
                Some(color) => queue!(self.out, PrintStyledContent(glyph.with(color)))?,
                None => queue!(self.out, Print(glyph))?,
            }
        }
        queue!(self.out, Print("|\n"))
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn render(&mut self, snapshot: &WorldSnapshot) -> io::Result<()> {
        let border = format!("+{}+\n", "-".repeat(snapshot.dimensions.width as usize));

        queue!(self.out, Print('\n'), Print(&border))?;
        for row in snapshot.rows() {
            self.draw_row(&row)?;
        }
        queue!(self.out, Print(&border))?;

        let census = format!(
            "{} creatures, {} objects",
            snapshot.creatures.len(),
            snapshot.objects.len()
        );
        let status = match snapshot.focused() {
            Some(focus) => format!(
                "{}  HP {}/{}  at {}  |  {census}\n",
                focus.name, focus.hp, focus.max_hp, focus.position
            ),
            None => format!("{census}\n"),
        };
        queue!(self.out, Print(status))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use skirmish_core::{AuditLog, CreaturePlacement, CreatureId, DifficultyTier, ScenarioBuilder, WorldDescriptor};

    use super::*;

    #[test]
    fn plain_frame_has_border_rows_and_status() {
        let descriptor = WorldDescriptor::new(3, 2, DifficultyTier::Easy)
            .with_creature(CreaturePlacement::player("Hero").at(1, 0));
        let scenario = ScenarioBuilder::new(&descriptor)
            .build(&mut AuditLog::new())
            .unwrap();
        let snapshot = scenario.world.snapshot(Some(CreatureId::PLAYER));

        let mut renderer = TerminalRenderer::new(Vec::new(), false);
        renderer.render(&snapshot).unwrap();

        let frame = String::from_utf8(renderer.out).unwrap();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(
            lines,
            vec![
                "",
                "+---+",
                "|.x.|",
                "|...|",
                "+---+",
                "Hero  HP 100/100  at (1, 0)  |  1 creatures, 0 objects",
            ]
        );
    }
}
