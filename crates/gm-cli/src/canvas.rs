//! ASCII rendering through the spawn interface

use std::collections::BTreeMap;
use std::fmt;

use gm_core::layout::{Orientation, Point};
use gm_core::{ElementCodes, SpawnTag, Spawner};

/// Character grid keyed by screen position
///
/// Later spawns overwrite earlier ones at the same position.
#[derive(Debug, Default)]
pub struct AsciiCanvas {
    glyphs: BTreeMap<Point, char>,
    codes: ElementCodes,
}

impl AsciiCanvas {
    pub fn new(codes: ElementCodes) -> Self {
        Self {
            glyphs: BTreeMap::new(),
            codes,
        }
    }

    pub fn glyph_at(&self, p: Point) -> Option<char> {
        self.glyphs.get(&p).copied()
    }

    fn glyph(&self, tag: SpawnTag) -> char {
        match tag {
            SpawnTag::Floor => '.',
            SpawnTag::Element(e) if e.code == self.codes.closed_cap => 'o',
            SpawnTag::Element(e) if e.code == self.codes.wall => 'X',
            SpawnTag::Element(_) => '?',
            SpawnTag::Wall(variant) => variant.glyph(),
            SpawnTag::Gateway(Orientation::Top) => '^',
            SpawnTag::Gateway(Orientation::Right) => '>',
            SpawnTag::Gateway(Orientation::Bottom) => 'v',
            SpawnTag::Gateway(Orientation::Left) => '<',
        }
    }
}

impl Spawner for AsciiCanvas {
    fn spawn(&mut self, tag: SpawnTag, at: Point) {
        let glyph = self.glyph(tag);
        self.glyphs.insert(at, glyph);
    }
}

impl fmt::Display for AsciiCanvas {
    /// Rows from the highest y down, so up on screen is up in the maze
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.glyphs.keys().next() else {
            return Ok(());
        };
        let (mut lx, mut ly, mut hx, mut hy) = (first.x, first.y, first.x, first.y);
        for p in self.glyphs.keys() {
            lx = lx.min(p.x);
            hx = hx.max(p.x);
            ly = ly.min(p.y);
            hy = hy.max(p.y);
        }

        for y in (ly..=hy).rev() {
            let row: String = (lx..=hx)
                .map(|x| self.glyph_at(Point::new(x, y)).unwrap_or(' '))
                .collect();
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}
