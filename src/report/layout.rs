//! Line classification for advisory text.
//!
//! Each trimmed line is matched against these rules, first match wins:
//!
//! 1. `#`..`######` + space → [`Block::Heading`]
//! 2. `Capitalized Words:` → [`Block::SubHeading`] (colon dropped)
//! 3. `- ` / `* ` → [`Block::Bullet`]
//! 4. `|...|` → table row, buffered; the machine moves to `InsideTable`
//! 5. blank line while `InsideTable` → buffered rows flushed as one [`Block::Table`]
//! 6. any other line while `InsideTable` → absorbed as a (usually empty) table row
//! 7. anything else → [`Block::Paragraph`]
//!
//! Rules 1-3 fire even while a table is open; the table keeps buffering and is
//! emitted when it closes, so such blocks precede it. Rule 6 is kept as an
//! explicit transition ([`Transition::Absorb`]) rather than closing the table.
//! Markdown alignment rows (`|---|:--:|`) are dropped from the buffer.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"^(#{1,6})\s+(.*)$").unwrap();
    static ref SUB_HEADING: Regex = Regex::new(r"^[A-Z][A-Za-z ]*:$").unwrap();
    static ref BULLET: Regex = Regex::new(r"^[-*]\s+(.*)$").unwrap();
    static ref TABLE_ROW: Regex = Regex::new(r"^\|.*\|$").unwrap();
    static ref ALIGNMENT_CELL: Regex = Regex::new(r"^:?-+:?$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    SubHeading(String),
    Bullet(String),
    Table(Table),
    Paragraph(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState {
    OutsideTable,
    InsideTable(Vec<Vec<String>>),
}

/// What a line did to the table state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The line produced a standalone block; table state untouched.
    Emit,
    /// A pipe row was buffered (opens the table if needed).
    Buffer,
    /// A blank line closed the open table.
    Close,
    /// A non-table line was absorbed into the open table.
    Absorb,
}

#[derive(Debug)]
pub struct LayoutMachine {
    state: TableState,
    blocks: Vec<Block>,
}

impl Default for LayoutMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutMachine {
    pub fn new() -> Self {
        Self {
            state: TableState::OutsideTable,
            blocks: Vec::new(),
        }
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn feed(&mut self, raw_line: &str) -> Transition {
        let line = raw_line.trim();

        if let Some(caps) = HEADING.captures(line) {
            self.blocks.push(Block::Heading {
                level: caps[1].len() as u8,
                text: caps[2].trim().to_string(),
            });
            return Transition::Emit;
        }

        if SUB_HEADING.is_match(line) {
            self.blocks
                .push(Block::SubHeading(line.trim_end_matches(':').trim().to_string()));
            return Transition::Emit;
        }

        if let Some(caps) = BULLET.captures(line) {
            self.blocks.push(Block::Bullet(caps[1].to_string()));
            return Transition::Emit;
        }

        if TABLE_ROW.is_match(line) {
            self.buffer_row(split_cells(line));
            return Transition::Buffer;
        }

        let table_open = matches!(self.state, TableState::InsideTable(_));
        if table_open && line.is_empty() {
            self.flush_table();
            return Transition::Close;
        }

        if let TableState::InsideTable(rows) = &mut self.state {
            rows.push(split_cells(line));
            return Transition::Absorb;
        }

        self.blocks.push(Block::Paragraph(line.to_string()));
        Transition::Emit
    }

    /// Flush a table still open at end of input and return the blocks.
    pub fn finish(mut self) -> Vec<Block> {
        self.flush_table();
        self.blocks
    }

    /// Buffer a pipe row, opening the table if needed. Alignment rows open it
    /// but are not kept.
    fn buffer_row(&mut self, cells: Vec<String>) {
        let keep = !is_alignment_row(&cells);
        if let TableState::InsideTable(rows) = &mut self.state {
            if keep {
                rows.push(cells);
            }
        } else {
            let rows = if keep { vec![cells] } else { Vec::new() };
            self.state = TableState::InsideTable(rows);
        }
    }

    fn flush_table(&mut self) {
        let state = std::mem::replace(&mut self.state, TableState::OutsideTable);
        if let TableState::InsideTable(rows) = state {
            let mut rows = rows.into_iter();
            if let Some(header) = rows.next() {
                self.blocks.push(Block::Table(Table {
                    header,
                    rows: rows.collect(),
                }));
            }
        }
    }
}

/// Split a pipe-delimited line, dropping the first and last split fields.
///
/// Lines with fewer than two pipes yield no cells.
pub fn split_cells(line: &str) -> Vec<String> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() <= 2 {
        return Vec::new();
    }
    parts[1..parts.len() - 1]
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn is_alignment_row(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| ALIGNMENT_CELL.is_match(c))
}

pub fn layout_advisory(text: &str) -> Vec<Block> {
    let mut machine = LayoutMachine::new();
    for line in text.lines() {
        machine.feed(line);
    }
    machine.finish()
}
