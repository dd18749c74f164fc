use crate::block::Block;

/// Collects consecutive table-row lines into a header and body rows.
///
/// Owned by a single parse call; it never outlives the text it reads.
#[derive(Debug, Default)]
pub struct TableAccumulator {
    state: State,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Collecting {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl TableAccumulator {
    pub fn is_collecting(&self) -> bool {
        matches!(self.state, State::Collecting { .. })
    }

    /// Feed one raw table-row line.
    ///
    /// The first line of a run is the header. After that, any line containing
    /// `---` is taken as the separator row and dropped, even when the dashes
    /// are real cell content.
    pub fn push_line(&mut self, line: &str) {
        match &mut self.state {
            State::Idle => {
                self.state = State::Collecting {
                    header: split_cells(line),
                    rows: Vec::new(),
                };
            }
            State::Collecting { .. } if line.contains("---") => {}
            State::Collecting { rows, .. } => {
                let row = split_cells(line);
                if !row.is_empty() {
                    rows.push(row);
                }
            }
        }
    }

    /// Finish the current run, if any, and return to idle.
    pub fn flush(&mut self) -> Option<Block> {
        match std::mem::take(&mut self.state) {
            State::Idle => None,
            State::Collecting { header, rows } => Some(Block::Table { header, rows }),
        }
    }
}

/// Split on `|` and keep only cells with visible content, trimmed.
///
/// A deliberately blank cell is dropped too, which shifts the rest of that
/// row one column to the left.
pub fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}
