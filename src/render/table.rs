//! Pseudo-table rendering.
//!
//! Slack has no table syntax, so rows are flattened onto single lines:
//! header cells become `_*Header*_ *|*`, body rows start with a bullet and
//! separate columns with ` *|*`. What a cell event writes depends only on
//! three flags, so the whole behavior is the lookup table below.

/// Bullet that opens a body row.
pub(crate) const ROW_TAG: &[u8] = "• ".as_bytes();
/// Separator written after every completed column.
pub(crate) const COLUMN_TAG: &[u8] = b" *|*";

const SPACE: &[u8] = b" ";
const HEADER_OPEN: &[u8] = b"_*";
const HEADER_CLOSE: &[u8] = b"*_";

/// The inputs of one table cell event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellEvent {
    pub(crate) header: bool,
    pub(crate) entering: bool,
    pub(crate) row_starting: bool,
}

impl CellEvent {
    const fn index(self) -> usize {
        (self.header as usize) << 2 | (self.entering as usize) << 1 | self.row_starting as usize
    }
}

/// What a cell event writes, and whether it ends the row's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellStep {
    pub(crate) emit: &'static [&'static [u8]],
    pub(crate) clears_row_start: bool,
}

const fn step(emit: &'static [&'static [u8]], clears_row_start: bool) -> CellStep {
    CellStep {
        emit,
        clears_row_start,
    }
}

/// Indexed by `header << 2 | entering << 1 | row_starting`.
const CELL_STEPS: [CellStep; 8] = [
    // body, leaving, mid-row: close the column
    step(&[COLUMN_TAG], false),
    // body, leaving, row start: gap
    step(&[SPACE], false),
    // body, entering, mid-row: gap between cells
    step(&[SPACE], false),
    // body, entering, row start: row bullet
    step(&[ROW_TAG], true),
    // header, leaving: close markers then separator
    step(&[HEADER_CLOSE, COLUMN_TAG], false),
    step(&[HEADER_CLOSE, COLUMN_TAG], false),
    // header, entering, mid-row
    step(&[SPACE, HEADER_OPEN], true),
    // header, entering, row start
    step(&[HEADER_OPEN], true),
];

/// Look up the step for a cell event.
pub(crate) const fn cell_step(event: CellEvent) -> CellStep {
    CELL_STEPS[event.index()]
}
