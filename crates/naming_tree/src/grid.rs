//! Expansion of `Bound` schema topics into a lettered grid of cells.

use std::ops::RangeInclusive;

use crate::error::SchemaError;
use crate::schema::SchemaTopic;
use crate::tree::{Node, NodeKind, SizeTable};

/// Row labels of an expanded grid.
pub const GRID_ROWS: RangeInclusive<char> = 'A'..='Z';
/// Number of two-digit cells under each row (`00`..`09`).
pub const GRID_COLUMNS: u32 = 10;
/// Cells produced by a single `Bound` topic.
pub const GRID_CELLS: usize = 26 * GRID_COLUMNS as usize;

/// Size-table key of one grid cell under `prefix`.
pub fn cell_key(prefix: &str, row: char, column: u32) -> String {
    format!("{prefix}{row}_{column:02}")
}

/// Replace a `Bound` topic by 26 row nodes of 10 cells each under `parent`, and record
/// the size of every cell in `sizes`.
///
/// All cells share the title of the first sub-topic of `bound`. Expanding the same
/// prefix twice reuses the existing rows and cells and overwrites the size entries.
pub fn expand_grid(
    parent: &mut Node,
    prefix: &str,
    bound: &SchemaTopic,
    sizes: &mut SizeTable,
) -> Result<(), SchemaError> {
    let Some(metadata) = bound.topics.first() else {
        return Err(SchemaError::BoundWithoutMetadata {
            prefix: prefix.to_string(),
        });
    };

    for row in GRID_ROWS {
        let row_node = parent.child_or_insert(row.to_string(), NodeKind::GridRow);
        for column in 0..GRID_COLUMNS {
            row_node.child_or_insert(format!("{column:02}"), NodeKind::GridCell);
            sizes.insert(cell_key(prefix, row, column), metadata.title.clone());
        }
    }

    tracing::debug!(prefix, size = %metadata.title, "expanded Bound grid");
    Ok(())
}
