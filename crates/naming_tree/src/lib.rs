//! # naming_tree
//!
//! Schema-driven naming for 3D scene objects.
//!
//! A JSON naming schema is parsed into a [`NamingTree`]. Artists walk the tree one level
//! at a time through a [`SelectionCursor`], which yields the composite name given to scene
//! objects. At export time the [`LeafNameSet`] decides which names are legal, and
//! [`derive_export_sub_path`] / [`next_sequence_name`] route and number the exported files.
//!
//! ```
//! use naming_tree::SessionState;
//!
//! let mut session = SessionState::default();
//! session
//!     .load_schema_str(r#"[{"title": "命名配置表", "topics": [
//!         {"title": "Room", "topics": [{"title": "Wall"}, {"title": "Floor"}]}
//!     ]}]"#)
//!     .unwrap();
//!
//! assert_eq!(session.valid_children(0), ["Room"]);
//! session.set_choice(0, "Room");
//! session.set_choice(1, "Wall");
//! assert_eq!(session.composite_name(), "Room_Wall");
//! assert!(session.is_valid_export_name("Room_Wall.001"));
//! ```
//!
//! Schemas may contain `Bound` topics, which expand into a 26×10 grid of lettered rows and
//! numbered cells. Each cell's size metadata is recorded in a side table that the
//! engine-side importer consumes through a [`SizeDocument`]. The importer sorts each
//! asset into a [`SizeClass`] from that declaration and its bounds volume, see
//! [`SessionState::size_class`].

mod cursor;
mod documents;
mod error;
mod export;
mod grid;
mod rename;
mod sanitize;
mod schema;
mod session;
mod sizing;
mod tree;

pub use cursor::*;
pub use documents::*;
pub use error::*;
pub use export::*;
pub use grid::{cell_key, expand_grid, GRID_CELLS, GRID_COLUMNS, GRID_ROWS};
pub use rename::*;
pub use sanitize::*;
pub use schema::*;
pub use session::*;
pub use sizing::*;
pub use tree::*;
