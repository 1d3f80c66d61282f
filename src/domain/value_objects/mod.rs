//! Value objects - Immutable objects defined by their attributes

mod filter_criteria;
mod ids;
mod keyword_table;
mod load_order;

pub use filter_criteria::{FilterCriteria, LevelRange, TraitFilter};
pub use ids::{EntryId, FormKey, FormKeyParseError};
pub use keyword_table::KeywordTable;
pub use load_order::LoadOrder;
