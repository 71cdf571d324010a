pub mod cache;
pub mod loader;
pub mod table;

pub use cache::{CacheStats, SourceKey, TableCache};
pub use loader::{load_table, normalize_column_name, try_load_table};
pub use table::{parse_numeric, table_from_pairs, Column, RespondentTable};
