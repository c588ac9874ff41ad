pub mod merge;
pub mod period;
pub mod write;

pub use merge::{merge_rankings, Table, KEY_COLUMN, POSITION_COLUMN};
pub use period::{month_number, ReportingPeriod};
pub use write::{write_snapshot, write_tsv};
