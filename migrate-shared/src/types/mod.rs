mod media_asset;
mod report;
mod row;
mod table;
mod value;

pub use media_asset::{content_type_for, MediaAsset};
pub use report::{DirectoryReport, FileFailure, MigrationRunReport, RowFailure, TableReport};
pub use row::RowRecord;
pub use table::TableDescriptor;
pub use value::Value;
