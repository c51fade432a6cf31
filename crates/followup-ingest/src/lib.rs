//! Table provider for the follow-up engine.
//!
//! Each CSV file in a study folder is one snapshot table; the file stem is
//! the table label (e.g. `第6个月随访.csv` → `第6个月随访`).

pub mod csv_table;
pub mod discovery;
pub mod error;
pub mod polars_utils;

pub use csv_table::{TableLoadFailure, TableSetLoad, dataframe_to_table, load_table_set, read_csv_table};
pub use discovery::{list_csv_files, table_label};
pub use error::{IngestError, Result};
pub use polars_utils::any_to_cell;
