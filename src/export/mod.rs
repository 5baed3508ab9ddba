//! Export formats for the attendance ledger.

mod csv;

pub use self::csv::{LEDGER_CSV_HEADER, format_display_date, ledger_to_csv};
