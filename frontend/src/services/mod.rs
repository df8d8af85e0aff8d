pub mod api;
pub mod logging;
pub mod spreadsheet;
pub mod storage;
