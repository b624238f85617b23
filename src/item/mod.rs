#[cfg(feature = "xlsx")]
/// This module provides an XLSX item reader loading one worksheet into memory.
pub mod xlsx;
