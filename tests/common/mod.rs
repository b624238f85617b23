#![allow(dead_code)]

mod mocks;
pub mod workbook;

pub use mocks::*;
