#![allow(dead_code)]

mod builders;
mod mocks;

pub use builders::*;
pub use mocks::*;
