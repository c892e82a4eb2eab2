pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod exec;
pub mod git;
pub mod logging;
pub mod multi;
pub mod ui;

pub use error::{GitPlusError, Result};
