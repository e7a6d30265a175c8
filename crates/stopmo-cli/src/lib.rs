//! Stopmo CLI library - exports modules for testing

pub mod cmd;
pub mod util;
