//! Wire models of each supported API version.

pub mod v20231001preview;
