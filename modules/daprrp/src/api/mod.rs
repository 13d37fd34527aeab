pub mod v20231001preview;
