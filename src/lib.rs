pub mod app;
pub mod archive;
pub mod args;
pub mod chapter;
pub mod encoding;
pub mod logging;
pub mod output;
