//! Command-line interface for the `chatterbox` application.
//!
//! This crate serves as the main entry point for the executable, delegating
//! its core functionality to the `chatterbox-server` crate.

fn main() -> anyhow::Result<()> {
    chatterbox_server::run()
}
