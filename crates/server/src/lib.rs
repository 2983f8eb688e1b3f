//! This crate provides the core functionality for the `chatterbox` application: an MCP
//! server that lets an AI agent send a recording bot into Zoom, Google Meet or Teams
//! calls through the Chatterbox meeting-bot API, fetch the resulting transcript and
//! recording, and build a summarization prompt.
//!
//! The main entry point is the [`run`] function, which parses the command line and
//! starts the server over stdio. [`ChatterboxService`] can also be embedded directly
//! with any rmcp transport.
//!
//! Every tool returns the same envelope: at least one text element, plus
//! `isError: true` and `_meta.errorCode` / `_meta.errorMessage` on failure. See the
//! [`gateway`] module for the dispatch and validation rules.

mod app;
pub mod cli;
pub mod client;
mod commands;
pub mod config;
pub mod gateway;
mod handler;
pub mod tools;

pub use app::{run, ChatterboxService};
