//! Uniform pack/unpack/view dispatch over external archiving tools.
//!
//! Every supported format is backed by external programs (`tar`, `gzip`,
//! `7z`, `unrar`, ...), each with its own argument dialect. This crate
//! resolves the many spellings of a format to one canonical token,
//! identifies archives by filename or content probe, and walks an ordered
//! candidate list of tools per format, falling back when a binary is not
//! installed.
//!
//! # Architecture
//!
//! - `format.rs` - canonical format tokens, alias normalization, filename guess
//! - `identify.rs` - content probing when the filename says nothing
//! - `registry.rs` - tool identifiers and per-action candidate tables
//! - `request.rs` - the uniform request model
//! - `adapters/` - per-(tool, action) argv dialects
//! - `dispatch.rs` - candidate walk and pack/unpack/view entry points
//! - `exec.rs` - command pipelines and executors (system / dry-run)
//! - `probe.rs` - `file(1)` content description collaborator
//! - `locate.rs` - binary availability probing

pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use exec::{CommandSpec, DryRun, Executor, Pipeline, StdinSource, StdoutSink, SystemExecutor};
pub use format::{Format, FormatClass};
pub use identify::identify;
pub use locate::{ToolLocator, WhichLocator};
pub use probe::{ContentProbe, FileProbe};
pub use registry::ToolId;
pub use request::{Action, Request, Target};

mod adapters;
mod dispatch;
mod error;
mod exec;
mod format;
mod identify;
mod locate;
mod probe;
mod registry;
mod request;
