//! Inspector crate root: re-exports and module wiring.
//!
//! Inspector shows numeric series, or time series indexed by epoch seconds, in
//! a native egui window with an outline of all data, a detail view of the
//! current interval and labelled markings.
//!
//! - `data`: series, the item model, markings, intervals and export
//! - `plugins`: named data generators behind an explicit registry
//! - `display`: the [`Inspector`] entry point and the [`Viewer`] seam
//! - `app` / `panels`: the eframe application
//! - `cli`: the `inspector` command line
//!
//! ```no_run
//! inspector::display([3.0, 1.0, 4.0, 1.0, 5.0, 9.0])?;
//! # Ok::<(), inspector::InspectorError>(())
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod logging;
pub mod panels;
pub mod plugins;

pub use app::{run_inspector, InspectorApp, NativeViewer};
pub use config::InspectorConfig;
pub use data::markings::{Label, Marking};
pub use data::model::{ItemId, Model};
pub use data::series::{IndexKind, Series};
pub use display::{display, DisplaySession, Inspector, Viewer};
pub use error::{InspectorError, Result};
pub use plugins::{GeneratorPlugin, PluginRegistry};
