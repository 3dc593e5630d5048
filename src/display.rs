//! Interactive entry point.
//!
//! [`Inspector`] collects series, validates each one as it is loaded, and hands
//! the result to a [`Viewer`] when [`Inspector::show`] is called. The default
//! viewer opens a native window and blocks until it is closed.
//!
//! ```no_run
//! let mut ins = inspector::Inspector::new();
//! ins.load_values([1.0, 4.0, 2.0, 8.0], Some("demo"))?;
//! ins.show()?;
//! # Ok::<(), inspector::InspectorError>(())
//! ```

use std::path::Path;

use crate::app::NativeViewer;
use crate::config::InspectorConfig;
use crate::data::model::{ItemId, Model};
use crate::data::series::{self, Series};
use crate::error::Result;
use crate::plugins::PluginRegistry;

/// Everything a viewer needs to put a window on screen.
pub struct DisplaySession {
    pub model: Model,
    pub plugins: PluginRegistry,
    pub config: InspectorConfig,
}

/// Shows a session. Returns once the user is done with it.
pub trait Viewer {
    fn show(&mut self, session: DisplaySession) -> Result<()>;
}

pub struct Inspector<V: Viewer = NativeViewer> {
    model: Model,
    plugins: PluginRegistry,
    config: InspectorConfig,
    viewer: V,
}

impl Inspector<NativeViewer> {
    /// Inspector with the built-in plugins, the config file (if any) and a native window.
    pub fn new() -> Self {
        Self::with_viewer(NativeViewer)
    }
}

impl Default for Inspector<NativeViewer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Viewer> Inspector<V> {
    pub fn with_viewer(viewer: V) -> Self {
        Self {
            model: Model::new(),
            plugins: PluginRegistry::with_builtin(),
            config: InspectorConfig::load_or_default(),
            viewer,
        }
    }

    pub fn with_config(mut self, config: InspectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_plugins(mut self, plugins: PluginRegistry) -> Self {
        self.plugins = plugins;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    pub fn config_mut(&mut self) -> &mut InspectorConfig {
        &mut self.config
    }

    /// Load one series; `name` overrides the series' own name.
    pub fn load_series(&mut self, series: Series, name: Option<&str>) -> Result<ItemId> {
        self.model.add_series(series, name.map(str::to_string))
    }

    /// Load a plain sequence of numbers, plotted against its position.
    pub fn load_values<I>(&mut self, values: I, name: Option<&str>) -> Result<ItemId>
    where
        I: IntoIterator<Item = f64>,
    {
        self.load_series(Series::from_values(values), name)
    }

    /// Load every series in a JSON document (see [`series::load_json`]).
    pub fn load_json(&mut self, text: &str) -> Result<Vec<ItemId>> {
        let seria = series::load_json(text)?;
        self.model.add_all(seria)
    }

    /// Load a JSON data file. Unnamed series are named after the file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<ItemId>> {
        let path = path.as_ref();
        let ids = self.model.add_all(series::load_file(path)?)?;
        for id in ids.iter() {
            if let Some(it) = self.model.get(*id) {
                tracing::info!(
                    "Loaded \"{}\" ({} values) from {}",
                    it.name,
                    it.series.len(),
                    path.display()
                );
            }
        }
        Ok(ids)
    }

    /// Run a registered generator and load what it returns, unchanged.
    pub fn load_from_plugin(
        &mut self,
        plugin: &str,
        command: &str,
        config: Option<&str>,
    ) -> Result<Vec<ItemId>> {
        let seria = self.plugins.invoke(plugin, command, config)?;
        self.model.add_all(seria)
    }

    /// Validate everything and hand it to the viewer. Blocks until the viewer returns.
    pub fn show(mut self) -> Result<()> {
        for it in self.model.items() {
            it.series.validate()?;
        }
        tracing::debug!("Showing {} items", self.model.len());
        self.viewer.show(DisplaySession {
            model: self.model,
            plugins: self.plugins,
            config: self.config,
        })
    }
}

/// Show `values` plotted against their position in a native window.
///
/// Non-finite values are rejected with
/// [`InvalidInput`](crate::error::InspectorError::InvalidInput) before any
/// window is created.
pub fn display<I>(values: I) -> Result<()>
where
    I: IntoIterator<Item = f64>,
{
    let mut ins = Inspector::new();
    ins.load_values(values, None)?;
    ins.show()
}
