//! Generator plugins: named producers of series, looked up through an explicit registry.
//!
//! A plugin receives a JSON configuration object and returns one or more
//! [`Series`]. Each plugin deserialises that object into its own config struct
//! with `deny_unknown_fields`, so typos and malformed values are reported as
//! [`InspectorError::PluginResolution`] instead of being silently ignored.
//!
//! ```
//! use inspector::plugins::PluginRegistry;
//!
//! let registry = PluginRegistry::with_builtin();
//! let seria = registry
//!     .invoke("RandomGenerator", "generate", Some(r#"{"days": 1, "interval_minutes": 60, "seed": 7}"#))
//!     .unwrap();
//! assert_eq!(seria.len(), 1);
//! assert_eq!(seria[0].len(), 25);
//! ```

pub mod random;
pub mod sine;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::data::series::Series;
use crate::error::{InspectorError, Result};

pub use random::{RandomConfig, RandomGenerator};
pub use sine::{SineConfig, SineGenerator};

/// The command every generator understands.
pub const GENERATE: &str = "generate";

/// Names taken by the command line's own arguments.
pub const RESERVED_NAMES: [&str; 5] = ["files", "config", "verbose", "help", "version"];

pub trait GeneratorPlugin {
    /// Unique name, also used as the `--<name>` command-line flag.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        ""
    }

    /// Commands accepted on the command line.
    fn commands(&self) -> &'static [&'static str] {
        &[GENERATE]
    }

    /// Example configuration shown in the UI and in `--help`.
    fn example_config(&self) -> Value {
        Value::Object(Default::default())
    }

    /// Produce series from a configuration object.
    fn generate(&self, config: &Value) -> Result<Vec<Series>>;
}

/// Plugins available to the CLI and the UI, in registration order.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn GeneratorPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the generators shipped with this crate.
    pub fn with_builtin() -> Self {
        let mut reg = Self::new();
        // names are distinct, registration cannot fail
        let _ = reg.register(Box::new(RandomGenerator));
        let _ = reg.register(Box::new(SineGenerator));
        reg
    }

    /// Add a plugin. A second plugin with an already registered name is rejected.
    pub fn register(&mut self, plugin: Box<dyn GeneratorPlugin>) -> Result<()> {
        let name = plugin.name();
        if name.is_empty() || name.starts_with('-') || name.contains(char::is_whitespace) {
            return Err(InspectorError::plugin(name, "invalid plugin name"));
        }
        if RESERVED_NAMES.contains(&name) {
            return Err(InspectorError::plugin(
                name,
                "name is reserved for a command-line option",
            ));
        }
        if self.get(name).is_some() {
            tracing::error!("Could not register plugin because of name conflict: {}", name);
            return Err(InspectorError::plugin(name, "a plugin with this name is already registered"));
        }
        tracing::debug!("Registered plugin: {}", name);
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn GeneratorPlugin> {
        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn GeneratorPlugin> {
        self.plugins.iter().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Resolve `name`, check `command`, parse `config` text and run the plugin.
    ///
    /// A missing config means `{}`. The returned series are validated but
    /// otherwise exactly what the plugin produced.
    pub fn invoke(&self, name: &str, command: &str, config: Option<&str>) -> Result<Vec<Series>> {
        let plugin = self
            .get(name)
            .ok_or_else(|| InspectorError::plugin(name, "no such plugin is registered"))?;
        if !plugin.commands().contains(&command) {
            return Err(InspectorError::plugin(
                name,
                format!(
                    "unknown command '{}' (available: {})",
                    command,
                    plugin.commands().join(", ")
                ),
            ));
        }
        let value = match config.map(str::trim) {
            None | Some("") => Value::Object(Default::default()),
            Some(text) => serde_json::from_str(text).map_err(|e| {
                InspectorError::plugin(name, format!("configuration is not valid JSON: {e}"))
            })?,
        };
        tracing::debug!("Calling {}:{} with {}", name, command, value);
        let seria = plugin.generate(&value)?;
        for s in seria.iter() {
            s.validate()?;
        }
        tracing::info!("Plugin {} generated {} series", name, seria.len());
        Ok(seria)
    }
}

/// Deserialize a plugin configuration object into its typed struct.
///
/// `null` is treated as an empty object; anything but an object is rejected.
pub fn parse_config<T: DeserializeOwned>(plugin: &str, config: &Value) -> Result<T> {
    let value = match config {
        Value::Null => Value::Object(Default::default()),
        Value::Object(_) => config.clone(),
        other => {
            return Err(InspectorError::plugin(
                plugin,
                format!("configuration must be a JSON object, got {other}"),
            ));
        }
    };
    serde_json::from_value(value)
        .map_err(|e| InspectorError::plugin(plugin, format!("invalid configuration: {e}")))
}

/// Random number generator for a plugin run: seeded if requested, else from entropy.
pub(crate) fn plugin_rng(seed: Option<u64>) -> rand::rngs::StdRng {
    use rand::SeedableRng;
    match seed {
        Some(s) => rand::rngs::StdRng::seed_from_u64(s),
        None => rand::rngs::StdRng::from_entropy(),
    }
}

