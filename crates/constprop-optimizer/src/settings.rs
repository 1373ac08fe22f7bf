use constprop_common::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Largest number of distinct columns a single condition set may reference
/// before propagation is skipped.
pub const DEFAULT_MAX_PROPAGATE_COLUMNS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationSettings {
    /// Column-count cost guard. Also bounds the number of substitution rounds.
    pub max_propagate_columns: usize,
    /// Fold literal-only subtrees right after a column is replaced by its
    /// constant, so that `b * 2 = c` with `b = 1` turns into the new fact
    /// `c = 2`.
    pub fold_constants: bool,
}

impl Default for PropagationSettings {
    fn default() -> Self {
        Self {
            max_propagate_columns: DEFAULT_MAX_PROPAGATE_COLUMNS,
            fold_constants: false,
        }
    }
}

impl PropagationSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_propagate_columns(mut self, max: usize) -> Self {
        self.max_propagate_columns = max;
        self
    }

    pub fn with_constant_folding(mut self, enabled: bool) -> Self {
        self.fold_constants = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_propagate_columns == 0 {
            return Err(Error::invalid_config(
                "max_propagate_columns must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Parses settings from a TOML document. Missing keys take their default.
    ///
    /// ```text
    /// max_propagate_columns = 64
    /// fold_constants = true
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings: PropagationSettings = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }
}
