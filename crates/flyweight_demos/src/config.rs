//! # Scenario Configuration
//!
//! Scenarios are TOML files loaded once at startup. A file may describe a
//! forest, a registry, or both:
//!
//! ```toml
//! [forest]
//! trees = [{ x = 1, y = 2, name = "oak", color = "green", texture = "rough" }]
//!
//! [registry]
//! initial_models = [["BMW", "M5", "red"]]
//!
//! [[registry.cars]]
//! plates = "CL234IR"
//! owner = "James Doe"
//! brand = "BMW"
//! model = "M5"
//! color = "red"
//! ```

use std::path::Path;

use flyweight_core::{FlyweightError, FlyweightResult};
use serde::{Deserialize, Serialize};

use crate::forest::Forest;
use crate::registry::{PoliceDatabase, VehicleModel};

/// The scenario used when no file is given.
const DEFAULT_SCENARIO: &str = include_str!("../scenarios/default.toml");

/// A complete scenario file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Trees to plant.
    pub forest: Option<ForestScenario>,
    /// Cars to register.
    pub registry: Option<RegistryScenario>,
}

/// The `[forest]` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForestScenario {
    /// Trees in planting order.
    #[serde(default)]
    pub trees: Vec<TreePlanting>,
}

/// One tree to plant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreePlanting {
    /// Horizontal coordinate.
    pub x: i64,
    /// Vertical coordinate.
    pub y: i64,
    /// Species name.
    pub name: String,
    /// Foliage color.
    pub color: String,
    /// Bark texture.
    pub texture: String,
}

/// The `[registry]` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryScenario {
    /// `[brand, model, color]` triples loaded before any car is added.
    #[serde(default)]
    pub initial_models: Vec<[String; 3]>,
    /// Cars in insertion order.
    #[serde(default)]
    pub cars: Vec<CarEntry>,
}

/// One car to add.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarEntry {
    /// License plates.
    pub plates: String,
    /// Registered owner.
    pub owner: String,
    /// Brand.
    pub brand: String,
    /// Model.
    pub model: String,
    /// Color.
    pub color: String,
}

impl ScenarioConfig {
    /// Parses a scenario from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`FlyweightError::Config`] if the text is not a valid scenario.
    pub fn from_toml_str(text: &str) -> FlyweightResult<Self> {
        toml::from_str(text).map_err(|e| FlyweightError::Config(e.to_string()))
    }

    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`FlyweightError::Io`] if the file cannot be read and
    /// [`FlyweightError::Config`] if it is not a valid scenario.
    pub fn load(path: impl AsRef<Path>) -> FlyweightResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FlyweightError::Io(format!("{}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "loading scenario");
        Self::from_toml_str(&text)
    }

    /// The bundled scenario.
    ///
    /// # Errors
    ///
    /// Returns [`FlyweightError::Config`] if the bundled file is invalid.
    pub fn builtin() -> FlyweightResult<Self> {
        Self::from_toml_str(DEFAULT_SCENARIO)
    }

    /// The `[forest]` section.
    ///
    /// # Errors
    ///
    /// Returns [`FlyweightError::Config`] if the section is missing.
    pub fn forest(&self) -> FlyweightResult<&ForestScenario> {
        self.forest
            .as_ref()
            .ok_or_else(|| FlyweightError::Config("missing [forest] section".into()))
    }

    /// The `[registry]` section.
    ///
    /// # Errors
    ///
    /// Returns [`FlyweightError::Config`] if the section is missing.
    pub fn registry(&self) -> FlyweightResult<&RegistryScenario> {
        self.registry
            .as_ref()
            .ok_or_else(|| FlyweightError::Config("missing [registry] section".into()))
    }
}

impl ForestScenario {
    /// Plants every tree into a fresh forest.
    ///
    /// # Errors
    ///
    /// Returns the first species validation error.
    pub fn build(&self) -> FlyweightResult<Forest> {
        let mut forest = Forest::new();
        for tree in &self.trees {
            forest.plant_tree(tree.x, tree.y, &tree.name, &tree.color, &tree.texture)?;
        }
        Ok(forest)
    }
}

impl RegistryScenario {
    /// Builds the pre-populated database without adding any car.
    ///
    /// # Errors
    ///
    /// Returns the first model validation error.
    pub fn database(&self) -> FlyweightResult<PoliceDatabase> {
        let models = self
            .initial_models
            .iter()
            .map(|[brand, model, color]| VehicleModel::new(brand, model, color))
            .collect::<FlyweightResult<Vec<_>>>()?;
        Ok(PoliceDatabase::new(models))
    }

    /// Builds the database and adds every car.
    ///
    /// # Errors
    ///
    /// Returns the first model validation error.
    pub fn build(&self) -> FlyweightResult<PoliceDatabase> {
        let mut db = self.database()?;
        for car in &self.cars {
            db.add_car(&car.plates, &car.owner, &car.brand, &car.model, &car.color)?;
        }
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scenario() {
        let config = ScenarioConfig::builtin().unwrap();

        let forest = config.forest().unwrap().build().unwrap();
        assert_eq!(forest.trees().len(), 3);
        assert_eq!(forest.tree_types().len(), 2);

        let registry = config.registry().unwrap();
        assert_eq!(registry.database().unwrap().models().len(), 5);
        assert_eq!(registry.build().unwrap().models().len(), 6);
    }

    #[test]
    fn test_missing_section() {
        let config = ScenarioConfig::from_toml_str("[forest]\n").unwrap();
        assert!(config.forest().unwrap().trees.is_empty());
        assert_eq!(
            config.registry().unwrap_err(),
            FlyweightError::Config("missing [registry] section".into())
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ScenarioConfig::from_toml_str("[forest]\nshrubs = []\n").unwrap_err();
        assert!(matches!(err, FlyweightError::Config(_)));
    }

    #[test]
    fn test_wrong_triple_length_rejected() {
        let err = ScenarioConfig::from_toml_str("[registry]\ninitial_models = [[\"BMW\", \"M5\"]]\n")
            .unwrap_err();
        assert!(matches!(err, FlyweightError::Config(_)));
    }

    #[test]
    fn test_blank_model_fails_build() {
        let config = ScenarioConfig::from_toml_str(
            "[registry]\ninitial_models = [[\"BMW\", \"\", \"red\"]]\n",
        )
        .unwrap();
        let err = config.registry().unwrap().database().unwrap_err();
        assert!(matches!(err, FlyweightError::InvalidIntrinsicState { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScenarioConfig::load("/nonexistent/scenario.toml").unwrap_err();
        assert!(matches!(err, FlyweightError::Io(ref msg) if msg.contains("scenario.toml")));
    }
}
