//! # Flyweight Demos
//!
//! Two clients of [`flyweight_core`]:
//!
//! - [`forest`] - trees share species data through `TreeType` flyweights
//! - [`registry`] - car records share brand/model/color through
//!   `VehicleModel` flyweights
//!
//! Each client owns its pool; nothing is shared between scenarios.
//!
//! ## Example
//!
//! ```rust
//! use flyweight_demos::forest::{Forest, TextCanvas};
//!
//! let mut forest = Forest::new();
//! forest.plant_tree(1, 2, "oak", "green", "rough")?;
//! forest.plant_tree(3, 4, "oak", "green", "rough")?;
//! assert_eq!(forest.tree_types().len(), 1);
//!
//! let mut canvas = TextCanvas::new();
//! forest.draw(&mut canvas);
//! assert_eq!(canvas.lines().len(), 2);
//! # Ok::<(), flyweight_core::FlyweightError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cli;
pub mod config;
pub mod forest;
pub mod registry;

pub use cli::Options;
pub use config::{CarEntry, ForestScenario, RegistryScenario, ScenarioConfig, TreePlanting};
pub use forest::{Canvas, Forest, Position, TextCanvas, Tree, TreeType};
pub use registry::{PoliceDatabase, Registration, VehicleModel, VehicleRecord};
