//! # Vehicle Registry
//!
//! A police database where every car record shares its brand/model/color
//! through a [`VehicleModel`] flyweight and keeps only its plates and owner.

use std::fmt;
use std::sync::Arc;

use flyweight_core::{
    FieldSet, Flyweight, FlyweightKey, FlyweightPool, FlyweightResult, IntrinsicState,
    Operation, PoolListing,
};

/// Brand, model and color of a car (intrinsic state).
///
/// The three values form an unordered field set, matching how the
/// registry keys them: `BMW_M5_red`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VehicleModel {
    fields: FieldSet,
}

impl VehicleModel {
    /// Creates a vehicle model.
    ///
    /// # Errors
    ///
    /// Returns [`flyweight_core::FlyweightError::InvalidIntrinsicState`] if
    /// any value is blank.
    pub fn new(brand: &str, model: &str, color: &str) -> FlyweightResult<Self> {
        Ok(Self {
            fields: FieldSet::new([brand, model, color])?,
        })
    }

    /// The shared fields in brand, model, color order.
    #[must_use]
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }
}

impl IntrinsicState for VehicleModel {
    fn canonical_key(&self) -> FlyweightKey {
        self.fields.canonical_key()
    }
}

impl Operation<Registration> for VehicleModel {
    type Output = String;

    fn operation(&self, registration: &Registration) -> String {
        format!(
            "Flyweight: Displaying shared ({}) and unique ({registration}) state.",
            self.fields
        )
    }
}

/// Plates and owner of one car (extrinsic state).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    /// License plates.
    pub plates: String,
    /// Registered owner.
    pub owner: String,
}

impl Registration {
    /// Creates a registration.
    #[must_use]
    pub fn new(plates: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            plates: plates.into(),
            owner: owner.into(),
        }
    }
}

impl fmt::Display for Registration {
    /// Renders as a quoted list: `["CL234IR", "James Doe"]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", self.plates, self.owner)
    }
}

/// One row of the database.
#[derive(Clone, Debug)]
pub struct VehicleRecord {
    registration: Registration,
    model: Arc<Flyweight<VehicleModel>>,
}

impl VehicleRecord {
    /// Plates and owner.
    #[must_use]
    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    /// The shared model flyweight.
    #[must_use]
    pub fn model(&self) -> &Arc<Flyweight<VehicleModel>> {
        &self.model
    }

    /// Describes the record through the shared model.
    #[must_use]
    pub fn describe(&self) -> String {
        self.model.operation(&self.registration)
    }
}

/// Car database backed by a pre-populated vehicle model pool.
#[derive(Debug, Default)]
pub struct PoliceDatabase {
    models: FlyweightPool<VehicleModel>,
    records: Vec<VehicleRecord>,
}

impl PoliceDatabase {
    /// Creates a database whose pool already holds `initial_models`.
    #[must_use]
    pub fn new<I>(initial_models: I) -> Self
    where
        I: IntoIterator<Item = VehicleModel>,
    {
        Self {
            models: FlyweightPool::with_initial(initial_models),
            records: Vec::new(),
        }
    }

    /// Adds a car, reusing the model flyweight when it already exists.
    ///
    /// # Errors
    ///
    /// Returns [`flyweight_core::FlyweightError::InvalidIntrinsicState`] if
    /// brand, model or color is blank. Nothing is recorded in that case.
    pub fn add_car(
        &mut self,
        plates: &str,
        owner: &str,
        brand: &str,
        model: &str,
        color: &str,
    ) -> FlyweightResult<&VehicleRecord> {
        let vehicle_model = VehicleModel::new(brand, model, color)?;
        let model = self.models.get_or_create(vehicle_model);

        let record = VehicleRecord {
            registration: Registration::new(plates, owner),
            model,
        };
        tracing::info!(plates, key = %record.model.key(), "car added to database");

        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    /// The vehicle model pool.
    #[must_use]
    pub fn models(&self) -> &FlyweightPool<VehicleModel> {
        &self.models
    }

    /// Printable listing of the model pool.
    #[must_use]
    pub fn listing(&self) -> PoolListing {
        self.models.listing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initial_models() -> Vec<VehicleModel> {
        [
            ("Chevrolet", "Camaro2018", "pink"),
            ("Mercedes Benz", "C300", "black"),
            ("Mercedes Benz", "C500", "red"),
            ("BMW", "M5", "red"),
            ("BMW", "X6", "white"),
        ]
        .into_iter()
        .map(|(brand, model, color)| VehicleModel::new(brand, model, color).unwrap())
        .collect()
    }

    #[test]
    fn test_prepopulated_database() {
        let db = PoliceDatabase::new(initial_models());
        assert_eq!(db.models().len(), 5);
        assert!(db.records().is_empty());
    }

    #[test]
    fn test_add_car_reuses_model() {
        let mut db = PoliceDatabase::new(initial_models());

        db.add_car("CL234IR", "James Doe", "BMW", "M5", "red").unwrap();
        assert_eq!(db.models().len(), 5);

        db.add_car("CL234IR", "James Doe", "BMW", "X1", "red").unwrap();
        assert_eq!(db.models().len(), 6);
        assert_eq!(db.models().stats().hits, 1);
        assert_eq!(db.models().stats().misses, 1);
    }

    #[test]
    fn test_records_share_model() {
        let mut db = PoliceDatabase::default();
        db.add_car("AAA111", "Ann", "BMW", "M5", "red").unwrap();
        db.add_car("BBB222", "Bob", "red", "BMW", "M5").unwrap();

        let records = db.records();
        assert!(Arc::ptr_eq(records[0].model(), records[1].model()));
        assert_ne!(records[0].registration(), records[1].registration());
    }

    #[test]
    fn test_describe() {
        let mut db = PoliceDatabase::default();
        let record = db
            .add_car("CL234IR", "James Doe", "BMW", "M5", "red")
            .unwrap();

        assert_eq!(
            record.describe(),
            r#"Flyweight: Displaying shared (["BMW", "M5", "red"]) and unique (["CL234IR", "James Doe"]) state."#
        );
    }

    #[test]
    fn test_operation_uses_only_passed_registration() {
        let model = VehicleModel::new("BMW", "X6", "white").unwrap();
        let first = model.operation(&Registration::new("P1", "Ann"));
        let second = model.operation(&Registration::new("P2", "Bob"));

        assert!(first.contains(r#"["P1", "Ann"]"#));
        assert!(second.contains(r#"["P2", "Bob"]"#));
        assert!(!second.contains("Ann"));
    }

    #[test]
    fn test_blank_brand_rejected() {
        let mut db = PoliceDatabase::default();
        assert!(db.add_car("X", "Y", "", "M5", "red").is_err());
        assert!(db.records().is_empty());
        assert!(db.models().is_empty());
    }
}
