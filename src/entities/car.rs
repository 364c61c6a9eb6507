//! Catalog entries: the rentable cars

use crate::impl_entity;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A rentable car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,

    pub model: String,

    /// Free-form spec lines shown on the listing, in display order
    #[serde(default)]
    pub specs: Vec<String>,

    /// Price per day
    #[serde(rename = "rent", deserialize_with = "deserialize_rate")]
    pub daily_rate: f64,

    #[serde(rename = "photo", default)]
    pub photo_url: String,

    #[serde(default)]
    pub rented_out: bool,
}

impl_entity!(Car, "cars", "car", {
    "model" => model,
    "rentedOut" => rented_out,
});

impl Car {
    /// Build a new catalog entry; it always starts available
    pub fn new(input: NewCar) -> Self {
        Self {
            id: Uuid::new_v4(),
            model: input.model,
            specs: input.specs,
            daily_rate: input.daily_rate,
            photo_url: input.photo_url,
            rented_out: false,
        }
    }
}

/// Body of `POST /cars`
///
/// There is no `rentedOut` field: whatever the caller sends for it is
/// dropped during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCar {
    pub model: String,

    #[serde(default)]
    pub specs: Vec<String>,

    #[serde(rename = "rent", deserialize_with = "deserialize_rate")]
    pub daily_rate: f64,

    #[serde(rename = "photo", default)]
    pub photo_url: String,
}

/// Body of `PUT /cars/{id}`
///
/// Only these fields can be changed. Unknown keys are ignored, and so is
/// `id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPatch {
    pub model: Option<String>,

    pub specs: Option<Vec<String>>,

    #[serde(rename = "rent", default, deserialize_with = "deserialize_opt_rate")]
    pub daily_rate: Option<f64>,

    #[serde(rename = "photo")]
    pub photo_url: Option<String>,

    pub rented_out: Option<bool>,
}

impl CarPatch {
    pub fn rented_out(flag: bool) -> Self {
        Self {
            rented_out: Some(flag),
            ..Self::default()
        }
    }

    /// Copy the present fields onto `car`, returning whether anything changed
    pub fn apply(self, car: &mut Car) -> bool {
        let before = car.clone();

        if let Some(model) = self.model {
            car.model = model;
        }
        if let Some(specs) = self.specs {
            car.specs = specs;
        }
        if let Some(rate) = self.daily_rate {
            car.daily_rate = rate;
        }
        if let Some(photo) = self.photo_url {
            car.photo_url = photo;
        }
        if let Some(flag) = self.rented_out {
            car.rented_out = flag;
        }

        *car != before
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRate {
    Number(f64),
    Text(String),
}

impl RawRate {
    fn into_rate<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            RawRate::Number(n) => Ok(n),
            // HTML forms post the rate as text
            RawRate::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("rent must be a number, got '{}'", s))),
        }
    }
}

fn deserialize_rate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    RawRate::deserialize(deserializer)?.into_rate()
}

fn deserialize_opt_rate<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Option::<RawRate>::deserialize(deserializer)?
        .map(|raw| raw.into_rate::<D::Error>())
        .transpose()
}
