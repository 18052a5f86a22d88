use crate::core::attributes::{Attribute, QuantitativeAttribute};
use crate::core::dataset::Dataset;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Records which transform, if any, produced a dataset.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Preprocessing {
    #[default]
    None,
    #[strum(to_string = "normalized", serialize = "normalize")]
    Normalized,
    #[strum(to_string = "standardized", serialize = "standardize")]
    Standardized,
}

impl Preprocessing {
    /// Applies the transform this marker names. `None` returns a copy.
    pub fn apply(self, dataset: &Dataset) -> Dataset {
        match self {
            Preprocessing::None => dataset.clone(),
            Preprocessing::Normalized => normalize(dataset),
            Preprocessing::Standardized => standardize(dataset),
        }
    }
}

/// Min-max scales every quantitative attribute to [0, 1].
/// A constant column maps to 0.
pub fn normalize(dataset: &Dataset) -> Dataset {
    log::debug!("normalizing '{}'", dataset.name());
    dataset
        .map_attributes(|attr| {
            rescale(attr, |a| {
                let (lo, hi) = (a.min()?, a.max()?);
                let span = hi - lo;
                Some(move |x: f64| if span == 0.0 { 0.0 } else { (x - lo) / span })
            })
        })
        .with_preprocessing(Preprocessing::Normalized)
}

/// Z-score scales every quantitative attribute using the sample standard
/// deviation. A constant column keeps a unit divisor and centers to 0.
pub fn standardize(dataset: &Dataset) -> Dataset {
    log::debug!("standardizing '{}'", dataset.name());
    dataset
        .map_attributes(|attr| {
            rescale(attr, |a| {
                let mean = a.mean()?;
                let sd = a.std_dev()?;
                let sd = if sd == 0.0 { 1.0 } else { sd };
                Some(move |x: f64| (x - mean) / sd)
            })
        })
        .with_preprocessing(Preprocessing::Standardized)
}

fn rescale<B, F>(attr: &Attribute, build: B) -> Attribute
where
    B: FnOnce(&QuantitativeAttribute) -> Option<F>,
    F: Fn(f64) -> f64,
{
    let Attribute::Quantitative(a) = attr else {
        return attr.clone();
    };
    let Some(f) = build(a) else {
        return attr.clone();
    };
    Attribute::Quantitative(QuantitativeAttribute {
        name: a.name.clone(),
        weight: a.weight,
        values: a.values.iter().map(|&x| f(x)).collect(),
    })
}
