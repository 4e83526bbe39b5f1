//! Feature constructors and typed accessors for `tf.train.Example` records.

use crate::common::*;

pub fn int64_feature(value: i64) -> Feature {
    Feature::from_i64_iter([value])
}

pub fn int64_list_feature(value: Vec<i64>) -> Feature {
    Feature::from_i64_list(value)
}

pub fn bytes_feature(value: Vec<u8>) -> Feature {
    Feature::from_bytes_iter([value])
}

pub fn bytes_list_feature(value: Vec<Vec<u8>>) -> Feature {
    Feature::from_bytes_list(value)
}

pub fn float_list_feature(value: Vec<f32>) -> Feature {
    Feature::from_f32_list(value)
}

/// Read access to the features of a record by name.
pub trait ExampleExt {
    fn feature(&self, key: &str) -> Option<&Feature>;

    /// The feature names in ascending order.
    fn feature_names(&self) -> Vec<&str>;

    /// Gets an int64 list feature, or `None` if it is absent or has another type.
    fn int64_list(&self, key: &str) -> Option<&[i64]> {
        self.feature(key)?.as_i64_list()
    }

    fn float_list(&self, key: &str) -> Option<&[f32]> {
        self.feature(key)?.as_f32_list()
    }

    fn bytes_list(&self, key: &str) -> Option<&[Vec<u8>]> {
        self.feature(key)?.as_bytes_list()
    }

    /// Gets a single-valued int64 feature.
    fn int64(&self, key: &str) -> Option<i64> {
        match self.int64_list(key)? {
            &[value] => Some(value),
            _ => None,
        }
    }

    /// Gets a single-valued bytes feature.
    fn bytes(&self, key: &str) -> Option<&[u8]> {
        match self.bytes_list(key)? {
            [value] => Some(value.as_slice()),
            _ => None,
        }
    }
}

impl ExampleExt for Example {
    fn feature(&self, key: &str) -> Option<&Feature> {
        self.features.as_ref()?.feature.get(key)
    }

    fn feature_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self
            .features
            .iter()
            .flat_map(|features| features.feature.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}
