//! Carrying hub-only data through a spoke in an annotation
//!
//! When the hub has fields an older spoke cannot represent, `convert_from`
//! stores them with [`marshal_data`] and `convert_to` restores them with
//! [`unmarshal_data`], so hub → spoke → hub stays lossless.
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use crate::error::ConversionError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;

/// Annotation key holding the serialized hub value
pub const DATA_ANNOTATION: &str = "hubspoke.dev/conversion-data";

/// Types with a string annotation map
pub trait Annotated {
    fn annotations(&self) -> &BTreeMap<String, String>;
    fn annotations_mut(&mut self) -> &mut BTreeMap<String, String>;
}

/// Serialize `data` into the conversion-data annotation of `target`
pub fn marshal_data<T, D>(data: &D, target: &mut T) -> Result<(), ConversionError>
where
    T: Annotated,
    D: Serialize + ?Sized,
{
    let encoded = serde_json::to_string(data)?;
    target
        .annotations_mut()
        .insert(DATA_ANNOTATION.to_string(), encoded);
    Ok(())
}

/// Take the conversion-data annotation off `source` and decode it.
///
/// Returns `Ok(None)` when the annotation is absent. The annotation is removed
/// either way so it does not leak into the converted value.
pub fn unmarshal_data<T, D>(source: &mut T) -> Result<Option<D>, ConversionError>
where
    T: Annotated,
    D: DeserializeOwned,
{
    let Some(encoded) = source.annotations_mut().remove(DATA_ANNOTATION) else {
        return Ok(None);
    };
    serde_json::from_str(&encoded)
        .map(Some)
        .map_err(|e| ConversionError::field(DATA_ANNOTATION, "invalid conversion data").with_source(e))
}

/// Drop the conversion-data annotation, if any
pub fn strip_data_annotation<T: Annotated>(value: &mut T) {
    value.annotations_mut().remove(DATA_ANNOTATION);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Default)]
    struct Object {
        annotations: BTreeMap<String, String>,
    }

    impl Annotated for Object {
        fn annotations(&self) -> &BTreeMap<String, String> {
            &self.annotations
        }

        fn annotations_mut(&mut self) -> &mut BTreeMap<String, String> {
            &mut self.annotations
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Restored {
        ignore_preflight_errors: Vec<String>,
    }

    #[test]
    fn test_marshal_then_unmarshal_removes_annotation() {
        let data = Restored {
            ignore_preflight_errors: vec!["Swap".to_string()],
        };
        let mut object = Object::default();
        marshal_data(&data, &mut object).unwrap();
        assert!(object.annotations().contains_key(DATA_ANNOTATION));

        let restored: Option<Restored> = unmarshal_data(&mut object).unwrap();
        assert_eq!(restored, Some(data));
        assert!(object.annotations().is_empty());
    }

    #[test]
    fn test_missing_annotation_is_none() {
        let mut object = Object::default();
        object
            .annotations_mut()
            .insert("owner".to_string(), "ops".to_string());
        let restored: Option<Restored> = unmarshal_data(&mut object).unwrap();
        assert_eq!(restored, None);
        assert_eq!(object.annotations().len(), 1);
    }

    #[test]
    fn test_corrupt_annotation_is_an_error() {
        let mut object = Object::default();
        object
            .annotations_mut()
            .insert(DATA_ANNOTATION.to_string(), "{not json".to_string());
        let err = unmarshal_data::<_, Restored>(&mut object).unwrap_err();
        assert_eq!(err.field.as_deref(), Some(DATA_ANNOTATION));
        assert!(object.annotations().is_empty());
    }

    #[test]
    fn test_strip() {
        let mut object = Object::default();
        marshal_data("x", &mut object).unwrap();
        strip_data_annotation(&mut object);
        assert!(object.annotations().is_empty());
    }
}
