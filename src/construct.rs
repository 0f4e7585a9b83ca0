//! Blank-instance construction for records.
//!
//! Reading a record starts from a blank instance: every field set to its
//! declared default. A registered [`InstanceCreator`] takes precedence;
//! abstract records have no blank instance without one.

use crate::{Error, Map, RecordDescriptor, Result, TypeSignature, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Produces a blank instance for a record signature.
pub trait InstanceCreator: Send + Sync {
    fn create(&self, signature: &TypeSignature) -> Result<Value>;
}

impl<F> InstanceCreator for F
where
    F: Fn(&TypeSignature) -> Value + Send + Sync,
{
    fn create(&self, signature: &TypeSignature) -> Result<Value> {
        Ok(self(signature))
    }
}

/// How blank instances of one record type are obtained.
#[derive(Clone)]
pub(crate) enum Construction {
    Creator(Arc<dyn InstanceCreator>),
    Defaults(Map),
    Impossible(String),
}

impl Construction {
    /// Picks the strategy for `signature`; `levels` lists the record and
    /// its ancestors, whose field defaults make up the blank instance.
    pub(crate) fn for_record(
        creators: &HashMap<String, Arc<dyn InstanceCreator>>,
        signature: &TypeSignature,
        levels: &[&RecordDescriptor],
    ) -> Self {
        if let Some(creator) = creators.get(signature.raw()) {
            return Construction::Creator(creator.clone());
        }
        if levels.first().map_or(false, |record| record.is_abstract) {
            return Construction::Impossible(format!(
                "abstract record {} cannot be instantiated; register an instance creator for it",
                signature
            ));
        }
        let defaults = levels
            .iter()
            .rev()
            .flat_map(|record| record.fields.iter())
            .map(|field| (field.ident.clone(), field.default.clone()))
            .collect();
        Construction::Defaults(defaults)
    }

    pub(crate) fn blank(&self, signature: &TypeSignature) -> Result<Map> {
        match self {
            Construction::Defaults(defaults) => Ok(defaults.clone()),
            Construction::Creator(creator) => match creator.create(signature)? {
                Value::Object(map) => Ok(map),
                other => Err(Error::instantiation(format!(
                    "instance creator for {} returned {} instead of an object",
                    signature,
                    other.kind_name()
                ))),
            },
            Construction::Impossible(reason) => Err(Error::instantiation(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, FieldDescriptor};

    #[test]
    fn test_defaults_are_ancestor_first() {
        let parent = RecordDescriptor::new("Base")
            .field(FieldDescriptor::new("id", TypeSignature::i64()).default_value(Value::from(0)));
        let child = RecordDescriptor::new("Child")
            .field(FieldDescriptor::new("label", TypeSignature::string()));
        let signature = TypeSignature::plain("Child");
        let construction = Construction::for_record(&HashMap::new(), &signature, &[&child, &parent]);

        let blank = construction.blank(&signature).unwrap();
        let keys: Vec<_> = blank.keys().cloned().collect();
        assert_eq!(keys, vec!["id", "label"]);
        assert_eq!(blank.get("id"), Some(&Value::from(0)));
    }

    #[test]
    fn test_abstract_record_needs_creator() {
        let shape = RecordDescriptor::new("Shape").abstract_record();
        let signature = TypeSignature::plain("Shape");
        let err = Construction::for_record(&HashMap::new(), &signature, &[&shape])
            .blank(&signature)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Instantiation);

        let mut creators: HashMap<String, Arc<dyn InstanceCreator>> = HashMap::new();
        creators.insert(
            "Shape".to_string(),
            Arc::new(|_: &TypeSignature| Value::Object(Map::new())),
        );
        let blank = Construction::for_record(&creators, &signature, &[&shape])
            .blank(&signature)
            .unwrap();
        assert!(blank.is_empty());
    }
}
