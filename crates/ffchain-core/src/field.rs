use std::fmt;

use tracing::warn;

use crate::{descriptor::Descriptor, error::Result, value::RawValue};

/// What happens when a value fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validation {
    /// The error is returned and the stored value is left untouched.
    #[default]
    Strict,
    /// The error is logged and the attribute is left unset.
    Lenient,
}

/// A named value slot backed by a shared descriptor.
pub struct Field<D: Descriptor> {
    name:       &'static str,
    descriptor: &'static D,
    value:      Option<D::Value>,
}

impl<D: Descriptor> Field<D> {
    pub const fn new(name: &'static str, descriptor: &'static D) -> Self {
        Self {
            name,
            descriptor,
            value: None,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn get(&self) -> Option<&D::Value> {
        self.value.as_ref()
    }

    pub const fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn set(&mut self, raw: RawValue, mode: Validation) -> Result<()> {
        match self.descriptor.validate(self.name, raw) {
            Ok(value) => {
                self.value = Some(value);
                Ok(())
            },
            Err(e) if mode == Validation::Lenient && e.is_validation() => {
                warn!("Ignoring invalid value for {}: {}", self.name, e);
                self.value = None;
                Ok(())
            },
            Err(e) => Err(e),
        }
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn to_args(&self) -> Vec<String> {
        self.value
            .as_ref()
            .map(|v| self.descriptor.to_args(v))
            .unwrap_or_default()
    }
}

impl<D: Descriptor> Clone for Field<D> {
    fn clone(&self) -> Self {
        Self {
            name:       self.name,
            descriptor: self.descriptor,
            value:      self.value.clone(),
        }
    }
}

impl<D: Descriptor> fmt::Debug for Field<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        descriptor::{Choice, Int},
        error::Error,
    };

    static CRF: Int = Int::new("-crf").min(0).max(51);
    static PRESET: Choice = Choice::new("-preset", &["fast", "slow"]);

    #[test]
    fn strict_failure_keeps_previous_value() {
        let mut crf = Field::new("crf", &CRF);
        crf.set(23.into(), Validation::Strict).unwrap();

        let err = crf.set(99.into(), Validation::Strict).unwrap_err();
        assert!(matches!(err, Error::RangeViolation { .. }));
        assert_eq!(crf.get(), Some(&23));
        assert_eq!(crf.to_args(), ["-crf", "23"]);
    }

    #[test]
    fn lenient_failure_unsets() {
        let mut preset = Field::new("preset", &PRESET);
        preset.set("fast".into(), Validation::Lenient).unwrap();
        preset.set("ludicrous".into(), Validation::Lenient).unwrap();

        assert!(!preset.is_set());
        assert!(preset.to_args().is_empty());
    }

    #[test]
    fn clear_removes_tokens() {
        let mut crf = Field::new("crf", &CRF);
        crf.set(0.into(), Validation::Strict).unwrap();
        crf.clear();
        assert_eq!(crf.get(), None);
        assert!(crf.to_args().is_empty());
    }
}
