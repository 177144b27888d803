//! Zone — a section of a greenhouse that irrigation and lighting act on.

use serde::{Deserialize, Serialize};

use crate::error::{HortiTechError, ValidationError};
use crate::id::ZoneId;

/// A persisted greenhouse zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub greenhouse: Option<String>,
}

impl Zone {
    /// Create a builder for constructing a [`NewZone`].
    #[must_use]
    pub fn builder() -> ZoneBuilder {
        ZoneBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), HortiTechError> {
        validate_name(&self.name)
    }
}

/// A zone that has not been persisted yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewZone {
    pub name: String,
    pub greenhouse: Option<String>,
}

impl NewZone {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), HortiTechError> {
        validate_name(&self.name)
    }

    /// Attach the identifier assigned by storage.
    #[must_use]
    pub fn with_id(self, id: ZoneId) -> Zone {
        Zone {
            id,
            name: self.name,
            greenhouse: self.greenhouse,
        }
    }
}

fn validate_name(name: &str) -> Result<(), HortiTechError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    Ok(())
}

/// Step-by-step builder for [`NewZone`].
#[derive(Debug, Default)]
pub struct ZoneBuilder {
    name: Option<String>,
    greenhouse: Option<String>,
}

impl ZoneBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn greenhouse(mut self, greenhouse: impl Into<String>) -> Self {
        self.greenhouse = Some(greenhouse.into());
        self
    }

    /// Consume the builder, validate, and return a [`NewZone`].
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<NewZone, HortiTechError> {
        let zone = NewZone {
            name: self.name.unwrap_or_default(),
            greenhouse: self.greenhouse,
        };
        zone.validate()?;
        Ok(zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_zone_when_name_provided() {
        let zone = Zone::builder()
            .name("Tomatoes A")
            .greenhouse("North")
            .build()
            .unwrap();
        assert_eq!(zone.name, "Tomatoes A");
        assert_eq!(zone.greenhouse.as_deref(), Some("North"));
    }

    #[test]
    fn should_return_validation_error_when_name_is_missing() {
        let result = Zone::builder().build();
        assert!(matches!(
            result,
            Err(HortiTechError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_name_is_blank() {
        let result = Zone::builder().name("   ").build();
        assert!(matches!(
            result,
            Err(HortiTechError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_keep_fields_when_attaching_id() {
        let zone = Zone::builder()
            .name("Lettuce")
            .build()
            .unwrap()
            .with_id(ZoneId::new(3));
        assert_eq!(zone.id, ZoneId::new(3));
        assert_eq!(zone.name, "Lettuce");
        assert!(zone.greenhouse.is_none());
    }
}
