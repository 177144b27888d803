//! Zone service — use-cases for managing greenhouse zones.

use hortitech_domain::error::{HortiTechError, NotFoundError};
use hortitech_domain::id::ZoneId;
use hortitech_domain::zone::{NewZone, Zone};

use crate::ports::ZoneRepository;

/// Application service for zone CRUD operations.
pub struct ZoneService<R> {
    repo: R,
}

impl<R: ZoneRepository> ZoneService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new zone after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, zone), fields(zone_name = %zone.name))]
    pub async fn create_zone(&self, zone: NewZone) -> Result<Zone, HortiTechError> {
        zone.validate()?;
        self.repo.create(zone).await
    }

    /// Look up a zone by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::NotFound`] when no zone with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_zone(&self, id: ZoneId) -> Result<Zone, HortiTechError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Zone",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all zones.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_zones(&self) -> Result<Vec<Zone>, HortiTechError> {
        self.repo.get_all().await
    }

    /// Update an existing zone.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::Validation`] if invariants fail,
    /// [`HortiTechError::NotFound`] if the zone does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, zone), fields(zone_id = %zone.id))]
    pub async fn update_zone(&self, zone: Zone) -> Result<Zone, HortiTechError> {
        zone.validate()?;
        self.get_zone(zone.id).await?;
        self.repo.update(zone).await
    }

    /// Delete a zone and its schedules.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::NotFound`] if the zone does not exist, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_zone(&self, id: ZoneId) -> Result<(), HortiTechError> {
        self.get_zone(id).await?;
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryZoneRepo;
    use hortitech_domain::error::ValidationError;

    fn make_service() -> ZoneService<InMemoryZoneRepo> {
        ZoneService::new(InMemoryZoneRepo::default())
    }

    fn valid_zone() -> NewZone {
        Zone::builder()
            .name("Tomatoes A")
            .greenhouse("North")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_assign_id_when_zone_created() {
        let svc = make_service();

        let created = svc.create_zone(valid_zone()).await.unwrap();
        let fetched = svc.get_zone(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Tomatoes A");
    }

    #[tokio::test]
    async fn should_reject_create_when_name_is_blank() {
        let svc = make_service();
        let mut zone = valid_zone();
        zone.name = " ".to_string();

        let result = svc.create_zone(zone).await;
        assert!(matches!(
            result,
            Err(HortiTechError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_zone_missing() {
        let svc = make_service();
        let result = svc.get_zone(ZoneId::new(99)).await;
        assert!(matches!(result, Err(HortiTechError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_zones() {
        let svc = make_service();
        svc.create_zone(valid_zone()).await.unwrap();
        svc.create_zone(Zone::builder().name("Herbs").build().unwrap())
            .await
            .unwrap();

        assert_eq!(svc.list_zones().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_update_zone() {
        let svc = make_service();
        let mut zone = svc.create_zone(valid_zone()).await.unwrap();

        zone.name = "Tomatoes B".to_string();
        let saved = svc.update_zone(zone).await.unwrap();
        assert_eq!(saved.name, "Tomatoes B");
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_zone() {
        let svc = make_service();
        let zone = valid_zone().with_id(ZoneId::new(42));
        let result = svc.update_zone(zone).await;
        assert!(matches!(result, Err(HortiTechError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_zone() {
        let svc = make_service();
        let zone = svc.create_zone(valid_zone()).await.unwrap();

        svc.delete_zone(zone.id).await.unwrap();

        let result = svc.get_zone(zone.id).await;
        assert!(matches!(result, Err(HortiTechError::NotFound(_))));
    }
}
