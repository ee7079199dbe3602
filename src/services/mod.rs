//! Business logic services

pub mod availability;
pub mod calendar;
pub mod equipment;
pub mod faults;
pub mod proposals;
pub mod remarks;
pub mod reservations;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub calendar: calendar::CalendarService,
    pub equipment: equipment::EquipmentService,
    pub reservations: reservations::ReservationsService,
    pub faults: faults::FaultsService,
    pub proposals: proposals::ProposalsService,
    pub remarks: remarks::RemarksService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            calendar: calendar::CalendarService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(repository.clone()),
            faults: faults::FaultsService::new(repository.clone()),
            proposals: proposals::ProposalsService::new(repository.clone()),
            remarks: remarks::RemarksService::new(repository.clone()),
            repository,
        }
    }
}
