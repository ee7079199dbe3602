//! Reservations domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::{sheet::Worksheet, Reservation},
};

impl Repository {
    /// Append a reservation row; the tab is append-only
    pub async fn reservations_append(&self, reservation: &Reservation) -> AppResult<()> {
        self.store()
            .await?
            .append_row(Worksheet::Reservations, reservation.to_row())
            .await?;
        Ok(())
    }
}
