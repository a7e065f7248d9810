// Front desk: the request/response boundary between an input front end and
// the catalog, reservation flow and sink

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::catalog::{CatalogError, Room, SharedCatalog};
use crate::config::DeskConfig;
use crate::reservation::{attempt_reservation, ReservationError, ReservationRecord};
use crate::sink::{FileSink, ReservationSink};

pub const NO_MATCHES_MESSAGE: &str = "No rooms found matching the search term.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeskError {
    // A prompt was dismissed; the whole flow stops quietly
    #[error("Reservation cancelled")]
    Cancelled,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Reservation(#[from] ReservationError),
}

impl DeskError {
    /// Text for the guest, `None` for a cancellation which shows nothing.
    pub fn user_message(&self) -> Option<String> {
        match self {
            DeskError::Cancelled => None,
            DeskError::Catalog(e) => Some(format!("{}. Please choose a listed room.", e)),
            DeskError::Reservation(e) => Some(e.user_message()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    NoInput,
    NoMatches,
    Found(Vec<Room>),
}

impl SearchOutcome {
    pub fn message(&self) -> Option<String> {
        match self {
            SearchOutcome::NoInput => None,
            SearchOutcome::NoMatches => Some(NO_MATCHES_MESSAGE.to_string()),
            SearchOutcome::Found(rooms) => {
                let mut text = String::from("Search results:\n");
                for room in rooms {
                    text.push_str(&room.details());
                    text.push('\n');
                }
                Some(text)
            }
        }
    }
}

// Raw answers from the prompts, `None` where the guest cancelled
#[derive(Debug, Clone, Default)]
pub struct ReservationRequest {
    pub room_index: Option<usize>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub guest_name: Option<String>,
}

pub struct FrontDesk {
    catalog: SharedCatalog,
    sink: Arc<dyn ReservationSink>,
}

impl FrontDesk {
    pub fn new(catalog: impl Into<SharedCatalog>, sink: Arc<dyn ReservationSink>) -> Self {
        Self {
            catalog: catalog.into(),
            sink,
        }
    }

    pub fn from_config(config: &DeskConfig) -> Self {
        Self::new(
            config.catalog(),
            Arc::new(FileSink::new(config.sink_path.clone())),
        )
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    pub fn search(&self, term: Option<&str>) -> SearchOutcome {
        let Some(term) = term else {
            return SearchOutcome::NoInput;
        };
        let rooms = self.catalog.search(term);
        if rooms.is_empty() {
            SearchOutcome::NoMatches
        } else {
            SearchOutcome::Found(rooms)
        }
    }

    /// Early check run right after a room is picked, before any dates are
    /// asked for. `reserve` checks availability again under the lock.
    pub fn select_room(&self, index: Option<usize>) -> Result<Room, DeskError> {
        let index = index.ok_or(DeskError::Cancelled)?;
        let room = self.catalog.get(index)?;
        if !room.available {
            return Err(ReservationError::RoomUnavailable.into());
        }
        Ok(room)
    }

    pub fn reserve(&self, request: ReservationRequest) -> Result<ReservationRecord, DeskError> {
        let ReservationRequest {
            room_index,
            check_in,
            check_out,
            guest_name,
        } = request;
        let (index, check_in, check_out, guest_name) =
            match (room_index, check_in, check_out, guest_name) {
                (Some(i), Some(a), Some(b), Some(g)) => (i, a, b, g),
                _ => return Err(DeskError::Cancelled),
            };

        let record = self.catalog.with_room_mut(index, |room| {
            attempt_reservation(room, &check_in, &check_out, &guest_name)
        })??;

        // The booking stands even when the file write fails
        if let Err(e) = self.sink.append(&record.to_string()) {
            error!(error = %e, room = %record.room, "failed to write reservation record");
        } else {
            info!(room = %record.room, "reservation recorded");
        }
        Ok(record)
    }
}
