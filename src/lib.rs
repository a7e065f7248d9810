// Hotel room catalog and single-room reservation flow

pub mod catalog;
pub mod config;
pub mod desk;
pub mod reservation;
pub mod sink;

// Re-export key types for convenience
pub use catalog::{CatalogError, Room, RoomCatalog, SharedCatalog};
pub use config::{ConfigError, DeskConfig, RoomConfig};
pub use desk::{DeskError, FrontDesk, ReservationRequest, SearchOutcome};
pub use reservation::{
    attempt_reservation, format_date, parse_date, DateField, ReservationError, ReservationRecord,
};
pub use sink::{FileSink, MemorySink, ReservationSink, SinkError};
