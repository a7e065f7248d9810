// Room catalog: the fixed, ordered list of bookable rooms

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Room selection {index} is out of range (catalog has {len} rooms)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_type: String,
    pub rate: u32,
    pub available: bool,
}

impl Room {
    pub fn new(room_type: impl Into<String>, rate: u32, available: bool) -> Self {
        Self {
            room_type: room_type.into(),
            rate,
            available,
        }
    }

    /// Summary line shown in search results and reservation records,
    /// e.g. `Standard Room ($100/night)`.
    pub fn details(&self) -> String {
        format!("{} (${}/night)", self.room_type, self.rate)
    }

    // Idempotent, nothing in this crate sets it back to true
    pub fn mark_unavailable(&mut self) {
        self.available = false;
    }

    fn matches(&self, needle_lowercase: &str) -> bool {
        self.room_type.to_lowercase().contains(needle_lowercase)
    }
}

// Selection lists show the bare room type
impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.room_type)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Returns every room whose type contains `term`, ignoring case.
    ///
    /// The term is used as-is: no trimming and no tokenizing, so `" room"`
    /// only matches types with a space before "room". Results keep catalog
    /// order. An empty vector is a normal outcome.
    pub fn search(&self, term: &str) -> Vec<&Room> {
        let needle = term.to_lowercase();
        let results: Vec<&Room> = self.rooms.iter().filter(|r| r.matches(&needle)).collect();
        debug!(term, matches = results.len(), "searched room catalog");
        results
    }

    pub fn get(&self, index: usize) -> Result<&Room, CatalogError> {
        let len = self.rooms.len();
        self.rooms
            .get(index)
            .ok_or(CatalogError::IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Room, CatalogError> {
        let len = self.rooms.len();
        self.rooms
            .get_mut(index)
            .ok_or(CatalogError::IndexOutOfRange { index, len })
    }

    pub fn mark_unavailable(&mut self, index: usize) -> Result<(), CatalogError> {
        self.get_mut(index)?.mark_unavailable();
        Ok(())
    }
}

impl FromIterator<Room> for RoomCatalog {
    fn from_iter<I: IntoIterator<Item = Room>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// Catalog handle that can be shared between threads. Every closure passed
// to `with_room_mut` runs under one lock, so an availability check and the
// flip that follows it cannot interleave with another reservation.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<Mutex<RoomCatalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: RoomCatalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(catalog)),
        }
    }

    // Owned copies: the lock is released before the caller sees the rooms
    pub fn search(&self, term: &str) -> Vec<Room> {
        self.inner.lock().search(term).into_iter().cloned().collect()
    }

    pub fn get(&self, index: usize) -> Result<Room, CatalogError> {
        self.inner.lock().get(index).cloned()
    }

    pub fn snapshot(&self) -> Vec<Room> {
        self.inner.lock().rooms().to_vec()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn with_room_mut<T>(
        &self,
        index: usize,
        f: impl FnOnce(&mut Room) -> T,
    ) -> Result<T, CatalogError> {
        let mut catalog = self.inner.lock();
        let room = catalog.get_mut(index)?;
        Ok(f(room))
    }

    pub fn mark_unavailable(&self, index: usize) -> Result<(), CatalogError> {
        self.inner.lock().mark_unavailable(index)
    }
}

impl From<RoomCatalog> for SharedCatalog {
    fn from(catalog: RoomCatalog) -> Self {
        Self::new(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn hotel() -> RoomCatalog {
        RoomCatalog::new(vec![
            Room::new("Standard Room", 100, true),
            Room::new("Deluxe Room", 150, true),
            Room::new("Suite", 200, false),
        ])
    }

    #[test_case("room", vec!["Standard Room", "Deluxe Room"]; "#1 shared word")]
    #[test_case("DELUXE", vec!["Deluxe Room"]; "#2 upper case term")]
    #[test_case("sUiT", vec!["Suite"]; "#3 mixed case term")]
    #[test_case("", vec!["Standard Room", "Deluxe Room", "Suite"]; "#4 empty term matches all")]
    #[test_case("room standard", vec![]; "#5 no tokenizing")]
    #[test_case(" room", vec!["Standard Room", "Deluxe Room"]; "#6 leading space kept")]
    #[test_case("room ", vec![]; "#7 trailing space kept")]
    #[test_case("penthouse", vec![]; "#8 no match")]
    fn test_search(term: &str, expected: Vec<&str>) {
        let catalog = hotel();
        let found: Vec<&str> = catalog
            .search(term)
            .iter()
            .map(|r| r.room_type.as_str())
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_search_agrees_with_lowercase_contains() {
        let catalog = hotel();
        for term in ["st", "ROOM", "uxe", "x", "Suite", "tan"] {
            let found = catalog.search(term);
            for room in catalog.rooms() {
                let expected = room.room_type.to_lowercase().contains(&term.to_lowercase());
                assert_eq!(found.contains(&room), expected, "term {:?} room {}", term, room);
            }
        }
    }

    #[test]
    fn test_single_room_scenario() {
        assert!(RoomCatalog::default().is_empty());
        let catalog = RoomCatalog::new(vec![Room::new("Standard Room", 100, true)]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.search("deluxe").is_empty());

        let found = catalog.search("room");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].room_type, "Standard Room");
    }

    #[test]
    fn test_get_out_of_range() {
        let catalog = hotel();
        assert_eq!(catalog.get(1).unwrap().room_type, "Deluxe Room");
        assert_eq!(
            catalog.get(3),
            Err(CatalogError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_mark_unavailable_is_idempotent() {
        let mut catalog = hotel();
        catalog.mark_unavailable(0).unwrap();
        catalog.mark_unavailable(0).unwrap();
        assert!(!catalog.get(0).unwrap().available);

        // Already unavailable
        catalog.mark_unavailable(2).unwrap();
        assert!(!catalog.get(2).unwrap().available);

        assert!(catalog.mark_unavailable(7).is_err());
    }

    #[test]
    fn test_room_display() {
        let room = Room::new("Deluxe Room", 150, true);
        assert_eq!(room.details(), "Deluxe Room ($150/night)");
        assert_eq!(room.to_string(), "Deluxe Room");
    }

    #[test]
    fn test_shared_catalog_mutation_is_visible_to_clones() {
        let shared = SharedCatalog::new(hotel());
        let other = shared.clone();
        assert_eq!(other.len(), 3);
        assert!(!other.is_empty());

        shared.mark_unavailable(1).unwrap();
        assert!(!other.get(1).unwrap().available);
        assert_eq!(other.snapshot().len(), 3);
        assert!(matches!(
            other.with_room_mut(9, |_| ()),
            Err(CatalogError::IndexOutOfRange { index: 9, len: 3 })
        ));
    }
}
