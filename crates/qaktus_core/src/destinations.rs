use thiserror::Error;
use url::Url;

/// Stable identity of a destination row. Survives removal of other rows.
pub type EntryId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DestinationError {
    #[error("destination position {position} is out of range (len {len})")]
    OutOfRange { position: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationEntry {
    id: EntryId,
    url: String,
    touched: bool,
}

impl DestinationEntry {
    fn empty(id: EntryId) -> Self {
        Self {
            id,
            url: String::new(),
            touched: false,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Raw text as typed. Not guaranteed to be a valid URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the row has been edited at least once.
    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn is_valid(&self) -> bool {
        is_valid_destination_url(&self.url)
    }
}

/// Ordered destination rows. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationList {
    entries: Vec<DestinationEntry>,
    next_id: EntryId,
}

impl Default for DestinationList {
    fn default() -> Self {
        Self::new()
    }
}

impl DestinationList {
    /// A list holding a single empty entry.
    pub fn new() -> Self {
        Self {
            entries: vec![DestinationEntry::empty(1)],
            next_id: 2,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DestinationEntry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&DestinationEntry> {
        self.entries.get(position)
    }

    pub fn add(&mut self) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(DestinationEntry::empty(id));
        id
    }

    /// Removes the entry at `position` and returns its id.
    ///
    /// Returns `Ok(None)` without touching the list when it holds a single
    /// entry.
    pub fn remove(&mut self, position: usize) -> Result<Option<EntryId>, DestinationError> {
        self.check_position(position)?;
        if self.entries.len() == 1 {
            return Ok(None);
        }
        Ok(Some(self.entries.remove(position).id))
    }

    pub fn set_url(
        &mut self,
        position: usize,
        text: impl Into<String>,
    ) -> Result<(), DestinationError> {
        self.check_position(position)?;
        let entry = &mut self.entries[position];
        entry.url = text.into();
        entry.touched = true;
        Ok(())
    }

    /// Advisory validity of the entry at `position`; false when out of range.
    pub fn is_valid(&self, position: usize) -> bool {
        self.entries
            .get(position)
            .is_some_and(DestinationEntry::is_valid)
    }

    pub fn all_valid(&self) -> bool {
        self.entries.iter().all(DestinationEntry::is_valid)
    }

    fn check_position(&self, position: usize) -> Result<(), DestinationError> {
        if position < self.entries.len() {
            Ok(())
        } else {
            Err(DestinationError::OutOfRange {
                position,
                len: self.entries.len(),
            })
        }
    }
}

/// An absolute URL with both a scheme and a host.
pub fn is_valid_destination_url(text: &str) -> bool {
    match Url::parse(text) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_validity_requires_scheme_and_host() {
        assert!(is_valid_destination_url("https://a.com"));
        assert!(is_valid_destination_url("http://localhost:8080/path?q=1"));
        assert!(!is_valid_destination_url(""));
        assert!(!is_valid_destination_url("a.com"));
        assert!(!is_valid_destination_url("mailto:someone@example.com"));
        assert!(!is_valid_destination_url("https://"));
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut list = DestinationList::new();
        let second = list.add();
        assert_eq!(list.remove(1), Ok(Some(second)));
        let third = list.add();
        assert_ne!(second, third);
    }
}
