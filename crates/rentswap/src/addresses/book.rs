use super::domain::{Address, AddressError, AddressFields, AddressId};

/// A user's saved addresses in creation order.
///
/// Invariant: when the book is non-empty exactly one entry has `is_default` set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressBook {
    user_id: String,
    entries: Vec<Address>,
}

impl AddressBook {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            entries: Vec::new(),
        }
    }

    /// Build a book from stored entries, repairing the default flag if needed.
    ///
    /// The first flagged entry wins; with none flagged the first entry is promoted.
    pub fn from_entries(user_id: impl Into<String>, entries: Vec<Address>) -> Self {
        let mut book = Self {
            user_id: user_id.into(),
            entries,
        };
        let keep = book
            .entries
            .iter()
            .position(|address| address.is_default)
            .unwrap_or(0);
        book.mark_default_at(keep);
        book
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn entries(&self) -> &[Address] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &AddressId) -> Option<&Address> {
        self.entries.iter().find(|address| &address.id == id)
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.entries.iter().find(|address| address.is_default)
    }

    /// Whether a new entry would become the default.
    pub fn would_default(&self, fields: &AddressFields) -> bool {
        fields.is_default || self.entries.is_empty()
    }

    /// Append a new entry. The first entry, or one flagged default, becomes the default.
    pub fn insert(&mut self, id: AddressId, fields: AddressFields) -> &Address {
        let make_default = self.would_default(&fields);
        let address = Address::from_fields(id, &self.user_id, fields);
        self.entries.push(address);
        let index = self.entries.len() - 1;
        if make_default {
            self.mark_default_at(index);
        } else {
            self.entries[index].is_default = false;
        }
        &self.entries[index]
    }

    /// Replace an entry's fields. The default flag can be gained here but never dropped.
    pub fn update(&mut self, id: &AddressId, fields: AddressFields) -> Result<&Address, AddressError> {
        let index = self.index_of(id)?;
        let keep_default = self.entries[index].is_default;
        let make_default = fields.is_default;

        let entry = &mut self.entries[index];
        entry.label = fields.label;
        entry.full_address = fields.full_address;
        entry.city = fields.city;
        entry.phone = fields.phone;
        entry.coordinates = fields.coordinates;
        entry.is_default = keep_default;

        if make_default {
            self.mark_default_at(index);
        }
        Ok(&self.entries[index])
    }

    pub fn set_default(&mut self, id: &AddressId) -> Result<(), AddressError> {
        let index = self.index_of(id)?;
        self.mark_default_at(index);
        Ok(())
    }

    /// Remove an entry. Removing the default promotes the first remaining entry.
    pub fn remove(&mut self, id: &AddressId) -> Result<Address, AddressError> {
        let index = self.index_of(id)?;
        let removed = self.entries.remove(index);
        if removed.is_default && !self.entries.is_empty() {
            self.mark_default_at(0);
        }
        Ok(removed)
    }

    fn index_of(&self, id: &AddressId) -> Result<usize, AddressError> {
        self.entries
            .iter()
            .position(|address| &address.id == id)
            .ok_or_else(|| AddressError::UnknownAddress(id.clone()))
    }

    fn mark_default_at(&mut self, index: usize) {
        for (position, address) in self.entries.iter_mut().enumerate() {
            address.is_default = position == index;
        }
    }
}
