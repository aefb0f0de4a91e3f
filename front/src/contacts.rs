use std::cmp::Ordering;

use join_api::v1::{lenient, Contact, ContactDraft, StorePath};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    store::{Store, StoreResult},
    Result,
};

/// The shared contact list.
///
/// The list is stored as one array and written back whole after every
/// change. In memory it is kept sorted by name, so indices refer to the
/// sorted order.
pub struct ContactRepository<S> {
    store: S,
    contacts: Vec<Contact>,
}

impl<S: Store> ContactRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            contacts: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, index: usize) -> Option<&Contact> {
        self.contacts.get(index)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.contacts.iter().position(|contact| contact.id == id)
    }

    /// Index of the first contact with the same name, mail and phone.
    pub fn find_contact_index(&self, contact: &Contact) -> Option<usize> {
        (self.contacts.iter()).position(|other| other.same_details(contact))
    }

    /// Reloads and sorts the list. An unreachable store reads as empty.
    pub async fn list_contacts(&mut self) -> &[Contact] {
        let value = self.store.load(&StorePath::contacts()).await;

        let malformed = value.as_ref().filter(|v| !v.is_array() && !v.is_object());
        if let Some(value) = malformed {
            warn!(kind = kind(value), "contact list is not a collection");
        }

        self.contacts = (value.map(lenient::entries).unwrap_or_default().into_iter())
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(contact) => Some(contact),
                Err(err) => {
                    warn!(%key, "skipping unreadable contact: {err}");
                    None
                }
            })
            .collect();

        self.sort_contacts();
        &self.contacts
    }

    /// Orders by name, ignoring case.
    pub fn sort_contacts(&mut self) {
        self.contacts.sort_by(|a, b| compare_names(&a.name, &b.name));
    }

    /// Appends a contact and writes the list. Returns the new contact's id.
    pub async fn create_contact(&mut self, draft: ContactDraft) -> Result<Uuid> {
        let contact = draft.into_contact()?;
        let id = contact.id;

        self.contacts.push(contact);
        let saved = self.save().await;
        self.sort_contacts();
        saved?;

        info!(%id, "created contact");

        Ok(id)
    }

    /// Replaces the contact at `index`, keeping its id.
    ///
    /// Returns the contact's index after re-sorting, or `None` when `index`
    /// is out of range.
    pub async fn edit_contact(
        &mut self,
        index: usize,
        draft: ContactDraft,
    ) -> Result<Option<usize>> {
        draft.validate()?;

        let Some(slot) = self.contacts.get_mut(index) else {
            return Ok(None);
        };

        let mut contact = draft.into_contact_with_id(slot.id)?;
        contact.extra = std::mem::take(&mut slot.extra);
        *slot = contact.clone();

        let saved = self.save().await;
        self.sort_contacts();
        saved?;

        info!(id = %contact.id, "edited contact");

        Ok(self.find_contact_index(&contact))
    }

    pub async fn delete_contact(&mut self, index: usize) -> Result<bool> {
        if index >= self.contacts.len() {
            return Ok(false);
        }

        let contact = self.contacts.remove(index);
        self.save().await?;

        info!(id = %contact.id, "deleted contact");

        Ok(true)
    }

    async fn save(&self) -> StoreResult<()> {
        let value = serde_json::to_value(&self.contacts)?;
        self.store.put(&StorePath::contacts(), &value).await?;
        Ok(())
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    (a.to_lowercase().cmp(&b.to_lowercase())).then_with(|| a.cmp(b))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
