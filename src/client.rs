use std::collections::HashMap;

use thiserror::Error;

/// A bank client. Balance is whole currency units, there is no fractional
/// money anywhere in this domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    name: String,
    balance: u64,
}

impl Client {
    pub fn new(name: impl Into<String>, balance: u64) -> Self {
        Client {
            name: name.into(),
            balance,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub(crate) fn credit(&mut self, amount: u64) {
        self.balance += amount;
    }

    /// Caller must have checked the balance; withdrawal validation lives in
    /// the dispenser.
    pub(crate) fn debit(&mut self, amount: u64) {
        self.balance -= amount;
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("client `{0}` already exists in this bank")]
    DuplicateClient(String),
    #[error("client `{0}` is not a member of this bank")]
    UnknownClient(String),
}

/// Account directory: the set of clients of one bank, keyed by name.
#[derive(Debug, Default)]
pub struct Bank {
    name: String,
    clients: HashMap<String, Client>,
}

impl Bank {
    pub fn new(name: impl Into<String>) -> Self {
        Bank {
            name: name.into(),
            clients: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_client(&mut self, client: Client) -> Result<(), DirectoryError> {
        if self.clients.contains_key(client.name()) {
            return Err(DirectoryError::DuplicateClient(client.name().to_owned()));
        }
        self.clients.insert(client.name().to_owned(), client);
        Ok(())
    }

    pub fn remove_client(&mut self, name: &str) -> Result<Client, DirectoryError> {
        self.clients
            .remove(name)
            .ok_or_else(|| DirectoryError::UnknownClient(name.to_owned()))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Client> {
        self.clients.get(name)
    }

    pub(crate) fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Client> {
        self.clients.get_mut(name)
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }
}
