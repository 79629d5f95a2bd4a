use thiserror::Error;

use crate::{
    client::{Bank, Client},
    inventory::{Inventory, NoteBundle},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispenserError {
    #[error("withdrawal amount {0} must be a positive multiple of 10")]
    InvalidAmount(u64),
    #[error("requested {requested}, but the client balance is {balance}")]
    InsufficientBalance { requested: u64, balance: u64 },
    #[error("the dispenser cannot compose {0} from the notes it holds")]
    InsufficientStock(u64),
    #[error("no client is being served")]
    NoActiveSession,
    #[error("another client is already being served")]
    SessionAlreadyActive,
    #[error("`{0}` is not a client of this bank")]
    NotABankClient(String),
}

/// A cash machine bound to one bank. Holds the note stock and a cursor to
/// the client currently being served; at most one session at a time, and no
/// internal locking, so shared use needs external serialization.
#[derive(Debug)]
pub struct Dispenser {
    bank: Bank,
    inventory: Inventory,
    session: Option<String>,
}

impl Dispenser {
    pub fn new(bank: Bank, inventory: Inventory) -> Self {
        Dispenser {
            bank,
            inventory,
            session: None,
        }
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut Bank {
        &mut self.bank
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Name of the client being served, if any.
    pub fn active_client(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Idle -> Serving. Bank membership is checked here and not again for
    /// the lifetime of the session.
    pub fn start_session(&mut self, name: &str) -> Result<(), DispenserError> {
        if self.session.is_some() {
            return Err(DispenserError::SessionAlreadyActive);
        }
        if self.bank.find_by_name(name).is_none() {
            return Err(DispenserError::NotABankClient(name.to_owned()));
        }
        self.session = Some(name.to_owned());
        Ok(())
    }

    /// Serving -> Idle, unconditionally. No balance check.
    pub fn end_session(&mut self) -> Result<(), DispenserError> {
        if self.session.take().is_none() {
            return Err(DispenserError::NoActiveSession);
        }
        Ok(())
    }

    /// Feeds note batches into the machine, crediting the served client with
    /// their total face value. Returns the credited amount. Repeated calls
    /// accumulate.
    pub fn deposit(&mut self, batches: &[NoteBundle]) -> Result<u64, DispenserError> {
        let credited: u64 = batches.iter().map(NoteBundle::total_value).sum();
        self.served_client()?.credit(credited);
        for batch in batches {
            self.inventory.accept(batch);
        }
        Ok(credited)
    }

    /// Dispenses exactly `amount` in notes and debits the served client.
    /// Checked in order: amount shape, client balance, note stock; the first
    /// failure is reported and nothing mutates on any failure.
    pub fn withdraw(&mut self, amount: u64) -> Result<NoteBundle, DispenserError> {
        let Dispenser {
            bank,
            inventory,
            session,
        } = self;
        let name = session.as_deref().ok_or(DispenserError::NoActiveSession)?;
        let client = bank
            .find_by_name_mut(name)
            .ok_or_else(|| DispenserError::NotABankClient(name.to_owned()))?;
        if amount == 0 || amount % 10 != 0 {
            return Err(DispenserError::InvalidAmount(amount));
        }
        if amount > client.balance() {
            return Err(DispenserError::InsufficientBalance {
                requested: amount,
                balance: client.balance(),
            });
        }
        let bundle = inventory
            .dispense(amount)
            .ok_or(DispenserError::InsufficientStock(amount))?;
        client.debit(amount);
        Ok(bundle)
    }

    fn served_client(&mut self) -> Result<&mut Client, DispenserError> {
        let name = self
            .session
            .as_deref()
            .ok_or(DispenserError::NoActiveSession)?;
        // the member can only disappear if it was struck off mid-session
        self.bank
            .find_by_name_mut(name)
            .ok_or_else(|| DispenserError::NotABankClient(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Denomination::*;

    fn dispenser(balance: u64, stock: &[(crate::inventory::Denomination, u32)]) -> Dispenser {
        let mut bank = Bank::new("Bibici");
        bank.add_client(Client::new("Nikita", balance)).unwrap();
        Dispenser::new(bank, stock.iter().copied().collect())
    }

    #[test]
    fn session_requires_bank_membership() {
        let mut atm = dispenser(0, &[]);
        assert_eq!(
            atm.start_session("Oleg"),
            Err(DispenserError::NotABankClient("Oleg".to_owned()))
        );
        assert_eq!(atm.active_client(), None);
    }

    #[test]
    fn one_session_at_a_time() {
        let mut atm = dispenser(0, &[]);
        atm.bank_mut().add_client(Client::new("Oleg", 50)).unwrap();
        atm.start_session("Nikita").unwrap();
        assert_eq!(
            atm.start_session("Oleg"),
            Err(DispenserError::SessionAlreadyActive)
        );
        // even for the client already served
        assert_eq!(
            atm.start_session("Nikita"),
            Err(DispenserError::SessionAlreadyActive)
        );
        atm.end_session().unwrap();
        atm.start_session("Oleg").unwrap();
        assert_eq!(atm.active_client(), Some("Oleg"));
    }

    #[test]
    fn end_session_when_idle_fails() {
        let mut atm = dispenser(0, &[]);
        assert_eq!(atm.end_session(), Err(DispenserError::NoActiveSession));
    }

    #[test]
    fn operations_require_a_session() {
        let mut atm = dispenser(1000, &[(Hundred, 10)]);
        assert_eq!(atm.withdraw(100), Err(DispenserError::NoActiveSession));
        let batch: NoteBundle = [(Hundred, 1)].into_iter().collect();
        assert_eq!(
            atm.deposit(&[batch]),
            Err(DispenserError::NoActiveSession)
        );
        assert_eq!(atm.inventory().count(Hundred), 10);
    }

    #[test]
    fn deposit_credits_balance_and_stock() {
        let mut atm = dispenser(0, &[]);
        atm.start_session("Nikita").unwrap();
        let batch: NoteBundle = [(Fifty, 2), (Ten, 1)].into_iter().collect();
        assert_eq!(atm.deposit(&[batch]), Ok(110));
        assert_eq!(atm.bank().find_by_name("Nikita").unwrap().balance(), 110);
        assert_eq!(atm.inventory().count(Fifty), 2);
        assert_eq!(atm.inventory().count(Ten), 1);
    }

    #[test]
    fn deposit_batches_accumulate() {
        let mut atm = dispenser(0, &[]);
        atm.start_session("Nikita").unwrap();
        let batch: NoteBundle = [(Hundred, 1)].into_iter().collect();
        atm.deposit(&[batch.clone(), batch.clone()]).unwrap();
        atm.deposit(&[batch]).unwrap();
        assert_eq!(atm.bank().find_by_name("Nikita").unwrap().balance(), 300);
        assert_eq!(atm.inventory().count(Hundred), 3);
    }

    #[test]
    fn withdraw_drains_exact_notes() {
        let mut atm = dispenser(7000, &[(FiveThousand, 1), (Thousand, 2), (Hundred, 0)]);
        atm.start_session("Nikita").unwrap();
        let bundle = atm.withdraw(7000).unwrap();
        assert_eq!(bundle.count(FiveThousand), 1);
        assert_eq!(bundle.count(Thousand), 2);
        assert_eq!(bundle.total_value(), 7000);
        assert_eq!(atm.inventory().total_value(), 0);
        assert_eq!(atm.bank().find_by_name("Nikita").unwrap().balance(), 0);
    }

    #[test]
    fn withdraw_checks_amount_shape_first() {
        let mut atm = dispenser(100, &[(Hundred, 1)]);
        atm.start_session("Nikita").unwrap();
        assert_eq!(atm.withdraw(0), Err(DispenserError::InvalidAmount(0)));
        // not a multiple of 10, even though the balance check would also fail
        assert_eq!(atm.withdraw(105), Err(DispenserError::InvalidAmount(105)));
    }

    #[test]
    fn withdraw_checks_balance_before_stock() {
        let mut atm = dispenser(100, &[]);
        atm.start_session("Nikita").unwrap();
        // 200 > balance, reported before the empty stock is consulted
        assert_eq!(
            atm.withdraw(200),
            Err(DispenserError::InsufficientBalance {
                requested: 200,
                balance: 100
            })
        );
    }

    #[test]
    fn failed_withdrawal_leaves_everything_untouched() {
        let mut atm = dispenser(1000, &[(Hundred, 3)]);
        atm.start_session("Nikita").unwrap();
        assert_eq!(atm.withdraw(350), Err(DispenserError::InsufficientStock(350)));
        assert_eq!(atm.inventory().count(Hundred), 3);
        assert_eq!(atm.bank().find_by_name("Nikita").unwrap().balance(), 1000);
    }

    #[test]
    fn deposit_withdraw_round_trip_conserves_inventory() {
        let mut atm = dispenser(0, &[(FiveHundred, 5), (Fifty, 5)]);
        atm.start_session("Nikita").unwrap();
        let before = atm.inventory().clone();
        let batch: NoteBundle = [(Fifty, 2), (Ten, 1)].into_iter().collect();
        atm.deposit(&[batch.clone()]).unwrap();
        assert_eq!(atm.withdraw(110), Ok(batch));
        assert_eq!(atm.inventory(), &before);
        assert_eq!(atm.bank().find_by_name("Nikita").unwrap().balance(), 0);
    }

    #[test]
    fn session_survives_insufficient_funds() {
        let mut atm = dispenser(100, &[(Ten, 100)]);
        atm.start_session("Nikita").unwrap();
        assert!(atm.withdraw(500).is_err());
        assert_eq!(atm.active_client(), Some("Nikita"));
        assert_eq!(atm.withdraw(100).unwrap().count(Ten), 10);
    }
}
