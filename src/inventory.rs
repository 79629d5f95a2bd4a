use std::collections::BTreeMap;

use thiserror::Error;

/// Banknote face values the dispenser understands. Anything else is rejected
/// before it can reach the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u64)]
pub enum Denomination {
    Ten = 10,
    Fifty = 50,
    Hundred = 100,
    TwoHundred = 200,
    FiveHundred = 500,
    Thousand = 1000,
    TwoThousand = 2000,
    FiveThousand = 5000,
}

impl Denomination {
    /// All denominations, ascending by face value.
    pub const ALL: [Denomination; 8] = [
        Denomination::Ten,
        Denomination::Fifty,
        Denomination::Hundred,
        Denomination::TwoHundred,
        Denomination::FiveHundred,
        Denomination::Thousand,
        Denomination::TwoThousand,
        Denomination::FiveThousand,
    ];

    pub fn face_value(self) -> u64 {
        self as u64
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0} is not a recognized banknote denomination")]
pub struct InvalidDenomination(pub u64);

impl TryFrom<u64> for Denomination {
    type Error = InvalidDenomination;

    fn try_from(face: u64) -> Result<Self, Self::Error> {
        Denomination::ALL
            .into_iter()
            .find(|d| d.face_value() == face)
            .ok_or(InvalidDenomination(face))
    }
}

/// A multiset of banknotes: what a client feeds in, or what a withdrawal
/// hands out.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoteBundle {
    notes: BTreeMap<Denomination, u32>,
}

impl NoteBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, denomination: Denomination, count: u32) {
        if count > 0 {
            *self.notes.entry(denomination).or_insert(0) += count;
        }
    }

    pub fn count(&self, denomination: Denomination) -> u32 {
        self.notes.get(&denomination).copied().unwrap_or(0)
    }

    pub fn total_value(&self) -> u64 {
        self.notes
            .iter()
            .map(|(d, count)| d.face_value() * u64::from(*count))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.notes.iter().map(|(d, count)| (*d, *count))
    }
}

impl FromIterator<(Denomination, u32)> for NoteBundle {
    fn from_iter<I: IntoIterator<Item = (Denomination, u32)>>(iter: I) -> Self {
        let mut bundle = NoteBundle::new();
        for (denomination, count) in iter {
            bundle.add(denomination, count);
        }
        bundle
    }
}

/// Physical banknote stock of one dispenser. Counts never go negative:
/// withdrawals are planned on a scratch basis and committed only when the
/// full amount is reachable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Inventory {
    counts: BTreeMap<Denomination, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, denomination: Denomination) -> u32 {
        self.counts.get(&denomination).copied().unwrap_or(0)
    }

    pub fn total_value(&self) -> u64 {
        self.counts
            .iter()
            .map(|(d, count)| d.face_value() * u64::from(*count))
            .sum()
    }

    /// Accepts deposited notes into stock.
    pub fn accept(&mut self, bundle: &NoteBundle) {
        for (denomination, count) in bundle.iter() {
            *self.counts.entry(denomination).or_insert(0) += count;
        }
    }

    /// Greedy decomposition of `amount` into available notes, largest face
    /// value first: take `min(remaining / face, stock)` of each and move on.
    /// Purely a plan, stock is untouched. `None` when the remainder cannot
    /// be expressed; the greedy tie-break never backtracks, so some amounts
    /// that a different note mix could cover are reported unreachable.
    pub fn plan(&self, amount: u64) -> Option<NoteBundle> {
        let mut remaining = amount;
        let mut bundle = NoteBundle::new();
        for denomination in Denomination::ALL.into_iter().rev() {
            let take = (remaining / denomination.face_value())
                .min(u64::from(self.count(denomination)));
            if take > 0 {
                bundle.add(denomination, take as u32);
                remaining -= take * denomination.face_value();
            }
        }
        (remaining == 0).then_some(bundle)
    }

    /// Plans and, only on success, removes the notes from stock.
    pub fn dispense(&mut self, amount: u64) -> Option<NoteBundle> {
        let bundle = self.plan(amount)?;
        for (denomination, count) in bundle.iter() {
            // plan() never takes more than is in stock
            *self.counts.entry(denomination).or_insert(0) -= count;
        }
        Some(bundle)
    }
}

impl FromIterator<(Denomination, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (Denomination, u32)>>(iter: I) -> Self {
        let mut inventory = Inventory::new();
        for (denomination, count) in iter {
            if count > 0 {
                *inventory.counts.entry(denomination).or_insert(0) += count;
            }
        }
        inventory
    }
}
