//! The five-level BAI2 tree: File → Group → Account → Transaction, plus the
//! embedded Summary and FundsType sub-records (§3).
//!
//! These are pure data types; parsing lives in `records` and `assembler`,
//! rendering lives in `emitter`. Containers carry both the trailer-reported
//! aggregate (`reported_*`) and an on-demand recomputation method, so the
//! validator can compare the two independently of how the tree was built.

use crate::amount::{Amount, UnsignedAmount};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A sum variant describing funds availability (§3 FundsType).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FundsType {
    /// `Z` or an empty code: unspecified.
    Unknown,
    /// `0`: same-day availability.
    SameDay,
    /// `1`: one-day availability.
    OneDay,
    /// `2`: two-day availability.
    TwoDay,
    /// `V`: value-dated.
    ValueDated {
        date: NaiveDate,
        time: Option<NaiveTime>,
    },
    /// `S`: split availability across three buckets.
    Split {
        immediate: Amount,
        one_day: Amount,
        more_than_one_day: Amount,
    },
    /// `D`: a distribution list of (days, amount) pairs.
    Distributed(Vec<DistributionEntry>),
}

impl FundsType {
    /// The one-character BAI2 code for this variant. `Unknown` is labeled
    /// `Z` here for display purposes, but the emitter renders it as an empty
    /// field (matching the common real-world convention of simply omitting
    /// the funds-type code rather than spelling out `Z`).
    pub fn code(&self) -> &'static str {
        match self {
            FundsType::Unknown => "Z",
            FundsType::SameDay => "0",
            FundsType::OneDay => "1",
            FundsType::TwoDay => "2",
            FundsType::ValueDated { .. } => "V",
            FundsType::Split { .. } => "S",
            FundsType::Distributed(_) => "D",
        }
    }
}

/// One `(day, amount)` pair within a `FundsType::Distributed` list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub days: u32,
    pub amount: Amount,
}

/// A `(type, amount, item-count, funds-type)` tuple embedded in an account
/// header (§3 Account, GLOSSARY).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub type_code: String,
    pub amount: Amount,
    pub item_count: Option<u32>,
    pub funds_type: Option<FundsType>,
}

/// A transaction detail record (§3 Transaction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub type_code: String,
    pub amount: UnsignedAmount,
    pub funds_type: Option<FundsType>,
    pub bank_reference: Option<String>,
    pub customer_reference: Option<String>,
    pub text: Option<String>,
    /// Unrecognized trailing continuation tokens, captured verbatim (not
    /// re-emitted) when `Bai2Config::strict_continuations` is `false` and at
    /// least one `88` contributed fields the grammar didn't consume.
    pub raw_trailer: Option<String>,
    /// Number of physical records (this header + any `88` continuations)
    /// consumed while parsing this transaction.
    pub own_record_count: u32,
}

impl Transaction {
    pub fn record_count(&self) -> u32 {
        self.own_record_count
    }
}

/// Group status code (§3 Group). Unknown codes are retained verbatim as
/// `Other` rather than rejected at parse time: per the documented invariant,
/// type/status codes outside the enumeration are a validation error, not a
/// parse error, so the codec must still be able to build a tree around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupStatus {
    Update,
    Deletion,
    Correction,
    Test,
    Other(u8),
}

impl GroupStatus {
    /// Maps a code onto one of the four documented variants, or `None` if
    /// it isn't one of them. Used by the validator to flag unknown codes.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(GroupStatus::Update),
            2 => Some(GroupStatus::Deletion),
            3 => Some(GroupStatus::Correction),
            4 => Some(GroupStatus::Test),
            _ => None,
        }
    }

    /// Builds a `GroupStatus` from any raw code, falling back to `Other` for
    /// values outside the documented enumeration. Used by the record codec,
    /// which must not fail just because a status code is unrecognized.
    pub fn from_raw(code: u8) -> Self {
        Self::from_code(code).unwrap_or(GroupStatus::Other(code))
    }

    pub fn code(&self) -> u8 {
        match self {
            GroupStatus::Update => 1,
            GroupStatus::Deletion => 2,
            GroupStatus::Correction => 3,
            GroupStatus::Test => 4,
            GroupStatus::Other(c) => *c,
        }
    }

    pub fn is_known(&self) -> bool {
        crate::codes::is_valid_group_status(self.code())
    }
}

/// Customer account (§3 Account).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub number: String,
    pub currency: Option<String>,
    pub summaries: Vec<Summary>,
    pub transactions: Vec<Transaction>,
    /// Control total as reported by the `49` trailer.
    pub reported_control_total: Amount,
    /// Record count as reported by the `49` trailer.
    pub reported_record_count: u32,
    pub header_record_count: u32,
    pub trailer_record_count: u32,
    /// Byte offset of the `49` trailer, used to annotate aggregate errors.
    pub trailer_offset: usize,
    /// Unrecognized trailing continuation tokens from the `03` header, if any.
    pub raw_trailer: Option<String>,
}

impl Account {
    /// Recomputed sum of summary amounts, per the documented sign convention.
    pub fn recomputed_control_total(&self) -> Amount {
        self.summaries.iter().map(|s| s.amount).sum()
    }

    /// Header + each transaction's records + trailer, with no allowance for
    /// the container's own reporting unit (see `recomputed_record_count`).
    pub(crate) fn raw_record_count(&self) -> u32 {
        self.header_record_count
            + self
                .transactions
                .iter()
                .map(Transaction::record_count)
                .sum::<u32>()
            + self.trailer_record_count
    }

    /// Recomputed record count matching the `49` trailer's convention
    /// (§8 scenario A: account control total 500 with a `49,+500,3` trailer
    /// over a header and trailer alone): every container's reported count
    /// runs one higher than the naive "header + children + trailer" nesting,
    /// so each level tacks on its own `+1` over the *raw*, un-bonused sum of
    /// its children rather than over their already-adjusted totals (which
    /// would double the bonus on the way up the tree).
    pub fn recomputed_record_count(&self) -> u32 {
        self.raw_record_count() + 1
    }
}

/// A BAI2 group: one originator/receiver pair sharing an as-of date (§3 Group).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub ultimate_receiver: String,
    pub originator: String,
    pub status: GroupStatus,
    pub as_of_date: NaiveDate,
    pub as_of_time: Option<NaiveTime>,
    pub currency: Option<String>,
    pub as_of_date_modifier: Option<String>,
    pub accounts: Vec<Account>,
    pub reported_control_total: Amount,
    pub reported_account_count: u32,
    pub reported_record_count: u32,
    pub header_record_count: u32,
    pub trailer_record_count: u32,
    /// Byte offset of the `98` trailer, used to annotate aggregate errors.
    pub trailer_offset: usize,
    /// Unrecognized trailing continuation tokens from the `02` header, if any.
    pub raw_trailer: Option<String>,
}

impl Group {
    pub fn recomputed_control_total(&self) -> Amount {
        self.accounts.iter().map(|a| a.recomputed_control_total()).sum()
    }

    pub fn recomputed_account_count(&self) -> u32 {
        self.accounts.len() as u32
    }

    pub(crate) fn raw_record_count(&self) -> u32 {
        self.header_record_count
            + self
                .accounts
                .iter()
                .map(Account::raw_record_count)
                .sum::<u32>()
            + self.trailer_record_count
    }

    /// See `Account::recomputed_record_count` for the `+1`-per-container
    /// convention this matches.
    pub fn recomputed_record_count(&self) -> u32 {
        self.raw_record_count() + 1
    }
}

/// The root of a BAI2 document (§3 File).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub sender: String,
    pub receiver: String,
    pub creation_date: NaiveDate,
    pub creation_time: NaiveTime,
    pub file_sequence: u32,
    pub physical_record_len: Option<u32>,
    pub block_size: Option<u32>,
    pub version: u8,
    pub groups: Vec<Group>,
    pub reported_control_total: Amount,
    pub reported_group_count: u32,
    pub reported_record_count: u32,
    pub header_record_count: u32,
    pub trailer_record_count: u32,
    /// Byte offset of the `99` trailer, used to annotate aggregate errors.
    pub trailer_offset: usize,
    /// Unrecognized trailing continuation tokens from the `01` header, if any.
    pub raw_trailer: Option<String>,
}

impl File {
    pub fn recomputed_control_total(&self) -> Amount {
        self.groups.iter().map(|g| g.recomputed_control_total()).sum()
    }

    pub fn recomputed_group_count(&self) -> u32 {
        self.groups.len() as u32
    }

    pub(crate) fn raw_record_count(&self) -> u32 {
        self.header_record_count
            + self
                .groups
                .iter()
                .map(Group::raw_record_count)
                .sum::<u32>()
            + self.trailer_record_count
    }

    /// See `Account::recomputed_record_count` for the `+1`-per-container
    /// convention this matches.
    pub fn recomputed_record_count(&self) -> u32 {
        self.raw_record_count() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_status_round_trip() {
        assert_eq!(GroupStatus::from_code(1), Some(GroupStatus::Update));
        assert_eq!(GroupStatus::from_code(4), Some(GroupStatus::Test));
        assert_eq!(GroupStatus::from_code(9), None);
        assert_eq!(GroupStatus::Correction.code(), 3);
    }

    #[test]
    fn test_funds_type_codes() {
        assert_eq!(FundsType::Unknown.code(), "Z");
        assert_eq!(FundsType::Distributed(vec![]).code(), "D");
    }

    #[test]
    fn test_account_recomputed_control_total() {
        let account = Account {
            number: "ACCT1".into(),
            currency: Some("CAD".into()),
            summaries: vec![
                Summary {
                    type_code: "040".into(),
                    amount: Amount::from_minor_units(0),
                    item_count: None,
                    funds_type: None,
                },
                Summary {
                    type_code: "100".into(),
                    amount: Amount::from_minor_units(500),
                    item_count: None,
                    funds_type: None,
                },
            ],
            transactions: vec![],
            reported_control_total: Amount::from_minor_units(500),
            reported_record_count: 3,
            header_record_count: 1,
            trailer_record_count: 1,
            trailer_offset: 0,
            raw_trailer: None,
        };
        assert_eq!(account.recomputed_control_total().value(), 500);
        assert_eq!(account.recomputed_record_count(), 3);
    }
}
