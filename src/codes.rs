//! Static enumerations the validator checks records against: group status
//! codes, funds-type codes, a representative BAI2 type-code table, and a
//! permissive currency allow-list.
//!
//! The BAI2 standard documents several hundred summary/detail type codes
//! spanning loan, lockbox, EDI, and controlled-disbursement categories. This
//! table is a representative subset covering the codes commonly seen in
//! cash-management balance reporting rather than the full standard; per the
//! specification's non-goal of business interpretation, the validator only
//! checks *membership*, never meaning.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Matches against the per-call linear scans below since every enumeration
/// here is checked once per record, not in a hot loop, but the type-code and
/// currency tables are large enough that a hashed lookup is worth building
/// once and reusing.
static TYPE_CODE_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| TYPE_CODES.iter().copied().collect());

static CURRENCY_CODE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| CURRENCY_CODES.iter().copied().collect());

/// Three uppercase letters: the ISO 4217 alphabetic-code shape. Checked
/// ahead of the allow-list so a malformed currency field (wrong length,
/// lowercase, digits) reports as an unknown code rather than silently
/// falling through to a case-insensitive table scan that was never meant to
/// normalize shape, only casing.
static CURRENCY_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{3}$").expect("invalid currency shape regex"));

/// Valid BAI2 group status codes (§3 Group).
pub const GROUP_STATUS_CODES: [u8; 4] = [1, 2, 3, 4];

pub fn is_valid_group_status(code: u8) -> bool {
    GROUP_STATUS_CODES.contains(&code)
}

/// One-character FundsType discriminators.
pub const FUNDS_TYPE_CODES: &[&str] = &["Z", "0", "1", "2", "V", "S", "D"];

pub fn is_valid_funds_type_code(code: &str) -> bool {
    code.is_empty() || FUNDS_TYPE_CODES.contains(&code)
}

/// Representative BAI2 summary/transaction type codes.
pub const TYPE_CODES: &[&str] = &[
    "010", "015", "020", "025", "030", "035", "039", "040", "045", "050", "056", "057", "058",
    "072", "074", "100", "105", "106", "108", "109", "110", "115", "120", "130", "131", "135",
    "136", "140", "142", "143", "150", "160", "161", "162", "163", "164", "165", "166", "167",
    "168", "169", "170", "172", "174", "175", "176", "180", "182", "184", "186", "190", "191",
    "194", "195", "196", "197", "198", "201", "202", "203", "204", "205", "206", "207", "208",
    "209", "210", "211", "212", "213", "214", "215", "254", "255", "260", "261", "262", "263",
    "264", "265", "266", "267", "268", "270", "280", "281", "301", "302", "318", "342", "344",
    "346", "347", "348", "350", "352", "354", "356", "358", "360", "361", "362", "363", "364",
    "365", "366", "367", "368", "369", "399", "400", "401", "402", "403", "404", "405", "406",
    "407", "408", "409", "445", "446", "447", "455", "460", "461", "462", "463", "464", "465",
    "466", "467", "468", "469", "470", "471", "472", "473", "474", "475", "476", "477", "478",
    "479", "480", "490", "491", "492", "493", "494", "495", "498", "501", "502", "503", "504",
    "505", "506", "507", "508", "509", "621", "622", "623", "624", "626", "627", "628", "629",
    "630", "631", "632", "633", "634", "654", "673", "674", "675", "676", "677", "678", "679",
    "680", "681", "682", "683", "684", "685", "686", "687", "688", "689", "690", "691", "692",
    "693", "694", "695", "696", "697", "698", "699", "720", "721", "722", "745", "746", "747",
    "748", "749", "763", "764", "765", "766", "767", "768", "769", "770", "771", "890", "891",
    "892", "893", "894", "895", "896", "897", "898", "899", "900", "901", "902",
];

pub fn is_known_type_code(code: &str) -> bool {
    TYPE_CODE_SET.contains(code)
}

/// Permissive ISO 4217 allow-list; overridable per `Bai2Config::allowed_currencies`.
pub const CURRENCY_CODES: &[&str] = &[
    "USD", "EUR", "GBP", "CAD", "JPY", "CHF", "AUD", "NZD", "CNY", "HKD", "SGD", "SEK", "NOK",
    "DKK", "ZAR", "MXN", "BRL", "INR", "KRW", "THB", "PLN", "CZK", "HUF", "RUB", "TRY", "ILS",
    "AED", "SAR", "TWD", "IDR", "PHP", "MYR", "VND", "ARS", "CLP", "COP", "PEN",
];

pub fn is_known_currency(code: &str) -> bool {
    if !CURRENCY_SHAPE.is_match(code) {
        return false;
    }
    CURRENCY_CODE_SET.contains(code.to_ascii_uppercase().as_str())
}
