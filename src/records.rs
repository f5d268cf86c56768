//! Record codec (§4.2): one grammar per leading two-digit record code.
//!
//! Every `parse_*` function takes a `Cursor` already advanced past the
//! leading code and reads the record's known fields in order, stopping as
//! soon as the scanner reports a field as `terminal` — which happens either
//! at a genuine end-of-record or because trailing optional fields were
//! omitted entirely (a real-world compression BAI2 files use: see the
//! account summary in scenario A, whose last entry carries only a type code
//! and amount). The returned `bool` mirrors that terminal flag so the
//! caller (the assembler) knows whether any continuation overflow remains
//! to be drained via `drain_overflow`.
//!
//! `render_*` functions do the reverse. Trailing optional fields that were
//! never actually read (`None` because the record terminated before
//! reaching them) are omitted entirely rather than padded with empty
//! tokens, via `trim_trailing_absent` — this matters specifically for
//! `FundsType`, whose "never reached" (`None`) and "explicit empty code"
//! (`Some(FundsType::Unknown)`) states would otherwise collapse into the
//! same rendered token and break the round-trip property on re-parse.

use crate::amount::{Amount, UnsignedAmount};
use crate::codes;
use crate::config::Bai2Config;
use crate::errors::{Bai2Error, Result};
use crate::model::{
    Account, DistributionEntry, File, FundsType, Group, GroupStatus, Summary, Transaction,
};
use crate::scanner::{self, Cursor};
use chrono::{NaiveDate, NaiveTime};

fn parse_yymmdd(token: &str, record_type: &str, field: &str, offset: usize) -> Result<NaiveDate> {
    let trimmed = token.trim();
    if trimmed.len() != 6 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Bai2Error::field(
            record_type,
            field,
            offset,
            format!("invalid date token '{token}'"),
        ));
    }
    let yy: i32 = trimmed[0..2].parse().unwrap();
    let mm: u32 = trimmed[2..4].parse().unwrap();
    let dd: u32 = trimmed[4..6].parse().unwrap();
    let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year, mm, dd)
        .ok_or_else(|| Bai2Error::field(record_type, field, offset, format!("invalid date '{token}'")))
}

fn parse_hhmm(
    token: &str,
    record_type: &str,
    field: &str,
    offset: usize,
) -> Result<Option<NaiveTime>> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Bai2Error::field(
            record_type,
            field,
            offset,
            format!("invalid time token '{token}'"),
        ));
    }
    let hh: u32 = trimmed[0..2].parse().unwrap();
    let mm: u32 = trimmed[2..4].parse().unwrap();
    // BAI2 permits 2400 as end-of-day; normalize to midnight.
    let (hh, mm) = if hh == 24 && mm == 0 { (0, 0) } else { (hh, mm) };
    NaiveTime::from_hms_opt(hh, mm, 0)
        .map(Some)
        .ok_or_else(|| Bai2Error::field(record_type, field, offset, format!("invalid time '{token}'")))
}

/// Drains whatever fields remain in the current record once its known
/// grammar has been satisfied. In non-strict mode (the default) these are
/// accepted and concatenated into an opaque `raw_trailer`; in strict mode
/// a non-empty leftover token is a record error (§4.2 continuation handling).
pub fn drain_overflow(
    cursor: &mut Cursor,
    record_type: &str,
    config: &Bai2Config,
    term: &mut bool,
) -> Result<Option<String>> {
    let mut extras = Vec::new();
    while !*term {
        let offset = cursor.pos();
        let (value, t) = cursor.read()?;
        *term = t;
        if value.trim().is_empty() {
            continue;
        }
        if config.strict_continuations {
            return Err(Bai2Error::record(
                record_type,
                offset,
                format!("unrecognized continuation token '{value}'"),
            ));
        }
        extras.push(value);
    }
    if extras.is_empty() {
        Ok(None)
    } else {
        tracing::warn!(record_type, tokens = ?extras, "discarding unrecognized continuation tokens");
        Ok(Some(extras.join(",")))
    }
}

/// Checks that a field which closed out its record via a bare `/` really did
/// hit a record terminator, rather than an embedded `/` inside Text or a
/// reference field being mistaken for one (§4.2 "Illegal characters",
/// scenario E). Call immediately after reading a Text/reference field.
fn check_legal_terminator(cursor: &Cursor, record_type: &str, field: &str) -> Result<()> {
    if cursor.last_boundary() == '/' && !scanner::looks_like_new_record(cursor.input(), cursor.pos())
    {
        return Err(Bai2Error::record(
            record_type,
            cursor.pos(),
            format!("illegal '/' in {field} field"),
        ));
    }
    Ok(())
}

fn parse_funds_type(cursor: &mut Cursor, record_type: &str) -> Result<(Option<FundsType>, bool)> {
    let offset = cursor.pos();
    let (code, terminal) = cursor.read()?;
    let code = code.trim().to_string();
    if code.is_empty() || code == "Z" {
        return Ok((Some(FundsType::Unknown), terminal));
    }
    if !codes::is_valid_funds_type_code(&code) {
        return Err(Bai2Error::field(
            record_type,
            "funds_type_code",
            offset,
            format!("unknown funds type code '{code}'"),
        ));
    }
    match code.as_str() {
        "0" => Ok((Some(FundsType::SameDay), terminal)),
        "1" => Ok((Some(FundsType::OneDay), terminal)),
        "2" => Ok((Some(FundsType::TwoDay), terminal)),
        "V" => {
            if terminal {
                return Err(Bai2Error::record(
                    record_type,
                    offset,
                    "value-dated funds type missing date",
                ));
            }
            let date_offset = cursor.pos();
            let (date_tok, t2) = cursor.read()?;
            let date = parse_yymmdd(&date_tok, record_type, "funds_type_date", date_offset)?;
            let mut term = t2;
            let mut time = None;
            if !term {
                let time_offset = cursor.pos();
                let (time_tok, t3) = cursor.read()?;
                time = parse_hhmm(&time_tok, record_type, "funds_type_time", time_offset)?;
                term = t3;
            }
            Ok((Some(FundsType::ValueDated { date, time }), term))
        }
        "S" => {
            if terminal {
                return Err(Bai2Error::record(
                    record_type,
                    offset,
                    "split availability funds type missing amounts",
                ));
            }
            let o1 = cursor.pos();
            let (a1, t1) = cursor.read()?;
            let immediate = Amount::parse(&a1, record_type, "funds_type_immediate", o1)?;
            if t1 {
                return Err(Bai2Error::record(
                    record_type,
                    offset,
                    "split availability funds type missing one-day amount",
                ));
            }
            let o2 = cursor.pos();
            let (a2, t2) = cursor.read()?;
            let one_day = Amount::parse(&a2, record_type, "funds_type_one_day", o2)?;
            if t2 {
                return Err(Bai2Error::record(
                    record_type,
                    offset,
                    "split availability funds type missing more-than-one-day amount",
                ));
            }
            let o3 = cursor.pos();
            let (a3, t3) = cursor.read()?;
            let more_than_one_day =
                Amount::parse(&a3, record_type, "funds_type_more_than_one_day", o3)?;
            Ok((
                Some(FundsType::Split {
                    immediate,
                    one_day,
                    more_than_one_day,
                }),
                t3,
            ))
        }
        "D" => {
            if terminal {
                return Err(Bai2Error::record(
                    record_type,
                    offset,
                    "distributed funds type missing count",
                ));
            }
            let count_offset = cursor.pos();
            let (count, mut term) = cursor.read_int(record_type, "funds_type_distribution_count")?;
            if count < 0 {
                return Err(Bai2Error::field(
                    record_type,
                    "funds_type_distribution_count",
                    count_offset,
                    "negative distribution count",
                ));
            }
            let mut entries = Vec::with_capacity(count as usize);
            for i in 0..count {
                if term {
                    return Err(Bai2Error::record(
                        record_type,
                        offset,
                        format!("distributed funds type declared {count} pairs but only found {i}"),
                    ));
                }
                let day_offset = cursor.pos();
                let (day_tok, t_day) = cursor.read()?;
                let days: u32 = day_tok.trim().parse().map_err(|_| {
                    Bai2Error::field(
                        record_type,
                        "funds_type_distribution_day",
                        day_offset,
                        format!("non-integer distribution day '{day_tok}'"),
                    )
                })?;
                if t_day {
                    return Err(Bai2Error::record(
                        record_type,
                        day_offset,
                        "distributed funds type pair missing amount",
                    ));
                }
                let amt_offset = cursor.pos();
                let (amt_tok, t_amt) = cursor.read()?;
                let amount =
                    Amount::parse(&amt_tok, record_type, "funds_type_distribution_amount", amt_offset)?;
                entries.push(DistributionEntry { days, amount });
                term = t_amt;
            }
            Ok((Some(FundsType::Distributed(entries)), term))
        }
        _ => unreachable!("is_valid_funds_type_code admitted an unhandled code"),
    }
}

pub fn render_funds_type(ft: &FundsType) -> Vec<String> {
    match ft {
        FundsType::Unknown => vec![String::new()],
        FundsType::SameDay => vec!["0".into()],
        FundsType::OneDay => vec!["1".into()],
        FundsType::TwoDay => vec!["2".into()],
        FundsType::ValueDated { date, time } => {
            let mut fields = vec!["V".to_string(), date.format("%y%m%d").to_string()];
            fields.push(time.map(|t| t.format("%H%M").to_string()).unwrap_or_default());
            fields
        }
        FundsType::Split {
            immediate,
            one_day,
            more_than_one_day,
        } => vec![
            "S".to_string(),
            immediate.to_string(),
            one_day.to_string(),
            more_than_one_day.to_string(),
        ],
        FundsType::Distributed(entries) => {
            let mut fields = vec!["D".to_string(), entries.len().to_string()];
            for entry in entries {
                fields.push(entry.days.to_string());
                fields.push(entry.amount.to_string());
            }
            fields
        }
    }
}

fn parse_summary(cursor: &mut Cursor, record_type: &str) -> Result<(Summary, bool)> {
    let (type_code, _) = cursor.read()?;
    let amt_offset = cursor.pos();
    let (amt_tok, mut term) = cursor.read()?;
    let amount = Amount::parse(&amt_tok, record_type, "summary_amount", amt_offset)?;

    let mut item_count = None;
    let mut funds_type = None;
    if !term {
        let ic_offset = cursor.pos();
        let (ic_tok, t2) = cursor.read()?;
        term = t2;
        if !ic_tok.trim().is_empty() {
            item_count = Some(ic_tok.trim().parse().map_err(|_| {
                Bai2Error::field(
                    record_type,
                    "summary_item_count",
                    ic_offset,
                    format!("non-integer item count '{ic_tok}'"),
                )
            })?);
        }
        if !term {
            let (ft, t3) = parse_funds_type(cursor, record_type)?;
            funds_type = ft;
            term = t3;
        }
    }
    Ok((
        Summary {
            type_code,
            amount,
            item_count,
            funds_type,
        },
        term,
    ))
}

/// Trims fields from the end that were never actually present (`None`
/// optional values the grammar never got to, rather than a field the
/// original record carried as an explicit empty token). This preserves the
/// distinction parsing makes between "the record ended before this field"
/// and "this field was read and happened to be empty" (e.g. an explicit
/// empty FundsType code, which parses as `Some(FundsType::Unknown)`, versus
/// a record that terminated before the FundsType field was ever read, which
/// parses as `None`) — without it, re-emitting would pad every record to its
/// maximal field count and a `None` would silently become `Some(Unknown)`
/// on re-parse, breaking the round-trip property (§8 law 1).
fn trim_trailing_absent(mut fields: Vec<(String, bool)>) -> Vec<String> {
    while let Some((_, present)) = fields.last() {
        if *present {
            break;
        }
        fields.pop();
    }
    fields.into_iter().map(|(value, _)| value).collect()
}

pub fn render_summary(summary: &Summary) -> Vec<String> {
    let mut fields: Vec<(String, bool)> = vec![
        (summary.type_code.clone(), true),
        (summary.amount.to_string(), true),
    ];
    fields.push((
        summary.item_count.map(|c| c.to_string()).unwrap_or_default(),
        summary.item_count.is_some(),
    ));
    match &summary.funds_type {
        Some(ft) => fields.extend(render_funds_type(ft).into_iter().map(|tok| (tok, true))),
        None => fields.push((String::new(), false)),
    }
    trim_trailing_absent(fields)
}

/// Fields of a `01` file header, before the trailing `99` trailer is known.
pub struct FileHeaderData {
    pub sender: String,
    pub receiver: String,
    pub creation_date: NaiveDate,
    pub creation_time: NaiveTime,
    pub file_sequence: u32,
    pub physical_record_len: Option<u32>,
    pub block_size: Option<u32>,
    pub version: u8,
}

pub fn parse_file_header(cursor: &mut Cursor) -> Result<(FileHeaderData, bool)> {
    let (sender, _) = cursor.read()?;
    let (receiver, _) = cursor.read()?;
    let date_offset = cursor.pos();
    let (date_tok, _) = cursor.read()?;
    let creation_date = parse_yymmdd(&date_tok, "01", "creation_date", date_offset)?;
    let time_offset = cursor.pos();
    let (time_tok, _) = cursor.read()?;
    let creation_time = parse_hhmm(&time_tok, "01", "creation_time", time_offset)?
        .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    let (seq, mut term) = cursor.read_int("01", "file_sequence")?;
    if seq < 0 {
        return Err(Bai2Error::field("01", "file_sequence", time_offset, "negative file sequence"));
    }

    let mut physical_record_len = None;
    let mut block_size = None;
    let mut version: u8 = 2;
    if !term {
        let rl_offset = cursor.pos();
        let (rl_tok, t1) = cursor.read()?;
        term = t1;
        if !rl_tok.trim().is_empty() {
            physical_record_len = Some(rl_tok.trim().parse().map_err(|_| {
                Bai2Error::field(
                    "01",
                    "physical_record_len",
                    rl_offset,
                    format!("non-integer physical record length '{rl_tok}'"),
                )
            })?);
        }
        if !term {
            let bs_offset = cursor.pos();
            let (bs_tok, t2) = cursor.read()?;
            term = t2;
            if !bs_tok.trim().is_empty() {
                block_size = Some(bs_tok.trim().parse().map_err(|_| {
                    Bai2Error::field(
                        "01",
                        "block_size",
                        bs_offset,
                        format!("non-integer block size '{bs_tok}'"),
                    )
                })?);
            }
            if !term {
                let v_offset = cursor.pos();
                let (v_tok, t3) = cursor.read()?;
                term = t3;
                version = v_tok.trim().parse().map_err(|_| {
                    Bai2Error::field("01", "version", v_offset, format!("invalid version '{v_tok}'"))
                })?;
            }
        }
    }

    Ok((
        FileHeaderData {
            sender,
            receiver,
            creation_date,
            creation_time,
            file_sequence: seq as u32,
            physical_record_len,
            block_size,
            version,
        },
        term,
    ))
}

pub fn render_file_header(file: &File) -> Vec<String> {
    vec![
        file.sender.clone(),
        file.receiver.clone(),
        file.creation_date.format("%y%m%d").to_string(),
        file.creation_time.format("%H%M").to_string(),
        file.file_sequence.to_string(),
        file.physical_record_len.map(|v| v.to_string()).unwrap_or_default(),
        file.block_size.map(|v| v.to_string()).unwrap_or_default(),
        file.version.to_string(),
    ]
}

pub struct FileTrailerData {
    pub control_total: Amount,
    pub num_groups: u32,
    pub record_count: u32,
}

pub fn parse_file_trailer(cursor: &mut Cursor) -> Result<(FileTrailerData, bool)> {
    let offset = cursor.pos();
    let (amt, _) = cursor.read()?;
    let control_total = Amount::parse(&amt, "99", "control_total", offset)?;
    let (num_groups, _) = cursor.read_int("99", "num_groups")?;
    let (record_count, term) = cursor.read_int("99", "record_count")?;
    Ok((
        FileTrailerData {
            control_total,
            num_groups: num_groups as u32,
            record_count: record_count as u32,
        },
        term,
    ))
}

pub fn render_file_trailer(file: &File) -> Vec<String> {
    vec![
        file.recomputed_control_total().to_string(),
        file.recomputed_group_count().to_string(),
        file.recomputed_record_count().to_string(),
    ]
}

/// Fields of a `02` group header, before the trailing `98` trailer is known.
pub struct GroupHeaderData {
    pub ultimate_receiver: String,
    pub originator: String,
    pub status: GroupStatus,
    pub as_of_date: NaiveDate,
    pub as_of_time: Option<NaiveTime>,
    pub currency: Option<String>,
    pub as_of_date_modifier: Option<String>,
}

pub fn parse_group_header(cursor: &mut Cursor) -> Result<(GroupHeaderData, bool)> {
    let (ultimate_receiver, _) = cursor.read()?;
    let (originator, _) = cursor.read()?;
    let status_offset = cursor.pos();
    let (status_tok, _) = cursor.read()?;
    let status_code: u8 = status_tok.trim().parse().map_err(|_| {
        Bai2Error::field(
            "02",
            "group_status",
            status_offset,
            format!("non-integer group status '{status_tok}'"),
        )
    })?;
    let status = GroupStatus::from_raw(status_code);

    let date_offset = cursor.pos();
    let (date_tok, mut term) = cursor.read()?;
    let as_of_date = parse_yymmdd(&date_tok, "02", "as_of_date", date_offset)?;

    let mut as_of_time = None;
    let mut currency = None;
    let mut as_of_date_modifier = None;
    if !term {
        let time_offset = cursor.pos();
        let (time_tok, t1) = cursor.read()?;
        term = t1;
        as_of_time = parse_hhmm(&time_tok, "02", "as_of_time", time_offset)?;
        if !term {
            let (cur_tok, t2) = cursor.read()?;
            term = t2;
            if !cur_tok.trim().is_empty() {
                currency = Some(cur_tok);
            }
            if !term {
                let (mod_tok, t3) = cursor.read()?;
                term = t3;
                if !mod_tok.trim().is_empty() {
                    as_of_date_modifier = Some(mod_tok);
                }
            }
        }
    }

    Ok((
        GroupHeaderData {
            ultimate_receiver,
            originator,
            status,
            as_of_date,
            as_of_time,
            currency,
            as_of_date_modifier,
        },
        term,
    ))
}

pub fn render_group_header(group: &Group) -> Vec<String> {
    vec![
        group.ultimate_receiver.clone(),
        group.originator.clone(),
        group.status.code().to_string(),
        group.as_of_date.format("%y%m%d").to_string(),
        group.as_of_time.map(|t| t.format("%H%M").to_string()).unwrap_or_default(),
        group.currency.clone().unwrap_or_default(),
        group.as_of_date_modifier.clone().unwrap_or_default(),
    ]
}

pub struct GroupTrailerData {
    pub control_total: Amount,
    pub num_accounts: u32,
    pub record_count: u32,
}

pub fn parse_group_trailer(cursor: &mut Cursor) -> Result<(GroupTrailerData, bool)> {
    let offset = cursor.pos();
    let (amt, _) = cursor.read()?;
    let control_total = Amount::parse(&amt, "98", "control_total", offset)?;
    let (num_accounts, _) = cursor.read_int("98", "num_accounts")?;
    let (record_count, term) = cursor.read_int("98", "record_count")?;
    Ok((
        GroupTrailerData {
            control_total,
            num_accounts: num_accounts as u32,
            record_count: record_count as u32,
        },
        term,
    ))
}

pub fn render_group_trailer(group: &Group) -> Vec<String> {
    vec![
        group.recomputed_control_total().to_string(),
        group.recomputed_account_count().to_string(),
        group.recomputed_record_count().to_string(),
    ]
}

/// Fields of a `03` account header, including its embedded summary list,
/// before the trailing `49` trailer is known.
pub struct AccountHeaderData {
    pub number: String,
    pub currency: Option<String>,
    pub summaries: Vec<Summary>,
}

pub fn parse_account_header(cursor: &mut Cursor) -> Result<(AccountHeaderData, bool)> {
    let (number, t0) = cursor.read()?;
    if t0 {
        return Ok((
            AccountHeaderData {
                number,
                currency: None,
                summaries: Vec::new(),
            },
            true,
        ));
    }
    let (currency_tok, mut term) = cursor.read()?;
    let currency = if currency_tok.trim().is_empty() {
        None
    } else {
        Some(currency_tok)
    };

    let mut summaries = Vec::new();
    while !term {
        let (summary, t) = parse_summary(cursor, "03")?;
        summaries.push(summary);
        term = t;
    }

    Ok((
        AccountHeaderData {
            number,
            currency,
            summaries,
        },
        term,
    ))
}

pub fn render_account_header(account: &Account) -> Vec<String> {
    let mut fields = vec![account.number.clone(), account.currency.clone().unwrap_or_default()];
    for summary in &account.summaries {
        fields.extend(render_summary(summary));
    }
    fields
}

pub struct AccountTrailerData {
    pub control_total: Amount,
    pub record_count: u32,
}

pub fn parse_account_trailer(cursor: &mut Cursor) -> Result<(AccountTrailerData, bool)> {
    let offset = cursor.pos();
    let (amt, _) = cursor.read()?;
    let control_total = Amount::parse(&amt, "49", "control_total", offset)?;
    let (record_count, term) = cursor.read_int("49", "record_count")?;
    Ok((
        AccountTrailerData {
            control_total,
            record_count: record_count as u32,
        },
        term,
    ))
}

pub fn render_account_trailer(account: &Account) -> Vec<String> {
    vec![
        account.recomputed_control_total().to_string(),
        account.recomputed_record_count().to_string(),
    ]
}

/// Fields of a `16` transaction detail record.
pub struct TransactionData {
    pub type_code: String,
    pub amount: UnsignedAmount,
    pub funds_type: Option<FundsType>,
    pub bank_reference: Option<String>,
    pub customer_reference: Option<String>,
    pub text: Option<String>,
}

pub fn parse_transaction(cursor: &mut Cursor) -> Result<(TransactionData, bool)> {
    let (type_code, _) = cursor.read()?;
    let amt_offset = cursor.pos();
    let (amt_tok, mut term) = cursor.read()?;
    let amount = UnsignedAmount::parse(&amt_tok, "16", "amount", amt_offset)?;

    let mut funds_type = None;
    let mut bank_reference = None;
    let mut customer_reference = None;
    let mut text = None;
    if !term {
        let (ft, t1) = parse_funds_type(cursor, "16")?;
        funds_type = ft;
        term = t1;
        if !term {
            let (br, t2) = cursor.read()?;
            check_legal_terminator(cursor, "16", "bank_reference")?;
            term = t2;
            if !br.trim().is_empty() {
                bank_reference = Some(br);
            }
            if !term {
                let (cr, t3) = cursor.read()?;
                check_legal_terminator(cursor, "16", "customer_reference")?;
                term = t3;
                if !cr.trim().is_empty() {
                    customer_reference = Some(cr);
                }
                if !term {
                    let (tx, t4) = cursor.read()?;
                    check_legal_terminator(cursor, "16", "text")?;
                    term = t4;
                    if !tx.trim().is_empty() {
                        text = Some(tx);
                    }
                }
            }
        }
    }

    Ok((
        TransactionData {
            type_code,
            amount,
            funds_type,
            bank_reference,
            customer_reference,
            text,
        },
        term,
    ))
}

pub fn render_transaction(tx: &Transaction) -> Vec<String> {
    let mut fields: Vec<(String, bool)> =
        vec![(tx.type_code.clone(), true), (tx.amount.to_string(), true)];
    match &tx.funds_type {
        Some(ft) => fields.extend(render_funds_type(ft).into_iter().map(|tok| (tok, true))),
        None => fields.push((String::new(), false)),
    }
    fields.push((tx.bank_reference.clone().unwrap_or_default(), tx.bank_reference.is_some()));
    fields.push((
        tx.customer_reference.clone().unwrap_or_default(),
        tx.customer_reference.is_some(),
    ));
    fields.push((tx.text.clone().unwrap_or_default(), tx.text.is_some()));
    trim_trailing_absent(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GroupStatus;

    #[test]
    fn test_scenario_a_account_header_with_truncated_final_summary() {
        let input = "03,ACCT1,CAD,040,+0,,,045,+0,,,100,500/";
        let mut cursor = Cursor::new(input, 3);
        let (data, term) = parse_account_header(&mut cursor).unwrap();
        assert!(term);
        assert_eq!(data.number, "ACCT1");
        assert_eq!(data.currency.as_deref(), Some("CAD"));
        assert_eq!(data.summaries.len(), 3);
        assert_eq!(data.summaries[2].type_code, "100");
        assert_eq!(data.summaries[2].amount.value(), 500);
        assert!(data.summaries[2].item_count.is_none());
        assert!(data.summaries[2].funds_type.is_none());
    }

    #[test]
    fn test_scenario_c_transaction_with_discarded_continuations() {
        let input = "266,1912,,REF,CREF,Outgoing Wire Return,-\n88,CREF: X\n88,EREF: Y\n";
        let mut cursor = Cursor::new(input, 0);
        let (data, mut term) = parse_transaction(&mut cursor).unwrap();
        assert_eq!(data.type_code, "266");
        assert_eq!(data.amount.value(), 1912);
        assert_eq!(data.bank_reference.as_deref(), Some("REF"));
        assert_eq!(data.customer_reference.as_deref(), Some("CREF"));
        assert_eq!(data.text.as_deref(), Some("Outgoing Wire Return"));

        let config = Bai2Config::default();
        let raw_trailer = drain_overflow(&mut cursor, "16", &config, &mut term).unwrap();
        assert!(term);
        assert_eq!(raw_trailer.as_deref(), Some("-,CREF: X,EREF: Y"));

        assert_eq!(
            render_transaction(&Transaction {
                type_code: data.type_code,
                amount: data.amount,
                funds_type: data.funds_type,
                bank_reference: data.bank_reference,
                customer_reference: data.customer_reference,
                text: data.text,
                raw_trailer,
                own_record_count: 3,
            })
            .join(","),
            "266,1912,,REF,CREF,Outgoing Wire Return"
        );
    }

    #[test]
    fn test_scenario_e_illegal_slash_in_text() {
        let input = "16,399,100,,REF,CREF,AB/GS/RPFILERP0001,ACH Credit Payment/";
        let mut cursor = Cursor::new(input, 3);
        let err = parse_transaction(&mut cursor).unwrap_err();
        match err {
            Bai2Error::Record {
                record_type,
                message,
                ..
            } => {
                assert_eq!(record_type, "16");
                assert!(message.contains("text"));
            }
            other => panic!("expected record error, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_continuations_rejects_overflow() {
        let input = "-\n88,CREF: X\n";
        let mut cursor = Cursor::new(input, 0);
        let (_value, mut term) = cursor.read().unwrap();
        let config = Bai2Config {
            strict_continuations: true,
            ..Bai2Config::default()
        };
        let err = drain_overflow(&mut cursor, "16", &config, &mut term).unwrap_err();
        assert!(matches!(err, Bai2Error::Record { .. }));
    }

    #[test]
    fn test_distribution_pair_count_must_match_declared_n() {
        // declares 2 pairs but only supplies 1
        let input = "D,2,1,100/";
        let mut cursor = Cursor::new(input, 0);
        let err = parse_funds_type(&mut cursor, "16").unwrap_err();
        assert!(matches!(err, Bai2Error::Record { .. }));
    }

    #[test]
    fn test_distribution_zero_pairs_no_trailing_commas() {
        let input = "D,0/";
        let mut cursor = Cursor::new(input, 0);
        let (ft, term) = parse_funds_type(&mut cursor, "16").unwrap();
        assert!(term);
        match ft {
            Some(FundsType::Distributed(entries)) => assert!(entries.is_empty()),
            other => panic!("expected Distributed([]), got {other:?}"),
        }
    }

    #[test]
    fn test_group_status_other_preserved_for_validator() {
        let input = "R,S,9,060317,,CAD,/";
        let mut cursor = Cursor::new(input, 0);
        let (data, _) = parse_group_header(&mut cursor).unwrap();
        assert_eq!(data.status, GroupStatus::Other(9));
        assert!(!data.status.is_known());
    }
}
