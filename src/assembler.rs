//! Hierarchy assembler (§4.3): drives the scanner/record-codec layer over a
//! full byte stream and builds the File → Group → Account → Transaction
//! tree, dispatching on each physical line's leading two-digit code and
//! closing a scope when its trailer is seen. `88` continuations never reach
//! this layer directly — the field scanner folds them into the preceding
//! header's field stream, and the record codec drains whatever it doesn't
//! recognize via `records::drain_overflow`.

use crate::config::Bai2Config;
use crate::errors::{Bai2Error, Result};
use crate::model::{Account, File, Group, Transaction};
use crate::records;
use crate::scanner::{self, Cursor};

/// Parses a full BAI2 byte stream into a `File` tree (§6 `Parse(bytes)`).
/// Structural and field/record-grammar errors are returned here; aggregate
/// and enumeration errors are the validator's job (call `validate` next).
pub fn parse(input: &str, config: &Bai2Config) -> Result<File> {
    let span = tracing::debug_span!("parse", input_len = input.len());
    let _enter = span.enter();

    let pos = scanner::skip_blank_lines(input, 0);
    let code = scanner::leading_code(input, pos)
        .ok_or_else(|| Bai2Error::structural(pos, "empty input: expected a file header (01)"))?;
    if code != "01" {
        return Err(Bai2Error::structural(
            pos,
            format!("expected a file header (01), found '{code}'"),
        ));
    }

    let mut cursor = Cursor::new(input, pos + 3);
    let before = cursor.continuations_crossed();
    let (header, mut term) = records::parse_file_header(&mut cursor)?;
    let raw_trailer = records::drain_overflow(&mut cursor, "01", config, &mut term)?;
    let header_record_count = 1 + (cursor.continuations_crossed() - before) as u32;

    let mut groups = Vec::new();
    let mut p = scanner::skip_blank_lines(input, cursor.pos());

    loop {
        let code = scanner::leading_code(input, p).ok_or_else(|| {
            Bai2Error::structural(
                p,
                "unexpected end of input: expected a group header (02) or file trailer (99)",
            )
        })?;
        match code {
            "02" => {
                let (group, next_pos) = parse_group(input, p, config)?;
                groups.push(group);
                p = scanner::skip_blank_lines(input, next_pos);
            }
            "99" => {
                let trailer_offset = p;
                let mut tc = Cursor::new(input, p + 3);
                let before = tc.continuations_crossed();
                let (trailer, mut t) = records::parse_file_trailer(&mut tc)?;
                let file_raw_trailer = records::drain_overflow(&mut tc, "99", config, &mut t)?;
                let trailer_record_count = 1 + (tc.continuations_crossed() - before) as u32;

                return Ok(File {
                    sender: header.sender,
                    receiver: header.receiver,
                    creation_date: header.creation_date,
                    creation_time: header.creation_time,
                    file_sequence: header.file_sequence,
                    physical_record_len: header.physical_record_len,
                    block_size: header.block_size,
                    version: header.version,
                    groups,
                    reported_control_total: trailer.control_total,
                    reported_group_count: trailer.num_groups,
                    reported_record_count: trailer.record_count,
                    header_record_count,
                    trailer_record_count,
                    trailer_offset,
                    raw_trailer: raw_trailer.or(file_raw_trailer),
                });
            }
            "88" => {
                return Err(Bai2Error::structural(
                    p,
                    "continuation (88) with no open parent record",
                ));
            }
            other => {
                return Err(Bai2Error::structural(
                    p,
                    format!("unexpected record '{other}' at file scope"),
                ));
            }
        }
    }
}

fn parse_group(input: &str, pos: usize, config: &Bai2Config) -> Result<(Group, usize)> {
    let mut cursor = Cursor::new(input, pos + 3);
    let before = cursor.continuations_crossed();
    let (header, mut term) = records::parse_group_header(&mut cursor)?;
    let group_raw_trailer = records::drain_overflow(&mut cursor, "02", config, &mut term)?;
    let header_record_count = 1 + (cursor.continuations_crossed() - before) as u32;

    let mut accounts = Vec::new();
    let mut p = scanner::skip_blank_lines(input, cursor.pos());

    loop {
        let code = scanner::leading_code(input, p).ok_or_else(|| {
            Bai2Error::structural(
                p,
                "unexpected end of input: expected an account header (03) or group trailer (98)",
            )
        })?;
        match code {
            "03" => {
                let (account, next_pos) = parse_account(input, p, config)?;
                accounts.push(account);
                p = scanner::skip_blank_lines(input, next_pos);
            }
            "98" => {
                let trailer_offset = p;
                let mut tc = Cursor::new(input, p + 3);
                let before = tc.continuations_crossed();
                let (trailer, mut t) = records::parse_group_trailer(&mut tc)?;
                let trailer_raw = records::drain_overflow(&mut tc, "98", config, &mut t)?;
                let trailer_record_count = 1 + (tc.continuations_crossed() - before) as u32;

                let group = Group {
                    ultimate_receiver: header.ultimate_receiver,
                    originator: header.originator,
                    status: header.status,
                    as_of_date: header.as_of_date,
                    as_of_time: header.as_of_time,
                    currency: header.currency,
                    as_of_date_modifier: header.as_of_date_modifier,
                    accounts,
                    reported_control_total: trailer.control_total,
                    reported_account_count: trailer.num_accounts,
                    reported_record_count: trailer.record_count,
                    header_record_count,
                    trailer_record_count,
                    trailer_offset,
                    raw_trailer: group_raw_trailer.or(trailer_raw),
                };
                return Ok((group, tc.pos()));
            }
            "16" => {
                return Err(Bai2Error::structural(
                    p,
                    "transaction detail (16) outside of an account scope",
                ));
            }
            other => {
                return Err(Bai2Error::structural(
                    p,
                    format!("unexpected record '{other}' at group scope"),
                ));
            }
        }
    }
}

fn parse_account(input: &str, pos: usize, config: &Bai2Config) -> Result<(Account, usize)> {
    let mut cursor = Cursor::new(input, pos + 3);
    let before = cursor.continuations_crossed();
    let (header, mut term) = records::parse_account_header(&mut cursor)?;
    let account_raw_trailer = records::drain_overflow(&mut cursor, "03", config, &mut term)?;
    let header_record_count = 1 + (cursor.continuations_crossed() - before) as u32;

    let mut transactions = Vec::new();
    let mut p = scanner::skip_blank_lines(input, cursor.pos());

    loop {
        let code = scanner::leading_code(input, p).ok_or_else(|| {
            Bai2Error::structural(
                p,
                "unexpected end of input: expected a transaction (16) or account trailer (49)",
            )
        })?;
        match code {
            "16" => {
                let mut tc = Cursor::new(input, p + 3);
                let before = tc.continuations_crossed();
                let (tx, mut t) = records::parse_transaction(&mut tc)?;
                let raw_trailer = records::drain_overflow(&mut tc, "16", config, &mut t)?;
                let own_record_count = 1 + (tc.continuations_crossed() - before) as u32;
                transactions.push(Transaction {
                    type_code: tx.type_code,
                    amount: tx.amount,
                    funds_type: tx.funds_type,
                    bank_reference: tx.bank_reference,
                    customer_reference: tx.customer_reference,
                    text: tx.text,
                    raw_trailer,
                    own_record_count,
                });
                p = scanner::skip_blank_lines(input, tc.pos());
            }
            "49" => {
                let trailer_offset = p;
                let mut tc = Cursor::new(input, p + 3);
                let before = tc.continuations_crossed();
                let (trailer, mut t) = records::parse_account_trailer(&mut tc)?;
                let trailer_raw = records::drain_overflow(&mut tc, "49", config, &mut t)?;
                let trailer_record_count = 1 + (tc.continuations_crossed() - before) as u32;

                let account = Account {
                    number: header.number,
                    currency: header.currency,
                    summaries: header.summaries,
                    transactions,
                    reported_control_total: trailer.control_total,
                    reported_record_count: trailer.record_count,
                    header_record_count,
                    trailer_record_count,
                    trailer_offset,
                    raw_trailer: account_raw_trailer.or(trailer_raw),
                };
                return Ok((account, tc.pos()));
            }
            other => {
                return Err(Bai2Error::structural(
                    p,
                    format!("unexpected record '{other}' at account scope"),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_A: &str = "01,S,R,060321,0829,1,,,2/\n\
02,R,S,1,060317,,CAD,/\n\
03,ACCT1,CAD,040,+0,,,045,+0,,,100,500/\n\
49,+500,3/\n\
98,+500,1,5/\n\
99,+500,1,7/\n";

    #[test]
    fn test_scenario_a_minimal_file() {
        let config = Bai2Config::default();
        let file = parse(SCENARIO_A, &config).unwrap();
        assert_eq!(file.recomputed_record_count(), 7);
        assert_eq!(file.reported_record_count, 7);
        assert_eq!(file.groups.len(), 1);
        let group = &file.groups[0];
        assert_eq!(group.recomputed_record_count(), 5);
        assert_eq!(group.accounts.len(), 1);
        let account = &group.accounts[0];
        assert_eq!(account.recomputed_control_total().value(), 500);
        assert_eq!(account.reported_control_total.value(), 500);
    }

    #[test]
    fn test_88_as_first_record_is_structural_error() {
        let input = "88,foo/\n99,+0,0,1/\n";
        let config = Bai2Config::default();
        let err = parse(input, &config).unwrap_err();
        assert!(matches!(err, Bai2Error::Structural { .. }));
    }

    #[test]
    fn test_orphan_transaction_outside_account_is_structural_error() {
        let input = "01,S,R,060321,0829,1,,,2/\n\
02,R,S,1,060317,,CAD,/\n\
16,266,100,,,,Oops/\n\
98,+0,0,3/\n\
99,+0,1,5/\n";
        let config = Bai2Config::default();
        let err = parse(input, &config).unwrap_err();
        assert!(matches!(err, Bai2Error::Structural { .. }));
    }

    #[test]
    fn test_newline_terminated_file_with_no_explicit_slash() {
        let input = "01,S,R,060321,0829,1,,,2\n\
02,R,S,1,060317,,CAD,\n\
03,ACCT1,CAD,100,500\n\
49,+500,2\n\
98,+500,1,4\n\
99,+500,1,6\n";
        let config = Bai2Config::default();
        let file = parse(input, &config).unwrap();
        assert_eq!(file.groups[0].accounts[0].recomputed_control_total().value(), 500);
    }
}
