//! Validator (§4.4): runs after the tree is assembled. Parsing never fails
//! on an unknown type/status/currency code — only validation does, per the
//! documented invariant that those are validation errors, not parse errors.
//! Aggregate mismatches (control totals, record counts) are likewise only
//! ever raised here, annotated with the scope and the byte offset of the
//! offending trailer.

use crate::codes;
use crate::config::Bai2Config;
use crate::errors::{Bai2Error, Result};
use crate::model::File;

/// Validates a parsed `File` tree (§6 `Validate(File)`): recomputes every
/// container's control total and record count and compares them against
/// what its trailer reported, and checks enumerations (group status,
/// type codes, currency codes) against the documented/permissive lists.
pub fn validate(file: &File, config: &Bai2Config) -> Result<()> {
    let span = tracing::debug_span!("validate");
    let _enter = span.enter();

    if file.version != 2 {
        return Err(Bai2Error::field(
            "01",
            "version",
            0,
            format!("unsupported BAI2 version '{}', expected 2", file.version),
        ));
    }

    let recomputed_total = file.recomputed_control_total();
    if recomputed_total != file.reported_control_total {
        return Err(Bai2Error::aggregate(
            "file",
            file.reported_control_total,
            recomputed_total,
            file.trailer_offset,
        ));
    }
    let recomputed_groups = file.recomputed_group_count();
    if recomputed_groups != file.reported_group_count {
        return Err(Bai2Error::aggregate(
            "file",
            file.reported_group_count,
            recomputed_groups,
            file.trailer_offset,
        ));
    }
    let recomputed_records = file.recomputed_record_count();
    if recomputed_records != file.reported_record_count {
        return Err(Bai2Error::aggregate(
            "file",
            file.reported_record_count,
            recomputed_records,
            file.trailer_offset,
        ));
    }

    for group in &file.groups {
        validate_group(group, config)?;
    }

    Ok(())
}

fn validate_group(group: &crate::model::Group, config: &Bai2Config) -> Result<()> {
    if !group.status.is_known() {
        return Err(Bai2Error::field(
            "02",
            "group_status",
            group.trailer_offset,
            format!("unknown group status code '{}'", group.status.code()),
        ));
    }
    if let Some(currency) = &group.currency {
        if !config.is_currency_allowed(currency) {
            return Err(Bai2Error::field(
                "02",
                "currency",
                group.trailer_offset,
                format!("unknown currency code '{currency}'"),
            ));
        }
    }

    let recomputed_total = group.recomputed_control_total();
    if recomputed_total != group.reported_control_total {
        return Err(Bai2Error::aggregate(
            "group",
            group.reported_control_total,
            recomputed_total,
            group.trailer_offset,
        ));
    }
    let recomputed_accounts = group.recomputed_account_count();
    if recomputed_accounts != group.reported_account_count {
        return Err(Bai2Error::aggregate(
            "group",
            group.reported_account_count,
            recomputed_accounts,
            group.trailer_offset,
        ));
    }
    let recomputed_records = group.recomputed_record_count();
    if recomputed_records != group.reported_record_count {
        return Err(Bai2Error::aggregate(
            "group",
            group.reported_record_count,
            recomputed_records,
            group.trailer_offset,
        ));
    }

    for account in &group.accounts {
        validate_account(account, config)?;
    }
    Ok(())
}

fn validate_account(account: &crate::model::Account, config: &Bai2Config) -> Result<()> {
    if let Some(currency) = &account.currency {
        if !config.is_currency_allowed(currency) {
            return Err(Bai2Error::field(
                "03",
                "currency",
                account.trailer_offset,
                format!("unknown currency code '{currency}'"),
            ));
        }
    }
    for summary in &account.summaries {
        if !codes::is_known_type_code(&summary.type_code) {
            return Err(Bai2Error::field(
                "03",
                "summary_type_code",
                account.trailer_offset,
                format!("unknown summary type code '{}'", summary.type_code),
            ));
        }
    }

    let recomputed_total = account.recomputed_control_total();
    if recomputed_total != account.reported_control_total {
        return Err(Bai2Error::aggregate(
            "account",
            account.reported_control_total,
            recomputed_total,
            account.trailer_offset,
        ));
    }
    let recomputed_records = account.recomputed_record_count();
    if recomputed_records != account.reported_record_count {
        return Err(Bai2Error::aggregate(
            "account",
            account.reported_record_count,
            recomputed_records,
            account.trailer_offset,
        ));
    }

    for tx in &account.transactions {
        if !codes::is_known_type_code(&tx.type_code) {
            return Err(Bai2Error::field(
                "16",
                "type_code",
                account.trailer_offset,
                format!("unknown transaction type code '{}'", tx.type_code),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler;

    const SCENARIO_A: &str = "01,S,R,060321,0829,1,,,2/\n\
02,R,S,1,060317,,CAD,/\n\
03,ACCT1,CAD,040,+0,,,045,+0,,,100,500/\n\
49,+500,3/\n\
98,+500,1,5/\n\
99,+500,1,7/\n";

    #[test]
    fn test_scenario_a_validates_clean() {
        let config = Bai2Config::default();
        let file = assembler::parse(SCENARIO_A, &config).unwrap();
        validate(&file, &config).unwrap();
    }

    #[test]
    fn test_scenario_f_group_aggregate_mismatch() {
        let input = "01,S,R,060321,0829,1,,,2/\n\
02,R,S,1,060317,,CAD,/\n\
03,ACCT1,CAD,100,500/\n\
49,+500,2/\n\
98,+999,1,4/\n\
99,+500,1,7/\n";
        let config = Bai2Config::default();
        let file = assembler::parse(input, &config).unwrap();
        let err = validate(&file, &config).unwrap_err();
        match err {
            Bai2Error::Aggregate {
                scope,
                expected,
                observed,
                ..
            } => {
                assert_eq!(scope, "group");
                assert_eq!(expected, "+999");
                assert_eq!(observed, "+500");
            }
            other => panic!("expected aggregate error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let input = "01,S,R,060321,0829,1,,,2/\n\
02,R,S,1,060317,,ZZZ,/\n\
03,ACCT1,,100,500/\n\
49,+500,2/\n\
98,+500,1,4/\n\
99,+500,1,7/\n";
        let config = Bai2Config::default();
        let file = assembler::parse(input, &config).unwrap();
        let err = validate(&file, &config).unwrap_err();
        assert!(matches!(err, Bai2Error::Field { .. }));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let input = "01,S,R,060321,0829,1,,,3/\n\
02,R,S,1,060317,,CAD,/\n\
03,ACCT1,CAD/\n\
49,+0,1/\n\
98,+0,1,3/\n\
99,+0,1,5/\n";
        let config = Bai2Config::default();
        let file = assembler::parse(input, &config).unwrap();
        let err = validate(&file, &config).unwrap_err();
        match err {
            Bai2Error::Field { field, .. } => assert_eq!(field, "version"),
            other => panic!("expected field error, got {other:?}"),
        }
    }
}
