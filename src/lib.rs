//! # bai2-message
//!
//! Parser, validator, and emitter for the BAI2 Cash Management Balance
//! Reporting format: a hierarchical, line-oriented text format describing a
//! bank's account balances and transaction activity, organized as
//! File → Group → Account → Transaction.
//!
//! ## Quick start
//! ```rust
//! use bai2_message::{Bai2Config, assembler, validator};
//!
//! # fn main() -> bai2_message::Result<()> {
//! let input = "01,S,R,060321,0829,1,,,2/\n\
//! 02,R,S,1,060317,,CAD,/\n\
//! 03,ACCT1,CAD,040,+0,,,045,+0,,,100,500/\n\
//! 49,+500,3/\n\
//! 98,+500,1,5/\n\
//! 99,+500,1,7/\n";
//!
//! let config = Bai2Config::default();
//! let file = assembler::parse(input, &config)?;
//! validator::validate(&file, &config)?;
//! let reemitted = file.emit(Some(80));
//! # let _ = reemitted;
//! # Ok(())
//! # }
//! ```
//!
//! Parsing and validation are deliberately separate passes: `assembler::parse`
//! only rejects input that can't be assigned a tree shape at all (bad
//! structure, malformed fields); `validator::validate` is where aggregate
//! mismatches and unknown enumeration codes are caught. A tree that parses
//! cleanly may still fail validation, and the emitter (`emit` / `File::emit`)
//! is defined over any tree regardless of whether it would validate.

pub mod amount;
pub mod assembler;
pub mod codes;
pub mod config;
pub mod emitter;
pub mod errors;
pub mod model;
pub mod records;
pub mod scanner;
pub mod validator;

pub use amount::{Amount, UnsignedAmount};
pub use assembler::parse;
pub use config::Bai2Config;
pub use emitter::emit;
pub use errors::{Bai2Error, Result};
pub use model::{
    Account, DistributionEntry, File, FundsType, Group, GroupStatus, Summary, Transaction,
};
pub use validator::validate;

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_A: &str = "01,S,R,060321,0829,1,,,2/\n\
02,R,S,1,060317,,CAD,/\n\
03,ACCT1,CAD,040,+0,,,045,+0,,,100,500/\n\
49,+500,3/\n\
98,+500,1,5/\n\
99,+500,1,7/\n";

    const SCENARIO_C: &str = "01,S,R,060321,0829,1,,,2/\n\
02,R,S,1,060317,,CAD,/\n\
03,ACCT1,CAD/\n\
16,266,1912,,REF,CREF,Outgoing Wire Return,-\n88,CREF: X\n88,EREF: Y\n\
49,+0,6/\n\
98,+0,1,8/\n\
99,+0,1,10/\n";

    const SCENARIO_F: &str = "01,S,R,060321,0829,1,,,2/\n\
02,R,S,1,060317,,CAD,/\n\
03,ACCT1,CAD,100,500/\n\
49,+500,2/\n\
98,+999,1,4/\n\
99,+500,1,7/\n";

    #[test]
    fn test_scenario_a_parse_validate_emit_round_trip() {
        let config = Bai2Config::default();
        let file = assembler::parse(SCENARIO_A, &config).unwrap();
        validator::validate(&file, &config).unwrap();
        let emitted = file.emit(None);
        let reparsed = assembler::parse(&emitted, &config).unwrap();
        validator::validate(&reparsed, &config).unwrap();
        assert_eq!(reparsed.recomputed_control_total().value(), 500);
    }

    #[test]
    fn test_scenario_c_unrecognized_continuations_are_discarded_not_fatal() {
        let config = Bai2Config::default();
        let file = assembler::parse(SCENARIO_C, &config).unwrap();
        validator::validate(&file, &config).unwrap();
        let tx = &file.groups[0].accounts[0].transactions[0];
        assert!(tx.raw_trailer.is_some());
        assert!(!file.emit(None).contains("CREF: X"));
    }

    #[test]
    fn test_scenario_f_group_control_total_mismatch_is_validation_error() {
        let config = Bai2Config::default();
        let file = assembler::parse(SCENARIO_F, &config).unwrap();
        let err = validator::validate(&file, &config).unwrap_err();
        assert!(matches!(err, Bai2Error::Aggregate { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_scenario_c_strict_continuations_rejects_at_parse_time() {
        let config = Bai2Config {
            strict_continuations: true,
            ..Bai2Config::default()
        };
        let err = assembler::parse(SCENARIO_C, &config).unwrap_err();
        assert!(matches!(err, Bai2Error::Record { .. }));
    }

    #[test]
    fn test_json_config_round_trip() {
        let json = r#"{"strict_continuations": true, "allowed_currencies": ["CAD", "USD"]}"#;
        let config = Bai2Config::from_str(json).unwrap();
        assert!(config.strict_continuations);
        assert!(config.is_currency_allowed("CAD"));
        assert!(!config.is_currency_allowed("JPY"));
    }
}
