//! Tests for the value-shape patterns.

use super::{
    FormatError, ValidatorKind, ValidatorPattern, validate_byte_size, validate_count,
    validate_duration,
};

mod count {
    use super::*;

    #[test]
    fn accepts_empty_string() {
        assert!(validate_count("").is_ok());
    }

    #[test]
    fn accepts_digit_only_strings() {
        for value in ["0", "7", "42", "007", "18446744073709551616999"] {
            assert!(validate_count(value).is_ok(), "Expected '{value}' to pass");
        }
    }

    #[test]
    fn rejects_any_non_digit_character() {
        for value in ["-1", "+1", "1.5", "1,000", " 1", "1 ", "abc", "1e3"] {
            assert!(validate_count(value).is_err(), "Expected '{value}' to fail");
        }
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(validate_count("123abc").is_err());
    }

    #[test]
    fn rejects_leading_garbage() {
        assert!(validate_count("abc123").is_err());
    }

    #[test]
    fn rejects_non_ascii_digits() {
        assert!(validate_count("١٢٣").is_err());
    }

    #[test]
    fn rejects_trailing_newline() {
        assert!(validate_count("12\n").is_err());
    }
}

mod byte_size {
    use super::*;

    #[test]
    fn accepts_empty_string() {
        assert!(validate_byte_size("").is_ok());
    }

    #[test]
    fn accepts_integer_with_each_unit() {
        for value in ["1kb", "10mb", "3gb"] {
            assert!(validate_byte_size(value).is_ok(), "Expected '{value}' to pass");
        }
    }

    #[test]
    fn accepts_decimal_numbers() {
        assert!(validate_byte_size("1.5mb").is_ok());
        assert!(validate_byte_size("0.25 gb").is_ok());
    }

    #[test]
    fn accepts_single_space_before_unit() {
        assert!(validate_byte_size("512 kb").is_ok());
    }

    #[test]
    fn unit_is_case_insensitive() {
        for value in ["1KB", "1Mb", "1gB", "2.5 GB"] {
            assert!(validate_byte_size(value).is_ok(), "Expected '{value}' to pass");
        }
    }

    #[test]
    fn rejects_unknown_units() {
        for value in ["5 tb", "5b", "5k", "5kib", "5 pb"] {
            assert!(validate_byte_size(value).is_err(), "Expected '{value}' to fail");
        }
    }

    #[test]
    fn rejects_missing_unit() {
        assert!(validate_byte_size("1024").is_err());
    }

    #[test]
    fn rejects_more_than_one_space() {
        assert!(validate_byte_size("5  mb").is_err());
    }

    #[test]
    fn rejects_malformed_numbers() {
        for value in [".5mb", "5.mb", "1.2.3mb", "-1mb", "mb"] {
            assert!(validate_byte_size(value).is_err(), "Expected '{value}' to fail");
        }
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(validate_byte_size("5mbx").is_err());
        assert!(validate_byte_size("5 mb ").is_err());
    }
}

mod duration {
    use super::*;

    #[test]
    fn accepts_empty_string() {
        assert!(validate_duration("").is_ok());
    }

    #[test]
    fn accepts_each_unit() {
        for value in ["30s", "5m", "2h", "1d"] {
            assert!(validate_duration(value).is_ok(), "Expected '{value}' to pass");
        }
    }

    #[test]
    fn unit_is_case_insensitive() {
        for value in ["30S", "5M", "2H", "1D"] {
            assert!(validate_duration(value).is_ok(), "Expected '{value}' to pass");
        }
    }

    #[test]
    fn rejects_unknown_unit() {
        assert!(validate_duration("10x").is_err());
    }

    #[test]
    fn rejects_missing_unit() {
        assert!(validate_duration("10").is_err());
    }

    #[test]
    fn rejects_multiple_units() {
        assert!(validate_duration("1h30m").is_err());
        assert!(validate_duration("10ss").is_err());
    }

    #[test]
    fn rejects_space_before_unit() {
        assert!(validate_duration("10 s").is_err());
    }

    #[test]
    fn rejects_fractional_numbers() {
        assert!(validate_duration("1.5h").is_err());
    }
}

mod validator_pattern {
    use super::*;

    #[test]
    fn get_returns_pattern_of_requested_kind() {
        for kind in ValidatorKind::ALL {
            assert_eq!(ValidatorPattern::get(kind).kind(), kind);
        }
    }

    #[test]
    fn get_returns_the_same_instance() {
        let first = ValidatorPattern::get(ValidatorKind::Duration);
        let second = ValidatorPattern::get(ValidatorKind::Duration);

        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn equality_is_by_kind() {
        assert_eq!(
            ValidatorPattern::get(ValidatorKind::Count),
            ValidatorPattern::get(ValidatorKind::Count)
        );
        assert_ne!(
            ValidatorPattern::get(ValidatorKind::Count),
            ValidatorPattern::get(ValidatorKind::ByteSize)
        );
    }

    #[test]
    fn validate_reports_offending_value() {
        let err = ValidatorPattern::get(ValidatorKind::ByteSize)
            .validate("5 tb")
            .unwrap_err();

        assert_eq!(err, FormatError::new(ValidatorKind::ByteSize, "5 tb"));
    }

    #[test]
    fn error_message_names_kind_and_value() {
        let err = validate_duration("10x").unwrap_err();

        assert_eq!(err.to_string(), "Invalid duration value '10x'");
    }

    #[test]
    fn pattern_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidatorPattern>();
    }
}
