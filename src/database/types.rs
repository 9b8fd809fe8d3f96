//! Teradata column type code translation.
//!
//! `DBC.ColumnsVX` reports column types as two-character vendor codes
//! (`CV`, `I8`, `PD`, ...). The code-to-name table below is a contract with
//! the vendor and is reproduced in full; downstream consumers only ever see
//! the canonical names.

/// Sentinel returned for codes outside the known table.
///
/// Schema reads for tables using exotic types still succeed; the offending
/// column is reported with this name instead of aborting the whole read.
pub const UNKNOWN_TYPE_NAME: &str = "UNKNOWN";

/// Translate a vendor column type code into its canonical SQL type name.
///
/// Codes arrive space-padded from fixed-width catalog columns, so callers
/// should trim before lookup. `A1`, `UT` and `AN` are distinct vendor codes
/// that happen to share a canonical name; they are listed separately on
/// purpose.
pub fn canonical_type_name(code: &str) -> &'static str {
    match code {
        "++" => "TD_ANYTYPE",
        "A1" => "UDT",
        "AT" => "TIME",
        "BF" => "BYTE",
        "BO" => "BLOB",
        "BV" => "VARBYTE",
        "CF" => "CHAR",
        "CO" => "CLOB",
        "CV" => "VARCHAR",
        "D" => "DECIMAL",
        "DA" => "DATE",
        "DH" => "INTERVAL DAY TO HOUR",
        "DM" => "INTERVAL DAY TO MINUTE",
        "DS" => "INTERVAL DAY TO SECOND",
        "DY" => "INTERVAL DAY",
        "F" => "FLOAT",
        "HM" => "INTERVAL HOUR TO MINUTE",
        "HR" => "INTERVAL HOUR",
        "HS" => "INTERVAL HOUR TO SECOND",
        "I1" => "BYTEINT",
        "I2" => "SMALLINT",
        "I8" => "BIGINT",
        "I" => "INTEGER",
        "MI" => "INTERVAL MINUTE",
        "MO" => "INTERVAL MONTH",
        "MS" => "INTERVAL MINUTE TO SECOND",
        "N" => "NUMBER",
        "PD" => "PERIOD(DATE)",
        "PM" => "PERIOD(TIMESTAMP WITH TIME ZONE)",
        "PS" => "PERIOD(TIMESTAMP)",
        "PT" => "PERIOD(TIME)",
        "PZ" => "PERIOD(TIME WITH TIME ZONE)",
        "SC" => "INTERVAL SECOND",
        "SZ" => "TIMESTAMP WITH TIME ZONE",
        "TS" => "TIMESTAMP",
        "TZ" => "TIME WITH TIME ZONE",
        "UT" => "UDT",
        "YM" => "INTERVAL YEAR TO MONTH",
        "YR" => "INTERVAL YEAR",
        "AN" => "UDT",
        "XM" => "XML",
        "JN" => "JSON",
        "DT" => "DATASET",
        "??" => "STGEOMETRY'ANY_TYPE",
        _ => UNKNOWN_TYPE_NAME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_translate_exactly() {
        let cases = [
            ("++", "TD_ANYTYPE"),
            ("AT", "TIME"),
            ("BV", "VARBYTE"),
            ("CF", "CHAR"),
            ("CV", "VARCHAR"),
            ("D", "DECIMAL"),
            ("DA", "DATE"),
            ("DS", "INTERVAL DAY TO SECOND"),
            ("F", "FLOAT"),
            ("I", "INTEGER"),
            ("I1", "BYTEINT"),
            ("I2", "SMALLINT"),
            ("I8", "BIGINT"),
            ("N", "NUMBER"),
            ("PM", "PERIOD(TIMESTAMP WITH TIME ZONE)"),
            ("SZ", "TIMESTAMP WITH TIME ZONE"),
            ("TS", "TIMESTAMP"),
            ("TZ", "TIME WITH TIME ZONE"),
            ("YM", "INTERVAL YEAR TO MONTH"),
            ("JN", "JSON"),
            ("XM", "XML"),
            ("DT", "DATASET"),
            ("??", "STGEOMETRY'ANY_TYPE"),
        ];
        for (code, name) in cases {
            assert_eq!(canonical_type_name(code), name, "code {code:?}");
        }
    }

    #[test]
    fn test_udt_codes_stay_distinct_entries() {
        // Three separate vendor codes, one shared canonical name.
        assert_eq!(canonical_type_name("A1"), "UDT");
        assert_eq!(canonical_type_name("UT"), "UDT");
        assert_eq!(canonical_type_name("AN"), "UDT");
    }

    #[test]
    fn test_unknown_codes_resolve_to_sentinel() {
        for code in ["ZZ", "", "q", "i", "INTEGER", "I9", "+ "] {
            assert_eq!(canonical_type_name(code), UNKNOWN_TYPE_NAME, "code {code:?}");
        }
    }
}
