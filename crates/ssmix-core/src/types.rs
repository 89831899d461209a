//! HL7 data type definitions
//!
//! This module defines the HL7 data types actually used by the four message
//! profiles this engine emits (ADT^A08, OMP^O09, OML^O33, ORU^R01). These
//! types provide semantic meaning to field values; most fields are still
//! carried as plain strings, but callers use this enum where a segment
//! definition needs to record what kind of value a field slot expects.

use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;
use crate::error::Error;

/// HL7 data type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// String (ST) - general string data
    ST,
    /// Text (TX) - text data
    TX,
    /// Numeric (NM) - numeric values
    NM,
    /// Sequence ID (SI) - sequence identifier
    SI,
    /// Date (DT) - date in YYYYMMDD format
    DT,
    /// Time (TM) - time in HHMMSS format
    TM,
    /// Timestamp (TS) - timestamp with precision
    TS,
    /// Coded Element (CE) - coded value
    CE,
    /// Identifier (ID) - coded identifier
    ID,
    /// Person Name (XPN) - extended person name
    XPN,
    /// Extended Address (XAD) - extended address
    XAD,
    /// Extended Telecommunication (XTN) - phone/email
    XTN,
    /// Composite ID (CX) - composite ID with assigning authority
    CX,
}

impl DataType {
    /// Get the data type code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::ST => "ST",
            DataType::TX => "TX",
            DataType::NM => "NM",
            DataType::SI => "SI",
            DataType::DT => "DT",
            DataType::TM => "TM",
            DataType::TS => "TS",
            DataType::CE => "CE",
            DataType::ID => "ID",
            DataType::XPN => "XPN",
            DataType::XAD => "XAD",
            DataType::XTN => "XTN",
            DataType::CX => "CX",
        }
    }

    /// Parse a data type from a string
    ///
    /// Note: kept for backward compatibility; consider `FromStr` instead.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ST" => Some(DataType::ST),
            "TX" => Some(DataType::TX),
            "NM" => Some(DataType::NM),
            "SI" => Some(DataType::SI),
            "DT" => Some(DataType::DT),
            "TM" => Some(DataType::TM),
            "TS" => Some(DataType::TS),
            "CE" => Some(DataType::CE),
            "ID" => Some(DataType::ID),
            "XPN" => Some(DataType::XPN),
            "XAD" => Some(DataType::XAD),
            "XTN" => Some(DataType::XTN),
            "CX" => Some(DataType::CX),
            _ => None,
        }
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| Error::Decoding(format!("unknown data type: {s}")))
    }
}

/// Parse HL7 date (DT) format: YYYYMMDD or YYYY or YYYYMM
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    match s.len() {
        4 => {
            let year = s.parse::<i32>().ok()?;
            NaiveDate::from_ymd_opt(year, 1, 1)
        }
        6 => {
            let year = s[0..4].parse::<i32>().ok()?;
            let month = s[4..6].parse::<u32>().ok()?;
            NaiveDate::from_ymd_opt(year, month, 1)
        }
        8 => {
            let year = s[0..4].parse::<i32>().ok()?;
            let month = s[4..6].parse::<u32>().ok()?;
            let day = s[6..8].parse::<u32>().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        }
        _ => None,
    }
}

/// Parse HL7 timestamp (TS/DTM) format: YYYYMMDDHHMMSS[.SSSS][+/-ZZZZ]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if s.len() < 8 {
        return None;
    }

    let year = s[0..4].parse::<i32>().ok()?;
    let month = s[4..6].parse::<u32>().ok()?;
    let day = s[6..8].parse::<u32>().ok()?;

    let (hour, minute, second) = if s.len() >= 14 {
        let h = s[8..10].parse::<u32>().ok()?;
        let m = s[10..12].parse::<u32>().ok()?;
        let sec = s[12..14].parse::<u32>().ok()?;
        (h, m, sec)
    } else if s.len() >= 12 {
        let h = s[8..10].parse::<u32>().ok()?;
        let m = s[10..12].parse::<u32>().ok()?;
        (h, m, 0)
    } else if s.len() >= 10 {
        let h = s[8..10].parse::<u32>().ok()?;
        (h, 0, 0)
    } else {
        (0, 0, 0)
    };

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// Format a date to HL7 DT format (YYYYMMDD)
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Format a timestamp to HL7 TS format (YYYYMMDDHHMMSS)
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format("%Y%m%d%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_string() {
        assert_eq!(DataType::ST.as_str(), "ST");
        assert_eq!(DataType::NM.as_str(), "NM");
        assert_eq!(DataType::TS.as_str(), "TS");
    }

    #[test]
    fn test_data_type_parse() {
        assert_eq!(DataType::from_str("ST"), Some(DataType::ST));
        assert_eq!(DataType::from_str("INVALID"), None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("20240315"), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(parse_date("202403"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(parse_date("2024"), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(parse_date("invalid"), None);
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("20240315143000").unwrap();
        assert_eq!(ts.format("%Y%m%d%H%M%S").to_string(), "20240315143000");

        let ts2 = parse_timestamp("20240315").unwrap();
        assert_eq!(ts2.format("%Y%m%d").to_string(), "20240315");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(format_date(&date), "20240315");
    }

    #[test]
    fn test_format_timestamp() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 30, 45)
            .unwrap();
        assert_eq!(format_timestamp(&dt), "20240315143045");
    }
}
