//! Patient entity.

use crate::error::{DomainError, Result};
use chrono::NaiveDate;

/// Administrative sex codes accepted for PID-8 (HL7 table 0001, restricted
/// to the codes this generator actually emits).
const VALID_SEX_CODES: &[&str] = &["M", "F", "O", "U"];

/// A synthesized person name, always carrying the realism marker at the
/// documented position so a reader can never mistake it for a real record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedName {
    pub family_kanji: String,
    pub given_kanji: String,
    pub family_kana: String,
    pub given_kana: String,
}

impl SynthesizedName {
    /// Format as an XPN-ready "family^given" pair, kanji side, with the 仮
    /// marker prefixed onto the family name (e.g. family "山田" becomes
    /// "仮山田").
    pub fn kanji_pair(&self) -> (String, String) {
        (format!("仮{}", self.family_kanji), self.given_kanji.clone())
    }

    /// Format as an XPN-ready "family^given" pair, kana side, with the カリ
    /// marker prefixed onto the *given* name (e.g. given "タロウ" becomes
    /// "カリタロウ") — the documented SS-MIX2 placement differs from the
    /// kanji side, where the marker lands on the family component instead.
    pub fn kana_pair(&self) -> (String, String) {
        (self.family_kana.clone(), format!("カリ{}", self.given_kana))
    }
}

/// A synthesized address, joined to a real postal code with the chōme
/// pinned to the documented placeholder and the building name marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAddress {
    pub postal_code: String,
    pub prefecture: String,
    pub city: String,
    pub town: String,
    pub chome: String,
    pub building: Option<String>,
}

/// A patient record, the root entity every message type in this system is
/// keyed on.
#[derive(Debug, Clone)]
pub struct Patient {
    pub id: String,
    pub sex: String,
    pub birth_date: NaiveDate,
    pub death_date: Option<NaiveDate>,
    pub name: Option<SynthesizedName>,
    pub address: Option<SynthesizedAddress>,
    pub phone: Option<String>,
}

impl Patient {
    /// Construct and validate a patient from raw tabular string fields.
    /// `death_date` is an empty string when the patient is alive; a
    /// non-empty death date with no death indicator is accepted as a
    /// harmless redundancy (the date alone implies death).
    pub fn new(id: &str, sex: &str, birth_date: &str, death_date: &str) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(DomainError::new("Patient", "id", id, "must not be empty"));
        }

        if !VALID_SEX_CODES.contains(&sex) {
            return Err(DomainError::new(
                "Patient",
                "sex",
                sex,
                "must be one of M, F, O, U",
            ));
        }

        let birth = NaiveDate::parse_from_str(birth_date, "%Y%m%d").map_err(|_| {
            DomainError::new("Patient", "birth_date", birth_date, "must be YYYYMMDD")
        })?;

        let death = if death_date.trim().is_empty() {
            None
        } else {
            let parsed = NaiveDate::parse_from_str(death_date, "%Y%m%d").map_err(|_| {
                DomainError::new("Patient", "death_date", death_date, "must be YYYYMMDD")
            })?;
            if parsed < birth {
                return Err(DomainError::new(
                    "Patient",
                    "death_date",
                    death_date,
                    "must be on or after birth_date",
                ));
            }
            Some(parsed)
        };

        Ok(Self {
            id: id.to_string(),
            sex: sex.to_string(),
            birth_date: birth,
            death_date: death,
            name: None,
            address: None,
            phone: None,
        })
    }

    pub fn is_deceased(&self) -> bool {
        self.death_date.is_some()
    }

    /// Reject an event date earlier than birth (§3 temporal invariant).
    /// Called by callers constructing admissions/orders/lab tests that
    /// reference this patient.
    pub fn validate_event_date(&self, event_date: NaiveDate, attribute: &'static str) -> Result<()> {
        if event_date < self.birth_date {
            return Err(DomainError::new(
                "Patient",
                attribute,
                event_date.to_string(),
                "event date must not precede birth_date",
            ));
        }
        Ok(())
    }

    /// Attach synthesized enrichment data. The synthesizer is trusted to
    /// have already applied the realism markers; this does not re-validate.
    pub fn enrich(&mut self, name: SynthesizedName, address: SynthesizedAddress, phone: String) {
        self.name = Some(name);
        self.address = Some(address);
        self.phone = Some(phone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yamada_taro() -> SynthesizedName {
        SynthesizedName {
            family_kanji: "山田".to_string(),
            given_kanji: "太郎".to_string(),
            family_kana: "ヤマダ".to_string(),
            given_kana: "タロウ".to_string(),
        }
    }

    #[test]
    fn test_kanji_pair_marks_family_component() {
        let (family, given) = yamada_taro().kanji_pair();
        assert_eq!(family, "仮山田");
        assert_eq!(given, "太郎");
    }

    #[test]
    fn test_kana_pair_marks_given_component() {
        let (family, given) = yamada_taro().kana_pair();
        assert_eq!(family, "ヤマダ");
        assert_eq!(given, "カリタロウ");
    }

    #[test]
    fn test_valid_patient() {
        let p = Patient::new("P001", "M", "19800101", "").unwrap();
        assert!(!p.is_deceased());
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(Patient::new("", "M", "19800101", "").is_err());
    }

    #[test]
    fn test_invalid_sex_rejected() {
        assert!(Patient::new("P001", "X", "19800101", "").is_err());
    }

    #[test]
    fn test_unparseable_birth_date_rejected() {
        assert!(Patient::new("P001", "M", "not-a-date", "").is_err());
    }

    #[test]
    fn test_death_before_birth_rejected() {
        assert!(Patient::new("P001", "M", "20200101", "20190101").is_err());
    }

    #[test]
    fn test_death_on_or_after_birth_accepted() {
        let p = Patient::new("P001", "M", "20200101", "20200101").unwrap();
        assert!(p.is_deceased());
    }
}
