//! Deterministic tie-breaking among same-timestamp messages.
//!
//! A fixed message-type precedence table (ADT before OMP before OML
//! before ORU) is applied before every write batch; remaining ties break
//! on control ID so two runs with the same seed produce byte-identical
//! output.

/// Rank of a message type in the tie-break table; lower sorts first.
/// Unknown message types rank last, after every supported type.
pub fn message_type_rank(message_type: &str) -> u8 {
    match message_type {
        "ADT" => 0,
        "OMP" => 1,
        "OML" => 2,
        "ORU" => 3,
        _ => u8::MAX,
    }
}

/// Orders two messages within a patient slice: clinical timestamp first,
/// then message-type precedence, then control ID.
pub fn compare(
    a_timestamp: &str,
    a_message_type: &str,
    a_control_id: &str,
    b_timestamp: &str,
    b_message_type: &str,
    b_control_id: &str,
) -> std::cmp::Ordering {
    a_timestamp
        .cmp(b_timestamp)
        .then_with(|| message_type_rank(a_message_type).cmp(&message_type_rank(b_message_type)))
        .then_with(|| a_control_id.cmp(b_control_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_adt_before_omp_before_oml_before_oru() {
        assert_eq!(message_type_rank("ADT"), 0);
        assert!(message_type_rank("ADT") < message_type_rank("OMP"));
        assert!(message_type_rank("OMP") < message_type_rank("OML"));
        assert!(message_type_rank("OML") < message_type_rank("ORU"));
    }

    #[test]
    fn test_same_timestamp_breaks_on_type_then_control_id() {
        let ord = compare("20240101120000", "OML", "MSG-B", "20240101120000", "ADT", "MSG-A");
        assert_eq!(ord, Ordering::Greater);
    }

    #[test]
    fn test_identical_timestamp_and_type_breaks_on_control_id() {
        let ord = compare("20240101120000", "ADT", "MSG-A", "20240101120000", "ADT", "MSG-B");
        assert_eq!(ord, Ordering::Less);
    }

    #[test]
    fn test_earlier_timestamp_always_wins() {
        let ord = compare("20240101090000", "ORU", "MSG-Z", "20240101120000", "ADT", "MSG-A");
        assert_eq!(ord, Ordering::Less);
    }
}
