//! OML^O33 (Laboratory Order) message builder.

use super::MessageBuilder;
use crate::{error::Result, field::Field, message::Message, segment::Segment};

/// One specimen entry (SPM segment), required by OML^O33.
#[derive(Debug, Clone)]
pub struct SpecimenEntry {
    pub set_id: u32,
    pub specimen_id: String,
    pub specimen_type: String,
    pub collection_datetime: String,
}

/// Builder for OML^O33 - Laboratory Order.
pub struct OmlO33Builder {
    base: MessageBuilder,
    sending_app: String,
    sending_facility: String,
    receiving_app: String,
    receiving_facility: String,
    message_datetime: String,
    control_id: String,
    processing_id: String,
    patient_id: String,
    patient_name: String,
    order_control: String,
    placer_order_number: String,
    filler_order_number: String,
    universal_service_id: String,
    ordered_datetime: String,
    specimens: Vec<SpecimenEntry>,
}

impl OmlO33Builder {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sending_app: &str,
        sending_facility: &str,
        receiving_app: &str,
        receiving_facility: &str,
        message_datetime: &str,
        control_id: &str,
        processing_id: &str,
    ) -> Self {
        Self {
            base: MessageBuilder::new("OML", "O33"),
            sending_app: sending_app.to_string(),
            sending_facility: sending_facility.to_string(),
            receiving_app: receiving_app.to_string(),
            receiving_facility: receiving_facility.to_string(),
            message_datetime: message_datetime.to_string(),
            control_id: control_id.to_string(),
            processing_id: processing_id.to_string(),
            patient_id: String::new(),
            patient_name: String::new(),
            order_control: "NW".to_string(),
            placer_order_number: String::new(),
            filler_order_number: String::new(),
            universal_service_id: String::new(),
            ordered_datetime: String::new(),
            specimens: Vec::new(),
        }
    }

    pub fn patient_id(mut self, id: &str) -> Self {
        self.patient_id = id.to_string();
        self
    }

    pub fn patient_name(mut self, xpn: &str) -> Self {
        self.patient_name = xpn.to_string();
        self
    }

    pub fn order_control(mut self, control: &str) -> Self {
        self.order_control = control.to_string();
        self
    }

    pub fn placer_order_number(mut self, number: &str) -> Self {
        self.placer_order_number = number.to_string();
        self
    }

    pub fn filler_order_number(mut self, number: &str) -> Self {
        self.filler_order_number = number.to_string();
        self
    }

    pub fn universal_service_id(mut self, id: &str) -> Self {
        self.universal_service_id = id.to_string();
        self
    }

    pub fn ordered_datetime(mut self, datetime: &str) -> Self {
        self.ordered_datetime = datetime.to_string();
        self
    }

    pub fn specimen(mut self, entry: SpecimenEntry) -> Self {
        self.specimens.push(entry);
        self
    }

    /// Builds the message. OML^O33 requires at least one specimen (§4.E
    /// precondition for this trigger): a LabTest with no specimens is not a
    /// valid order and is rejected here as a profile violation.
    pub fn build(mut self) -> Result<Message> {
        if self.specimens.is_empty() {
            return Err(crate::error::Error::profile(
                "OML^O33 requires at least one specimen",
            ));
        }

        let msh = self.base.create_msh(
            &self.sending_app,
            &self.sending_facility,
            &self.receiving_app,
            &self.receiving_facility,
            &self.message_datetime,
            &self.control_id,
            &self.processing_id,
        )?;
        self.base.message.add_segment(msh);

        let mut pid = Segment::new("PID");
        pid.add_field(Field::from_value("1"));
        pid.add_field(Field::from_value(""));
        pid.add_field(Field::from_value(&self.patient_id));
        pid.add_field(Field::from_value(""));
        pid.add_field(Field::from_value(&self.patient_name));
        self.base.message.add_segment(pid);

        let mut orc = Segment::new("ORC");
        orc.add_field(Field::from_value(&self.order_control)); // ORC-1
        orc.add_field(Field::from_value(&self.placer_order_number)); // ORC-2
        orc.add_field(Field::from_value(&self.filler_order_number)); // ORC-3
        self.base.message.add_segment(orc);

        let mut obr = Segment::new("OBR");
        obr.add_field(Field::from_value("1")); // OBR-1
        obr.add_field(Field::from_value(&self.placer_order_number)); // OBR-2
        obr.add_field(Field::from_value(&self.filler_order_number)); // OBR-3
        obr.add_field(Field::from_value(&self.universal_service_id)); // OBR-4
        obr.add_field(Field::new()); // OBR-5
        obr.add_field(Field::new()); // OBR-6
        obr.add_field(Field::from_value(&self.ordered_datetime)); // OBR-7
        self.base.message.add_segment(obr);

        for specimen in &self.specimens {
            let mut spm = Segment::new("SPM");
            spm.add_field(Field::from_value(specimen.set_id.to_string())); // SPM-1
            spm.add_field(Field::from_value(&specimen.specimen_id)); // SPM-2
            spm.add_field(Field::new()); // SPM-3
            spm.add_field(Field::from_value(&specimen.specimen_type)); // SPM-4
            for _ in 5..17 {
                spm.add_field(Field::new());
            }
            spm.set_field_value(17, &specimen.collection_datetime)?; // SPM-17: Specimen Collection Date/Time
            self.base.message.add_segment(spm);
        }

        Ok(self.base.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> OmlO33Builder {
        OmlO33Builder::new("SSMIXGEN", "HOSPITAL", "RECEIVER", "HOSPITAL", "20240101120000", "MSG-P001-1", "P")
            .patient_id("P001")
            .patient_name("仮山田^カリタロウ")
            .placer_order_number("ORD-1")
            .universal_service_id("CBC^Complete Blood Count")
    }

    #[test]
    fn test_build_oml_o33_with_specimen() {
        let msg = builder()
            .specimen(SpecimenEntry {
                set_id: 1,
                specimen_id: "SPEC-1".into(),
                specimen_type: "BLD".into(),
                collection_datetime: "20240101110000".into(),
            })
            .build()
            .unwrap();
        assert_eq!(msg.get_message_type(), Some(("OML".into(), "O33".into())));
        assert_eq!(msg.get_segments_by_id("SPM").len(), 1);
        msg.validate().unwrap();
    }

    #[test]
    fn test_build_oml_o33_without_specimen_rejected() {
        let result = builder().build();
        assert!(result.is_err());
    }
}
