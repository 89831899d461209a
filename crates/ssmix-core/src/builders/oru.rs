//! ORU^R01 (Observation Result) message builder.

use super::MessageBuilder;
use crate::{error::Result, field::Field, message::Message, segment::Segment};

/// One laboratory result (OBX segment).
pub struct Observation {
    pub set_id: u32,
    pub value_type: String,
    pub identifier: String,
    pub value: String,
    pub units: Option<String>,
    pub reference_range: Option<String>,
    pub abnormal_flag: Option<String>,
    pub status: String,
}

/// Builder for ORU^R01 - Unsolicited Observation Message.
pub struct OruR01Builder {
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
    filler_order_number: String,
    observation_datetime: String,
    observations: Vec<Observation>,
}

impl OruR01Builder {
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
            base: MessageBuilder::new("ORU", "R01"),
            sending_app: sending_app.to_string(),
            sending_facility: sending_facility.to_string(),
            receiving_app: receiving_app.to_string(),
            receiving_facility: receiving_facility.to_string(),
            message_datetime: message_datetime.to_string(),
            control_id: control_id.to_string(),
            processing_id: processing_id.to_string(),
            patient_id: String::new(),
            patient_name: String::new(),
            filler_order_number: String::new(),
            observation_datetime: String::new(),
            observations: Vec::new(),
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

    pub fn filler_order_number(mut self, number: &str) -> Self {
        self.filler_order_number = number.to_string();
        self
    }

    pub fn observation_datetime(mut self, datetime: &str) -> Self {
        self.observation_datetime = datetime.to_string();
        self
    }

    pub fn add_observation(mut self, obs: Observation) -> Self {
        self.observations.push(obs);
        self
    }

    /// Builds the message. A result with zero observations carries no
    /// reportable content and is rejected as a profile violation.
    pub fn build(mut self) -> Result<Message> {
        if self.observations.is_empty() {
            return Err(crate::error::Error::profile(
                "ORU^R01 requires at least one observation",
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

        let mut obr = Segment::new("OBR");
        obr.add_field(Field::from_value("1")); // OBR-1
        obr.add_field(Field::new()); // OBR-2
        obr.add_field(Field::from_value(&self.filler_order_number)); // OBR-3
        obr.add_field(Field::new()); // OBR-4
        obr.add_field(Field::new()); // OBR-5
        obr.add_field(Field::new()); // OBR-6
        obr.add_field(Field::from_value(&self.observation_datetime)); // OBR-7
        self.base.message.add_segment(obr);

        for obs in &self.observations {
            let mut obx = Segment::new("OBX");
            obx.add_field(Field::from_value(obs.set_id.to_string())); // OBX-1
            obx.add_field(Field::from_value(&obs.value_type)); // OBX-2
            obx.add_field(Field::from_value(&obs.identifier)); // OBX-3
            obx.add_field(Field::new()); // OBX-4
            obx.add_field(Field::from_value(&obs.value)); // OBX-5
            obx.add_field(Field::from_value(obs.units.as_deref().unwrap_or(""))); // OBX-6
            obx.add_field(Field::from_value(obs.reference_range.as_deref().unwrap_or(""))); // OBX-7
            obx.add_field(Field::from_value(obs.abnormal_flag.as_deref().unwrap_or(""))); // OBX-8
            obx.add_field(Field::new()); // OBX-9
            obx.add_field(Field::new()); // OBX-10
            obx.add_field(Field::from_value(&obs.status)); // OBX-11
            self.base.message.add_segment(obx);
        }

        Ok(self.base.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> OruR01Builder {
        OruR01Builder::new("SSMIXGEN", "HOSPITAL", "RECEIVER", "HOSPITAL", "20240101120000", "MSG-P001-1", "P")
            .patient_id("P001")
            .patient_name("仮山田^カリタロウ")
            .filler_order_number("ORD-1")
    }

    #[test]
    fn test_build_oru_r01_with_observation() {
        let msg = builder()
            .add_observation(Observation {
                set_id: 1,
                value_type: "NM".into(),
                identifier: "WBC^White Blood Cell Count".into(),
                value: "6.5".into(),
                units: Some("10*3/uL".into()),
                reference_range: Some("4.0-11.0".into()),
                abnormal_flag: None,
                status: "F".into(),
            })
            .build()
            .unwrap();
        assert_eq!(msg.get_message_type(), Some(("ORU".into(), "R01".into())));
        assert_eq!(msg.get_segments_by_id("OBX").len(), 1);
        msg.validate().unwrap();
    }

    #[test]
    fn test_build_oru_r01_without_observations_rejected() {
        assert!(builder().build().is_err());
    }
}
