//! ADT^A08 (Update Patient Information) message builder.
//!
//! SS-MIX2 uses ADT^A08 as the patient-master update message; the other ADT
//! trigger events (A01 admit, A02 transfer, A03 discharge, A04 register) are
//! not part of the supported message-type set for this generator.

use super::MessageBuilder;
use crate::{error::Result, field::Field, message::Message, segment::Segment};

/// One allergy entry (AL1 segment).
#[derive(Debug, Clone)]
pub struct AllergyEntry {
    pub set_id: u32,
    pub allergy_type: String,
    pub allergen_code: String,
    pub allergen_text: String,
    pub severity: String,
}

/// One insurance entry (IN1 segment).
#[derive(Debug, Clone)]
pub struct InsuranceEntry {
    pub set_id: u32,
    pub plan_id: String,
    pub company_id: String,
    pub company_name: String,
}

/// Builder for ADT^A08 - Update Patient Information.
///
/// Takes already-composed composite field strings (e.g. the XPN-formatted
/// name, the XAD-formatted address) rather than raw entity data; the caller
/// assembles those with [`super::fields::XpnBuilder`] and friends before
/// handing them here.
pub struct AdtA08Builder {
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
    dob: String,
    sex: String,
    address: String,
    phone: String,
    death_indicator: String,
    death_date: String,
    patient_class: String,
    assigned_location: String,
    attending_doctor: String,
    admit_datetime: String,
    event_datetime: String,
    allergies: Vec<AllergyEntry>,
    insurance: Vec<InsuranceEntry>,
}

impl AdtA08Builder {
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
            base: MessageBuilder::new("ADT", "A08"),
            sending_app: sending_app.to_string(),
            sending_facility: sending_facility.to_string(),
            receiving_app: receiving_app.to_string(),
            receiving_facility: receiving_facility.to_string(),
            message_datetime: message_datetime.to_string(),
            control_id: control_id.to_string(),
            processing_id: processing_id.to_string(),
            patient_id: String::new(),
            patient_name: String::new(),
            dob: String::new(),
            sex: String::new(),
            address: String::new(),
            phone: String::new(),
            death_indicator: String::new(),
            death_date: String::new(),
            patient_class: String::new(),
            assigned_location: String::new(),
            attending_doctor: String::new(),
            admit_datetime: String::new(),
            event_datetime: String::new(),
            allergies: Vec::new(),
            insurance: Vec::new(),
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

    pub fn date_of_birth(mut self, dob: &str) -> Self {
        self.dob = dob.to_string();
        self
    }

    pub fn sex(mut self, sex: &str) -> Self {
        self.sex = sex.to_string();
        self
    }

    pub fn address(mut self, xad: &str) -> Self {
        self.address = xad.to_string();
        self
    }

    pub fn phone(mut self, xtn: &str) -> Self {
        self.phone = xtn.to_string();
        self
    }

    pub fn deceased(mut self, death_date: &str) -> Self {
        self.death_indicator = "Y".to_string();
        self.death_date = death_date.to_string();
        self
    }

    pub fn patient_class(mut self, class: &str) -> Self {
        self.patient_class = class.to_string();
        self
    }

    pub fn assigned_location(mut self, location: &str) -> Self {
        self.assigned_location = location.to_string();
        self
    }

    pub fn attending_doctor(mut self, doctor: &str) -> Self {
        self.attending_doctor = doctor.to_string();
        self
    }

    pub fn admit_datetime(mut self, datetime: &str) -> Self {
        self.admit_datetime = datetime.to_string();
        self
    }

    pub fn event_datetime(mut self, datetime: &str) -> Self {
        self.event_datetime = datetime.to_string();
        self
    }

    pub fn allergy(mut self, entry: AllergyEntry) -> Self {
        self.allergies.push(entry);
        self
    }

    pub fn insurance(mut self, entry: InsuranceEntry) -> Self {
        self.insurance.push(entry);
        self
    }

    pub fn build(mut self) -> Result<Message> {
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

        let recorded = if self.event_datetime.is_empty() {
            &self.message_datetime
        } else {
            &self.event_datetime
        };
        let evn = self.base.create_evn("A08", recorded)?;
        self.base.message.add_segment(evn);

        let mut pid = Segment::new("PID");
        pid.add_field(Field::from_value("1")); // PID-1: Set ID
        pid.add_field(Field::from_value("")); // PID-2: Patient ID (External), unused
        pid.add_field(Field::from_value(&self.patient_id)); // PID-3
        pid.add_field(Field::from_value("")); // PID-4: Alternate Patient ID, unused
        pid.add_field(Field::from_value(&self.patient_name)); // PID-5
        pid.add_field(Field::from_value("")); // PID-6: Mother's Maiden Name, unused
        pid.add_field(Field::from_value(&self.dob)); // PID-7
        pid.add_field(Field::from_value(&self.sex)); // PID-8
        pid.add_field(Field::from_value("")); // PID-9: Patient Alias, unused
        pid.add_field(Field::from_value("")); // PID-10: Race, unused
        pid.add_field(Field::from_value(&self.address)); // PID-11
        pid.add_field(Field::from_value("")); // PID-12: County Code, unused
        pid.add_field(Field::from_value(&self.phone)); // PID-13
        self.base.message.add_segment(pid);

        if !self.patient_class.is_empty() {
            let mut pv1 = Segment::new("PV1");
            pv1.add_field(Field::from_value("1")); // PV1-1
            pv1.add_field(Field::from_value(&self.patient_class)); // PV1-2
            pv1.add_field(Field::from_value(&self.assigned_location)); // PV1-3
            pv1.add_field(Field::from_value("")); // PV1-4: Admission Type, unused
            pv1.add_field(Field::from_value("")); // PV1-5: Preadmit Number, unused
            pv1.add_field(Field::from_value("")); // PV1-6: Prior Patient Location, unused
            pv1.add_field(Field::from_value(&self.attending_doctor)); // PV1-7
            for _ in 8..44 {
                pv1.add_field(Field::new());
            }
            pv1.set_field_value(44, &self.admit_datetime)?; // PV1-44: Admit Date/Time (1-based)
            self.base.message.add_segment(pv1);
        }

        for allergy in &self.allergies {
            let mut al1 = Segment::new("AL1");
            al1.add_field(Field::from_value(allergy.set_id.to_string())); // AL1-1
            al1.add_field(Field::from_value(&allergy.allergy_type)); // AL1-2
            al1.add_field(Field::from_value(&allergy.allergen_code)); // AL1-3
            al1.add_field(Field::from_value(&allergy.severity)); // AL1-4
            al1.add_field(Field::from_value(&allergy.allergen_text)); // AL1-5
            self.base.message.add_segment(al1);
        }

        for insurance in &self.insurance {
            let mut in1 = Segment::new("IN1");
            in1.add_field(Field::from_value(insurance.set_id.to_string())); // IN1-1
            in1.add_field(Field::from_value(&insurance.plan_id)); // IN1-2
            in1.add_field(Field::from_value(&insurance.company_id)); // IN1-3
            in1.add_field(Field::from_value(&insurance.company_name)); // IN1-4
            self.base.message.add_segment(in1);
        }

        Ok(self.base.build())
    }
}
