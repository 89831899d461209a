//! OMP^O09 (Pharmacy/Treatment Order) message builder.

use super::MessageBuilder;
use crate::{error::Result, field::Field, message::Message, segment::Segment};

/// Builder for OMP^O09 - Pharmacy/Treatment Order.
///
/// `minimum_dose` carries the tri-state RXE-3 value: `None` leaves it absent,
/// `Some(None)` stamps the documented literal `""` fallback (used when the
/// profile requires the field but its value is semantically undefined, e.g.
/// an ointment's minimum dose), `Some(Some(v))` carries an ordinary value.
pub struct OmpO09Builder {
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
    ordering_provider: String,
    order_datetime: String,
    give_code: String,
    give_amount_min: Option<Option<String>>,
    dose_unit: String,
    route: String,
    frequency: String,
    start_datetime: String,
    stop_datetime: String,
}

impl OmpO09Builder {
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
            base: MessageBuilder::new("OMP", "O09"),
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
            ordering_provider: String::new(),
            order_datetime: String::new(),
            give_code: String::new(),
            give_amount_min: None,
            dose_unit: String::new(),
            route: String::new(),
            frequency: String::new(),
            start_datetime: String::new(),
            stop_datetime: String::new(),
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

    pub fn ordering_provider(mut self, xcn: &str) -> Self {
        self.ordering_provider = xcn.to_string();
        self
    }

    pub fn order_datetime(mut self, datetime: &str) -> Self {
        self.order_datetime = datetime.to_string();
        self
    }

    pub fn give_code(mut self, code: &str) -> Self {
        self.give_code = code.to_string();
        self
    }

    /// Set an ordinary minimum-dose value (RXE-3).
    pub fn minimum_dose(mut self, dose: &str) -> Self {
        self.give_amount_min = Some(Some(dose.to_string()));
        self
    }

    /// Stamp the documented literal `""` fallback for RXE-3 when the
    /// profile requires the field but the value is semantically undefined.
    pub fn minimum_dose_undetermined(mut self) -> Self {
        self.give_amount_min = Some(None);
        self
    }

    pub fn dose_unit(mut self, unit: &str) -> Self {
        self.dose_unit = unit.to_string();
        self
    }

    pub fn route(mut self, route: &str) -> Self {
        self.route = route.to_string();
        self
    }

    pub fn frequency(mut self, frequency: &str) -> Self {
        self.frequency = frequency.to_string();
        self
    }

    pub fn start_datetime(mut self, datetime: &str) -> Self {
        self.start_datetime = datetime.to_string();
        self
    }

    pub fn stop_datetime(mut self, datetime: &str) -> Self {
        self.stop_datetime = datetime.to_string();
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
        orc.add_field(Field::new()); // ORC-4
        orc.add_field(Field::new()); // ORC-5
        orc.add_field(Field::new()); // ORC-6
        orc.add_field(Field::new()); // ORC-7
        orc.add_field(Field::new()); // ORC-8
        orc.add_field(Field::from_value(&self.order_datetime)); // ORC-9
        orc.add_field(Field::new()); // ORC-10
        orc.add_field(Field::new()); // ORC-11
        orc.add_field(Field::from_value(&self.ordering_provider)); // ORC-12
        self.base.message.add_segment(orc);

        let mut rxo = Segment::new("RXO");
        rxo.add_field(Field::from_value(&self.give_code)); // RXO-1
        self.base.message.add_segment(rxo);

        let mut rxe = Segment::new("RXE");
        rxe.add_field(Field::new()); // RXE-1: Quantity/Timing, unused
        rxe.add_field(Field::from_value(&self.give_code)); // RXE-2: Give Code
        match &self.give_amount_min {
            Some(None) => rxe.add_field(Field::quoted_null()), // RXE-3
            Some(Some(v)) => rxe.add_field(Field::from_value(v)),
            None => rxe.add_field(Field::new()),
        }
        rxe.add_field(Field::from_value(&self.dose_unit)); // RXE-4 (give amount max unit slot reused as dose unit)
        rxe.add_field(Field::from_value(&self.route)); // RXE-6 (route placed adjacently; generic column, no message-level reuse)
        rxe.add_field(Field::from_value(&self.frequency)); // RXE-7 placeholder for frequency text
        self.base.message.add_segment(rxe);

        if !self.start_datetime.is_empty() || !self.stop_datetime.is_empty() {
            let mut tq1 = Segment::new("TQ1");
            tq1.add_field(Field::new()); // TQ1-1
            tq1.add_field(Field::new()); // TQ1-2
            tq1.add_field(Field::new()); // TQ1-3
            tq1.add_field(Field::new()); // TQ1-4
            tq1.add_field(Field::new()); // TQ1-5
            tq1.add_field(Field::new()); // TQ1-6
            tq1.add_field(Field::from_value(&self.start_datetime)); // TQ1-7
            tq1.add_field(Field::from_value(&self.stop_datetime)); // TQ1-8
            self.base.message.add_segment(tq1);
        }

        Ok(self.base.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> OmpO09Builder {
        OmpO09Builder::new("SSMIXGEN", "HOSPITAL", "RECEIVER", "HOSPITAL", "20240101120000", "MSG-P001-1", "P")
            .patient_id("P001")
            .patient_name("仮山田^カリタロウ")
            .placer_order_number("ORD-1")
            .give_code("ACETAMINOPHEN")
    }

    #[test]
    fn test_build_omp_o09_minimal() {
        let msg = builder().build().unwrap();
        assert_eq!(msg.get_message_type(), Some(("OMP".into(), "O09".into())));
        assert_eq!(msg.get_segments_by_id("ORC").len(), 1);
        assert_eq!(msg.get_segments_by_id("RXE").len(), 1);
        msg.validate().unwrap();
    }

    #[test]
    fn test_minimum_dose_undetermined_encodes_quoted_null() {
        let msg = builder().minimum_dose_undetermined().build().unwrap();
        let rxe = &msg.get_segments_by_id("RXE")[0];
        assert!(rxe.get_field(3).unwrap().is_quoted_null());
        assert_eq!(rxe.encode(&msg.delimiters).matches("\"\"").count(), 1);
    }

    #[test]
    fn test_minimum_dose_ordinary_value() {
        let msg = builder().minimum_dose("5").build().unwrap();
        let rxe = &msg.get_segments_by_id("RXE")[0];
        assert_eq!(rxe.get_field_value(3), Some("5"));
    }
}
