//! Orchestrates the full generation run: validate, synthesize, build
//! messages, and hand patient slices to the storage writer.

use crate::config::GenerationConfig;
use crate::reader::{self, InputTables};
use anyhow::{bail, Result};
use ssmix_core::builders::{
    adt::AdtA08Builder,
    fields::{XadBuilder, XcnBuilder, XpnBuilder, XtnBuilder},
    generate_control_id,
    laboratory::{OmlO33Builder, SpecimenEntry as CoreSpecimenEntry},
    oru::{Observation as CoreObservation, OruR01Builder},
    pharmacy::OmpO09Builder,
};
use ssmix_domain::{Admission, Hospital, LabTest, MinimumDose, Observation, Order, Patient, Specimen};
use ssmix_storage::{PatientSlice, RenderedMessage};
use ssmix_synth::Synthesizer;
use ssmix_validate::ValidationDriver;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub struct PipelineOutcome {
    pub validation_failed: bool,
    pub storage: Option<ssmix_storage::RunOutcome>,
}

pub async fn run(config: &GenerationConfig) -> Result<PipelineOutcome> {
    tracing::info!(seed = config.seed, max_workers = config.max_workers, "starting generation run");

    let tables = reader::load(&config.source_dir)?;

    let (mut patients, orders, lab_tests) = if config.already_validated {
        build_entities_failfast(&tables)?
    } else {
        let mut driver = ValidationDriver::new();
        let patients = driver.validate_patients(&tables.patients);
        driver.validate_admissions(&tables.admissions);
        let orders = driver.validate_orders(&tables.orders);
        let specimens = driver.validate_specimens(&tables.specimens);
        let lab_tests = driver.validate_lab_tests(&tables.lab_tests, &specimens);
        driver.validate_observations(&tables.observations);

        let report = driver.finish();
        if !report.is_valid() {
            let json = report.to_json()?;
            std::fs::create_dir_all(&config.output_dir)?;
            std::fs::write(ssmix_storage::layout::validation_report_path(&config.output_dir), json)?;
            tracing::warn!(violations = report.entries.len(), "validation sweep found violations, aborting run");
            return Ok(PipelineOutcome {
                validation_failed: true,
                storage: None,
            });
        }
        let lab_tests = attach_observations(lab_tests, &tables.observations)?;
        (patients, orders, lab_tests)
    };

    let hospital = Hospital::generation_default();
    let synth = Synthesizer::new(config.seed);

    for patient in &mut patients {
        let name = synth.patient_name(&patient.id);
        let address = synth.address(&patient.id);
        let phone = synth.phone_number(&patient.id);
        patient.enrich(name, address, phone);
    }

    let slices = build_patient_slices(&patients, &orders, &lab_tests, &tables, &hospital)?;

    let cancel = Arc::new(AtomicBool::new(false));
    let outcome = ssmix_storage::run(&config.output_dir, slices, config.max_workers, cancel).await;

    Ok(PipelineOutcome {
        validation_failed: false,
        storage: Some(outcome),
    })
}

/// Constructs every entity directly, aborting at the first invariant
/// violation, for the `already_validated` fast path.
fn build_entities_failfast(tables: &InputTables) -> Result<(Vec<Patient>, Vec<Order>, Vec<LabTest>)> {
    let mut patients = Vec::new();
    for row in &tables.patients {
        match Patient::new(
            row.get("id").map(String::as_str).unwrap_or(""),
            row.get("sex").map(String::as_str).unwrap_or(""),
            row.get("birth_date").map(String::as_str).unwrap_or(""),
            row.get("death_date").map(String::as_str).unwrap_or(""),
        ) {
            Ok(p) => patients.push(p),
            Err(e) => bail!("entity construction failed: {e}"),
        }
    }

    for row in &tables.admissions {
        let get = |k: &str| row.get(k).map(String::as_str).unwrap_or("");
        if let Err(e) = Admission::new(
            get("id"),
            get("patient_id"),
            get("patient_class"),
            get("admit_datetime"),
            get("discharge_datetime"),
            get("ward"),
            get("room"),
            get("attending_doctor_id"),
        ) {
            bail!("entity construction failed: {e}");
        }
    }

    let mut specimens = Vec::new();
    for row in &tables.specimens {
        match Specimen::new(
            row.get("id").map(String::as_str).unwrap_or(""),
            row.get("specimen_type").map(String::as_str).unwrap_or(""),
            row.get("collection_datetime").map(String::as_str).unwrap_or(""),
        ) {
            Ok(s) => specimens.push(s),
            Err(e) => bail!("entity construction failed: {e}"),
        }
    }

    let mut lab_tests = Vec::new();
    for row in &tables.lab_tests {
        let wanted: Vec<&str> = row
            .get("specimen_ids")
            .map(String::as_str)
            .unwrap_or("")
            .split(';')
            .filter(|s| !s.is_empty())
            .collect();
        let matched: Vec<Specimen> = specimens.iter().filter(|s| wanted.contains(&s.id.as_str())).cloned().collect();
        match LabTest::new(
            row.get("placer_order_number").map(String::as_str).unwrap_or(""),
            row.get("filler_order_number").map(String::as_str).unwrap_or(""),
            row.get("patient_id").map(String::as_str).unwrap_or(""),
            row.get("panel_code").map(String::as_str).unwrap_or(""),
            row.get("panel_name").map(String::as_str).unwrap_or(""),
            row.get("ordered_datetime").map(String::as_str).unwrap_or(""),
            matched,
        ) {
            Ok(t) => lab_tests.push(t),
            Err(e) => bail!("entity construction failed: {e}"),
        }
    }
    let lab_tests = attach_observations(lab_tests, &tables.observations)?;

    let mut orders = Vec::new();
    for row in &tables.orders {
        let get = |k: &str| row.get(k).map(String::as_str).unwrap_or("");
        match Order::new(
            get("placer_order_number"),
            get("filler_order_number"),
            get("patient_id"),
            get("status"),
            get("ordering_provider_id"),
            get("drug_code"),
            get("drug_name"),
            get("dose"),
            get("dose_unit"),
            get("route"),
            get("frequency"),
            get("order_datetime"),
            get("start_datetime"),
            get("stop_datetime"),
        ) {
            Ok(o) => orders.push(o),
            Err(e) => bail!("entity construction failed: {e}"),
        }
    }

    Ok((patients, orders, lab_tests))
}

/// Joins `observations.csv` rows onto the lab tests they result, matched by
/// the `placer_order_number` column. A lab test with no matching rows stays
/// unresulted and is never promoted to an ORU^R01.
fn attach_observations(mut lab_tests: Vec<LabTest>, observation_rows: &[ssmix_validate::Row]) -> Result<Vec<LabTest>> {
    for row in observation_rows {
        let placer = row.get("placer_order_number").map(String::as_str).unwrap_or("");
        let Some(lab_test) = lab_tests.iter_mut().find(|t| t.placer_order_number == placer) else {
            continue;
        };
        let get = |k: &str| row.get(k).map(String::as_str).unwrap_or("");
        let set_id: u32 = get("set_id").parse().unwrap_or(0);
        let observation = Observation::new(
            set_id,
            get("value_type"),
            get("identifier"),
            get("value"),
            get("units"),
            get("reference_range"),
            get("abnormal_flag"),
            get("status"),
        )
        .map_err(|e| anyhow::anyhow!("entity construction failed: {e}"))?;
        lab_test.observations.push(observation);
    }
    Ok(lab_tests)
}

fn build_patient_slices(
    patients: &[Patient],
    orders: &[Order],
    lab_tests: &[LabTest],
    tables: &InputTables,
    hospital: &Hospital,
) -> Result<Vec<PatientSlice>> {
    let mut slices = Vec::with_capacity(patients.len());

    for (seq, patient) in patients.iter().enumerate() {
        let mut messages = Vec::new();
        let name = patient.name.as_ref().expect("patient enriched before slice assembly");
        let address = patient.address.as_ref().expect("patient enriched before slice assembly");
        let phone = patient.phone.as_deref().unwrap_or("");

        let (kanji_family, kanji_given) = name.kanji_pair();
        let xpn_kanji = XpnBuilder::new().family_name(&kanji_family).given_name(&kanji_given).build();
        let xad = XadBuilder::new()
            .street_address(&address.chome)
            .city(&address.city)
            .state(&address.prefecture)
            .postal_code(&address.postal_code)
            .build();
        let xtn = XtnBuilder::new().phone_number(phone).use_code("PRN").equipment_type("PH").build();

        let admission_row = tables
            .admissions
            .iter()
            .find(|row| row.get("patient_id").map(String::as_str) == Some(patient.id.as_str()));

        let control_id = generate_control_id(&patient.id, seq as u64);
        let message_datetime = admission_row
            .and_then(|r| r.get("admit_datetime"))
            .cloned()
            .unwrap_or_else(|| format!("{}000000", patient.birth_date.format("%Y%m%d")));

        let mut adt = AdtA08Builder::new(
            &hospital.facility_id,
            &hospital.name,
            "SSMIXRECV",
            &hospital.name,
            &message_datetime,
            &control_id,
            "P",
        )
        .patient_id(&patient.id)
        .patient_name(&xpn_kanji)
        .date_of_birth(&patient.birth_date.format("%Y%m%d").to_string())
        .sex(&patient.sex)
        .address(&xad)
        .phone(&xtn);

        if patient.is_deceased() {
            adt = adt.deceased(&patient.death_date.unwrap().format("%Y%m%d").to_string());
        }

        if let Some(row) = admission_row {
            let get = |k: &str| row.get(k).map(String::as_str).unwrap_or("");
            adt = adt
                .patient_class(get("patient_class"))
                .assigned_location(&format!("{}^{}", get("ward"), get("room")))
                .attending_doctor(get("attending_doctor_id"))
                .admit_datetime(get("admit_datetime"));
        }

        let message = adt.build()?;
        messages.push(RenderedMessage {
            message_type: "ADT".to_string(),
            control_id: control_id.clone(),
            timestamp: message_datetime.clone(),
            department_code: "INT".to_string(),
            category_suffix: "01".to_string(),
            date: message_datetime.get(0..8).unwrap_or("19700101").to_string(),
            encoded: message.encode(),
        });

        for order in orders.iter().filter(|o| o.patient_id == patient.id) {
            let provider = XcnBuilder::new().id_number(&order.ordering_provider_id).build();
            let control_id = format!("MSG-{}-{}", order.placer_order_number, seq);
            let timestamp = order.order_datetime.format("%Y%m%d%H%M%S").to_string();

            let mut builder = OmpO09Builder::new(
                &hospital.facility_id,
                &hospital.name,
                "SSMIXRECV",
                &hospital.name,
                &timestamp,
                &control_id,
                "P",
            )
            .patient_id(&patient.id)
            .patient_name(&xpn_kanji)
            .placer_order_number(&order.placer_order_number)
            .filler_order_number(&order.filler_order_number)
            .ordering_provider(&provider)
            .order_datetime(&timestamp)
            .give_code(&format!("{}^{}", order.drug_code, order.drug_name))
            .dose_unit(&order.dose_unit)
            .route(&order.route)
            .frequency(&order.frequency);

            builder = match &order.minimum_dose {
                MinimumDose::Undetermined => builder.minimum_dose_undetermined(),
                MinimumDose::Value(v) => builder.minimum_dose(v),
                MinimumDose::Absent => builder,
            };
            if let Some(start) = order.start_datetime {
                builder = builder.start_datetime(&start.format("%Y%m%d%H%M%S").to_string());
            }
            if let Some(stop) = order.stop_datetime {
                builder = builder.stop_datetime(&stop.format("%Y%m%d%H%M%S").to_string());
            }

            let message = builder.build()?;
            messages.push(RenderedMessage {
                message_type: "OMP".to_string(),
                control_id: control_id.clone(),
                timestamp: timestamp.clone(),
                department_code: "PHR".to_string(),
                category_suffix: "02".to_string(),
                date: timestamp.get(0..8).unwrap_or("19700101").to_string(),
                encoded: message.encode(),
            });
        }

        for lab_test in lab_tests.iter().filter(|t| t.patient_id == patient.id) {
            let control_id = format!("MSG-{}-{}", lab_test.placer_order_number, seq);
            let timestamp = lab_test.ordered_datetime.format("%Y%m%d%H%M%S").to_string();

            let mut builder = OmlO33Builder::new(
                &hospital.facility_id,
                &hospital.name,
                "SSMIXRECV",
                &hospital.name,
                &timestamp,
                &control_id,
                "P",
            )
            .patient_id(&patient.id)
            .patient_name(&xpn_kanji)
            .placer_order_number(&lab_test.placer_order_number)
            .filler_order_number(&lab_test.filler_order_number)
            .universal_service_id(&format!("{}^{}", lab_test.panel_code, lab_test.panel_name))
            .ordered_datetime(&timestamp);

            for (i, specimen) in lab_test.specimens.iter().enumerate() {
                builder = builder.specimen(CoreSpecimenEntry {
                    set_id: (i + 1) as u32,
                    specimen_id: specimen.id.clone(),
                    specimen_type: specimen.specimen_type.clone(),
                    collection_datetime: specimen.collection_datetime.format("%Y%m%d%H%M%S").to_string(),
                });
            }

            let message = builder.build()?;
            messages.push(RenderedMessage {
                message_type: "OML".to_string(),
                control_id: control_id.clone(),
                timestamp: timestamp.clone(),
                department_code: "LAB".to_string(),
                category_suffix: "03".to_string(),
                date: timestamp.get(0..8).unwrap_or("19700101").to_string(),
                encoded: message.encode(),
            });

            if lab_test.is_resulted() {
                let result_control_id = format!("MSG-{}-R-{}", lab_test.placer_order_number, seq);
                let result_timestamp = timestamp.clone();

                let mut oru = OruR01Builder::new(
                    &hospital.facility_id,
                    &hospital.name,
                    "SSMIXRECV",
                    &hospital.name,
                    &result_timestamp,
                    &result_control_id,
                    "P",
                )
                .patient_id(&patient.id)
                .patient_name(&xpn_kanji)
                .filler_order_number(&lab_test.filler_order_number)
                .observation_datetime(&result_timestamp);

                for obs in &lab_test.observations {
                    oru = oru.add_observation(CoreObservation {
                        set_id: obs.set_id,
                        value_type: obs.value_type.clone(),
                        identifier: obs.identifier.clone(),
                        value: obs.value.clone(),
                        units: obs.units.clone(),
                        reference_range: obs.reference_range.clone(),
                        abnormal_flag: obs.abnormal_flag.clone(),
                        status: obs.status.clone(),
                    });
                }

                let message = oru.build()?;
                messages.push(RenderedMessage {
                    message_type: "ORU".to_string(),
                    control_id: result_control_id,
                    timestamp: result_timestamp.clone(),
                    department_code: "LAB".to_string(),
                    category_suffix: "04".to_string(),
                    date: result_timestamp.get(0..8).unwrap_or("19700101").to_string(),
                    encoded: message.encode(),
                });
            }
        }

        slices.push(PatientSlice {
            patient_id: patient.id.clone(),
            messages,
        });
    }

    Ok(slices)
}
