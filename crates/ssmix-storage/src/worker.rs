//! Parallel, per-patient writer workers.
//!
//! The patient is the unit of parallelism: all messages for one patient
//! are produced on a single worker task, guaranteeing per-patient ordering.
//! Patient slices partition the output path space, so no locks are needed
//! on the output tree itself. Concurrency is bounded by a semaphore rather
//! than a fixed thread pool; each slice's filesystem writes are blocking,
//! so they run on a blocking-pool task and never stall the async runtime.

use crate::layout;
use crate::precedence;
use crate::writer::write_atomic;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// One rendered, encoded HL7 message ready to be written to disk.
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    pub message_type: String,
    pub control_id: String,
    pub timestamp: String,
    pub department_code: String,
    pub category_suffix: String,
    pub date: String,
    pub encoded: String,
}

/// All messages produced for one patient, not yet ordered.
#[derive(Debug, Clone)]
pub struct PatientSlice {
    pub patient_id: String,
    pub messages: Vec<RenderedMessage>,
}

/// A write failure isolated to the patient slice that produced it; the
/// offending path is reported and that slice's remaining writes abort,
/// but other slices are unaffected.
#[derive(Debug)]
pub struct SliceFailure {
    pub patient_id: String,
    pub error: crate::error::StorageError,
}

/// Outcome of a full generation run: which patients wrote successfully
/// and which aborted partway through.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub completed_patients: Vec<String>,
    pub failures: Vec<SliceFailure>,
    pub cancelled: bool,
}

/// Writes every patient slice's messages to `output_dir`, admitting at most
/// `max_workers` slices to their (blocking) filesystem writes at once.
/// `cancel`, when set, stops a slice's worker before it starts writing; any
/// write already in flight is allowed to finish so no file is left torn.
pub async fn run(output_dir: &Path, slices: Vec<PatientSlice>, max_workers: usize, cancel: Arc<AtomicBool>) -> RunOutcome {
    let max_workers = max_workers.max(1);
    let semaphore = Arc::new(Semaphore::new(max_workers));
    let output_dir: PathBuf = output_dir.to_path_buf();

    let mut tasks = Vec::with_capacity(slices.len());
    for slice in slices {
        let semaphore = semaphore.clone();
        let output_dir = output_dir.clone();
        let cancel = cancel.clone();
        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("patient slice semaphore is never closed");
            if cancel.load(Ordering::Relaxed) {
                return (slice.patient_id, None, true);
            }

            let patient_id = slice.patient_id.clone();
            tracing::info!(patient_id = %patient_id, "worker starting patient slice");
            let result = tokio::task::spawn_blocking(move || write_slice(&output_dir, &slice, &cancel))
                .await
                .expect("patient slice write task panicked");

            match result {
                Ok(()) => {
                    tracing::info!(patient_id = %patient_id, "worker finished patient slice");
                    (patient_id, None, false)
                }
                Err(error) => {
                    tracing::warn!(patient_id = %patient_id, error = %error, "worker aborted patient slice");
                    (patient_id.clone(), Some(SliceFailure { patient_id, error }), false)
                }
            }
        }));
    }

    let mut outcome = RunOutcome::default();
    for task in tasks {
        let (patient_id, failure, cancelled) = task.await.expect("patient slice worker task panicked");
        if cancelled {
            outcome.cancelled = true;
            continue;
        }
        match failure {
            Some(failure) => outcome.failures.push(failure),
            None => outcome.completed_patients.push(patient_id),
        }
    }

    outcome
}

fn write_slice(output_dir: &Path, slice: &PatientSlice, cancel: &AtomicBool) -> crate::error::Result<()> {
    let mut messages = slice.messages.clone();
    messages.sort_by(|a, b| {
        precedence::compare(
            &a.timestamp,
            &a.message_type,
            &a.control_id,
            &b.timestamp,
            &b.message_type,
            &b.control_id,
        )
    });

    for (index, message) in messages.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            return Ok(());
        }
        let path = layout::message_path(
            output_dir,
            &slice.patient_id,
            &message.date,
            &message.timestamp,
            &message.message_type,
            &message.department_code,
            index as u64,
            &message.category_suffix,
        );
        write_atomic(&path, &message.encoded)?;
    }
    Ok(())
}
