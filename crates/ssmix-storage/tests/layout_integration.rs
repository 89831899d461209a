use ssmix_storage::worker::{run, PatientSlice, RenderedMessage};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tempfile::TempDir;

fn message(message_type: &str, control_id: &str, timestamp: &str) -> RenderedMessage {
    RenderedMessage {
        message_type: message_type.to_string(),
        control_id: control_id.to_string(),
        timestamp: timestamp.to_string(),
        department_code: "INT".to_string(),
        category_suffix: "01".to_string(),
        date: "20240101".to_string(),
        encoded: format!("MSH|^~\\&|{message_type}\r"),
    }
}

#[tokio::test]
async fn full_run_produces_expected_tree_with_no_dot_extensions() {
    let dir = TempDir::new().unwrap();
    let slices = vec![PatientSlice {
        patient_id: "P001".to_string(),
        messages: vec![
            message("ADT", "MSG-P001-1", "20240101090000"),
            message("ORU", "MSG-P001-2", "20240101110000"),
        ],
    }];
    let cancel = Arc::new(AtomicBool::new(false));
    let outcome = run(dir.path(), slices, 1, cancel).await;
    assert_eq!(outcome.completed_patients, vec!["P001".to_string()]);

    let patient_dir = dir.path().join("ssmixtwins").join("P001").join("20240101");
    assert!(patient_dir.is_dir());

    let mut names: Vec<String> = std::fs::read_dir(&patient_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 2);
    for name in &names {
        assert!(!name.contains('.'));
    }
    // ADT sorts before ORU given the message-type precedence table.
    assert!(names[0].contains("ADT"));
    assert!(names[1].contains("ORU"));
}

#[tokio::test]
async fn identical_seeded_runs_produce_byte_identical_output() {
    let slices_for = || {
        vec![PatientSlice {
            patient_id: "P001".to_string(),
            messages: vec![message("ADT", "MSG-P001-1", "20240101090000")],
        }]
    };

    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    run(dir_a.path(), slices_for(), 1, Arc::new(AtomicBool::new(false))).await;
    run(dir_b.path(), slices_for(), 4, Arc::new(AtomicBool::new(false))).await;

    let read_tree = |root: &std::path::Path| -> Vec<(String, String)> {
        let patient_dir = root.join("ssmixtwins").join("P001").join("20240101");
        let mut entries: Vec<(String, String)> = std::fs::read_dir(&patient_dir)
            .unwrap()
            .map(|e| {
                let entry = e.unwrap();
                let name = entry.file_name().to_string_lossy().into_owned();
                let content = std::fs::read_to_string(entry.path()).unwrap();
                (name, content)
            })
            .collect();
        entries.sort();
        entries
    };

    assert_eq!(read_tree(dir_a.path()), read_tree(dir_b.path()));
}
