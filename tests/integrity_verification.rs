mod common;

use common::{filler_text, service};
use std::collections::BTreeSet;

use context_vault::encoding::Descriptor;
use context_vault::library::{verify_chunk, verify_library, Library};
use context_vault::types::LibraryName;
use context_vault::{LibraryError, ValidationError};

fn exported(service: &context_vault::LibraryService, name: &str) -> Library {
    serde_json::from_str(&service.export_library(name).unwrap()).unwrap()
}

#[test]
fn freshly_created_library_verifies() {
    let service = service();
    service.create_library("fresh", &filler_text(1000), None).unwrap();

    let report = service.verify_integrity("fresh").unwrap();
    assert_eq!(report.total_chunks, 4);
    assert_eq!(report.verified, 4);
    assert_eq!(report.failed, 0);
    assert!(report.failed_chunk_ids.is_empty());
    assert!(report.all_verified);
}

#[test]
fn tampered_content_is_detected() {
    let name = LibraryName::parse("tampered", 100).unwrap();
    let mut library = Library::build(name, &filler_text(600), 250, 15).unwrap();
    library.chunks[1].content.push_str(" injected");

    assert!(verify_chunk(&library.chunks[0]));
    assert!(!verify_chunk(&library.chunks[1]));

    let report = verify_library(&library);
    assert_eq!(report.verified, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.failed_chunk_ids, vec![library.chunks[1].id.to_string()]);
    assert!(!report.all_verified);
}

#[test]
fn snapshot_round_trip_restores_library() {
    let service = service();
    service.create_library("snap", &filler_text(700), Some(12)).unwrap();
    let before = service.get_library_stats("snap").unwrap();
    let snapshot = service.export_library("snap").unwrap();

    assert!(service.delete_library("snap").unwrap().deleted);
    let summary = service.import_library(&snapshot).unwrap();

    assert_eq!(summary.name, "snap");
    assert_eq!(summary.chunk_count, before.chunk_count);
    let after = service.get_library_stats("snap").unwrap();
    assert_eq!(after.n_max, Some(12));
    assert_eq!(after.total_words, before.total_words);
    assert!((after.compression_ratio - before.compression_ratio).abs() < 1e-9);
    assert!(service.verify_integrity("snap").unwrap().all_verified);
}

#[test]
fn tampered_snapshot_is_rejected_without_mutation() {
    let service = service();
    service.create_library("snap", &filler_text(700), None).unwrap();
    let snapshot = service.export_library("snap").unwrap();

    let mut library: Library = serde_json::from_str(&snapshot).unwrap();
    library.chunks[0].content = "rewritten".to_string();
    let forged_id = library.chunks[0].id.to_string();
    let forged = serde_json::to_string(&library).unwrap();

    service.delete_library("snap").unwrap();
    match service.import_library(&forged) {
        Err(LibraryError::IntegrityMismatch { chunk_id }) => assert_eq!(chunk_id, forged_id),
        other => panic!("expected integrity mismatch, got {other:?}"),
    }
    assert!(service.list_libraries().is_empty());
}

#[test]
fn snapshot_with_invalid_name_is_rejected() {
    let service = service();
    service.create_library("snap", &filler_text(300), None).unwrap();
    let snapshot = service.export_library("snap").unwrap();
    let renamed = snapshot.replace("\"name\": \"snap\"", "\"name\": \"Bad Name\"");
    assert_ne!(renamed, snapshot);

    assert!(matches!(service.import_library(&renamed), Err(LibraryError::Validation(_))));
}

#[test]
fn malformed_snapshot_is_a_serialization_error() {
    let service = service();
    assert!(matches!(service.import_library("{not json"), Err(LibraryError::Serialization(_))));
}

#[test]
fn snapshot_level_count_outside_range_is_rejected() {
    let service = service();
    service.create_library("levels", &filler_text(600), None).unwrap();
    let mut library = exported(&service, "levels");
    service.delete_library("levels").unwrap();

    // Internally consistent, but below the accepted level range.
    for chunk in &mut library.chunks {
        chunk.descriptor = Descriptor::encode(&chunk.content, 1).unwrap();
    }
    let err = service.import_library(&serde_json::to_string(&library).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        LibraryError::Validation(ValidationError::OutOfRange { parameter: "n_max", value: 1, .. })
    ));

    // Rejected before any descriptor is recomputed.
    for chunk in &mut library.chunks {
        chunk.descriptor.n_max = 1_000_000_000;
    }
    let err = service.import_library(&serde_json::to_string(&library).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        LibraryError::Validation(ValidationError::OutOfRange { parameter: "n_max", .. })
    ));
    assert!(service.list_libraries().is_empty());
}

#[test]
fn snapshot_with_mixed_level_counts_is_rejected() {
    let service = service();
    service.create_library("mixed", &filler_text(600), None).unwrap();
    let mut library = exported(&service, "mixed");
    service.delete_library("mixed").unwrap();

    let content = library.chunks[1].content.clone();
    library.chunks[1].descriptor = Descriptor::encode(&content, 10).unwrap();

    let err = service.import_library(&serde_json::to_string(&library).unwrap()).unwrap_err();
    assert!(matches!(err, LibraryError::Validation(ValidationError::InvalidSnapshot(_))));
    assert!(service.list_libraries().is_empty());
}

#[test]
fn imported_chunks_get_fresh_ids() {
    let service = service();
    service.create_library("a", &filler_text(600), None).unwrap();
    let mut library = exported(&service, "a");
    library.name = LibraryName::parse("b", 100).unwrap();

    service.import_library(&serde_json::to_string(&library).unwrap()).unwrap();

    let a_ids: BTreeSet<_> = exported(&service, "a").chunks.iter().map(|c| c.id).collect();
    let b_ids: BTreeSet<_> = exported(&service, "b").chunks.iter().map(|c| c.id).collect();
    assert_eq!(a_ids.len(), 3);
    assert_eq!(b_ids.len(), 3);
    assert!(a_ids.is_disjoint(&b_ids));
}

#[test]
fn imported_ratio_is_recomputed() {
    let service = service();
    service.create_library("ratio", &filler_text(600), None).unwrap();
    let original = service.get_library_stats("ratio").unwrap().compression_ratio;
    let mut library = exported(&service, "ratio");

    library.compression_ratio = 999.0;
    let summary = service.import_library(&serde_json::to_string(&library).unwrap()).unwrap();
    assert!((summary.compression_ratio - original).abs() < 1e-9);

    library.source_bytes = 1;
    let err = service.import_library(&serde_json::to_string(&library).unwrap()).unwrap_err();
    assert!(matches!(err, LibraryError::Validation(ValidationError::InvalidSnapshot(_))));
}
