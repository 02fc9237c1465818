mod common;

use std::sync::Arc;

use common::filler_text;
use context_vault::{ConfigError, EngineConfig, LibraryService, LibraryStore, ValidationError};

#[test]
fn defaults_match_documented_values() {
    let config = EngineConfig::default();
    assert_eq!(config, EngineConfig::v1());
    assert_eq!(config.target_words, 250);
    assert_eq!(config.min_text_chars, 100);
    assert_eq!(config.default_n_max, 15);
    assert_eq!((config.min_n_max, config.max_n_max), (5, 20));
    assert_eq!((config.default_top_k, config.max_top_k), (8, 20));
    assert_eq!((config.default_max_results, config.max_max_results), (10, 50));
    assert!(config.validate().is_ok());
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let config = EngineConfig::from_json_str(r#"{ "target_words": 100, "preview_chars": 40 }"#).unwrap();
    assert_eq!(config.target_words, 100);
    assert_eq!(config.preview_chars, 40);
    assert_eq!(config.default_n_max, 15);
}

#[test]
fn inconsistent_weights_are_rejected() {
    let result = EngineConfig::from_json_str(r#"{ "keyword_weight": 0.9, "digest_weight": 0.3 }"#);
    assert!(matches!(result, Err(ConfigError::Invalid(ValidationError::InvalidConfig(_)))));
}

#[test]
fn default_outside_range_is_rejected() {
    let config = EngineConfig {
        default_n_max: 30,
        ..EngineConfig::v1()
    };
    assert!(config.validate().is_err());
    assert!(LibraryService::with_config(Arc::new(LibraryStore::new()), config).is_err());
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(EngineConfig::from_json_str("[1, 2"), Err(ConfigError::Parse(_))));
}

#[test]
fn service_uses_configured_chunk_size() {
    let config = EngineConfig {
        target_words: 100,
        ..EngineConfig::v1()
    };
    let service = LibraryService::with_config(Arc::new(LibraryStore::new()), config).unwrap();

    let result = service.create_library("small", &filler_text(1000), None).unwrap();
    assert_eq!(result.chunks_created, 10);
}

#[test]
fn level_ceiling_is_enforced() {
    let config = EngineConfig {
        max_n_max: 2000,
        ..EngineConfig::v1()
    };
    assert!(matches!(config.validate(), Err(ValidationError::InvalidConfig(_))));
}

#[test]
fn weights_at_tolerance_edge_never_exceed_one() {
    let config = EngineConfig {
        keyword_weight: 0.7000009,
        digest_weight: 0.3,
        ..EngineConfig::v1()
    };
    assert!(config.validate().is_ok());
    let service = LibraryService::with_config(Arc::new(LibraryStore::new()), config).unwrap();

    // Single lowercase chunk: querying with its exact text matches every
    // keyword and every digest character.
    let text = filler_text(40);
    service.create_library("edge", &text, None).unwrap();

    let result = service.search_documents("edge", &text, None).unwrap();
    let top = &result.results[0];
    assert_eq!(top.why.keyword_score, 1.0);
    assert_eq!(top.why.digest_score, 1.0);
    assert_eq!(top.relevance, 1.0);
}
