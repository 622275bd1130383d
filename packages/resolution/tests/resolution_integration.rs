//! Integration tests for the full resolution pipeline.
//!
//! These exercise the end-to-end flow: loader -> extractor -> resolution
//! engine -> store, with mock collaborators standing in for the LLM and
//! the source adapters.

use std::sync::Arc;

use resolution::{
    testing::{FailingStore, MockExtractor, MockLoader},
    EntityDetails, EntityStore, Glossary, MemoryStore, Pipeline, RawMention, ResolutionError,
    SourceRecord, SourceStatus,
};

/// A glossary matching the scenarios: one aliased region, one project.
fn scenario_glossary() -> Arc<Glossary> {
    Arc::new(
        Glossary::builder()
            .entity(
                "Region",
                "Region:Lift",
                EntityDetails::new()
                    .with_description("Regional measurement approach")
                    .with_alias("GeoX"),
            )
            .entity("Project", "Project:Nova", EntityDetails::new())
            .build(),
    )
}

fn pipeline_with(
    extractor: MockExtractor,
) -> Pipeline<MemoryStore, MockExtractor> {
    Pipeline::new(scenario_glossary(), MemoryStore::new(), extractor)
}

#[tokio::test]
async fn alias_mention_matches_owning_entity() {
    // Scenario: mention "GeoX" is an alias of Region:Lift
    let extractor =
        MockExtractor::new().with_default(vec![RawMention::new("GeoX").with_confidence("high")]);
    let pipeline = pipeline_with(extractor);

    let result = pipeline
        .extract_from_source("test:1", "GeoX came up in the meeting", false)
        .await
        .unwrap();

    assert_eq!(result.matched, 1);
    assert_eq!(result.pending, 0);

    let links = pipeline.store().source_entities("test:1").await.unwrap();
    assert_eq!(links[0].entity_id, "Region:Lift");
    assert_eq!(links[0].mention_text, "GeoX");
}

#[tokio::test]
async fn resolvable_suggestion_matches_with_original_mention_text() {
    // Scenario: "Project Nova" doesn't resolve directly but the
    // suggested canonical "Project:Nova" does
    let extractor = MockExtractor::new().with_default(vec![RawMention::new("Project Nova")
        .with_confidence("medium")
        .with_suggestion("Project:Nova")]);
    let pipeline = pipeline_with(extractor);

    let result = pipeline
        .extract_from_source("test:1", "kicked off Project Nova", false)
        .await
        .unwrap();

    assert_eq!(result.matched, 1);

    let links = pipeline.store().source_entities("test:1").await.unwrap();
    assert_eq!(links[0].entity_id, "Project:Nova");
    assert_eq!(links[0].mention_text, "Project Nova");
    assert_eq!(links[0].confidence, 0.6);
}

#[tokio::test]
async fn unresolvable_suggestion_queues_with_suggestion() {
    // Scenario: "Thingamajig" with suggestion "Thingy", neither known
    let extractor = MockExtractor::new()
        .with_default(vec![RawMention::new("Thingamajig").with_suggestion("Thingy")]);
    let pipeline = pipeline_with(extractor);

    let result = pipeline
        .extract_from_source("test:1", "the Thingamajig broke again", false)
        .await
        .unwrap();

    assert_eq!(result.pending, 1);

    let queue = pipeline.store().pending_entities().await.unwrap();
    assert_eq!(queue[0].mention_text, "Thingamajig");
    assert_eq!(queue[0].suggested_entity.as_deref(), Some("Thingy"));
}

#[tokio::test]
async fn mention_without_suggestion_queues_with_null_suggestion() {
    // Scenario: "Unknown Co" with no suggestion at all
    let extractor = MockExtractor::new().with_default(vec![RawMention::new("Unknown Co")]);
    let pipeline = pipeline_with(extractor);

    let result = pipeline
        .extract_from_source("test:1", "met with Unknown Co", false)
        .await
        .unwrap();

    assert_eq!(result.pending, 1);

    let queue = pipeline.store().pending_entities().await.unwrap();
    assert_eq!(queue[0].suggested_entity, None);
}

#[tokio::test]
async fn empty_extraction_yields_zero_counts() {
    let pipeline = pipeline_with(MockExtractor::new());

    let result = pipeline
        .extract_from_source("test:1", "nothing notable here", false)
        .await
        .unwrap();

    assert_eq!(result.entities_found, 0);
    assert_eq!(result.matched, 0);
    assert_eq!(result.pending, 0);
    assert!(!result.degraded);
}

#[tokio::test]
async fn mixed_mentions_satisfy_count_invariant() {
    let extractor = MockExtractor::new().with_default(vec![
        RawMention::new("GeoX").with_confidence("high"),
        RawMention::new("Project Nova").with_suggestion("Project:Nova"),
        RawMention::new("Thingamajig").with_suggestion("Thingy"),
        RawMention::new("Unknown Co").with_confidence("low"),
    ]);
    let pipeline = pipeline_with(extractor);

    let result = pipeline
        .extract_from_source("test:1", "busy day", false)
        .await
        .unwrap();

    assert_eq!(result.entities_found, 4);
    assert_eq!(result.matched, 2);
    assert_eq!(result.pending, 2);
    assert_eq!(result.matched + result.pending, result.entities_found);
    assert_eq!(result.entities.len(), 4);
}

#[tokio::test]
async fn reprocessing_is_deterministic_and_does_not_grow_queue() {
    let mentions = vec![
        RawMention::new("GeoX"),
        RawMention::new("Unknown Co").with_confidence("low"),
    ];
    let extractor = MockExtractor::new().with_default(mentions);
    let pipeline = pipeline_with(extractor);

    let first = pipeline
        .extract_from_source("test:1", "same text", false)
        .await
        .unwrap();
    let second = pipeline
        .extract_from_source("test:1", "same text", false)
        .await
        .unwrap();

    // Identical classification outcomes
    assert_eq!(first.matched, second.matched);
    assert_eq!(first.pending, second.pending);

    // Pending queue deduplicates on (source_id, mention_text); links
    // deliberately do not
    assert_eq!(pipeline.store().pending_count(), 1);
    assert_eq!(pipeline.store().entity_count(), 2);
}

#[tokio::test]
async fn partial_store_failure_continues_then_surfaces() {
    let store = FailingStore::new(MemoryStore::new()).fail_mention("Doomed");
    let extractor = MockExtractor::new().with_default(vec![
        RawMention::new("Doomed"),
        RawMention::new("GeoX"),
        RawMention::new("Unknown Co"),
    ]);
    let pipeline = Pipeline::new(scenario_glossary(), store, extractor);

    let err = pipeline
        .extract_from_source("test:1", "content", false)
        .await
        .unwrap_err();

    // The failure is surfaced, naming what was lost
    match err {
        ResolutionError::StoreWrite {
            source_id,
            failed,
            attempted,
        } => {
            assert_eq!(source_id, "test:1");
            assert_eq!(failed, 1);
            assert_eq!(attempted, 3);
        }
        other => panic!("expected StoreWrite, got {other:?}"),
    }

    // The mentions after the failed one were still attempted and written
    let inner = pipeline.store().inner();
    assert_eq!(inner.entity_count(), 1);
    assert_eq!(inner.pending_count(), 1);
}

#[tokio::test]
async fn malformed_extractor_output_is_flagged_not_fatal() {
    let extractor = MockExtractor::new().always_malformed();
    let pipeline = pipeline_with(extractor);

    let result = pipeline
        .extract_from_source("test:1", "content", false)
        .await
        .unwrap();

    assert!(result.degraded);
    assert_eq!(result.entities_found, 0);
}

#[tokio::test]
async fn extractor_unavailable_is_fatal_for_the_source() {
    let extractor = MockExtractor::new().always_unavailable();
    let pipeline = pipeline_with(extractor);

    let err = pipeline
        .extract_from_source("test:1", "content", false)
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::ExtractorUnavailable(_)));
}

#[tokio::test]
async fn voice_flag_reaches_the_extractor() {
    let extractor = MockExtractor::new();
    let loader = MockLoader::new().with_voice_source("voice:1", "transcribed words");

    let store = MemoryStore::new();
    store
        .upsert_source(&SourceRecord::new("voice:1", "handoff").with_input_mode("voice"))
        .await
        .unwrap();

    let pipeline = Pipeline::new(scenario_glossary(), store, extractor);
    pipeline.process_source("voice:1", &loader).await.unwrap();

    let calls = pipeline.extractor().calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].is_voice);
}

#[tokio::test]
async fn batch_isolates_failing_sources() {
    let store = MemoryStore::new();
    store
        .upsert_source(&SourceRecord::new("ok:1", "test"))
        .await
        .unwrap();
    store
        .upsert_source(&SourceRecord::new("ok:2", "test"))
        .await
        .unwrap();

    let loader = MockLoader::new()
        .with_source("ok:1", "GeoX appeared")
        .with_source("ok:2", "nothing here")
        .with_unknown_type("weird:1", "hologram");

    let extractor = MockExtractor::new()
        .with_response("GeoX appeared", vec![RawMention::new("GeoX")])
        .with_response("nothing here", vec![]);

    let pipeline = Pipeline::new(scenario_glossary(), store, extractor);
    let ids = vec![
        "ok:1".to_string(),
        "weird:1".to_string(),
        "missing:1".to_string(),
        "ok:2".to_string(),
    ];

    let outcomes = pipeline.process_batch(&ids, &loader).await;

    assert_eq!(outcomes.len(), 4);
    assert!(outcomes[0].result.is_ok());
    assert!(matches!(
        outcomes[1].result,
        Err(ResolutionError::UnknownSourceType { .. })
    ));
    assert!(matches!(
        outcomes[2].result,
        Err(ResolutionError::SourceNotFound { .. })
    ));
    assert!(outcomes[3].result.is_ok());

    // Both good sources ended up processed
    let ok1 = pipeline.store().get_source("ok:1").await.unwrap().unwrap();
    let ok2 = pipeline.store().get_source("ok:2").await.unwrap().unwrap();
    assert_eq!(ok1.status, SourceStatus::Processed);
    assert_eq!(ok2.status, SourceStatus::Processed);
}

#[tokio::test]
async fn concurrent_sources_share_one_glossary_snapshot() {
    let glossary = scenario_glossary();

    let mk_pipeline = |store: MemoryStore| {
        Pipeline::new(
            Arc::clone(&glossary),
            store,
            MockExtractor::new().with_default(vec![RawMention::new("GeoX")]),
        )
    };

    let p1 = mk_pipeline(MemoryStore::new());
    let p2 = mk_pipeline(MemoryStore::new());

    let (r1, r2) = tokio::join!(
        p1.extract_from_source("a:1", "text one", false),
        p2.extract_from_source("b:1", "text two", false),
    );

    assert_eq!(r1.unwrap().matched, 1);
    assert_eq!(r2.unwrap().matched, 1);
}
