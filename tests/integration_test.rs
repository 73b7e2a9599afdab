// Integration tests for PsyReco
use psyreco::prelude::*;
use psyreco::{parse_mood_content, rank, Error, RankError};
use psyreco_similarity::DEFAULT_TAGS;
use std::io::Write;
use std::sync::Arc;

fn catalog_json() -> &'static str {
    r#"[
        {"id": "b1", "title": "Quiet", "author": "Susan Cain",
         "summary": "the power of introverts in a world that cannot stop talking",
         "genre": "psychology",
         "emotion_tags": ["calm"], "mindset_tags": ["introspective", "psychology"]},
        {"id": "b2", "title": "Atomic Habits", "author": "James Clear",
         "summary": "tiny changes and remarkable results",
         "genre": "self-help",
         "emotion_tags": ["hopeful"], "mindset_tags": ["self-help", "growth"]},
        {"id": "b3", "title": "The Night Circus", "author": "Erin Morgenstern",
         "summary": "a magical competition between two young illusionists",
         "genre": "fiction",
         "emotion_tags": ["wonder"], "mindset_tags": ["fiction", "escapist"]},
        {"title": "Burnout", "author": "Emily Nagoski",
         "summary": "the secret to unlocking the stress cycle",
         "emotion_tags": null}
    ]"#
}

fn write_catalog(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn load() -> (Arc<HashEmbedder>, Arc<BookCollection>) {
    let file = write_catalog(catalog_json());
    let embedder = Arc::new(HashEmbedder::new());
    let config = CollectionConfig {
        vector_dim: embedder.dim(),
        ..Default::default()
    };
    let collection =
        Arc::new(BookCollection::from_catalog(file.path(), config, embedder.as_ref()).unwrap());
    (embedder, collection)
}

#[test]
fn test_catalog_loading() {
    let (_, collection) = load();
    assert_eq!(collection.count(), 4);

    let quiet = collection.get("b1").unwrap();
    assert_eq!(quiet.genre.as_deref(), Some("psychology"));

    // Missing id takes the row index; null tags become empty
    let burnout = collection.get("3").unwrap();
    assert_eq!(burnout.title, "Burnout");
    assert!(burnout.emotion_tags.is_empty());
    assert!(burnout.mindset_tags.is_empty());
}

#[test]
fn test_catalog_rejects_bad_json() {
    let file = write_catalog("{ not a list");
    let embedder = HashEmbedder::new();
    let result = BookCollection::from_catalog(file.path(), CollectionConfig::default(), &embedder);
    assert!(matches!(result, Err(Error::Catalog(_))));
}

#[test]
fn test_catalog_rejects_id_collision() {
    let file = write_catalog(
        r#"[
            {"id": "1", "title": "Quiet", "author": "Susan Cain"},
            {"title": "Burnout", "author": "Emily Nagoski"}
        ]"#,
    );
    let embedder = HashEmbedder::new();
    let result = BookCollection::from_catalog(file.path(), CollectionConfig::default(), &embedder);
    assert!(matches!(result, Err(Error::Catalog(_))));
}

#[test]
fn test_catalog_dimension_mismatch() {
    let file = write_catalog(catalog_json());
    let embedder = HashEmbedder::with_dim(64);
    let config = CollectionConfig {
        vector_dim: 128,
        ..Default::default()
    };
    let result = BookCollection::from_catalog(file.path(), config, &embedder);
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[test]
fn test_semantic_only_ranking_keeps_distance_order() {
    let pool = vec![
        Book::new("1", "Near", "A").into_candidate(0.1),
        Book::new("2", "Mid", "B").into_candidate(0.5),
        Book::new("3", "Far", "C").into_candidate(0.9),
    ];
    let reranker = Reranker::new(RankWeights::new(0.7, 0.3).unwrap());
    let scored = reranker.rerank(pool, &["x"], 3).unwrap();

    let scores: Vec<f32> = scored.iter().map(|s| s.weighted_score).collect();
    for (got, want) in scores.iter().zip([0.63, 0.35, 0.07]) {
        assert!((got - want).abs() < 1e-5, "{} != {}", got, want);
    }
    let titles: Vec<&str> = scored.iter().map(|s| s.item.title.as_str()).collect();
    assert_eq!(titles, vec!["Near", "Mid", "Far"]);
}

#[test]
fn test_duplicate_keeps_better_score_in_any_pool_order() {
    let worse = Book::new("w", "T", "A").into_candidate(0.8);
    let better = Book::new("b", "T", "A").into_candidate(0.2);
    let other = Book::new("o", "Other", "B").into_candidate(0.5);

    for pool in [
        vec![worse.clone(), better.clone(), other.clone()],
        vec![better.clone(), other.clone(), worse.clone()],
    ] {
        let ranked = rank(pool, &["x"], 5, 0.7, 0.3).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, "b");
        assert_eq!(ranked[1].id, "o");
    }
}

#[test]
fn test_empty_pool_is_empty_result() {
    let ranked = rank(Vec::new(), &["x"], 10, 0.7, 0.3).unwrap();
    assert!(ranked.is_empty());
}

#[test]
fn test_mood_overlap_lifts_a_farther_book() {
    let plain = Book::new("1", "Plain", "A").into_candidate(0.3);
    let matching = Book::new("2", "Matching", "B")
        .with_emotion_tags(["anxious"])
        .with_mindset_tags(["seeking calm"])
        .into_candidate(0.4);

    // 0.7 * 0.7 = 0.49 vs 0.7 * 0.6 + 0.3 * 1.0 = 0.72
    let ranked = rank(vec![plain, matching], &["anxious", "seeking calm"], 2, 0.7, 0.3).unwrap();
    assert_eq!(ranked[0].title, "Matching");
}

#[test]
fn test_invalid_parameters() {
    assert_eq!(
        rank(Vec::new(), &["x"], 0, 0.7, 0.3).unwrap_err(),
        RankError::ZeroResultCount
    );
    assert!(matches!(
        rank(Vec::new(), &["x"], 1, f32::NAN, 0.3),
        Err(RankError::WeightOutOfRange { name: "alpha", .. })
    ));
}

#[test]
fn test_recommend_substitutes_default_tags() {
    let (embedder, collection) = load();
    let recommender =
        Recommender::new(embedder, collection, RecommendConfig::default()).unwrap();

    let no_tags: [&str; 0] = [];
    let recs = recommender.recommend_default(&no_tags).unwrap();
    assert_eq!(recs.query_tags().to_vec(), DEFAULT_TAGS.to_vec());
    assert_eq!(recs.len(), 4);
    assert_eq!(recs.candidates_considered(), 4);
    assert!(!recs.source_unavailable());
}

#[test]
fn test_recommend_end_to_end() {
    let (embedder, collection) = load();
    let config = RecommendConfig {
        default_n: 2,
        ..Default::default()
    };
    let recommender = Recommender::new(embedder, collection, config).unwrap();

    let recs = recommender.recommend_default(&["introspective"]).unwrap();
    assert_eq!(recs.len(), 2);

    let scores: Vec<f32> = recs.scored().iter().map(|s| s.weighted_score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    for scored in recs.scored() {
        let expected = 0.7 * scored.semantic_score + 0.3 * scored.mood_score;
        assert!((scored.weighted_score - expected).abs() < 1e-6);
    }
}

#[test]
fn test_prose_reply_becomes_single_tag() {
    let extraction = parse_mood_content("I think you'd enjoy mystery novels").unwrap();
    assert_eq!(
        extraction.profile().interest_tags,
        vec!["I think you'd enjoy mystery novels"]
    );
}

#[tokio::test]
async fn test_analyzer_without_key_still_recommends() {
    let analyzer = MistralAnalyzer::new(AnalyzerConfig::default()).unwrap();
    let extraction = analyzer.analyze("burned out and anxious").await;
    assert!(extraction.is_fallback());

    let profile = extraction.into_profile();
    assert_eq!(profile.interest_tags, vec!["burned out and anxious"]);

    let (embedder, collection) = load();
    let recommender =
        Recommender::new(embedder, collection, RecommendConfig::default()).unwrap();
    let recs = recommender.recommend_default(&profile.interest_tags).unwrap();
    assert_eq!(recs.query_tags(), profile.interest_tags.as_slice());
    assert!(!recs.is_empty());
}
