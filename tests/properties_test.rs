//! Property tests: ordering, boundedness and determinism of retrieval.

use knowledge_rag::{
    chunk, DistanceMetric, Embedder, FlatIndex, HashingEmbedder, Index, RagError, RetrievalEngine,
    Vector,
};
use proptest::prelude::*;

/// Injective for strings of at most 16 bytes: one component per byte plus the length.
fn byte_embedder(texts: &[String]) -> anyhow::Result<Vec<Vector>> {
    Ok(texts
        .iter()
        .map(|text| {
            let mut data = vec![0.0f32; 17];
            for (slot, byte) in data.iter_mut().zip(text.bytes()) {
                *slot = byte as f32;
            }
            data[16] = text.len() as f32;
            Vector::new(data)
        })
        .collect())
}

fn paragraph() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,5}"
}

proptest! {
    #[test]
    fn prop_chunks_follow_paragraph_order(paragraphs in prop::collection::vec(paragraph(), 0..20)) {
        let corpus = paragraphs.join("\n\n");
        let units = chunk(&corpus);

        prop_assert_eq!(units.len(), paragraphs.len());
        for (i, unit) in units.iter().enumerate() {
            prop_assert_eq!(unit.id, i);
            prop_assert_eq!(&unit.content, &paragraphs[i]);
        }
    }

    #[test]
    fn prop_unit_id_matches_index_position(paragraphs in prop::collection::vec(paragraph(), 1..20)) {
        let embedder = HashingEmbedder::new(64).unwrap();
        let engine = RetrievalEngine::build_from_corpus(&paragraphs.join("\n\n"), &embedder);
        let index = engine.index().unwrap();

        for unit in engine.units() {
            let expected = embedder.embed_one(&unit.content).unwrap();
            prop_assert_eq!(index.get_vector(unit.id), Some(&expected));
        }
    }

    #[test]
    fn prop_result_count_is_min_of_k_and_n(
        data in prop::collection::vec(prop::collection::vec(-10.0f32..10.0, 3), 1..50),
        query in prop::collection::vec(-10.0f32..10.0, 3),
        k in 1usize..60,
    ) {
        let n = data.len();
        let index = FlatIndex::build(
            DistanceMetric::SquaredEuclidean,
            data.into_iter().map(Vector::new).collect(),
        ).unwrap();

        let results = index.search(&Vector::new(query), k).unwrap();
        prop_assert_eq!(results.len(), k.min(n));
        for pair in results.windows(2) {
            prop_assert!(
                pair[0].distance < pair[1].distance
                    || (pair[0].distance == pair[1].distance && pair[0].unit_id < pair[1].unit_id)
            );
        }
    }

    #[test]
    fn prop_engine_answer_has_min_k_n_lines(
        paragraphs in prop::collection::vec("[a-z]{1,8}", 1..12),
        k in 1usize..15,
    ) {
        let embedder = HashingEmbedder::default();
        let engine = RetrievalEngine::build_from_corpus(&paragraphs.join("\n\n"), &embedder);

        let answer = engine.search("query", k, &embedder);
        prop_assert_eq!(answer.split('\n').count(), k.min(paragraphs.len()));
    }

    #[test]
    fn prop_unit_is_its_own_nearest(words in prop::collection::btree_set("[a-z]{1,12}", 1..30)) {
        let words: Vec<String> = words.into_iter().collect();
        let engine = RetrievalEngine::build_from_corpus(&words.join("\n\n"), &byte_embedder);

        for unit in engine.units() {
            let hits = engine.search_hits(&unit.content, 1, &byte_embedder).unwrap();
            prop_assert_eq!(hits[0].unit_id, unit.id);
            prop_assert_eq!(hits[0].distance, 0.0);
        }
    }

    #[test]
    fn prop_rebuild_is_idempotent(
        paragraphs in prop::collection::vec(paragraph(), 0..15),
        query in paragraph(),
        k in 1usize..5,
    ) {
        let corpus = paragraphs.join("\n\n");
        let embedder = HashingEmbedder::new(32).unwrap();

        let first = RetrievalEngine::build_from_corpus(&corpus, &embedder);
        let second = RetrievalEngine::build_from_corpus(&corpus, &embedder);
        prop_assert_eq!(first.search(&query, k, &embedder), second.search(&query, k, &embedder));
    }
}

#[test]
fn test_mixed_dimensions_rejected() {
    let result = FlatIndex::build(
        DistanceMetric::SquaredEuclidean,
        vec![Vector::new(vec![1.0, 2.0, 3.0]), Vector::new(vec![1.0, 2.0])],
    );
    assert!(matches!(
        result,
        Err(RagError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn test_self_nearest_with_duplicates_prefers_lowest_id() {
    let engine = RetrievalEngine::build_from_corpus("alpha\n\nbeta\n\nalpha", &byte_embedder);

    let hits = engine.search_hits("alpha", 3, &byte_embedder).unwrap();
    let ids: Vec<usize> = hits.iter().map(|h| h.unit_id).collect();
    assert_eq!(ids[..2], [0, 2]);
}
