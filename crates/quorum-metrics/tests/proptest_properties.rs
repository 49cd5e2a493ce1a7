use proptest::prelude::*;
use quorum_core::Relationship;
use quorum_metrics::digits::LeadingDigitHistogram;
use quorum_metrics::{DirectedGraph, rank_authority};

const NAMES: [&str; 6] = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];

fn arb_edges() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..NAMES.len(), 0..NAMES.len()), 1..24)
}

fn to_relationships(edges: &[(usize, usize)]) -> Vec<Relationship> {
    edges
        .iter()
        .map(|&(s, t)| Relationship::new(NAMES[s], NAMES[t], "rel").expect("valid"))
        .collect()
}

proptest! {
    #[test]
    fn authority_sums_to_one(edges in arb_edges()) {
        let result = rank_authority(&to_relationships(&edges)).expect("rank");
        prop_assert!((result.total() - 1.0).abs() < 1e-6, "total={}", result.total());
        prop_assert!(result.scores.values().all(|&s| s >= 0.0));
    }

    #[test]
    fn authority_ignores_input_order(
        (edges, shuffled) in arb_edges().prop_flat_map(|edges| {
            let shuffled = Just(edges.clone()).prop_shuffle();
            (Just(edges), shuffled)
        })
    ) {
        let a = rank_authority(&to_relationships(&edges)).expect("rank");
        let b = rank_authority(&to_relationships(&shuffled)).expect("rank");
        prop_assert_eq!(&a, &b);

        let ga = DirectedGraph::from_relationships(&to_relationships(&edges));
        let gb = DirectedGraph::from_relationships(&to_relationships(&shuffled));
        prop_assert_eq!(ga.content_hash(), gb.content_hash());
    }

    #[test]
    fn nodes_without_reversed_inlinks_sit_on_the_floor(edges in arb_edges()) {
        let rels = to_relationships(&edges);
        let graph = DirectedGraph::from_relationships(&rels);
        let result = rank_authority(&rels).expect("rank");
        for (idx, id) in graph.nodes().iter().enumerate() {
            if graph.successors(idx).is_empty() {
                let score = result.get(id.as_str()).expect("scored");
                prop_assert_eq!(score.to_bits(), result.floor.to_bits());
            }
        }
    }

    #[test]
    fn histogram_sums_to_one_hundred(sample in prop::collection::vec(1_i64..=i64::MAX, 1..500)) {
        let histogram = LeadingDigitHistogram::from_sample(&sample).expect("histogram");
        prop_assert!((histogram.sum() - 100.0).abs() < 1e-6);
        prop_assert_eq!(histogram.total(), sample.len() as u64);
    }
}
