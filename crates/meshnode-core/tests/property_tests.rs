//! Property-based tests for coordinate scaling, geo math and registry views
//!
//! These tests check invariants that must hold for every input: the 1e-7
//! wire scaling round trip, distance symmetry, bearing range, and the
//! registry's one-record-per-node and ordering guarantees.

mod test_utils;

use meshnode_core::geo::{
    bearing_degrees, distance_meters, format_coordinate, CoordinateFormat, GeoPoint,
};
use meshnode_core::telemetry::{deg_d, deg_i};
use meshnode_core::{NodeNum, NodeRegistry, Timestamp};
use proptest::prelude::*;
use test_utils::{heard_event, TEST_NOW};

/// Generate an arbitrary in-range point
fn arb_point() -> impl Strategy<Value = GeoPoint> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

/// Generate an arbitrary coordinate format, including unrecognized wire values
fn arb_format() -> impl Strategy<Value = CoordinateFormat> {
    (-2i32..8).prop_map(CoordinateFormat::from_wire)
}

/// Generate a sequence of node numbers with repeats
fn arb_node_sequence() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..20, 1..60)
}

proptest! {
    /// Property: wire integers survive the degree conversion within one unit
    #[test]
    fn scaling_round_trip(v in -1_800_000_000i32..=1_800_000_000) {
        let back = deg_i(deg_d(v));
        prop_assert!((back as i64 - v as i64).abs() <= 1);
    }

    /// Property: distance is symmetric and non-negative
    #[test]
    fn distance_symmetric(a in arb_point(), b in arb_point()) {
        let ab = distance_meters(a, b);
        let ba = distance_meters(b, a);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-6);
        // Never more than half the circumference
        prop_assert!(ab <= std::f64::consts::PI * 6_371_000.0 + 1e-6);
    }

    /// Property: a point is at zero distance from itself
    #[test]
    fn distance_to_self_is_zero(a in arb_point()) {
        prop_assert_eq!(distance_meters(a, a), 0.0);
    }

    /// Property: bearing is always within [0, 360)
    #[test]
    fn bearing_in_range(a in arb_point(), b in arb_point()) {
        let bearing = bearing_degrees(a, b);
        prop_assert!((0.0..360.0).contains(&bearing), "bearing {}", bearing);
    }

    /// Property: every format renders something for finite in-range input
    #[test]
    fn format_never_empty(a in arb_point(), format in arb_format()) {
        prop_assert!(!format_coordinate(a, format).is_empty());
    }

    /// Property: the registry holds one record per node, in first-seen order
    #[test]
    fn registry_one_record_per_node(sequence in arb_node_sequence()) {
        let mut registry = NodeRegistry::new();
        let now = Timestamp::from_secs(TEST_NOW);
        for (i, num) in sequence.iter().enumerate() {
            registry.apply(&heard_event(*num, TEST_NOW + i as i64), now);
        }

        let mut first_seen: Vec<u32> = Vec::new();
        for num in &sequence {
            if !first_seen.contains(num) {
                first_seen.push(*num);
            }
        }

        let order: Vec<u32> = registry.all().iter().map(|n| n.num().value()).collect();
        prop_assert_eq!(order, first_seen);
        prop_assert_eq!(registry.len(), registry.snapshot().len());
    }

    /// Property: reindexing moves only the local node
    #[test]
    fn reindex_moves_only_local(sequence in arb_node_sequence(), own in 1u32..20) {
        let mut registry = NodeRegistry::new();
        for num in &sequence {
            registry.apply(&heard_event(*num, TEST_NOW), Timestamp::from_secs(TEST_NOW));
        }

        let all: Vec<u32> = registry.all().iter().map(|n| n.num().value()).collect();
        let reindexed: Vec<u32> = registry
            .reindex_local_first(NodeNum::new(own))
            .iter()
            .map(|n| n.num().value())
            .collect();

        prop_assert_eq!(reindexed.len(), all.len());
        if all.contains(&own) {
            prop_assert_eq!(reindexed[0], own);
        }
        let rest: Vec<u32> = reindexed.iter().copied().filter(|n| *n != own).collect();
        let expected: Vec<u32> = all.iter().copied().filter(|n| *n != own).collect();
        prop_assert_eq!(rest, expected);
    }
}
