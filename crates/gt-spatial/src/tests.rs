//! Unit tests for gt-spatial.

#[cfg(test)]
mod helpers {
    use chrono::DateTime;

    use gt_core::{GeoPoint, Task, TaskId};

    /// Build a task at `(lat, lon)` with fixed money fields and timestamp.
    pub fn task(id: u64, lat: f64, lon: f64) -> Task {
        Task {
            id: TaskId(id),
            location: GeoPoint::new(lat, lon),
            price: 19.99,
            delivery_price: 3.0,
            delivered: false,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    /// Sorted id list of a query result, for unordered comparison.
    pub fn ids(tasks: &[Task]) -> Vec<u64> {
        let mut ids: Vec<u64> = tasks.iter().map(|t| t.id.0).collect();
        ids.sort_unstable();
        ids
    }
}

// ── Snapshot construction ─────────────────────────────────────────────────────

#[cfg(test)]
mod build {
    use gt_core::{GtError, TaskId, TaskRecord};

    use super::helpers::task;
    use crate::TaskSnapshot;

    #[test]
    fn empty_snapshot() {
        let snap = TaskSnapshot::empty();
        assert_eq!(snap.len(), 0);
        assert!(snap.is_empty());
        assert_eq!(snap.skipped(), 0);
    }

    #[test]
    fn strict_accepts_valid_batch() {
        let snap = TaskSnapshot::build(vec![task(1, 40.7, -74.0), task(2, 40.8, -74.1)]).unwrap();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.skipped(), 0);
    }

    #[test]
    fn strict_rejects_duplicate_id() {
        let err = TaskSnapshot::build(vec![task(7, 40.7, -74.0), task(7, 40.8, -74.1)]).unwrap_err();
        match err {
            GtError::MalformedTask { id, .. } => assert_eq!(id, TaskId(7)),
            other => panic!("expected MalformedTask, got {other}"),
        }
    }

    #[test]
    fn strict_rejects_out_of_range_coordinate() {
        let err = TaskSnapshot::build(vec![task(1, 40.7, -74.0), task(2, 91.0, 0.0)]).unwrap_err();
        assert!(matches!(err, GtError::MalformedTask { id: TaskId(2), .. }));
    }

    #[test]
    fn tolerant_skips_and_counts() {
        let records = vec![
            TaskRecord::from(&task(1, 40.7128, -74.0060)),
            TaskRecord::from(&task(2, 200.0, 0.0)),  // lat out of range
            TaskRecord::from(&task(1, 40.7, -74.0)), // duplicate of id 1
            TaskRecord::from(&task(3, 40.7228, -74.0065)),
        ];
        let snap = TaskSnapshot::from_records(records);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.skipped(), 2);
        assert_eq!(super::helpers::ids(snap.tasks()), vec![1, 3]);
    }

    #[test]
    fn tolerant_all_bad_gives_empty() {
        let records = vec![
            TaskRecord::from(&task(1, f64::NAN, 0.0)),
            TaskRecord::from(&task(2, 0.0, 181.0)),
        ];
        let snap = TaskSnapshot::from_records(records);
        assert!(snap.is_empty());
        assert_eq!(snap.skipped(), 2);
    }
}

// ── Radius queries ────────────────────────────────────────────────────────────

#[cfg(test)]
mod query {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use gt_core::{GeoPoint, GtError};

    use super::helpers::{ids, task};
    use crate::TaskSnapshot;

    #[test]
    fn rejects_non_positive_radius() {
        let snap = TaskSnapshot::empty();
        let center = GeoPoint::new(0.0, 0.0);
        for r in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = snap.query_radius(center, r).unwrap_err();
            assert!(matches!(err, GtError::InvalidRadius(_)), "radius {r}");
        }
    }

    #[test]
    fn rejects_out_of_range_center() {
        let snap = TaskSnapshot::empty();
        let err = snap.query_radius(GeoPoint::new(95.0, 0.0), 5.0).unwrap_err();
        assert!(matches!(err, GtError::InvalidCoordinate { .. }));
    }

    #[test]
    fn empty_snapshot_returns_empty_not_error() {
        let snap = TaskSnapshot::empty();
        let hits = snap.query_radius(GeoPoint::new(40.7128, -74.0060), 2.5).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn nearby_and_far_tasks() {
        // One task at the center, one ~1.1 km north of it.
        let center = GeoPoint::new(40.7128, -74.0060);
        let snap = TaskSnapshot::build(vec![
            task(1, 40.7128, -74.0060),
            task(2, 40.7228, -74.0065),
        ])
        .unwrap();

        assert_eq!(ids(&snap.query_radius(center, 5.0).unwrap()), vec![1, 2]);
        assert_eq!(ids(&snap.query_radius(center, 0.5).unwrap()), vec![1]);
    }

    #[test]
    fn boundary_distance_is_inclusive() {
        let center = GeoPoint::new(0.0, 0.0);
        let on_ring = task(1, 0.2, 0.0);
        let exact = center.distance_km(on_ring.location);
        let snap = TaskSnapshot::build(vec![on_ring]).unwrap();

        assert_eq!(snap.query_radius(center, exact).unwrap().len(), 1);
        assert!(snap.query_radius(center, exact * 0.999).unwrap().is_empty());
    }

    #[test]
    fn monotone_in_radius() {
        let mut rng = SmallRng::seed_from_u64(7);
        let tasks: Vec<_> = (0..64)
            .map(|i| {
                task(
                    i,
                    40.7 + rng.gen_range(-0.5..0.5),
                    -74.0 + rng.gen_range(-0.5..0.5),
                )
            })
            .collect();
        let snap = TaskSnapshot::build(tasks).unwrap();
        let center = GeoPoint::new(40.7128, -74.0060);

        let mut prev: Vec<u64> = Vec::new();
        for r in [1.0, 2.0, 5.0, 10.0, 20.0, 100.0] {
            let cur = ids(&snap.query_radius(center, r).unwrap());
            assert!(
                prev.iter().all(|id| cur.contains(id)),
                "result for smaller radius not a subset at r = {r}"
            );
            prev = cur;
        }
        // The largest radius covers the whole ~±0.5° cloud.
        assert_eq!(prev.len(), 64);
    }

    #[test]
    fn finds_tasks_across_the_antimeridian() {
        let snap = TaskSnapshot::build(vec![
            task(1, 0.0, 179.9),
            task(2, 0.0, -179.9),
            task(3, 0.0, 170.0), // ~1100 km away, outside radius
        ])
        .unwrap();

        // Center sits east of the seam; task 2 is ~16.7 km away across it.
        let center = GeoPoint::new(0.0, 179.95);
        assert_eq!(ids(&snap.query_radius(center, 25.0).unwrap()), vec![1, 2]);

        // And from the west side.
        let center = GeoPoint::new(0.0, -179.95);
        assert_eq!(ids(&snap.query_radius(center, 25.0).unwrap()), vec![1, 2]);
    }

    #[test]
    fn circle_enclosing_a_pole() {
        // Three tasks on the 89.5° parallel, 120° of longitude apart — all
        // within ~111 km of the pole, so a 200 km query centred at 89.9° N
        // must find every one of them regardless of longitude.
        let snap = TaskSnapshot::build(vec![
            task(1, 89.5, 0.0),
            task(2, 89.5, 120.0),
            task(3, 89.5, -120.0),
            task(4, 80.0, 0.0), // ~1100 km south, outside
        ])
        .unwrap();

        let center = GeoPoint::new(89.9, 45.0);
        assert_eq!(ids(&snap.query_radius(center, 200.0).unwrap()), vec![1, 2, 3]);
    }

    #[test]
    fn planet_sized_radius_returns_everything() {
        let snap = TaskSnapshot::build(vec![
            task(1, 89.0, 0.0),
            task(2, -89.0, 180.0),
            task(3, 0.0, -90.0),
        ])
        .unwrap();
        let hits = snap
            .query_radius(GeoPoint::new(12.0, 34.0), 25_000.0)
            .unwrap();
        assert_eq!(hits.len(), 3);
    }
}

// ── Index refresh & concurrency ───────────────────────────────────────────────

#[cfg(test)]
mod index {
    use std::thread;

    use gt_core::GeoPoint;

    use super::helpers::{ids, task};
    use crate::ProximityIndex;

    const CENTER: GeoPoint = GeoPoint { lat: 40.7128, lon: -74.0060 };

    #[test]
    fn refresh_is_idempotent() {
        let index = ProximityIndex::new();
        let batch = vec![task(1, 40.7128, -74.0060), task(2, 40.7228, -74.0065)];

        index.refresh(batch.clone()).unwrap();
        let first = ids(&index.query_radius(CENTER, 5.0).unwrap());
        index.refresh(batch).unwrap();
        let second = ids(&index.query_radius(CENTER, 5.0).unwrap());

        assert_eq!(first, second);
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let index = ProximityIndex::new();
        index.refresh(vec![task(1, 40.7128, -74.0060)]).unwrap();

        // Duplicate-id batch must be rejected wholesale...
        let bad = vec![task(2, 40.7, -74.0), task(2, 40.8, -74.0)];
        assert!(index.refresh(bad).is_err());

        // ...leaving the old snapshot fully queryable.
        assert_eq!(ids(&index.query_radius(CENTER, 5.0).unwrap()), vec![1]);
    }

    #[test]
    fn snapshot_handle_outlives_refresh() {
        let index = ProximityIndex::new();
        index.refresh(vec![task(1, 40.7128, -74.0060)]).unwrap();

        let held = index.snapshot();
        index.refresh(vec![task(2, 40.7128, -74.0060)]).unwrap();

        // The held handle still sees the old set; the index sees the new one.
        assert_eq!(ids(&held.query_radius(CENTER, 5.0).unwrap()), vec![1]);
        assert_eq!(ids(&index.query_radius(CENTER, 5.0).unwrap()), vec![2]);
    }

    /// With refreshers and queriers running concurrently, no query result
    /// may ever mix tasks from two different generations of the task set.
    #[test]
    fn concurrent_queries_never_see_mixed_generations() {
        const GENERATIONS: u64 = 50;
        const TASKS_PER_GEN: u64 = 8;

        let index = ProximityIndex::new();
        // Generation g = ids g*100 .. g*100+7, all at the same location.
        let batch = |g: u64| {
            (0..TASKS_PER_GEN)
                .map(|i| task(g * 100 + i, 40.7128, -74.0060))
                .collect::<Vec<_>>()
        };
        index.refresh(batch(0)).unwrap();

        thread::scope(|s| {
            // Two writers race through the generations.
            for w in 0..2u64 {
                let index = &index;
                s.spawn(move || {
                    for g in (w * GENERATIONS)..((w + 1) * GENERATIONS) {
                        index.refresh(batch(g)).unwrap();
                    }
                });
            }

            // Four readers assert generation homogeneity on every query.
            for _ in 0..4 {
                let index = &index;
                s.spawn(move || {
                    for _ in 0..500 {
                        let hits = index.query_radius(CENTER, 5.0).unwrap();
                        assert_eq!(hits.len() as u64, TASKS_PER_GEN);
                        let generation = hits[0].id.0 / 100;
                        assert!(
                            hits.iter().all(|t| t.id.0 / 100 == generation),
                            "query saw tasks from more than one refresh"
                        );
                    }
                });
            }
        });
    }
}
