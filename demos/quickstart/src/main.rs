//! quickstart — smallest end-to-end run of the geotrack service.
//!
//! Wires a `MemoryStore` into a `CourierTracker`, loads a handful of tasks
//! around lower Manhattan, walks the courier through three waypoints, and
//! prints which tasks fall inside the default 2.5 km radius at each stop.
//! Finishes with a simulated process restart to show state hydration from
//! the store.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use gt_core::{GeoPoint, Task, TaskId};
use gt_store::MemoryStore;
use gt_tracker::{CourierTracker, TrackerConfig};

// ── Task fixtures ─────────────────────────────────────────────────────────────

/// (id, name, lat, lon, price, delivery fee) — a few pickup points around
/// lower Manhattan and one in Brooklyn, far enough to drop out of radius.
const TASKS: &[(u64, &str, f64, f64, f64, f64)] = &[
    (1, "City Hall",        40.7128, -74.0060, 25.99, 5.0),
    (2, "Washington Sq",    40.7308, -73.9973, 19.99, 3.0),
    (3, "South Ferry",      40.7013, -74.0132, 12.50, 2.0),
    (4, "Williamsburg",     40.7081, -73.9571,  8.75, 4.5),
    (5, "Central Park S",   40.7664, -73.9790, 31.00, 6.0),
];

const WAYPOINTS: &[(&str, f64, f64)] = &[
    ("City Hall",      40.7128, -74.0060),
    ("West Village",   40.7336, -74.0027),
    ("Midtown",        40.7549, -73.9840),
];

fn build_tasks() -> Vec<Task> {
    TASKS
        .iter()
        .map(|&(id, _, lat, lon, price, delivery_price)| Task {
            id: TaskId(id),
            location: GeoPoint::new(lat, lon),
            price,
            delivery_price,
            delivered: false,
            created_at: Utc::now(),
        })
        .collect()
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== quickstart — geotrack courier service ===");
    println!();

    // 1. One store, one tracker, shared ownership as a request handler would.
    let store = Arc::new(MemoryStore::new());
    let tracker = CourierTracker::new(Arc::clone(&store), TrackerConfig::default())?;

    // 2. Load the task set.
    tracker.refresh_tasks(build_tasks())?;
    println!("Loaded {} tasks", TASKS.len());
    println!();

    // 3. Walk the courier through the waypoints.
    for &(name, lat, lon) in WAYPOINTS {
        tracker.set_position(GeoPoint::new(lat, lon))?;
        let here = tracker.position()?;
        let nearby = tracker.nearby_tasks_default()?;

        println!("At {name} ({lat:.4}, {lon:.4}) — {} task(s) in 2.5 km:", nearby.len());
        for task in &nearby {
            let label = TASKS
                .iter()
                .find(|t| t.0 == task.id.0)
                .map(|t| t.1)
                .unwrap_or("?");
            println!(
                "  #{:<3} {:<16} {:>5.2} km   ${:.2} + ${:.2} delivery",
                task.id,
                label,
                here.distance_km(task.location),
                task.price,
                task.delivery_price,
            );
        }
        println!();
    }

    // 4. Simulated restart: a fresh tracker over the same store picks up the
    //    persisted position and task set.
    drop(tracker);
    let tracker = CourierTracker::new(store, TrackerConfig::default())?;
    let loaded = tracker.hydrate()?;
    let nearby = tracker.nearby_tasks_default()?;
    println!("After restart: hydrated {loaded} tasks, {} still in radius of {}",
        nearby.len(),
        tracker.position()?,
    );

    Ok(())
}
