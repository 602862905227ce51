//! Unit tests for gt-store.

#[cfg(test)]
mod memory {
    use crate::{KeyValueStore, MemoryStore};

    #[test]
    fn get_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("absent").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let store = MemoryStore::new();
        store.set("k", b"v1").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"v1"[..]));
    }

    #[test]
    fn set_replaces_wholesale() {
        let store = MemoryStore::new();
        store.set("k", b"first").unwrap();
        store.set("k", b"second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"second"[..]));
    }
}

#[cfg(test)]
mod codec {
    use chrono::DateTime;

    use gt_core::{GeoPoint, Task, TaskId};

    use crate::codec::{decode_position, decode_task_records, encode_position, encode_tasks};

    fn task(id: u64) -> Task {
        Task {
            id: TaskId(id),
            location: GeoPoint::new(40.7128, -74.0060),
            price: 25.99,
            delivery_price: 5.0,
            delivered: false,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn position_roundtrip() {
        let pos = GeoPoint::new(40.7128, -74.0060);
        let decoded = decode_position(&encode_position(&pos).unwrap()).unwrap();
        assert_eq!(decoded, pos);
    }

    #[test]
    fn corrupt_position_is_a_codec_error() {
        assert!(decode_position(b"not json").is_err());
        assert!(decode_position(br#"{"lat": 1.0}"#).is_err()); // missing lon
    }

    #[test]
    fn task_set_roundtrip() {
        let tasks = vec![task(1), task(2)];
        let (records, skipped) = decode_task_records(&encode_tasks(&tasks).unwrap()).unwrap();
        assert_eq!(skipped, 0);
        let decoded: Vec<Task> = records.into_iter().filter_map(|r| r.into_task()).collect();
        assert_eq!(decoded, tasks);
    }

    #[test]
    fn bad_elements_are_skipped_not_fatal() {
        // Hand-built array: one valid record, one wrong-shaped element, one
        // wrong-typed element.
        let blob = br#"[
            {"id": 1, "lat": 40.7128, "lon": -74.006, "price": 25.99,
             "delivery_price": 5.0, "delivered": false,
             "created_at": "2023-11-14T22:13:20Z"},
            {"unexpected": true},
            42
        ]"#;
        let (records, skipped) = decode_task_records(blob).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn non_array_blob_is_fatal() {
        assert!(decode_task_records(b"{}").is_err());
        assert!(decode_task_records(b"garbage").is_err());
    }
}

#[cfg(test)]
mod errors {
    use gt_core::GtError;

    use crate::StoreError;

    #[test]
    fn store_error_collapses_to_store_unavailable() {
        let err: GtError = StoreError::Unavailable("connection refused".into()).into();
        assert!(matches!(err, GtError::StoreUnavailable(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
