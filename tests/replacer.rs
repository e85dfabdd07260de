use quill_replacer::buffer::{AccessType, FrameId, SyncReplacer};
use quill_replacer::error::ReplacerError;
use std::thread;

fn touch(replacer: &SyncReplacer, frame_id: FrameId, times: usize) {
    for _ in 0..times {
        replacer.record_access(frame_id, AccessType::Lookup).unwrap();
    }
}

fn flagged(replacer: &SyncReplacer) -> usize {
    let capacity = replacer.snapshot().capacity;
    (0..capacity).filter(|f| replacer.is_evictable(*f)).count()
}

#[test]
fn cold_frame_beats_warm_frame() {
    let replacer = SyncReplacer::new(4, 2);
    touch(&replacer, 1, 1);
    touch(&replacer, 2, 1);
    touch(&replacer, 1, 1);
    replacer.set_evictable(1, true).unwrap();
    replacer.set_evictable(2, true).unwrap();

    assert_eq!(replacer.evict(), Some(2));
    assert_eq!(replacer.evict(), Some(1));
    assert_eq!(replacer.evict(), None);
}

#[test]
fn cold_frame_beats_more_recent_warm_access() {
    let replacer = SyncReplacer::new(8, 3);
    touch(&replacer, 5, 3);
    touch(&replacer, 6, 1);
    replacer.set_evictable(5, true).unwrap();
    replacer.set_evictable(6, true).unwrap();

    let snapshot = replacer.snapshot();
    assert_eq!((snapshot.cold_len, snapshot.warm_len), (1, 1));
    assert_eq!(replacer.evict(), Some(6));
    assert_eq!(replacer.evict(), Some(5));
}

#[test]
fn tier_priority_regardless_of_insertion_order() {
    let replacer = SyncReplacer::new(8, 2);
    // warm frames first, cold frames afterwards
    touch(&replacer, 0, 2);
    touch(&replacer, 1, 2);
    touch(&replacer, 2, 1);
    touch(&replacer, 3, 1);
    for frame_id in 0..4 {
        replacer.set_evictable(frame_id, true).unwrap();
    }
    let order: Vec<_> = std::iter::from_fn(|| replacer.evict()).collect();
    assert_eq!(order, vec![2, 3, 0, 1]);
}

#[test]
fn promoted_frame_leaves_cold_ordering() {
    let replacer = SyncReplacer::new(8, 2);
    touch(&replacer, 0, 1);
    touch(&replacer, 1, 1);
    touch(&replacer, 0, 1);
    touch(&replacer, 2, 2);
    // more accesses to 0 keep it warm and move it to the recent end
    touch(&replacer, 0, 3);
    assert_eq!(replacer.access_count(0), 5);
    for frame_id in 0..3 {
        replacer.set_evictable(frame_id, true).unwrap();
    }
    assert_eq!(replacer.evict(), Some(1));
    assert_eq!(replacer.evict(), Some(2));
    assert_eq!(replacer.evict(), Some(0));
}

#[test]
fn unpinning_last_candidate_leaves_nothing_to_evict() {
    let replacer = SyncReplacer::new(4, 2);
    touch(&replacer, 3, 1);
    replacer.set_evictable(3, true).unwrap();
    replacer.set_evictable(3, false).unwrap();

    assert_eq!(replacer.evict(), None);
    assert_eq!(replacer.size(), 0);
    assert_eq!(replacer.access_count(3), 1);
}

#[test]
fn set_evictable_is_idempotent() {
    let replacer = SyncReplacer::new(4, 2);
    touch(&replacer, 1, 1);
    replacer.set_evictable(1, true).unwrap();
    replacer.set_evictable(1, true).unwrap();
    assert_eq!(replacer.size(), 1);
    replacer.set_evictable(1, false).unwrap();
    replacer.set_evictable(1, false).unwrap();
    assert_eq!(replacer.size(), 0);
}

#[test]
fn remove_restores_unseen_state() {
    let replacer = SyncReplacer::new(4, 2);
    let before = replacer.snapshot();

    touch(&replacer, 2, 3);
    replacer.set_evictable(2, true).unwrap();
    replacer.remove(2).unwrap();

    assert_eq!(replacer.snapshot(), before);
    assert_eq!(replacer.access_count(2), 0);
    assert!(!replacer.is_evictable(2));

    // comes back as a fresh cold frame
    touch(&replacer, 2, 1);
    assert_eq!(replacer.snapshot().cold_len, 1);
}

#[test]
fn remove_never_accessed_frame_is_noop() {
    let replacer = SyncReplacer::new(4, 2);
    replacer.remove(1).unwrap();
    assert_eq!(replacer.size(), 0);
}

#[test]
fn contract_violations_surface_to_caller() {
    let replacer = SyncReplacer::new(4, 2);
    assert!(matches!(
        replacer.record_access(4, AccessType::Index),
        Err(ReplacerError::InvalidFrame {
            frame_id: 4,
            capacity: 4
        })
    ));

    touch(&replacer, 0, 1);
    assert!(matches!(
        replacer.remove(0),
        Err(ReplacerError::InvariantViolation(_))
    ));
    assert_eq!(replacer.access_count(0), 1);
}

#[test]
fn size_tracks_flags_under_concurrency() {
    let capacity = 256;
    let replacer = SyncReplacer::new(capacity, 3);

    thread::scope(|s| {
        for worker in 0..8 {
            let replacer = &replacer;
            s.spawn(move || {
                for round in 0..200 {
                    let frame_id = (worker * 31 + round * 7) % capacity;
                    replacer
                        .record_access(frame_id, AccessType::Scan)
                        .unwrap();
                    replacer.set_evictable(frame_id, round % 3 != 0).unwrap();
                    if round % 5 == 0 {
                        replacer.evict();
                    }
                    if round % 11 == 0 {
                        let _ = replacer.remove(frame_id);
                    }
                }
            });
        }
    });

    let snapshot = replacer.snapshot();
    assert_eq!(replacer.size(), flagged(&replacer));
    assert!(snapshot.cold_len + snapshot.warm_len <= capacity);

    // a flag can land on a frame another worker just evicted, so leftovers
    // after draining must all be frames without history
    while replacer.evict().is_some() {}
    assert_eq!(replacer.size(), flagged(&replacer));
    for frame_id in 0..capacity {
        if replacer.is_evictable(frame_id) {
            assert_eq!(replacer.access_count(frame_id), 0);
        }
    }
}
