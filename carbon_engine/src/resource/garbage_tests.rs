/// Tests for GarbageSchedule

use super::*;
use slotmap::SlotMap;

fn keys(count: usize) -> Vec<ResourceKey> {
    let mut map: SlotMap<ResourceKey, ()> = SlotMap::with_key();
    (0..count).map(|_| map.insert(())).collect()
}

// ============================================================================
// Tests: Deadlines
// ============================================================================

#[test]
fn test_pop_due_is_strict() {
    let k = keys(1);
    let mut garbage = GarbageSchedule::new();
    garbage.insert(k[0], 2.0);

    assert_eq!(garbage.pop_due(1.9), None);
    assert_eq!(garbage.pop_due(2.0), None);
    assert_eq!(garbage.pop_due(2.1), Some(k[0]));
    assert!(garbage.is_empty());
}

#[test]
fn test_pop_due_in_deadline_order() {
    let k = keys(3);
    let mut garbage = GarbageSchedule::new();
    garbage.insert(k[0], 5.0);
    garbage.insert(k[1], 1.0);
    garbage.insert(k[2], 3.0);

    let order: Vec<_> = std::iter::from_fn(|| garbage.pop_due(10.0)).collect();
    assert_eq!(order, vec![k[1], k[2], k[0]]);
}

#[test]
fn test_pop_any_ignores_deadline() {
    let k = keys(2);
    let mut garbage = GarbageSchedule::new();
    garbage.insert(k[0], 100.0);
    garbage.insert(k[1], 200.0);

    assert_eq!(garbage.pop_any(), Some(k[0]));
    assert_eq!(garbage.pop_any(), Some(k[1]));
    assert_eq!(garbage.pop_any(), None);
}

// ============================================================================
// Tests: Lazy deletion
// ============================================================================

#[test]
fn test_remove_skips_stale_entry() {
    let k = keys(2);
    let mut garbage = GarbageSchedule::new();
    garbage.insert(k[0], 1.0);
    garbage.insert(k[1], 2.0);

    assert!(garbage.remove(k[0]));
    assert!(!garbage.remove(k[0]));
    assert!(!garbage.contains(k[0]));
    assert_eq!(garbage.len(), 1);
    assert_eq!(garbage.pop_due(5.0), Some(k[1]));
    assert_eq!(garbage.pop_due(5.0), None);
}

#[test]
fn test_reschedule_uses_latest_deadline() {
    let k = keys(1);
    let mut garbage = GarbageSchedule::new();
    garbage.insert(k[0], 1.0);
    garbage.insert(k[0], 4.0);

    assert_eq!(garbage.len(), 1);
    assert_eq!(garbage.next_deadline(), Some(4.0));
    assert_eq!(garbage.pop_due(2.0), None);
    assert_eq!(garbage.pop_due(4.5), Some(k[0]));
}
