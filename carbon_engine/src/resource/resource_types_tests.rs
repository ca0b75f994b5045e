/// Tests for resource ids, kinds and flags

use super::*;

// ============================================================================
// Tests: ResourceId
// ============================================================================

#[test]
fn test_internal_ids_are_above_threshold_and_unique() {
    let a = ResourceId::next_internal();
    let b = ResourceId::next_internal();
    assert!(a.is_internal());
    assert!(b.is_internal());
    assert_ne!(a, b);
}

#[test]
fn test_persisted_and_none_ids() {
    assert!(ResourceId::NONE.is_none());
    assert!(!ResourceId(42).is_internal());
    assert!(ResourceId(INTERNAL_REF_THRESHOLD).is_internal());
    assert_eq!(ResourceId(0x2a).to_string(), "0x2a");
}

// ============================================================================
// Tests: ResourceKind
// ============================================================================

#[test]
fn test_kind_indices_are_dense() {
    for (i, kind) in ResourceKind::ALL.iter().enumerate() {
        assert_eq!(kind.index(), i);
    }
}

#[test]
fn test_report_order_covers_every_kind() {
    let mut seen = [false; ResourceKind::COUNT];
    for kind in ResourceKind::REPORT_ORDER {
        assert!(!seen[kind.index()]);
        seen[kind.index()] = true;
    }
    assert!(seen.iter().all(|s| *s));
    assert_eq!(ResourceKind::REPORT_ORDER[1].label(), "Render Targets");
}

// ============================================================================
// Tests: Flags / provenance
// ============================================================================

#[test]
fn test_flag_bits() {
    assert_eq!(ResourceFlags::ALWAYS_RESIDENT.bits(), 0x1);
    assert_eq!(ResourceFlags::DEFERRED_LOAD.bits(), 0x2);
    assert_eq!(ResourceFlags::FORCE_NEW.bits(), 0x4);
    assert!(ResourceFlags::default().is_empty());
}

#[test]
fn test_debug_source_macro() {
    let source = crate::debug_source!();
    assert!(source.file.ends_with("resource_types_tests.rs"));
    assert!(source.line > 0);
    assert_eq!(DebugSource { file: "a.rs", line: 7 }.to_string(), "a.rs(7)");
}
