//! Tests for layout diagnostics and module statistics

mod common;

use common::{firmware, report};
use mapscope_core::diagnostics::{Bound, Finding};
use mapscope_core::MemoryMap;
use pretty_assertions::assert_eq;

fn parse(body: &str) -> MemoryMap
{
    MemoryMap::parse(&report(body)).unwrap()
}

#[test]
fn test_clean_map_has_no_findings()
{
    let map = firmware();
    assert!(map.diagnose().is_empty());
    assert_eq!(map.diagnose_str(), "Potential memory issues:");
}

#[test]
fn test_overlapping_globals_are_reported()
{
    let map = parse(
        ".bss            0x00000000       0x20
 .bss           0x00000000        0xa a.o
                0x00000000                A
 .bss           0x00000005        0xa b.o
                0x00000005                B
",
    );
    let findings = map.diagnose();

    assert_eq!(findings.len(), 1);
    match findings[0] {
        Finding::Overlap { first, second } => {
            assert_eq!(first.name(), "A");
            assert_eq!(second.name(), "B");
        }
        other => panic!("Expected overlap, got {other:?}"),
    }
    assert_eq!(
        map.diagnose_str(),
        "Potential memory issues:\n A(0x00000000..0x0000000a) and B(0x00000005..0x0000000f) overlap in memory"
    );
}

#[test]
fn test_abutting_globals_do_not_overlap()
{
    let map = parse(
        ".bss            0x00000000       0x20
 .bss           0x00000000        0xa a.o
                0x00000000                A
 .bss           0x0000000a        0xa b.o
                0x0000000a                B
",
    );
    assert!(map.diagnose().is_empty());
}

#[test]
fn test_overlap_is_symmetric_and_reported_once()
{
    // B is listed first but starts inside A
    let map = parse(
        ".bss            0x00000000       0x20
 .bss           0x00000005        0xa b.o
                0x00000005                B
 .bss           0x00000000        0xa a.o
                0x00000000                A
",
    );
    let overlaps: Vec<_> = map
        .diagnose()
        .into_iter()
        .filter(|finding| matches!(finding, Finding::Overlap { .. }))
        .collect();
    assert_eq!(overlaps.len(), 1);
}

#[test]
fn test_redefinition_across_modules()
{
    let map = parse(
        ".bss            0x00000100       0x20
 .bss           0x00000100        0x4 first.o
                0x00000100                shared
 .bss           0x00000200        0x4 second.o
                0x00000200                shared
",
    );
    let findings = map.diagnose();

    assert_eq!(findings.len(), 1);
    match findings[0] {
        Finding::Redefinition {
            first_module,
            second_module,
            ..
        } => {
            assert_eq!(first_module.name(), "first.o");
            assert_eq!(second_module.name(), "second.o");
        }
        other => panic!("Expected redefinition, got {other:?}"),
    }
    assert_eq!(findings[0].to_string(), "shared from first.o redefined in second.o");
}

#[test]
fn test_same_name_without_modules_is_not_a_redefinition()
{
    let map = parse(
        ".bss            0x00000100       0x20
                0x00000100                dup
.rodata         0x00000200       0x20
                0x00000200                dup
",
    );
    assert!(map.diagnose().is_empty());
}

#[test]
fn test_global_past_end_of_memory()
{
    let map = parse(
        ".bss            0x00000ff0       0x20
 .bss           0x00000ff0       0x20 edge.o
                0x00000ff0                straddle
",
    );
    let findings = map.diagnose();

    assert_eq!(findings.len(), 1);
    assert!(matches!(
        findings[0],
        Finding::PastMemory { bound: Bound::End, memory, .. } if memory.name() == "RAM"
    ));
    assert_eq!(findings[0].to_string(), "straddle past end of memory RAM");
}

#[test]
fn test_global_past_end_of_module()
{
    let map = parse(
        ".bss            0x00000100       0x40
 .bss           0x00000100       0x10 small.o
                0x00000100                inside
                0x00000120                beyond
",
    );
    // `inside` is stretched up to `beyond` by the backfill, so both spill out
    let findings = map.diagnose();
    let flagged: Vec<&str> = findings
        .iter()
        .map(|finding| match finding {
            Finding::PastModule {
                global,
                module,
                bound: Bound::End,
            } => {
                assert_eq!(module.name(), "small.o");
                global.name()
            }
            other => panic!("Expected module overflow, got {other:?}"),
        })
        .collect();
    assert_eq!(flagged, vec!["inside", "beyond"]);
}

#[test]
fn test_global_before_start_of_module()
{
    let map = parse(
        ".bss            0x00000100       0x40
 .bss           0x00000110       0x10 late.o
                0x00000100                early
",
    );
    let findings = map.diagnose();

    assert_eq!(findings.len(), 1);
    assert!(matches!(findings[0], Finding::PastModule { bound: Bound::Start, .. }));
    assert_eq!(findings[0].to_string(), "early past start of module late.o");
}

#[test]
fn test_global_outside_every_region()
{
    let map = parse(
        ".bss            0x00005000       0x10
 .bss           0x00005000       0x10 far.o
                0x00005000                far_away
",
    );
    let findings = map.diagnose();

    assert_eq!(findings.len(), 1);
    assert!(matches!(findings[0], Finding::OutsideMemory { global } if global.name() == "far_away"));
}

#[test]
fn test_stats()
{
    let map = firmware();
    let stats = map.stats();

    assert_eq!(stats.modules.len(), 4);
    assert_eq!(stats.total_size, 144);
    assert_eq!(stats.modules[0].size, 32);
    assert!((stats.modules[0].percent - 3.1).abs() < 1e-9);
    assert!((stats.modules[1].percent - 18.8).abs() < 1e-9);
    assert!((stats.total_percent - 47.0).abs() < 1e-9);
}

#[test]
fn test_stats_str()
{
    let map = firmware();
    assert_eq!(
        map.stats_str(),
        "build/uart.o 32 (3.1%)
build/main.o 48 (18.8%)
build/uart.o 48 (18.8%)
build/uart.o 16 (6.3%)
---------
TOTAL: 144 (47.0%)"
    );
}

#[test]
fn test_stats_with_unsized_and_unplaced_modules()
{
    let map = parse(
        ".bss            0x00000000       0x20
 .bss           0x00000000 nosize.o
 .bss           0x00005000       0x10 far.o
",
    );
    let stats = map.stats();

    assert_eq!(stats.modules[0].size, 0);
    assert!(stats.modules[0].percent.abs() < f64::EPSILON);
    assert_eq!(stats.modules[1].size, 16);
    assert!(stats.modules[1].percent.abs() < f64::EPSILON);
    assert_eq!(stats.total_size, 16);
}
