//! Tests for comparing two memory maps

mod common;

use common::{firmware, report};
use mapscope_core::diff::{Difference, DifferenceKind};
use mapscope_core::MemoryMap;
use pretty_assertions::assert_eq;

fn left() -> MemoryMap
{
    MemoryMap::parse(&report(
        ".bss            0x00000100       0x4
 .bss           0x00000100        0x4 app.o
                0x00000100                x
",
    ))
    .unwrap()
}

fn right() -> MemoryMap
{
    MemoryMap::parse(&report(
        ".bss            0x00000104       0x4
 .bss           0x00000104        0x4 app.o
                0x00000104                x
 .bss           0x00000200        0x8 new.o
                0x00000200                y
",
    ))
    .unwrap()
}

#[test]
fn test_identical_maps_have_no_differences()
{
    let map = firmware();
    assert!(map.differences(&firmware()).is_empty());
    assert_eq!(map.differences_str(&map), "Differences:");
}

#[test]
fn test_moved_and_added_globals()
{
    let (left, right) = (left(), right());
    let differences = left.differences(&right);

    let x_left = left.global("x").unwrap();
    let x_right = right.global("x").unwrap();
    let y = right.global("y").unwrap();
    assert_eq!(
        differences,
        vec![
            Difference {
                kind: DifferenceKind::LocationDifferent,
                left: Some(x_left),
                right: Some(x_right),
            },
            Difference {
                kind: DifferenceKind::OnlyRight,
                left: None,
                right: Some(y),
            },
        ]
    );
}

#[test]
fn test_removed_globals_come_last()
{
    let (left, right) = (left(), right());
    let differences = right.differences(&left);

    let kinds: Vec<_> = differences.iter().map(|d| (d.kind, d.name())).collect();
    assert_eq!(
        kinds,
        vec![(DifferenceKind::LocationDifferent, "x"), (DifferenceKind::OnlyLeft, "y")]
    );
    assert!(differences[1].right.is_none());
}

#[test]
fn test_location_and_size_both_reported()
{
    let old = MemoryMap::parse(&report(
        ".bss            0x00000000       0x20
 .bss           0x00000000       0x10 a.o
                0x00000000                buf
",
    ))
    .unwrap();
    let new = MemoryMap::parse(&report(
        ".bss            0x00000000       0x20
 .bss           0x00000008       0x18 a.o
                0x00000008                buf
",
    ))
    .unwrap();

    let kinds: Vec<_> = old.differences(&new).iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DifferenceKind::LocationDifferent, DifferenceKind::SizeDifferent]);
    assert_eq!(
        old.differences_str(&new),
        "Differences:
 buf Location different (0x00000000 != 0x00000008)
 buf Size different (16 != 24)"
    );
}

#[test]
fn test_differences_str_for_added_and_removed()
{
    let (left, right) = (left(), right());
    assert_eq!(
        left.differences_str(&right),
        "Differences:
 x Location different (0x00000100 != 0x00000104)
 y Only right"
    );
    assert_eq!(
        right.differences_str(&left),
        "Differences:
 x Location different (0x00000104 != 0x00000100)
 y Only left"
    );
}

#[test]
fn test_unknown_sizes_compare_and_render()
{
    let sized = left();
    let unsized_map = MemoryMap::parse(&report(
        ".bss            0x00000100       0x4
                0x00000100                x
",
    ))
    .unwrap();

    let differences = sized.differences(&unsized_map);
    assert_eq!(differences.len(), 1);
    assert_eq!(differences[0].kind, DifferenceKind::SizeDifferent);
    assert_eq!(differences[0].to_string(), "x Size different (4 != unknown)");
}
