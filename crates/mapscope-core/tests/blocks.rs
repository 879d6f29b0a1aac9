//! Tests for cross-referencing globals against image bytes

mod common;

use common::firmware;
use mapscope_core::blocks::{ByteSource, DataBlock, DataBlocks};
use mapscope_core::{Address, MapError};

fn ram_image() -> DataBlock
{
    DataBlock::new(Address::new(0x2000_0000), (0u8..0x40).collect::<Vec<_>>())
}

#[test]
fn test_block_lookup()
{
    let block = ram_image();
    assert_eq!(block.len(), 0x40);
    assert_eq!(block.end(), Address::new(0x2000_0040));
    assert_eq!(block.lookup(Address::new(0x2000_003e)), Some(&[0x3e, 0x3f][..]));
    assert_eq!(block.lookup(Address::new(0x2000_0040)), None);
    assert_eq!(block.lookup(Address::new(0x1fff_ffff)), None);
}

#[test]
fn test_blocks_first_match_wins()
{
    let blocks: DataBlocks = vec![
        DataBlock::new(Address::new(0x0800_0000), vec![0xaa; 4]),
        ram_image(),
        DataBlock::new(Address::new(0x2000_0000), vec![0xff; 4]),
    ]
    .into_iter()
    .collect();

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks.lookup(Address::new(0x2000_0001)).map(|b| b[0]), Some(1));
    assert_eq!(blocks.lookup(Address::new(0x0800_0002)), Some(&[0xaa, 0xaa][..]));
    assert_eq!(blocks.lookup(Address::new(0x3000_0000)), None);
}

#[test]
fn test_global_bytes_truncated_to_size()
{
    let map = firmware();
    let image = ram_image();

    let rx = map.global("rx_buffer").unwrap();
    let bytes = map.global_bytes(rx, &image).unwrap().unwrap();
    assert_eq!(bytes, (0x10u8..0x1f).collect::<Vec<_>>().as_slice());

    let state = map.global("uart_state").unwrap();
    let bytes = map.global_bytes(state, &image).unwrap().unwrap();
    assert_eq!(bytes.len(), 0x10, "block ends before the global does");
}

#[test]
fn test_global_bytes_without_coverage()
{
    let map = firmware();
    let table = map.global("uart_baud_table").unwrap();

    let source: &dyn ByteSource = &ram_image();
    assert_eq!(map.global_bytes(table, source).unwrap(), None);
}

#[test]
fn test_global_bytes_needs_resolved_size()
{
    let map = mapscope_core::MemoryMap::parse(&common::report(
        ".bss            0x20000000       0x10
                0x20000000                unbounded
",
    ))
    .unwrap();
    let entry = map.global("unbounded").unwrap();
    let image = ram_image();
    let result = map.global_bytes(entry, &image);
    assert!(matches!(result, Err(MapError::InvariantViolation(_))));
}

#[test]
fn test_block_display()
{
    let block = DataBlock::new(Address::new(0x100), vec![0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(block.to_string(), "0x00000100: de ad be ef");
}
