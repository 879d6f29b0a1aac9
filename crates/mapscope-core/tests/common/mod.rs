//! Sample map reports shared by the integration tests.
#![allow(dead_code)]

use mapscope_core::{MapEntry, MemoryMap};

/// A trimmed GNU ld map for a small Cortex-M firmware.
pub const FIRMWARE_MAP: &str = "\
Archive member included to satisfy reference by file (symbol)

Memory Configuration

Name             Origin             Length             Attributes
FLASH            0x08000000         0x00000400         xr
RAM              0x20000000         0x00000100         xrw
*default*        0x00000000         0xffffffff

Linker script and memory map

LOAD build/main.o
LOAD build/uart.o

.text           0x08000000      0x120
 .text          0x08000000       0x80 build/main.o
                0x08000000                main
 .text          0x08000080       0xa0 build/uart.o
                0x08000080                uart_init

.rodata         0x08000120       0x20
 .rodata        0x08000120       0x20 build/uart.o
                0x08000120                uart_baud_table

.bss            0x20000000       0x74
 .bss           0x20000000       0x30 build/main.o
                0x20000000                tick_count
                0x20000010                rx_buffer
                0x20000020                tx_buffer
 .bss           0x20000030       0x30 build/uart.o
                0x20000030                uart_state
 *fill*         0x20000060        0x4 
 COMMON         0x20000064       0x10 build/uart.o
                0x20000064                uart_errors

.debug_info     0x00000000      0x400
 .debug_info    0x00000000      0x200 build/main.o
                0x00000000                not_a_symbol
";

/// Region table used by the hand-built reports below.
pub const RAM_ONLY_HEADER: &str = "\
Memory Configuration

Name             Origin             Length             Attributes
RAM              0x00000000         0x00001000         xrw

Linker script and memory map

";

/// Build a report from [`RAM_ONLY_HEADER`] and a symbol map body.
pub fn report(body: &str) -> String
{
    format!("{RAM_ONLY_HEADER}{body}")
}

pub fn firmware() -> MemoryMap
{
    MemoryMap::parse(FIRMWARE_MAP).expect("sample firmware map parses")
}

pub fn names<'a>(entries: impl IntoIterator<Item = &'a MapEntry>) -> Vec<&'a str>
{
    entries.into_iter().map(MapEntry::name).collect()
}
