//! Shared bring-up code for the e-paper link binaries
//!
//! - Board pin assignment
//! - Heap for TOML parsing
//! - Embedded link configuration

#![no_std]

extern crate alloc;

pub mod board;
pub mod config;

use embedded_alloc::LlffHeap as Heap;

// Heap allocator for TOML parsing
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 8KB, enough for the link.toml document tree
const HEAP_SIZE: usize = 8 * 1024;

/// Initialize the heap allocator
///
/// Must be called once, before [`config::load`].
pub fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}

/// Idle forever after a fatal bring-up error
pub async fn park() -> ! {
    loop {
        embassy_time::Timer::after_secs(60).await;
        defmt::trace!("Parked");
    }
}
