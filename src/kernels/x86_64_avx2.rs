//! AVX2 timed kernels (`vpaddd` on 256-bit ymm registers).
//!
//! Same shape as the scalar kernels at vector width: the minimal variant
//! chains `vpaddd` through one ymm accumulator, the extra variant copies
//! the addend into a fresh ymm register before each `vpaddd` so every
//! step forces a vector-register rename.
//!
//! Callers must not execute these on a CPU without AVX2; selection goes
//! through [`KernelSet::resolve`](super::KernelSet::resolve), which checks
//! host support first.

use std::arch::asm;

const CHAIN_ITERS: u32 = 4096;

/// Serial vpaddd chain on one ymm register: minimal renaming pressure.
#[inline(never)]
pub fn minimal_rename_avx2() -> u64 {
    let start: u64;
    let end: u64;
    unsafe {
        asm!(
            "vpxor ymm0, ymm0, ymm0",
            "vpcmpeqd ymm1, ymm1, ymm1",
            "lfence",
            "rdtsc",
            "shl rdx, 32",
            "or rax, rdx",
            "mov {start}, rax",
            "mov {count:e}, {iters}",
            "2:",
            "vpaddd ymm0, ymm0, ymm1",
            "vpaddd ymm0, ymm0, ymm1",
            "vpaddd ymm0, ymm0, ymm1",
            "vpaddd ymm0, ymm0, ymm1",
            "vpaddd ymm0, ymm0, ymm1",
            "vpaddd ymm0, ymm0, ymm1",
            "vpaddd ymm0, ymm0, ymm1",
            "vpaddd ymm0, ymm0, ymm1",
            "sub {count:e}, 1",
            "jnz 2b",
            "lfence",
            "rdtsc",
            "shl rdx, 32",
            "or rax, rdx",
            "vzeroupper",
            start = out(reg) start,
            count = out(reg) _,
            iters = const CHAIN_ITERS,
            out("rax") end,
            out("rdx") _,
            out("ymm0") _,
            out("ymm1") _,
            options(nostack, nomem),
        );
    }
    end.saturating_sub(start)
}

/// vpaddd chain with a fresh ymm write before every add: extra renaming
/// pressure in the vector register file.
#[inline(never)]
pub fn extra_rename_avx2() -> u64 {
    let start: u64;
    let end: u64;
    unsafe {
        asm!(
            "vpxor ymm0, ymm0, ymm0",
            "vpcmpeqd ymm1, ymm1, ymm1",
            "lfence",
            "rdtsc",
            "shl rdx, 32",
            "or rax, rdx",
            "mov {start}, rax",
            "mov {count:e}, {iters}",
            "2:",
            "vmovdqa ymm2, ymm1",
            "vpaddd ymm0, ymm0, ymm2",
            "vmovdqa ymm3, ymm1",
            "vpaddd ymm0, ymm0, ymm3",
            "vmovdqa ymm2, ymm1",
            "vpaddd ymm0, ymm0, ymm2",
            "vmovdqa ymm3, ymm1",
            "vpaddd ymm0, ymm0, ymm3",
            "vmovdqa ymm2, ymm1",
            "vpaddd ymm0, ymm0, ymm2",
            "vmovdqa ymm3, ymm1",
            "vpaddd ymm0, ymm0, ymm3",
            "vmovdqa ymm2, ymm1",
            "vpaddd ymm0, ymm0, ymm2",
            "vmovdqa ymm3, ymm1",
            "vpaddd ymm0, ymm0, ymm3",
            "sub {count:e}, 1",
            "jnz 2b",
            "lfence",
            "rdtsc",
            "shl rdx, 32",
            "or rax, rdx",
            "vzeroupper",
            start = out(reg) start,
            count = out(reg) _,
            iters = const CHAIN_ITERS,
            out("rax") end,
            out("rdx") _,
            out("ymm0") _,
            out("ymm1") _,
            out("ymm2") _,
            out("ymm3") _,
            options(nostack, nomem),
        );
    }
    end.saturating_sub(start)
}
