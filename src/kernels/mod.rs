//! Timed kernel variants and their selection.
//!
//! Each kernel is a zero-argument routine that reads the cycle counter,
//! executes a fixed instruction sequence, reads the counter again, and
//! returns the delta. The harness treats them as opaque callables behind
//! [`KernelFn`]; the four known variants differ along two independent
//! axes, renaming pressure and instruction width.

use thiserror::Error;

#[cfg(target_arch = "x86_64")]
pub mod x86_64_avx2;
#[cfg(target_arch = "x86_64")]
pub mod x86_64_scalar;

/// The call contract every timed kernel satisfies.
pub type KernelFn = fn() -> u64;

/// How hard the kernel body leans on the register-rename stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenamePressure {
    /// A serial dependency chain reusing one architectural register.
    Minimal,
    /// The same work spread over repeated fresh register writes.
    Extra,
}

/// Instruction encoding width of the kernel body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstructionWidth {
    /// Scalar `add` chains on general-purpose registers.
    Scalar,
    /// `vpaddd` chains on 256-bit ymm registers.
    #[default]
    Avx2,
}

impl InstructionWidth {
    /// Parse a CLI value ("scalar" or "avx2").
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scalar" => Some(Self::Scalar),
            "avx2" => Some(Self::Avx2),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Avx2 => "avx2",
        }
    }
}

/// A kernel variant could not be provided on this host.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KernelError {
    #[error("AVX2 kernels require a CPU with AVX2 support")]
    Avx2Unavailable,

    #[error("timed kernels are only implemented for x86_64")]
    UnsupportedArch,
}

/// Descriptor for one kernel variant.
pub struct Kernel {
    pub name: &'static str,
    pub description: &'static str,
    pub pressure: RenamePressure,
    pub width: InstructionWidth,
    pub func: KernelFn,
}

/// All kernel variants known on this architecture.
#[cfg(target_arch = "x86_64")]
pub fn variants() -> Vec<Kernel> {
    vec![
        Kernel {
            name: "minimal-scalar",
            description: "Serial add chain on one GP register",
            pressure: RenamePressure::Minimal,
            width: InstructionWidth::Scalar,
            func: x86_64_scalar::minimal_rename,
        },
        Kernel {
            name: "extra-scalar",
            description: "Add chain with fresh GP register writes each step",
            pressure: RenamePressure::Extra,
            width: InstructionWidth::Scalar,
            func: x86_64_scalar::extra_rename,
        },
        Kernel {
            name: "minimal-avx2",
            description: "Serial vpaddd chain on one ymm register",
            pressure: RenamePressure::Minimal,
            width: InstructionWidth::Avx2,
            func: x86_64_avx2::minimal_rename_avx2,
        },
        Kernel {
            name: "extra-avx2",
            description: "vpaddd chain with fresh ymm register writes each step",
            pressure: RenamePressure::Extra,
            width: InstructionWidth::Avx2,
            func: x86_64_avx2::extra_rename_avx2,
        },
    ]
}

#[cfg(not(target_arch = "x86_64"))]
pub fn variants() -> Vec<Kernel> {
    Vec::new()
}

/// The minimal/extra kernel pair for one instruction width.
pub struct KernelSet {
    pub minimal: KernelFn,
    pub extra: KernelFn,
}

impl KernelSet {
    /// Select the kernel pair for `width`, checking host support first.
    ///
    /// The AVX2 pair is only handed out when the running CPU actually
    /// reports AVX2; executing it blind would fault with SIGILL.
    pub fn resolve(width: InstructionWidth) -> Result<Self, KernelError> {
        #[cfg(not(target_arch = "x86_64"))]
        {
            let _ = width;
            Err(KernelError::UnsupportedArch)
        }

        #[cfg(target_arch = "x86_64")]
        {
            if width == InstructionWidth::Avx2 && !std::arch::is_x86_feature_detected!("avx2") {
                return Err(KernelError::Avx2Unavailable);
            }

            let pick = |pressure| {
                variants()
                    .into_iter()
                    .find(|k| k.width == width && k.pressure == pressure)
                    .map(|k| k.func)
                    .ok_or(KernelError::UnsupportedArch)
            };

            Ok(Self {
                minimal: pick(RenamePressure::Minimal)?,
                extra: pick(RenamePressure::Extra)?,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_parses_cli_values() {
        assert_eq!(InstructionWidth::parse("scalar"), Some(InstructionWidth::Scalar));
        assert_eq!(InstructionWidth::parse("avx2"), Some(InstructionWidth::Avx2));
        assert_eq!(InstructionWidth::parse("sse2"), None);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn variant_table_covers_both_axes() {
        let variants = variants();
        assert_eq!(variants.len(), 4);
        for pressure in [RenamePressure::Minimal, RenamePressure::Extra] {
            for width in [InstructionWidth::Scalar, InstructionWidth::Avx2] {
                assert!(
                    variants.iter().any(|k| k.pressure == pressure && k.width == width),
                    "missing variant for {pressure:?}/{width:?}"
                );
            }
        }
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn scalar_set_always_resolves() {
        assert!(KernelSet::resolve(InstructionWidth::Scalar).is_ok());
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn avx2_resolution_matches_host_support() {
        let resolved = KernelSet::resolve(InstructionWidth::Avx2);
        if std::arch::is_x86_feature_detected!("avx2") {
            assert!(resolved.is_ok());
        } else {
            assert_eq!(resolved.err(), Some(KernelError::Avx2Unavailable));
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    #[test]
    fn resolution_fails_off_x86_64() {
        assert_eq!(
            KernelSet::resolve(InstructionWidth::Scalar).err(),
            Some(KernelError::UnsupportedArch)
        );
    }
}
