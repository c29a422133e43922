//! Compute device selection and availability checks.
//!
//! The device is an explicit parameter resolved when the caller asks for it,
//! never a global probed at load time. This build carries no accelerator
//! backend, so `Cuda` is recognized but unavailable; transfers targeting it
//! fail with [`PracticarError::DeviceUnavailable`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PracticarError, Result};

/// A compute device a model or batch can be placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Device {
    /// Host CPU. Always available.
    Cpu,
    /// CUDA accelerator. Requires an accelerator backend in the build.
    Cuda,
}

impl Device {
    /// Pick the best available device: the accelerator when reachable,
    /// otherwise the CPU. Resolved at call time.
    pub fn detect() -> Self {
        if Device::Cuda.is_available() {
            Device::Cuda
        } else {
            Device::Cpu
        }
    }

    /// Whether this device can actually be used by the current build.
    pub fn is_available(self) -> bool {
        matches!(self, Device::Cpu)
    }

    /// Validate that this device is usable, for transfer primitives.
    pub fn ensure_available(self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(PracticarError::DeviceUnavailable { device: self })
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda => write!(f, "cuda"),
        }
    }
}
