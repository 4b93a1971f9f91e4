//! Compute device selection

use candle_core::Device;
use tracing::{debug, warn};

/// Pick CUDA device 0 when requested and available, CPU otherwise.
///
/// Without the `cuda` feature `cuda_if_available` always yields the CPU.
pub fn select_device(prefer_gpu: bool) -> Device {
    if !prefer_gpu {
        debug!("GPU disabled by configuration");
        return Device::Cpu;
    }
    match Device::cuda_if_available(0) {
        Ok(device) => device,
        Err(e) => {
            warn!("CUDA device unavailable, falling back to CPU: {}", e);
            Device::Cpu
        }
    }
}

pub fn device_label(device: &Device) -> &'static str {
    if device.is_cuda() {
        "CUDA"
    } else if device.is_metal() {
        "Metal"
    } else {
        "CPU"
    }
}
