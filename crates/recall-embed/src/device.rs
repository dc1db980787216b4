use candle_core::Device;

pub fn select_device() -> Device {
    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(dev) => { tracing::info!("embedding device: Metal (MPS)"); return dev; }
            Err(e) => tracing::warn!("Metal unavailable ({e}); using CPU"),
        }
    }
    tracing::info!("embedding device: CPU");
    Device::Cpu
}
