//! framctl-sim - In-memory FRAM emulator for testing
//!
//! This crate provides a simulated FRAM that implements
//! [`FramDevice`](framctl_core::FramDevice), optionally backed by an image
//! file so contents survive between runs the way a real non-volatile part
//! would. It also carries the glue needed to run the `no_std` controller over
//! std streams.

pub mod error;
pub mod stdio;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use framctl_core::{Error, FramDevice, Result, DEFAULT_CAPACITY};

pub use error::SimError;
pub use stdio::{StdReader, StdWriter};

/// Configuration for the simulated FRAM
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Size in bytes
    pub capacity: u32,
    /// Whether `init` succeeds
    pub present: bool,
    /// Honour `delay_ms` with real sleeps
    pub realtime: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            present: true,
            realtime: false,
        }
    }
}

impl SimConfig {
    /// Largest capacity whose addresses fit the four-digit export format
    pub const MAX_CAPACITY: u32 = 0x1_0000;

    /// Check that the capacity is usable
    pub fn validate(&self) -> std::result::Result<(), SimError> {
        if self.capacity == 0 || self.capacity > Self::MAX_CAPACITY {
            return Err(SimError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

/// Simulated FRAM
///
/// Fresh devices read as all zeros. Fault injection hooks make specific
/// addresses ignore writes ([`stick`](Self::stick)) or fail outright
/// ([`break_at`](Self::break_at)).
pub struct SimFram {
    config: SimConfig,
    data: Vec<u8>,
    image: Option<PathBuf>,
    stuck: BTreeSet<u32>,
    broken: BTreeSet<u32>,
    reads: u64,
    writes: u64,
}

impl SimFram {
    /// Create a zeroed device
    pub fn new(config: SimConfig) -> Self {
        let data = vec![0x00; config.capacity as usize];
        Self {
            config,
            data,
            image: None,
            stuck: BTreeSet::new(),
            broken: BTreeSet::new(),
            reads: 0,
            writes: 0,
        }
    }

    /// Create a device with the default configuration (32 KiB)
    pub fn new_default() -> Self {
        Self::new(SimConfig::default())
    }

    /// Create a device with pre-filled data
    pub fn with_data(config: SimConfig, initial_data: &[u8]) -> Self {
        let mut fram = Self::new(config);
        let len = initial_data.len().min(fram.data.len());
        fram.data[..len].copy_from_slice(&initial_data[..len]);
        fram
    }

    /// Create a device backed by an image file
    ///
    /// An existing image is loaded (truncated or zero-padded to the
    /// capacity); a missing one starts zeroed and is created on the first
    /// [`save`](Self::save).
    pub fn open_image(
        config: SimConfig,
        path: impl AsRef<Path>,
    ) -> std::result::Result<Self, SimError> {
        let path = path.as_ref();
        let mut fram = match fs::read(path) {
            Ok(contents) => {
                if contents.len() != config.capacity as usize {
                    log::warn!(
                        "image {} is {} bytes, device is {}; resizing",
                        path.display(),
                        contents.len(),
                        config.capacity
                    );
                }
                log::info!("Loaded FRAM image from {}", path.display());
                Self::with_data(config, &contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No image at {}, starting blank", path.display());
                Self::new(config)
            }
            Err(source) => {
                return Err(SimError::Image {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        fram.image = Some(path.to_path_buf());
        Ok(fram)
    }

    /// Persist contents to the backing image, if any
    pub fn save(&self) -> std::result::Result<(), SimError> {
        if let Some(path) = &self.image {
            fs::write(path, &self.data).map_err(|source| SimError::Image {
                path: path.clone(),
                source,
            })?;
            log::debug!("Saved FRAM image to {}", path.display());
        }
        Ok(())
    }

    /// Make writes to `addr` silently ineffective
    pub fn stick(&mut self, addr: u32) {
        self.stuck.insert(addr);
    }

    /// Make every access to `addr` fail
    pub fn break_at(&mut self, addr: u32) {
        self.broken.insert(addr);
    }

    /// Get a reference to the memory contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of byte reads performed
    pub fn reads(&self) -> u64 {
        self.reads
    }

    /// Number of byte writes performed
    pub fn writes(&self) -> u64 {
        self.writes
    }

    fn index(&self, addr: u32) -> Result<usize> {
        if self.broken.contains(&addr) {
            return Err(Error::DeviceIo { addr });
        }
        if addr >= self.config.capacity {
            return Err(Error::AddressOutOfBounds { addr });
        }
        Ok(addr as usize)
    }
}

impl FramDevice for SimFram {
    fn capacity(&self) -> u32 {
        self.config.capacity
    }

    fn init(&mut self) -> Result<()> {
        if self.config.present {
            Ok(())
        } else {
            Err(Error::DeviceNotFound)
        }
    }

    fn read_byte(&mut self, addr: u32) -> Result<u8> {
        let idx = self.index(addr)?;
        self.reads += 1;
        Ok(self.data[idx])
    }

    fn write_byte(&mut self, addr: u32, value: u8) -> Result<()> {
        let idx = self.index(addr)?;
        self.writes += 1;
        if !self.stuck.contains(&addr) {
            self.data[idx] = value;
        }
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        if self.config.realtime {
            std::thread::sleep(Duration::from_millis(u64::from(ms)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framctl_core::{Controller, Outcome};

    fn small() -> SimConfig {
        SimConfig {
            capacity: 1024,
            ..SimConfig::default()
        }
    }

    fn run(fram: &mut SimFram, line: &str) -> (Outcome, String) {
        let mut c = Controller::with_state(fram, StdWriter::new(Vec::new()), true);
        let outcome = c.handle_line(line.as_bytes()).unwrap();
        let (_, out) = c.into_parts();
        (outcome, String::from_utf8(out.into_inner()).unwrap())
    }

    #[test]
    fn test_out_of_bounds() {
        let mut fram = SimFram::new(small());
        assert_eq!(
            fram.read_byte(1024),
            Err(Error::AddressOutOfBounds { addr: 1024 })
        );
        assert_eq!(fram.write_byte(1023, 1), Ok(()));
    }

    #[test]
    fn test_validate_capacity() {
        assert!(small().validate().is_ok());
        for capacity in [0, 0x1_0001] {
            let config = SimConfig {
                capacity,
                ..SimConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(SimError::InvalidCapacity(c)) if c == capacity
            ));
        }
    }

    #[test]
    fn test_absent_device() {
        let mut fram = SimFram::new(SimConfig {
            present: false,
            ..small()
        });
        assert_eq!(fram.init(), Err(Error::DeviceNotFound));
    }

    #[test]
    fn test_write_then_read_full_capacity() {
        let mut fram = SimFram::new(small());
        let (outcome, _) = run(&mut fram, "WRITE:The quick brown fox");
        assert_eq!(outcome, Outcome::Completed);
        let (_, out) = run(&mut fram, "READ:1024");
        assert_eq!(out, "DATA: The quick brown fox\nREAD: Completed reading.\n");
        assert_eq!(fram.data()[19], 0);
    }

    #[test]
    fn test_write_stops_at_embedded_zero_on_read() {
        let mut fram = SimFram::new(small());
        run(&mut fram, "WRITE:ab\0cd");
        let (_, out) = run(&mut fram, "READ:1024");
        assert_eq!(out, "DATA: ab\nREAD: Completed reading.\n");
        assert_eq!(&fram.data()[..6], b"ab\0cd\0");
    }

    #[test]
    fn test_erase_after_write_reads_empty() {
        let mut fram = SimFram::with_data(small(), b"stale");
        run(&mut fram, "ERASE");
        for n in [1, 5, 1024] {
            let (_, out) = run(&mut fram, &format!("READ:{}", n));
            assert_eq!(out, "DATA: \nREAD: Memory is empty.\n");
        }
    }

    #[test]
    fn test_stuck_sample_aborts_write() {
        let mut fram = SimFram::new(small());
        fram.stick(100);
        let payload = format!("WRITE:{}", "z".repeat(150));
        let (outcome, out) = run(&mut fram, &payload);
        assert_eq!(outcome, Outcome::Aborted { position: 100 });
        assert_eq!(out, "ERROR: Write verification failed at position 100\n");
    }

    #[test]
    fn test_image_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fram.bin");

        let mut fram = SimFram::open_image(small(), &path).unwrap();
        assert!(fram.data().iter().all(|&b| b == 0));
        run(&mut fram, "WRITE:persist me");
        fram.save().unwrap();

        let mut reopened = SimFram::open_image(small(), &path).unwrap();
        let (_, out) = run(&mut reopened, "READ:100");
        assert_eq!(out, "DATA: persist me\nREAD: Completed reading.\n");
    }

    #[test]
    fn test_image_is_resized_to_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.bin");
        std::fs::write(&path, b"abc").unwrap();

        let fram = SimFram::open_image(small(), &path).unwrap();
        assert_eq!(fram.data().len(), 1024);
        assert_eq!(&fram.data()[..4], b"abc\0");
    }
}
