//! Sysfs adapter: implements [`HardwarePort`] over the driver's control
//! files.
//!
//! Each control point is opened once at construction and kept open.  A
//! point that cannot be opened is recorded as unavailable: capability
//! checks report it missing and every access returns
//! [`ChannelError::Unavailable`].  Write-only attributes are opened
//! write-only when read+write is refused.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{error, info, trace};

use crate::app::ports::{ChannelError, ControlPoint, HardwarePort};
use crate::config::VibratorConfig;

pub struct SysfsHardware {
    channels: BTreeMap<ControlPoint, File>,
}

impl SysfsHardware {
    /// Open every control point named in `config`.  Never fails.
    pub fn open(config: &VibratorConfig) -> Self {
        let mut channels = BTreeMap::new();
        for point in ControlPoint::ALL {
            let path = config.path(point);
            match open_channel(path) {
                Ok(file) => {
                    channels.insert(point, file);
                }
                Err(e) => error!("Failed to open {}:{} ({})", point, path.display(), e),
            }
        }
        info!(
            "SysfsHardware: {}/{} control points available",
            channels.len(),
            ControlPoint::ALL.len()
        );
        Self { channels }
    }

    fn channel(&mut self, point: ControlPoint) -> Result<&mut File, ChannelError> {
        self.channels
            .get_mut(&point)
            .ok_or(ChannelError::Unavailable(point))
    }
}

fn open_channel(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .or_else(|_| OpenOptions::new().write(true).open(path))
}

impl HardwarePort for SysfsHardware {
    fn has(&self, point: ControlPoint) -> bool {
        self.channels.contains_key(&point)
    }

    fn write(&mut self, point: ControlPoint, value: &str) -> Result<(), ChannelError> {
        let file = self.channel(point)?;
        let io = |e: std::io::Error| ChannelError::Io(point, e.kind());
        file.seek(SeekFrom::Start(0)).map_err(io)?;
        // Regular files (tests, bench setups) need truncating; sysfs
        // attributes ignore it.
        if let Err(e) = file.set_len(0) {
            trace!("SysfsHardware: {} not truncated ({})", point, e);
        }
        file.write_all(format!("{value}\n").as_bytes()).map_err(io)?;
        file.flush().map_err(io)
    }

    fn read(&mut self, point: ControlPoint) -> Result<String, ChannelError> {
        let file = self.channel(point)?;
        let io = |e: std::io::Error| ChannelError::Io(point, e.kind());
        file.seek(SeekFrom::Start(0)).map_err(io)?;
        let mut out = String::new();
        file.read_to_string(&mut out).map_err(io)?;
        Ok(out)
    }
}
