//! USB VID/PID to board identity catalog

use serde::{Deserialize, Serialize};

/// One known USB identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub vid: u16,
    /// `None` matches any product of the vendor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u16>,
    pub name: String,
    /// `None` for boards whose platform core is not installed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqbn: Option<String>,
}

impl CatalogEntry {
    pub fn new(vid: u16, pid: Option<u16>, name: &str, fqbn: Option<&str>) -> Self {
        Self {
            vid,
            pid,
            name: name.to_string(),
            fqbn: fqbn.map(str::to_string),
        }
    }
}

/// Maps USB identifiers to board names and FQBNs
#[derive(Debug, Clone, Default)]
pub struct BoardCatalog {
    entries: Vec<CatalogEntry>,
}

impl BoardCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog with the built-in boards
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    /// Built-in boards plus `extra`; extra entries take precedence
    pub fn with_extra(extra: &[CatalogEntry]) -> Self {
        let mut entries = extra.to_vec();
        entries.extend(builtin_entries());
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a VID/PID pair, preferring an exact product match
    pub fn lookup(&self, vid: u16, pid: u16) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.vid == vid && entry.pid == Some(pid))
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|entry| entry.vid == vid && entry.pid.is_none())
            })
    }
}

fn builtin_entries() -> Vec<CatalogEntry> {
    vec![
        // Arduino SA / Arduino LLC
        CatalogEntry::new(0x2341, Some(0x0043), "Arduino Uno", Some("arduino:avr:uno")),
        CatalogEntry::new(0x2341, Some(0x0001), "Arduino Uno", Some("arduino:avr:uno")),
        CatalogEntry::new(0x2341, Some(0x0243), "Arduino Uno", Some("arduino:avr:uno")),
        CatalogEntry::new(0x2341, Some(0x0010), "Arduino Mega or Mega 2560", Some("arduino:avr:mega")),
        CatalogEntry::new(0x2341, Some(0x0042), "Arduino Mega or Mega 2560", Some("arduino:avr:mega")),
        CatalogEntry::new(0x2341, Some(0x0036), "Arduino Leonardo", Some("arduino:avr:leonardo")),
        CatalogEntry::new(0x2341, Some(0x8036), "Arduino Leonardo", Some("arduino:avr:leonardo")),
        CatalogEntry::new(0x2341, Some(0x0037), "Arduino Micro", Some("arduino:avr:micro")),
        CatalogEntry::new(0x2341, Some(0x8037), "Arduino Micro", Some("arduino:avr:micro")),
        CatalogEntry::new(0x2341, Some(0x0058), "Arduino Nano Every", Some("arduino:megaavr:nona4809")),
        CatalogEntry::new(0x2341, Some(0x004E), "Arduino MKR1000", Some("arduino:samd:mkr1000")),
        CatalogEntry::new(0x2341, Some(0x804E), "Arduino MKR1000", Some("arduino:samd:mkr1000")),
        CatalogEntry::new(0x2341, Some(0x8054), "Arduino MKR WiFi 1010", Some("arduino:samd:mkrwifi1010")),
        CatalogEntry::new(0x2341, Some(0x804D), "Arduino Zero (Native USB Port)", Some("arduino:samd:arduino_zero_native")),
        CatalogEntry::new(0x2341, Some(0x8057), "Arduino NANO 33 IoT", Some("arduino:samd:nano_33_iot")),
        CatalogEntry::new(0x2341, None, "Arduino", None),
        // Espressif native USB-JTAG/serial
        CatalogEntry::new(0x303A, Some(0x1001), "ESP32S3 Dev Module", Some("esp32:esp32:esp32s3")),
        // Generic USB-serial bridges found on clones
        CatalogEntry::new(0x1A86, None, "USB-SERIAL CH340", None),
        CatalogEntry::new(0x10C4, Some(0xEA60), "CP210x UART Bridge", None),
        CatalogEntry::new(0x0403, None, "FTDI USB Serial", None),
    ]
}
