//! Test data builders for synthetic project files

/// Builds a byte buffer that looks enough like a `.cpr` file for detection.
///
/// Labels are embedded between runs of binary filler, the way Cubase stores
/// plugin names inside its chunks.
#[derive(Default)]
pub struct ProjectBufferBuilder {
    bytes: Vec<u8>,
}

impl ProjectBufferBuilder {
    pub fn new() -> Self {
        // The header ends in a non-word byte so the first label stands on its own
        Self {
            bytes: b"RIFF\x00\x00\x10\x00NUNDROOT\x00".to_vec(),
        }
    }

    /// Binary filler with no letters or digits
    pub fn filler(mut self) -> Self {
        self.bytes.extend_from_slice(&[0x00, 0x01, 0xff, 0xfe, 0x00, 0x7f, 0x00]);
        self
    }

    /// A raw label, e.g. `Serum 01`
    pub fn label(mut self, label: &str) -> Self {
        self.bytes.extend_from_slice(label.as_bytes());
        self.filler()
    }

    /// A generic plugin marker followed by `value`
    pub fn plugin_marker(mut self, value: &str) -> Self {
        self.bytes.extend_from_slice(b"Plugin Name");
        self.bytes.push(0x00);
        self.bytes.extend_from_slice(value.as_bytes());
        self.bytes.push(b'\n');
        self.filler()
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
