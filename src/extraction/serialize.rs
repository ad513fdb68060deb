use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::document::Document;

/// Renders documents in the downstream JSON layout: four-space indent,
/// non-ASCII characters written verbatim.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSerializer {
    indent: &'static [u8],
}

impl Default for DocumentSerializer {
    fn default() -> Self {
        Self { indent: b"    " }
    }
}

impl DocumentSerializer {
    pub fn to_vec(&self, document: &Document) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        document
            .serialize(&mut serializer)
            .context("failed to serialize extracted document")?;
        buffer.push(b'\n');
        Ok(buffer)
    }

    #[cfg(test)]
    pub fn to_string(&self, document: &Document) -> Result<String> {
        let bytes = self.to_vec(document)?;
        String::from_utf8(bytes).context("serialized document is not valid UTF-8")
    }
}
