//! Body codecs for the supported fixture formats.

mod json;
mod xml;

use apitest_application::CodecRegistry;

pub use json::{JsonCodec, to_json_stable_bytes};
pub use xml::{ATTRIBUTES_KEY, TEXT_KEY, XmlCodec};

/// A registry with the JSON and XML codecs.
#[must_use]
pub fn default_registry() -> CodecRegistry {
    CodecRegistry::new()
        .with_codec(JsonCodec::new())
        .with_codec(XmlCodec::new())
}
