//! Flag-to-language mapping, DeepL client, and translation resolution

pub mod deepl;
pub mod langmap;
pub mod resolver;

pub use deepl::{DeepLClient, DeepLClientConfig, Translation, Translator};
pub use langmap::{flag_identifier, resolve_language};
pub use resolver::{Resolution, Resolver};
