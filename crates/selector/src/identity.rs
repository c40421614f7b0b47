use context_protocol::{ContextItem, ContextItemSource};
use sha2::{Digest, Sha256};

/// Key under which items describe the same resource.
///
/// `unified` items are keyed by title, everything else by display path.
/// `terminal` and `uri` items also carry a digest of their content, since
/// the same URI can hold different output each time.
pub fn item_key(item: &ContextItem) -> String {
    let base = if item.is_from(ContextItemSource::Unified) {
        item.title.clone().unwrap_or_else(|| item.display_path())
    } else {
        item.display_path()
    };
    match item.source {
        Some(source) if source.has_ephemeral_content() => {
            let content = item.content.as_deref().unwrap_or_default();
            format!("{base}#{}", sha256_hex(content.as_bytes()))
        }
        _ => base,
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
