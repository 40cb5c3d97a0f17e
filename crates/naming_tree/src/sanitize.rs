//! Character-class filters applied to schema labels and object names.
//!
//! [`alnum_label`] is used when building prefixes and composite names, [`export_label`]
//! when matching object names against the leaf set. They keep different characters.

use std::sync::LazyLock;

use regex::Regex;

static DISAMBIGUATION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\d{3}").expect("static regex"));

/// Keep ASCII letters and digits only.
pub fn alnum_label(label: &str) -> String {
    label.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Drop CJK unified ideographs and underscores, keep everything else.
pub fn export_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| *c != '_' && !is_cjk_ideograph(*c))
        .collect()
}

fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Name without the `.NNN` suffix a host appends to keep object names unique.
pub fn base_name(name: &str) -> &str {
    match DISAMBIGUATION_SUFFIX.find(name) {
        Some(m) => &name[..m.start()],
        None => name,
    }
}

/// Everything before the first `.`.
pub fn strip_extension_suffix(name: &str) -> &str {
    name.split('.').next().unwrap_or_default()
}
