//! Flat declaration handling

/// Priority marker appended to conditional declarations
const PRIORITY_MARKER: &str = "!important";

/// Ordered `property: value` list.
///
/// Inserting an existing property replaces its value in place, so merging a
/// node's custom declarations over its base style keeps the base order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: Vec<(String, String)>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `property` to `value`, replacing any previous value.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(property, value);
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Apply every declaration of `other` over `self`.
    pub fn merge(&mut self, other: &Declarations) {
        for (property, value) in &other.entries {
            self.insert(property.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as a `style` attribute value: `a: 1; b: 2`
    pub fn to_css(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Parse `property: value; ...` text.
///
/// Each declaration is split on its first `:`. Property names are
/// normalized with [`normalize_property_name`]; declarations with an empty
/// name or value are dropped.
pub fn parse_inline_declarations(text: &str) -> Declarations {
    let mut result = Declarations::new();

    for declaration in text.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            continue;
        }
        result.insert(normalize_property_name(name), value);
    }

    result
}

/// Normalize a property name to the kebab-case used in `style` attributes.
///
/// `fontSize` becomes `font-size`, `FONT-SIZE` becomes `font-size`. Custom
/// properties (`--brand-color`) are case-sensitive and kept verbatim.
pub fn normalize_property_name(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }

    let camel = !name.contains('-') && name.chars().any(|c| c.is_ascii_lowercase());
    if !camel {
        return name.to_ascii_lowercase();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Append `!important` to every declaration that does not already carry it.
///
/// Output is normalized to `a: 1 !important; b: 2 !important`, which makes
/// the operation idempotent.
pub fn add_priority_escalation(text: &str) -> String {
    text.split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .map(|decl| {
            if has_priority(decl) {
                decl.to_string()
            } else {
                format!("{decl} {PRIORITY_MARKER}")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn has_priority(decl: &str) -> bool {
    let len = decl.len();
    len >= PRIORITY_MARKER.len()
        && decl.is_char_boundary(len - PRIORITY_MARKER.len())
        && decl[len - PRIORITY_MARKER.len()..].eq_ignore_ascii_case(PRIORITY_MARKER)
}
