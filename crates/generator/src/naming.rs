//! Identifier prefixes derived from endpoint paths
//!
//! Endpoints often share trailing placeholders like `{name}`, so prefixes only
//! need to be distinct among the files generated into one directory.

/// Exported and private symbol prefixes for one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePrefixes {
    /// e.g. "Transformation"
    pub exported: String,
    /// e.g. "transformation"
    pub private: String,
}

impl NamePrefixes {
    /// Derive prefixes from the last path segment
    ///
    /// # Examples
    /// ```
    /// use endpoint_codegen_generator::naming::NamePrefixes;
    ///
    /// let prefixes = NamePrefixes::from_path("/transform/{name}");
    /// assert_eq!(prefixes.exported, "Name");
    /// assert_eq!(prefixes.private, "name");
    /// ```
    pub fn from_path(path: &str) -> Self {
        let seed = strip_curly_braces(naming_seed(path)).replace('_', "");
        let private = seed.to_lowercase();
        Self {
            exported: title_case(&private),
            private,
        }
    }
}

/// Last `/`-separated segment, or the whole path when there is only one
fn naming_seed(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Remove `{` and `}` placeholder markers
pub fn strip_curly_braces(s: &str) -> String {
    s.replace(['{', '}'], "")
}

/// Capitalize the first letter of every word
///
/// Letters, digits and underscores continue a word; anything else starts a
/// new one.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}
