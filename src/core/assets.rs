//! Embedded reference documents.
//!
//! The entry template, the schema reference, and the contribution policy
//! are baked into the binary so `lore docs` and `lore new` work without
//! any external files.

/// Macro to embed reference documents at compile time as text.
///
/// Generates:
/// - Public constants for each embedded document
/// - `get_embedded_doc(name)` function for lookup
/// - `list_docs()` function for discovery
macro_rules! embedded_docs {
    ($($path:expr => $const_name:ident),* $(,)?) => {
        $(
            pub const $const_name: &str =
                include_str!(concat!("../../assets/", $path));
        )*

        pub fn get_embedded_doc(name: &str) -> Option<&'static str> {
            match name {
                $( $path => Some($const_name), )*
                _ => None,
            }
        }

        pub fn list_docs() -> Vec<&'static str> {
            vec![ $( $path, )* ]
        }
    };
}

embedded_docs! {
    "docs/SCHEMA.md" => EMBEDDED_SCHEMA,
    "docs/CONTRIBUTING.md" => EMBEDDED_CONTRIBUTING,
    "templates/experience.yaml" => EMBEDDED_ENTRY_TEMPLATE,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_listing() {
        for name in list_docs() {
            assert!(get_embedded_doc(name).is_some(), "missing doc: {}", name);
        }
        assert!(get_embedded_doc("docs/NOPE.md").is_none());
    }

    #[test]
    fn template_carries_every_placeholder() {
        for placeholder in ["{{id}}", "{{title}}", "{{category}}", "{{date}}"] {
            assert!(
                EMBEDDED_ENTRY_TEMPLATE.contains(placeholder),
                "template lost {}",
                placeholder
            );
        }
    }
}
