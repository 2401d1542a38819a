//! Project-specific utilities live here.

pub mod openapi;

/// Compares two strings after plain Unicode lowercasing.
///
/// No locale rules and no normalization: "Straße" does not match "STRASSE".
pub fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_across_case() {
        assert!(eq_ignore_case("Chinua Achebe", "chinua achebe"));
        assert!(eq_ignore_case("HONORÉ DE BALZAC", "Honoré de Balzac"));
    }

    #[test]
    fn is_exact_otherwise() {
        assert!(!eq_ignore_case("Chinua Achebe", "Chinua"));
        assert!(!eq_ignore_case("Chinua Achebe ", "Chinua Achebe"));
        assert!(!eq_ignore_case("Straße", "STRASSE"));
    }
}
