//! Nombres de carpeta → identificadores seguros para URL y rutas

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Convierte un nombre en un slug ASCII en minúsculas separado por guiones.
///
/// Ej: "Camión Aljibe K-480" -> "camion-aljibe-k-480"
pub fn slugify(value: &str) -> String {
    lazy_static::lazy_static! {
        static ref DISALLOWED_RE: Regex = Regex::new(r"[^\w\s-]").unwrap();
        static ref SEPARATOR_RE: Regex = Regex::new(r"[-\s]+").unwrap();
    }

    // NFKD separa los acentos; luego se descarta todo lo no-ASCII
    let ascii: String = value.nfkd().filter(|c| c.is_ascii()).collect();
    let cleaned = DISALLOWED_RE.replace_all(&ascii, "");
    let lowered = cleaned.trim().to_lowercase();
    let slug = SEPARATOR_RE.replace_all(&lowered, "-");

    slug.trim_matches('-').to_string()
}

/// Nombre visible de la máquina a partir de la carpeta
pub fn clean_display_name(name: &str) -> String {
    name.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_accents_and_case() {
        assert_eq!(slugify("Camión Aljibe K-480"), "camion-aljibe-k-480");
        assert_eq!(slugify("Excavadora CAT 320"), "excavadora-cat-320");
    }

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("Retro (JCB) 3CX!!"), "retro-jcb-3cx");
        assert_eq!(slugify("Rodillo, compactador / Dynapac"), "rodillo-compactador-dynapac");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Cargador   --  Frontal  "), "cargador-frontal");
        assert_eq!(slugify("-Motoniveladora-"), "motoniveladora");
        assert_eq!(slugify("a _ b"), "a-_-b");
    }

    #[test]
    fn test_slugify_non_latin_dropped() {
        assert_eq!(slugify("Grúa 起重機 50T"), "grua-50t");
        assert_eq!(slugify("ñandú"), "nandu");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_only_safe_chars() {
        for name in ["Camión Aljibe K-480", "  ÁÉÍÓÚ  üñ ", "a--b  c", "Tolva #3 (2019)"] {
            let slug = slugify(name);
            assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
            assert!(!slug.contains("--"), "{}", slug);
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{}", slug);
        }
    }

    #[test]
    fn test_clean_display_name() {
        assert_eq!(clean_display_name("  Excavadora CAT 320 \n"), "Excavadora CAT 320");
    }
}
