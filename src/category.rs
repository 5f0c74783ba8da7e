//! Categoría de la máquina inferida por palabras clave del nombre

/// Categoría por defecto cuando ninguna regla coincide
pub const DEFAULT_CATEGORY: &str = "Maquinaria";

/// Reglas en orden de prioridad: la primera que coincide gana
const CATEGORY_RULES: &[(&[&str], &str)] = &[
    (&["excavadora"], "Excavadora"),
    (&["retro"], "Retroexcavadora"),
    (&["cargador"], "Cargador Frontal"),
    (&["aljibe"], "Camión Aljibe"),
    (&["camion", "camión"], "Camión Tolva/Pluma"),
    (&["rodillo", "compactador"], "Compactación"),
    (&["motoconformadora", "moto"], "Motoniveladora"),
];

pub fn category_for(name: &str) -> &'static str {
    let lower = name.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_categories() {
        assert_eq!(category_for("Excavadora CAT 320"), "Excavadora");
        assert_eq!(category_for("Retro JCB 3CX"), "Retroexcavadora");
        assert_eq!(category_for("Cargador Frontal Volvo"), "Cargador Frontal");
        assert_eq!(category_for("Rodillo Dynapac"), "Compactación");
        assert_eq!(category_for("Motoconformadora 140K"), "Motoniveladora");
    }

    #[test]
    fn test_first_match_wins() {
        // "retroexcavadora" contiene "excavadora", que va primero
        assert_eq!(category_for("Retroexcavadora 420F"), "Excavadora");
        // "aljibe" se revisa antes que "camión"
        assert_eq!(category_for("Camión Aljibe K-480"), "Camión Aljibe");
        assert_eq!(category_for("CAMIÓN Tolva"), "Camión Tolva/Pluma");
        assert_eq!(category_for("camion pluma"), "Camión Tolva/Pluma");
    }

    #[test]
    fn test_default_category() {
        assert_eq!(category_for("Grúa Horquilla"), DEFAULT_CATEGORY);
        assert_eq!(category_for(""), DEFAULT_CATEGORY);
    }
}
