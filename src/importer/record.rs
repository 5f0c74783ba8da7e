use crate::category::category_for;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CAPACITY_PLACEHOLDER: &str = "Potencia / Capacidad (Editar)";
pub const DESCRIPTION_PLACEHOLDER: &str = "Descripción generada automáticamente. Editar.";

/// Registro de una máquina tal como lo consume el catálogo del front-end.
///
/// El orden de los campos es el orden en que se escriben en `machines.js`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineRecord {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub capacity: String,
    pub description: String,
    pub image: String,
    pub gallery: Vec<String>,
    pub features: Vec<String>,
    pub specs: BTreeMap<String, String>,
}

impl MachineRecord {
    /// Arma el registro con textos de relleno editables.
    ///
    /// La primera imagen es la principal; la galería las incluye todas.
    /// Sin imágenes no hay registro.
    pub fn from_images(id: u64, name: &str, gallery: Vec<String>) -> Option<Self> {
        let image = gallery.first()?.clone();

        Some(Self {
            id,
            name: name.to_string(),
            category: category_for(name).to_string(),
            capacity: CAPACITY_PLACEHOLDER.into(),
            description: DESCRIPTION_PLACEHOLDER.into(),
            image,
            gallery,
            features: vec!["Característica 1".into(), "Característica 2".into()],
            specs: BTreeMap::from([("Dato".to_string(), "Valor".to_string())]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_images() {
        let gallery = vec![
            "/machinery/excavadora-cat-320/image-1.webp".to_string(),
            "/machinery/excavadora-cat-320/image-2.webp".to_string(),
        ];
        let record = MachineRecord::from_images(21, "Excavadora CAT 320", gallery.clone()).unwrap();

        assert_eq!(record.id, 21);
        assert_eq!(record.category, "Excavadora");
        assert_eq!(record.image, gallery[0]);
        assert_eq!(record.gallery, gallery);
        assert_eq!(record.features.len(), 2);
        assert_eq!(record.specs.get("Dato").map(String::as_str), Some("Valor"));
    }

    #[test]
    fn test_no_images_no_record() {
        assert!(MachineRecord::from_images(21, "Retro", Vec::new()).is_none());
    }

    #[test]
    fn test_field_order_in_json() {
        let record = MachineRecord::from_images(1, "Rodillo", vec!["/a.webp".into()]).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let keys = ["\"id\"", "\"name\"", "\"category\"", "\"capacity\"", "\"description\"",
            "\"image\"", "\"gallery\"", "\"features\"", "\"specs\""];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
