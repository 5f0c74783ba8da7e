use crate::error::{FleetError, Result};
use crate::importer::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOCAL_CONFIG_FILE: &str = "flota.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Carpeta con una subcarpeta por máquina nueva
    pub source_dir: PathBuf,
    /// Carpeta pública donde quedan las imágenes procesadas
    pub public_dir: PathBuf,
    /// Prefijo web de las rutas de imagen
    pub public_prefix: String,
    /// Archivo de datos del front-end
    pub data_file: PathBuf,
    /// Subcarpeta (dentro de source_dir) para máquinas ya procesadas
    pub processed_dir_name: String,
    pub closing_marker: String,
    pub fallback_id: u64,
    pub max_width: u32,
    pub quality: u8,
    pub output_format: OutputFormat,
    pub workbook_input: PathBuf,
    pub workbook_output: PathBuf,
    pub sitemap_output: PathBuf,
    pub domain: String,
}

impl Default for Config {
    fn default() -> Self {
        let assets = PathBuf::from("assets_y_datos");
        Self {
            source_dir: assets.join("NUEVAS_FOTOS_AQUI"),
            public_dir: PathBuf::from("public").join("machinery"),
            public_prefix: "/machinery".into(),
            data_file: PathBuf::from("src").join("data").join("machines.js"),
            processed_dir_name: "YA_PROCESADAS".into(),
            closing_marker: "];".into(),
            fallback_id: 20,
            max_width: 1920,
            quality: 80,
            output_format: OutputFormat::Webp,
            workbook_input: assets.join("FLOTA JULMAR sub arriendo.xlsx"),
            workbook_output: assets.join("sub_arriendo_data.json"),
            sitemap_output: PathBuf::from("public").join("sitemap.xml"),
            domain: "https://julmar.cl".into(),
        }
    }
}

impl Config {
    /// Busca y carga el archivo de configuración
    ///
    /// Orden: ruta explícita, `./flota.json`, `~/.config/flota/config.json`.
    /// Sin archivo se usan los valores por defecto.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(FleetError::FileNotFound(path.display().to_string()));
            }
            return Self::load_from(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from(&local);
        }

        if let Some(user) = Self::user_config_path() {
            if user.exists() {
                return Self::load_from(&user);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| FleetError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "configuración cargada");
        Ok(config)
    }

    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("flota").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.max_width == 0 {
            return Err(FleetError::Config("max_width debe ser mayor que 0".into()));
        }
        if self.quality == 0 || self.quality > 100 {
            return Err(FleetError::Config(format!(
                "quality fuera de rango (1-100): {}",
                self.quality
            )));
        }
        if self.closing_marker.is_empty() {
            return Err(FleetError::Config("closing_marker no puede estar vacío".into()));
        }
        Ok(())
    }
}
