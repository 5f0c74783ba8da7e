use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("No existe la carpeta '{0}'")]
    FolderNotFound(String),

    #[error("Archivo no encontrado: {0}")]
    FileNotFound(String),

    #[error("No encontré el cierre '{marker}' en {path}; el archivo no fue modificado")]
    MarkerNotFound { path: String, marker: String },

    #[error("Error al leer imagen: {0}")]
    ImageLoad(String),

    #[error("Error al codificar imagen: {0}")]
    ImageEncode(String),

    #[error("Error de planilla: {0}")]
    Spreadsheet(String),

    #[error("Error JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for FleetError {
    fn from(err: image::ImageError) -> Self {
        FleetError::ImageLoad(err.to_string())
    }
}

impl From<calamine::Error> for FleetError {
    fn from(err: calamine::Error) -> Self {
        FleetError::Spreadsheet(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FleetError>;
