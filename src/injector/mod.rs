//! Inserción de registros en el archivo de datos del front-end
//!
//! El archivo (`machines.js`) es un literal de arreglo JS que termina en `];`.
//! La inserción es un empalme de texto justo antes del último cierre; si el
//! cierre no existe no se adivina otra posición.

use crate::error::{FleetError, Result};
use crate::importer::MachineRecord;
use regex::Regex;
use serde::Serialize;
use std::path::Path;

pub const DEFAULT_MARKER: &str = "];";
pub const FALLBACK_ID: u64 = 20;

const RECORD_SEPARATOR: &str = ",\n    ";

/// Serializa con la sangría indicada, sin escapar caracteres no-ASCII
fn to_json_indented<T: Serialize + ?Sized>(value: &T, indent: &[u8]) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer)
        .map_err(|e| FleetError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// ID más alto presente en el texto (`id: 3` o `"id": 3`)
pub fn max_id(content: &str) -> Option<u64> {
    lazy_static::lazy_static! {
        static ref ID_RE: Regex = Regex::new(r#"\bid["']?\s*:\s*(\d+)"#).unwrap();
    }

    ID_RE
        .captures_iter(content)
        .filter_map(|cap| match cap[1].parse::<u64>() {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(value = &cap[1], error = %e, "ID fuera de rango, se ignora");
                None
            }
        })
        .max()
}

/// Siguiente ID libre según el archivo de datos.
///
/// Si el archivo no se puede leer o no tiene IDs, devuelve `fallback`.
pub fn next_id(path: &Path, fallback: u64) -> u64 {
    match std::fs::read_to_string(path) {
        Ok(content) => match max_id(&content) {
            Some(max) => max.saturating_add(1),
            None => {
                tracing::debug!(path = %path.display(), fallback, "sin IDs en el archivo de datos");
                fallback
            }
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "error leyendo ID, uso el valor por defecto");
            fallback
        }
    }
}

/// Bloque de un registro: JSON con sangría de 4 espacios (JSON es JS válido)
pub fn render_block(record: &MachineRecord) -> Result<String> {
    to_json_indented(record, b"    ")
}

/// Todos los registros como arreglo, para copiar a mano
pub fn render_manual_copy(records: &[MachineRecord]) -> Result<String> {
    to_json_indented(records, b"    ")
}

/// Inserta los registros antes del último `marker`.
///
/// Devuelve `None` si el marcador no aparece. El texto posterior al marcador
/// no se toca.
pub fn splice(content: &str, records: &[MachineRecord], marker: &str) -> Result<Option<String>> {
    let Some(index) = content.rfind(marker) else {
        return Ok(None);
    };

    let mut insertion = String::new();
    for record in records {
        insertion.push_str(RECORD_SEPARATOR);
        insertion.push_str(&render_block(record)?);
    }
    insertion.push('\n');

    let mut spliced = String::with_capacity(content.len() + insertion.len());
    spliced.push_str(&content[..index]);
    spliced.push_str(&insertion);
    spliced.push_str(&content[index..]);
    Ok(Some(spliced))
}

/// Agrega los registros al archivo de datos, sobrescribiéndolo en su lugar.
///
/// Sin marcador de cierre imprime los registros para copiarlos a mano y
/// devuelve `MarkerNotFound` sin modificar el archivo.
pub fn inject_records(path: &Path, records: &[MachineRecord], marker: &str) -> Result<usize> {
    if records.is_empty() {
        return Ok(0);
    }

    let content = std::fs::read_to_string(path)?;

    match splice(&content, records, marker)? {
        Some(updated) => {
            std::fs::write(path, updated)?;
            tracing::debug!(path = %path.display(), count = records.len(), "registros agregados");
            Ok(records.len())
        }
        None => {
            println!(
                "ERROR CRÍTICO: No encontré el cierre '{}' en {}. Copia estos datos manualmente:",
                marker,
                path.display()
            );
            println!("{}", render_manual_copy(records)?);
            Err(FleetError::MarkerNotFound {
                path: path.display().to_string(),
                marker: marker.to_string(),
            })
        }
    }
}
