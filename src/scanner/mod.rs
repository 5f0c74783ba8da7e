use crate::error::{FleetError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
    /// Lugar en el listado ordenado de la carpeta, desde 1
    pub position: usize,
}

/// Carpeta de una máquina nueva
#[derive(Debug, Clone)]
pub struct MachineDir {
    pub path: PathBuf,
    pub dir_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Subcarpetas directas de `source`, ordenadas por nombre.
///
/// `skip` excluye la carpeta de máquinas ya procesadas.
pub fn scan_machine_dirs(source: &Path, skip: Option<&str>) -> Result<Vec<MachineDir>> {
    if !source.is_dir() {
        return Err(FleetError::FolderNotFound(source.display().to_string()));
    }

    let mut dirs: Vec<MachineDir> = WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| MachineDir {
            dir_name: file_name_of(e.path()),
            path: e.path().to_path_buf(),
        })
        .filter(|d| skip.map_or(true, |s| d.dir_name != s))
        .collect();

    dirs.sort_by(|a, b| a.dir_name.cmp(&b.dir_name));
    Ok(dirs)
}

/// Imágenes candidatas directamente dentro de `folder`, ordenadas por nombre de archivo.
///
/// `position` es el lugar (desde 1) de la foto en el listado completo de la
/// carpeta, incluyendo archivos que no son fotos.
pub fn scan_images(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(FleetError::FolderNotFound(folder.display().to_string()));
    }

    let mut entries: Vec<walkdir::DirEntry> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)  // solo el nivel directo
        .into_iter()
        .filter_map(|e| e.ok())
        .collect();
    entries.sort_by(|a, b| a.file_name().cmp(b.file_name()));

    let mut images = Vec::new();

    for (idx, entry) in entries.iter().enumerate() {
        let path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            if is_image_extension(&ext.to_string_lossy()) {
                images.push(ImageInfo {
                    path: path.to_path_buf(),
                    file_name: file_name_of(path),
                    position: idx + 1,
                });
            }
        }
    }

    Ok(images)
}
