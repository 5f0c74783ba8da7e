//! Importación de máquinas nuevas
//!
//! ## Flujo
//! 1. Una subcarpeta por máquina en la carpeta de origen
//! 2. Fotos normalizadas a `public/machinery/<slug>/image-<n>.<ext>`
//! 3. Un registro por máquina con al menos una foto válida
//! 4. Registros agregados a `machines.js` y carpetas movidas a `YA_PROCESADAS`

mod photo;
mod record;

pub use photo::{
    encode, load_rgb, output_file_name, read_dimensions, process_image, public_path,
    resize_to_fit, scaled_size, ImageOptions, OutputFormat, ProcessedImage,
};
pub use record::{MachineRecord, CAPACITY_PLACEHOLDER, DESCRIPTION_PLACEHOLDER};

use crate::config::Config;
use crate::error::Result;
use crate::injector;
use crate::scanner::{self, MachineDir};
use crate::slug::{clean_display_name, slugify};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub source_dir: PathBuf,
    pub public_dir: PathBuf,
    pub data_file: PathBuf,
    pub processed_dir_name: String,
    pub closing_marker: String,
    pub fallback_id: u64,
    pub image: ImageOptions,
    /// Solo informa lo que haría, sin escribir nada
    pub dry_run: bool,
}

impl ImportOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_dir: config.source_dir.clone(),
            public_dir: config.public_dir.clone(),
            data_file: config.data_file.clone(),
            processed_dir_name: config.processed_dir_name.clone(),
            closing_marker: config.closing_marker.clone(),
            fallback_id: config.fallback_id,
            image: ImageOptions {
                max_width: config.max_width,
                quality: config.quality,
                format: config.output_format,
                public_prefix: config.public_prefix.clone(),
            },
            dry_run: false,
        }
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.source_dir.join(&self.processed_dir_name)
    }
}

/// Resultado de una corrida
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub records: Vec<MachineRecord>,
    /// Carpetas de origen que generaron registro
    pub processed_dirs: Vec<PathBuf>,
    /// Carpetas sin fotos válidas
    pub skipped: Vec<String>,
    pub injected: usize,
    pub moved: usize,
}

/// Procesa las fotos de una máquina.
///
/// Devuelve las rutas públicas de las fotos que se pudieron procesar; una foto
/// con error se registra y se salta.
pub fn process_machine_images(
    machine: &MachineDir,
    slug: &str,
    options: &ImportOptions,
) -> Vec<String> {
    let images = match scanner::scan_images(&machine.path) {
        Ok(images) => images,
        Err(e) => {
            tracing::warn!(folder = %machine.path.display(), error = %e, "no se pudo leer la carpeta");
            return Vec::new();
        }
    };

    let target_dir = options.public_dir.join(slug);
    let mut processed = Vec::new();

    for info in &images {
        let ordinal = info.position;

        if options.dry_run {
            match read_dimensions(&info.path) {
                Ok((width, height)) => {
                    let (w, h) = scaled_size(width, height, options.image.max_width);
                    let file_name = output_file_name(ordinal, options.image.format);
                    println!("  -> {} ({}x{} → {}x{})", info.file_name, width, height, w, h);
                    processed.push(public_path(&options.image.public_prefix, slug, &file_name));
                }
                Err(e) => {
                    tracing::warn!(file = %info.file_name, error = %e, "foto ilegible");
                    println!("  X Error con foto {}: {}", info.file_name, e);
                }
            }
            continue;
        }

        match process_image(&info.path, &target_dir, slug, ordinal, &options.image) {
            Ok(image) => {
                println!("  -> Foto procesada: {}", image.file_name);
                processed.push(image.public_path);
            }
            Err(e) => {
                tracing::warn!(file = %info.file_name, error = %e, "foto descartada");
                println!("  X Error con foto {}: {}", info.file_name, e);
            }
        }
    }

    processed
}

/// Importa una carpeta de máquina. Sin fotos válidas no hay registro.
pub fn import_machine(machine: &MachineDir, id: u64, options: &ImportOptions) -> Option<MachineRecord> {
    let slug = slugify(&machine.dir_name);
    if slug.is_empty() {
        tracing::warn!(folder = %machine.dir_name, "el nombre no produce un slug válido");
        println!("  ! El nombre '{}' no tiene caracteres utilizables.", machine.dir_name);
        return None;
    }

    let gallery = process_machine_images(machine, &slug, options);
    if gallery.is_empty() {
        tracing::warn!(folder = %machine.dir_name, "sin imágenes válidas");
        println!("  ! No se encontraron imágenes válidas.");
        return None;
    }

    let name = clean_display_name(&machine.dir_name);
    MachineRecord::from_images(id, &name, gallery)
}

/// Mueve las carpetas procesadas a la carpeta de retención.
///
/// Es de mejor esfuerzo: los errores se ignoran. Devuelve cuántas se movieron.
pub fn move_processed(dirs: &[PathBuf], holding: &Path) -> usize {
    if std::fs::create_dir_all(holding).is_err() {
        tracing::debug!(holding = %holding.display(), "no se pudo crear la carpeta de procesadas");
        return 0;
    }

    dirs.iter()
        .filter(|dir| {
            let Some(name) = dir.file_name() else {
                return false;
            };
            match std::fs::rename(dir, holding.join(name)) {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!(folder = %dir.display(), error = %e, "no se pudo mover");
                    false
                }
            }
        })
        .count()
}

pub fn run_import(options: &ImportOptions) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    let machines = scanner::scan_machine_dirs(&options.source_dir, Some(&options.processed_dir_name))?;

    if machines.is_empty() {
        println!(
            "No se encontraron carpetas nuevas en '{}'.",
            options.source_dir.display()
        );
        println!("Crea una carpeta por máquina (ej: 'Excavadora CAT 320') y pon las fotos dentro.");
        return Ok(summary);
    }

    let mut next_id = injector::next_id(&options.data_file, options.fallback_id);
    tracing::debug!(next_id, machines = machines.len(), "inicio de importación");

    for machine in &machines {
        println!("\nProcesando: {}...", machine.dir_name);

        match import_machine(machine, next_id, options) {
            Some(record) => {
                println!("  OK. Datos preparados para ID {}", record.id);
                next_id += 1;
                summary.processed_dirs.push(machine.path.clone());
                summary.records.push(record);
            }
            None => summary.skipped.push(machine.dir_name.clone()),
        }
    }

    if summary.records.is_empty() {
        return Ok(summary);
    }

    if options.dry_run {
        println!("\n[simulación] Se agregarían {} máquinas:", summary.records.len());
        println!("{}", injector::render_manual_copy(&summary.records)?);
        return Ok(summary);
    }

    summary.injected =
        injector::inject_records(&options.data_file, &summary.records, &options.closing_marker)?;
    println!(
        "Se agregaron {} máquinas nuevas a la base de datos.",
        summary.injected
    );

    summary.moved = move_processed(&summary.processed_dirs, &options.processed_dir());

    Ok(summary)
}
