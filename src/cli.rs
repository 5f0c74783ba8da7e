use crate::importer::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flota")]
#[command(about = "Herramientas de inventario de flota (fotos, planillas, sitemap)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Logs detallados
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Archivo de configuración (por defecto ./flota.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Importa las carpetas de máquinas nuevas y las agrega a machines.js
    Import {
        /// Carpeta con una subcarpeta por máquina
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Carpeta pública de imágenes
        #[arg(long)]
        public_dir: Option<PathBuf>,

        /// Archivo de datos del front-end
        #[arg(short, long)]
        data_file: Option<PathBuf>,

        /// Formato de salida (webp/jpeg)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Simula la importación sin escribir nada
        #[arg(long)]
        dry_run: bool,
    },

    /// Vuelca todas las hojas de una planilla a JSON
    Flatten {
        /// Planilla de entrada
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// JSON de salida
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Genera sitemap.xml con las páginas de cada máquina
    Sitemap {
        /// Archivo de datos del front-end
        #[arg(short, long)]
        data_file: Option<PathBuf>,

        /// sitemap.xml de salida
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dominio del sitio
        #[arg(long)]
        domain: Option<String>,
    },

    /// Muestra el próximo ID que se asignaría
    NextId {
        /// Archivo de datos del front-end
        #[arg(short, long)]
        data_file: Option<PathBuf>,
    },
}
