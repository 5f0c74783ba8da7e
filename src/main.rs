use anyhow::Context;
use clap::Parser;
use flota::{cli, config, flattener, importer, injector, logging, sitemap};
use cli::{Cli, Commands};
use config::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::setup_tracing(cli.verbose) {
        eprintln!("No se pudo iniciar el log: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).context("no se pudo cargar la configuración")?;

    match cli.command {
        Commands::Import { source, public_dir, data_file, format, dry_run } => {
            println!("--- INICIANDO AUTOMATIZACIÓN DE FLOTA ---");

            let mut options = importer::ImportOptions::from_config(&config);
            if let Some(source) = source {
                options.source_dir = source;
            }
            if let Some(public_dir) = public_dir {
                options.public_dir = public_dir;
            }
            if let Some(data_file) = data_file {
                options.data_file = data_file;
            }
            if let Some(format) = format {
                options.image.format = format;
            }
            options.dry_run = dry_run;

            let summary = importer::run_import(&options)?;

            if !summary.skipped.is_empty() {
                println!("\n⚠ Sin fotos válidas: {}", summary.skipped.join(", "));
            }

            if summary.injected > 0 {
                println!("\n--- ¡PROCESO COMPLETADO! ---");
                println!("1. Verifica las fotos en '{}'", options.public_dir.display());
                println!(
                    "2. Revisa '{}' para ajustar descripciones y datos técnicos.",
                    options.data_file.display()
                );
                if summary.moved > 0 {
                    println!(
                        "✔ {} carpetas movidas a '{}'",
                        summary.moved,
                        options.processed_dir().display()
                    );
                }
            }
        }

        Commands::Flatten { input, output } => {
            let input = input.unwrap_or(config.workbook_input);
            let output = output.unwrap_or(config.workbook_output);

            let dump = flattener::run_flatten(&input, &output)
                .with_context(|| format!("no se pudo volcar {}", input.display()))?;
            println!(
                "✔ JSON guardado en {} ({} hojas, {} filas)",
                output.display(),
                dump.sheets.len(),
                dump.row_count()
            );
        }

        Commands::Sitemap { data_file, output, domain } => {
            let data_file = data_file.unwrap_or(config.data_file);
            let output = output.unwrap_or(config.sitemap_output);
            let domain = domain.unwrap_or(config.domain);

            let count = sitemap::run_sitemap(&data_file, &output, &domain)
                .with_context(|| format!("no se pudo generar el sitemap desde {}", data_file.display()))?;
            println!("✔ Sitemap generado en {} ({} máquinas)", output.display(), count);
        }

        Commands::NextId { data_file } => {
            let data_file = data_file.unwrap_or(config.data_file);
            println!("{}", injector::next_id(&data_file, config.fallback_id));
        }
    }

    Ok(())
}
