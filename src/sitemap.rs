//! sitemap.xml del sitio a partir de `machines.js`

use crate::error::Result;
use regex::Regex;
use std::path::Path;

/// Secciones fijas de la landing
const STATIC_PAGES: &[&str] = &["", "/#flota", "/#servicios", "/#nosotros", "/#contacto"];

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Slug de las rutas `/flota/<slug>` del front-end.
///
/// Distinto de [`crate::slug::slugify`]: no translitera, las letras acentuadas
/// simplemente se eliminan (igual que `\w` ASCII en el navegador).
pub fn web_slug(text: &str) -> String {
    lazy_static::lazy_static! {
        static ref SPACES_RE: Regex = Regex::new(r"\s+").unwrap();
        static ref NON_WORD_RE: Regex = Regex::new(r"[^A-Za-z0-9_\-]+").unwrap();
        static ref DASHES_RE: Regex = Regex::new(r"--+").unwrap();
    }

    let lowered = text.to_lowercase();
    let spaced = SPACES_RE.replace_all(lowered.trim(), "-");
    let cleaned = NON_WORD_RE.replace_all(&spaced, "");
    DASHES_RE.replace_all(&cleaned, "-").into_owned()
}

/// Nombres de máquina en el archivo de datos, en orden de aparición
pub fn machine_names(content: &str) -> Vec<String> {
    lazy_static::lazy_static! {
        static ref NAME_RE: Regex =
            Regex::new(r#"\bname["']?\s*:\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#).unwrap();
    }

    NAME_RE
        .captures_iter(content)
        .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
        .map(|m| m.as_str().replace("\\\"", "\"").replace("\\'", "'"))
        .collect()
}

fn push_url(xml: &mut String, loc: &str, changefreq: &str, priority: &str) {
    xml.push_str("\n    <url>");
    xml.push_str(&format!("\n        <loc>{}</loc>", escape_xml(loc)));
    xml.push_str(&format!("\n        <changefreq>{}</changefreq>", changefreq));
    xml.push_str(&format!("\n        <priority>{}</priority>", priority));
    xml.push_str("\n    </url>");
}

pub fn build_sitemap(domain: &str, names: &[String]) -> String {
    let domain = domain.trim_end_matches('/');

    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);

    for page in STATIC_PAGES {
        let priority = if page.is_empty() { "1.0" } else { "0.8" };
        push_url(&mut xml, &format!("{}{}", domain, page), "weekly", priority);
    }

    for name in names {
        let loc = format!("{}/flota/{}", domain, web_slug(name));
        push_url(&mut xml, &loc, "monthly", "0.9");
    }

    xml.push_str("\n</urlset>");
    xml
}

/// Escribe el sitemap y devuelve la cantidad de máquinas incluidas
pub fn run_sitemap(data_file: &Path, output: &Path, domain: &str) -> Result<usize> {
    let content = std::fs::read_to_string(data_file)?;
    let names = machine_names(&content);

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, build_sitemap(domain, &names))?;

    tracing::debug!(machines = names.len(), output = %output.display(), "sitemap escrito");
    Ok(names.len())
}
