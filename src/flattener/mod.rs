//! Volcado de planillas a JSON
//!
//! Cada hoja se lee como tabla: la primera fila es el encabezado y cada fila
//! siguiente se convierte en un objeto columna → valor. Las celdas vacías
//! quedan como `null`.

use crate::error::Result;
use calamine::{open_workbook_auto, Data, Range, Reader};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub type Row = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetDump {
    pub name: String,
    pub rows: Vec<Row>,
}

/// Libro completo, en el orden de las hojas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookDump {
    pub sheets: Vec<SheetDump>,
}

impl WorkbookDump {
    pub fn get(&self, name: &str) -> Option<&[Row]> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.rows.as_slice())
    }

    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|s| s.rows.len()).sum()
    }
}

impl Serialize for WorkbookDump {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sheets.len()))?;
        for sheet in &self.sheets {
            map.serialize_entry(&sheet.name, &sheet.rows)?;
        }
        map.end()
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Valor JSON de una celda. Vacías, errores y NaN → `null`.
pub fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => {
            if !f.is_finite() {
                Value::Null
            } else if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
                Value::from(*f as i64)
            } else {
                Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Value::String(naive.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Number::from_f64(dt.as_f64())
                .map(Value::Number)
                .unwrap_or(Value::Null),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
    }
}

fn header_label(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::Float(f) if !f.is_finite() => None,
        Data::Float(f) => Some(format_float(*f)),
        other => match cell_value(other) {
            Value::String(s) => Some(s),
            Value::Null => None,
            v => Some(v.to_string()),
        },
    }
}

/// Nombres de columna: vacíos → `Unnamed: <n>`, repetidos → `<nombre>.<k>`
pub fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            let base = header_label(cell).unwrap_or_else(|| format!("Unnamed: {}", col));
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

/// Filas de datos de una hoja. Las filas completamente vacías se omiten.
pub fn sheet_rows(range: &Range<Data>) -> Vec<Row> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let columns = header_names(header);

    rows.filter(|row| row.iter().any(|c| !matches!(cell_value(c), Value::Null)))
        .map(|row| {
            columns
                .iter()
                .enumerate()
                .map(|(col, name)| {
                    let value = row.get(col).map(cell_value).unwrap_or(Value::Null);
                    (name.clone(), value)
                })
                .collect()
        })
        .collect()
}

pub fn flatten_workbook(path: &Path) -> Result<WorkbookDump> {
    let mut workbook = open_workbook_auto(path)?;
    let mut dump = WorkbookDump::default();

    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let rows = sheet_rows(&range);
        tracing::debug!(sheet = %name, rows = rows.len(), "hoja leída");
        dump.sheets.push(SheetDump { name, rows });
    }

    Ok(dump)
}

/// JSON con sangría de 2 espacios, sin escapar caracteres no-ASCII
pub fn write_dump(dump: &WorkbookDump, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, dump)?;
    writer.flush()?;
    Ok(())
}

pub fn run_flatten(input: &Path, output: &Path) -> Result<WorkbookDump> {
    let dump = flatten_workbook(input)?;
    write_dump(&dump, output)?;
    Ok(dump)
}
