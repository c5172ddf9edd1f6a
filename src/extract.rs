use std::path::Path;

extern crate isf_parser;
use isf_parser::{
    SymbolDb,
    UserType,
};

extern crate log;
use log::debug;

use crate::settings::{
    BANNER_WIDTH,
    KEY_FIELDS,
    TARGET_STRUCT,
};

/// Offsets keyed by LibVMI config name, in `KEY_FIELDS` order.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct OffsetTable {
    entries: Vec<(&'static str, u64)>,
}

impl OffsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, offset: u64) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(e) => e.1 = offset,
            None => self.entries.push((key, offset)),
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, off)| *off)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One line of the field report.
#[derive(Clone, PartialEq, Debug)]
pub struct FieldRow {
    pub field: &'static str,
    pub config: &'static str,
    pub offset: Option<u64>,
}

impl FieldRow {
    pub fn cells(&self) -> [String; 3] {
        match self.offset {
            Some(offset) => [
                self.field.to_owned(),
                format!("0x{:03x}", offset),
                format!("{} = 0x{:x};", self.config, offset),
            ],
            None => [
                self.field.to_owned(),
                String::from("NOT FOUND"),
                String::new(),
            ],
        }
    }
}

/// Look up every key field in `eprocess`, present or not.
pub fn field_rows(eprocess: &UserType) -> isf_parser::Result<Vec<FieldRow>> {
    KEY_FIELDS
        .iter()
        .map(|&(field, config)| -> isf_parser::Result<FieldRow> {
            Ok(FieldRow {
                field,
                config,
                offset: eprocess.field_offset(field)?,
            })
        })
        .collect()
}

pub fn offsets_from_rows(rows: &[FieldRow]) -> OffsetTable {
    let mut offsets = OffsetTable::new();
    for row in rows {
        if let Some(offset) = row.offset {
            offsets.insert(row.config, offset);
        }
    }
    offsets
}

fn print_rows(rows: &[FieldRow]) {
    use prettytable::format::{
        FormatBuilder,
        LinePosition,
        LineSeparator,
    };
    use prettytable::{Cell, Row, Table};

    let mut table = Table::new();
    table.set_format(
        FormatBuilder::new()
            .separator(LinePosition::Title, LineSeparator::new('-', '+', '+', '+'))
            .padding(0, 4)
            .build());
    table.set_titles(Row::new(vec![
        Cell::new("Field Name"),
        Cell::new("Offset"),
        Cell::new("LibVMI Config"),
    ]));
    for row in rows {
        table.add_row(Row::new(
            row.cells().iter().map(|c| Cell::new(c)).collect()));
    }

    println!("\nEPROCESS Field Offsets:");
    table.printstd();
}

/// Read the key fields out of `eprocess`, printing one table row per field.
pub fn offsets_from_type(eprocess: &UserType) -> isf_parser::Result<OffsetTable> {
    let rows = field_rows(eprocess)?;
    print_rows(&rows);
    Ok(offsets_from_rows(&rows))
}

/// Look up the target struct in `db` and collect its key field offsets.
pub fn offsets_from_db(db: &SymbolDb) -> isf_parser::Result<Option<OffsetTable>> {
    match db.find_struct(TARGET_STRUCT) {
        Some((name, eprocess)) => {
            println!("[+] Found EPROCESS structure: {}", name);
            debug!("{}: size {:?}, {} fields",
                   name, eprocess.size, eprocess.field_names().count());
            offsets_from_type(&eprocess).map(Some)
        }
        None => {
            println!("[-] EPROCESS structure not found in symbols");
            Ok(None)
        }
    }
}

/// Load `symbols_file` and extract the EPROCESS offsets.
///
/// Every failure to read, decompress or parse the file, or to read one of
/// the key fields, is reported the same way and yields `None`.
pub fn find_eprocess_offsets<P: AsRef<Path>>(symbols_file: P) -> Option<OffsetTable> {
    let symbols_file = symbols_file.as_ref();

    println!("{}", "=".repeat(BANNER_WIDTH));
    println!("EXTRACTING REAL EPROCESS OFFSETS FROM VOLATILITY3 SYMBOLS");
    println!("{}", "=".repeat(BANNER_WIDTH));

    println!("[+] Reading symbols from: {}", symbols_file.display());
    let result = SymbolDb::open(symbols_file).and_then(|db| {
        println!("[+] Symbols loaded successfully");
        offsets_from_db(&db)
    });

    match result {
        Ok(offsets) => offsets,
        Err(e) => {
            debug!("{:?}", e);
            println!("[-] Error reading symbols: {}", e);
            None
        }
    }
}
