//! bulk csv import
//!
//! One pass per record kind over the same file. A row either inserts a record
//! or is skipped with a reason; nothing but an unreadable file aborts the run.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::path::Path;

use csv::StringRecord;
use sea_orm::{DbConn, DbErr};

use crate::cmd::ImportKind;
use crate::repo::sea::{AssetRepo, HierarchyRepo};
use crate::service::lifecycle::{self, NewAsset};

pub const CATEGORY: &str = "Category";
pub const SUB_CATEGORY: &str = "Sub-Category";
pub const TYPE: &str = "Type";
pub const MAKE: &str = "Make";
pub const MODEL_NUMBER: &str = "Model Number";
pub const ASSET_CODE: &str = "Asset Code";
pub const SERIAL_NUMBER: &str = "Serial No.";
pub const REASONS: &str = "Reasons";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inserted {
    pub kind: ImportKind,
    pub row: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub kind: ImportKind,
    pub row: usize,
    pub key: String,
    pub reason: String,
    /// Already-present hierarchy records are skipped quietly and left out of
    /// the skip report.
    pub reported: bool,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    pub inserted: Vec<Inserted>,
    pub skipped: Vec<Skipped>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let mut kinds: Vec<ImportKind> = Vec::new();
        for k in self
            .inserted
            .iter()
            .map(|i| i.kind)
            .chain(self.skipped.iter().map(|s| s.kind))
        {
            if !kinds.contains(&k) {
                kinds.push(k);
            }
        }
        for kind in kinds {
            let inserted = self.inserted.iter().filter(|i| i.kind == kind).count();
            let skipped = self.skipped.iter().filter(|s| s.kind == kind).count();
            let _ = writeln!(
                out,
                "{}: {inserted} inserted, {skipped} skipped",
                kind.as_ref()
            );
        }
        for s in &self.skipped {
            let _ = writeln!(out, "  row {} [{}] {}", s.row, s.key, s.reason);
        }
        let _ = write!(
            out,
            "total: {} inserted, {} skipped",
            self.inserted.len(),
            self.skipped.len()
        );
        out
    }

    /// Reported reasons per row, merged and ordered.
    pub fn reasons_by_row(&self) -> BTreeMap<usize, BTreeSet<String>> {
        let mut out: BTreeMap<usize, BTreeSet<String>> = BTreeMap::new();
        for s in self.skipped.iter().filter(|s| s.reported) {
            out.entry(s.row).or_default().insert(s.reason.clone());
        }
        out
    }

    /// Writes the skipped rows with their original columns plus `Reasons`.
    pub fn write_skipped(&self, path: &Path) -> anyhow::Result<()> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
        let mut header = self.headers.clone();
        header.push_field(REASONS);
        writer.write_record(&header)?;
        for (row, reasons) in self.reasons_by_row() {
            let mut record = self.rows.get(row - 1).cloned().unwrap_or_default();
            let joined = reasons.into_iter().collect::<Vec<_>>().join("; ");
            record.push_field(&joined);
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

enum Outcome {
    Inserted(String),
    Exists(String, String),
    Skipped(String, String),
}

struct Row<'a> {
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl Row<'_> {
    fn get(&self, column: &str) -> Option<String> {
        let i = self.headers.iter().position(|h| h == column)?;
        art_common::non_blank(self.record.get(i))
    }
}

fn missing(field: &str, row: usize) -> Outcome {
    Outcome::Skipped(format!("row_{row}"), format!("{field} has no value"))
}

fn saved<M>(res: Result<M, DbErr>, entity: &str, value: &str) -> Outcome {
    match res {
        Ok(_) => Outcome::Inserted(value.to_string()),
        Err(e) => Outcome::Skipped(
            value.to_string(),
            format!("unable to save {entity} {value}: {e}"),
        ),
    }
}

async fn category(db: &DbConn, row: &Row<'_>, n: usize) -> Result<Outcome, DbErr> {
    let Some(name) = row.get(CATEGORY) else {
        return Ok(missing("category", n));
    };
    if HierarchyRepo::find_category_by_name(db, &name).await?.is_some() {
        return Ok(Outcome::Exists(
            name.clone(),
            format!("category {name} already exists"),
        ));
    }
    Ok(saved(
        HierarchyRepo::insert_category(db, &name).await,
        "category",
        &name,
    ))
}

async fn sub_category(db: &DbConn, row: &Row<'_>, n: usize) -> Result<Outcome, DbErr> {
    let Some(category) = row.get(CATEGORY) else {
        return Ok(missing("category", n));
    };
    let Some(name) = row.get(SUB_CATEGORY) else {
        return Ok(missing("sub-category", n));
    };
    if HierarchyRepo::find_sub_category_by_name(db, &name)
        .await?
        .is_some()
    {
        return Ok(Outcome::Exists(
            name.clone(),
            format!("sub-category {name} already exists"),
        ));
    }
    let Some(parent) = HierarchyRepo::find_category_by_name(db, &category).await? else {
        return Ok(Outcome::Skipped(
            category.clone(),
            format!("category {category} does not exist"),
        ));
    };
    Ok(saved(
        HierarchyRepo::insert_sub_category(db, &name, parent.id).await,
        "sub-category",
        &name,
    ))
}

async fn asset_type(db: &DbConn, row: &Row<'_>, n: usize) -> Result<Outcome, DbErr> {
    let Some(name) = row.get(TYPE) else {
        return Ok(missing("asset type", n));
    };
    let Some(sub_category) = row.get(SUB_CATEGORY) else {
        return Ok(missing("sub-category", n));
    };
    if HierarchyRepo::find_type_by_name(db, &name).await?.is_some() {
        return Ok(Outcome::Exists(
            name.clone(),
            format!("asset type {name} already exists"),
        ));
    }
    let Some(parent) = HierarchyRepo::find_sub_category_by_name(db, &sub_category).await? else {
        return Ok(Outcome::Skipped(
            sub_category.clone(),
            format!("sub-category {sub_category} does not exist"),
        ));
    };
    Ok(saved(
        HierarchyRepo::insert_type(db, &name, parent.id).await,
        "asset type",
        &name,
    ))
}

async fn make(db: &DbConn, row: &Row<'_>, n: usize) -> Result<Outcome, DbErr> {
    let Some(label) = row.get(MAKE) else {
        return Ok(missing("asset make", n));
    };
    let Some(ty) = row.get(TYPE) else {
        return Ok(missing("asset type", n));
    };
    if HierarchyRepo::find_make_by_label(db, &label).await?.is_some() {
        return Ok(Outcome::Exists(
            label.clone(),
            format!("asset make {label} already exists"),
        ));
    }
    let Some(parent) = HierarchyRepo::find_type_by_name(db, &ty).await? else {
        return Ok(Outcome::Skipped(
            ty.clone(),
            format!("asset type {ty} does not exist"),
        ));
    };
    Ok(saved(
        HierarchyRepo::insert_make(db, &label, parent.id).await,
        "asset make",
        &label,
    ))
}

async fn model_number(db: &DbConn, row: &Row<'_>, n: usize) -> Result<Outcome, DbErr> {
    let Some(make) = row.get(MAKE) else {
        return Ok(missing("asset make", n));
    };
    let Some(number) = row.get(MODEL_NUMBER) else {
        return Ok(missing("model number", n));
    };
    if HierarchyRepo::find_model_by_number(db, &number).await?.is_some() {
        return Ok(Outcome::Exists(
            number.clone(),
            format!("model number {number} already exists"),
        ));
    }
    let Some(parent) = HierarchyRepo::find_make_by_label(db, &make).await? else {
        return Ok(Outcome::Skipped(
            make.clone(),
            format!("asset make {make} does not exist"),
        ));
    };
    Ok(saved(
        HierarchyRepo::insert_model_number(db, &number, parent.id).await,
        "model number",
        &number,
    ))
}

async fn asset(db: &DbConn, row: &Row<'_>, n: usize) -> Result<Outcome, DbErr> {
    let asset_code = row.get(ASSET_CODE);
    let serial_number = row.get(SERIAL_NUMBER);
    let key = format!(
        "{}_{}",
        asset_code.as_deref().unwrap_or_default(),
        serial_number.as_deref().unwrap_or_default()
    );
    if asset_code.is_none() && serial_number.is_none() {
        return Ok(Outcome::Skipped(
            key,
            "asset must have either asset code or serial number".to_string(),
        ));
    }
    let Some(number) = row.get(MODEL_NUMBER) else {
        return Ok(missing("model number", n));
    };
    if let Some(code) = &asset_code {
        if AssetRepo::find_by_code_or_serial(db, Some(code), None)
            .await?
            .is_some()
        {
            return Ok(Outcome::Skipped(
                code.clone(),
                format!("asset code {code} already exists"),
            ));
        }
    }
    if let Some(serial) = &serial_number {
        if AssetRepo::find_by_code_or_serial(db, None, Some(serial))
            .await?
            .is_some()
        {
            return Ok(Outcome::Skipped(
                serial.clone(),
                format!("serial number {serial} already exists"),
            ));
        }
    }
    let Some(model) = HierarchyRepo::find_model_by_number(db, &number).await? else {
        return Ok(Outcome::Skipped(
            number.clone(),
            format!("model number {number} does not exist"),
        ));
    };
    let res = lifecycle::register_asset(
        db,
        NewAsset {
            asset_code,
            serial_number,
            model_number_id: model.id,
            ..Default::default()
        },
    )
    .await;
    Ok(match res {
        Ok(asset) => Outcome::Inserted(asset.display(&model)),
        Err(e) => saved::<()>(Err(e), "asset", &key),
    })
}

async fn import_row(db: &DbConn, kind: ImportKind, row: &Row<'_>, n: usize) -> Outcome {
    let res = match kind {
        ImportKind::Category => category(db, row, n).await,
        ImportKind::SubCategory => sub_category(db, row, n).await,
        ImportKind::Type => asset_type(db, row, n).await,
        ImportKind::Make => make(db, row, n).await,
        ImportKind::Model => model_number(db, row, n).await,
        ImportKind::Asset => asset(db, row, n).await,
        ImportKind::All => Ok(Outcome::Skipped(
            format!("row_{n}"),
            "all is not a single record kind".to_string(),
        )),
    };
    res.unwrap_or_else(|e| {
        Outcome::Skipped(format!("row_{n}"), format!("unable to query database: {e}"))
    })
}

pub async fn import_records(
    db: &DbConn,
    kind: ImportKind,
    headers: StringRecord,
    rows: Vec<StringRecord>,
) -> ImportReport {
    let kinds: Vec<ImportKind> = match kind {
        ImportKind::All => ImportKind::HIERARCHY.to_vec(),
        k => vec![k],
    };
    let mut report = ImportReport {
        headers,
        rows,
        ..Default::default()
    };
    for kind in kinds {
        tracing::info!("importing {} from {} rows", kind.as_ref(), report.rows.len());
        for (i, record) in report.rows.iter().enumerate() {
            let n = i + 1;
            let row = Row {
                headers: &report.headers,
                record,
            };
            match import_row(db, kind, &row, n).await {
                Outcome::Inserted(label) => {
                    tracing::debug!("row {n}: {} {label} inserted", kind.as_ref());
                    report.inserted.push(Inserted { kind, row: n, label });
                }
                Outcome::Exists(key, reason) => {
                    tracing::debug!("row {n}: {reason}");
                    report.skipped.push(Skipped {
                        kind,
                        row: n,
                        key,
                        reason,
                        reported: false,
                    });
                }
                Outcome::Skipped(key, reason) => {
                    tracing::warn!("row {n}: {reason}");
                    report.skipped.push(Skipped {
                        kind,
                        row: n,
                        key,
                        reason,
                        reported: true,
                    });
                }
            }
        }
    }
    report
}

/// Reads `path` and imports its rows as `kind` records.
pub async fn import_file(db: &DbConn, kind: ImportKind, path: &Path) -> anyhow::Result<ImportReport> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok(import_records(db, kind, headers, rows).await)
}
