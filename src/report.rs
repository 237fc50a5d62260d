//! Request-level operations: one decode per call, plain-data results.
//!
//! Nothing is cached between calls; each request decodes its own copy of
//! the database and drops it when the result is built.

use serde::Serialize;
use std::path::Path;

use crate::catalog::{build_catalog, TagStat};
use crate::dat::GeoDatabase;
use crate::dump::{dump_window, DumpWindow};
use crate::normalize::OutputItem;
use crate::source::{DatInput, DatSource, FileMeta};
use crate::{Error, GeoKind, Result};

/// Result of a tag listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagsResult {
    pub ok: bool,
    pub kind: GeoKind,
    pub path: String,
    pub meta: FileMeta,
    pub tags: Vec<TagStat>,
}

/// Result of a paginated dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpResult {
    pub ok: bool,
    pub kind: GeoKind,
    pub path: String,
    pub tag: String,
    /// Effective offset after clamping
    pub offset: usize,
    /// Effective limit after clamping
    pub limit: usize,
    pub total: usize,
    pub items: Vec<OutputItem>,
    pub meta: FileMeta,
}

/// List the tags of a file.
pub fn tags(kind: &str, path: impl AsRef<Path>) -> Result<TagsResult> {
    let kind = GeoKind::parse(kind)?;
    let source = DatSource::open(path)?;
    tags_for(kind, source.input())
}

/// List the tags of an already loaded buffer.
pub fn tags_from_input(kind: &str, input: DatInput<'_>) -> Result<TagsResult> {
    tags_for(GeoKind::parse(kind)?, input)
}

fn tags_for(kind: GeoKind, input: DatInput<'_>) -> Result<TagsResult> {
    let db = GeoDatabase::decode(input.bytes, kind)?;
    Ok(TagsResult {
        ok: true,
        kind,
        path: input.path.to_string(),
        meta: input.meta,
        tags: build_catalog(&db),
    })
}

/// Dump one page of a tag from a file.
///
/// Kind and tag are validated before the file is touched.
pub fn dump(
    kind: &str,
    path: impl AsRef<Path>,
    tag: &str,
    offset: i64,
    limit: i64,
) -> Result<DumpResult> {
    let (kind, tag) = validate_dump(kind, tag)?;
    let source = DatSource::open(path)?;
    dump_for(kind, source.input(), tag, DumpWindow::clamp(offset, limit))
}

/// Dump one page of a tag from an already loaded buffer.
pub fn dump_from_input(
    kind: &str,
    input: DatInput<'_>,
    tag: &str,
    offset: i64,
    limit: i64,
) -> Result<DumpResult> {
    let (kind, tag) = validate_dump(kind, tag)?;
    dump_for(kind, input, tag, DumpWindow::clamp(offset, limit))
}

fn validate_dump<'t>(kind: &str, tag: &'t str) -> Result<(GeoKind, &'t str)> {
    let kind = GeoKind::parse(kind)?;
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(Error::TagRequired);
    }
    Ok((kind, tag))
}

fn dump_for(kind: GeoKind, input: DatInput<'_>, tag: &str, window: DumpWindow) -> Result<DumpResult> {
    let db = GeoDatabase::decode(input.bytes, kind)?;
    let page = dump_window(&db, tag, window)?;
    Ok(DumpResult {
        ok: true,
        kind,
        path: input.path.to_string(),
        tag: tag.to_string(),
        offset: window.offset(),
        limit: window.limit(),
        total: page.total,
        items: page.items,
        meta: input.meta,
    })
}

/// Serialize a result as JSON text.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
