//! Per-tag summaries of a decoded database.

use serde::Serialize;

use crate::dat::{GeoDatabase, Group};

/// Tag name and its raw entry count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagStat {
    pub tag: String,
    pub count: usize,
}

/// Build the tag catalog of a database.
///
/// One entry per group with a non-blank tag, sorted by tag ignoring case.
/// Tags that compare equal keep their decode order.
pub fn build_catalog(db: &GeoDatabase) -> Vec<TagStat> {
    match db {
        GeoDatabase::SiteList(groups) => collect(groups),
        GeoDatabase::IpList(groups) => collect(groups),
    }
}

fn collect<G: Group>(groups: &[G]) -> Vec<TagStat> {
    let mut keyed: Vec<(String, TagStat)> = groups
        .iter()
        .filter_map(|g| {
            let tag = g.visible_tag()?;
            Some((
                tag.to_lowercase(),
                TagStat {
                    tag: tag.to_string(),
                    count: g.entry_count(),
                },
            ))
        })
        .collect();

    // sort_by is stable
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, stat)| stat).collect()
}
