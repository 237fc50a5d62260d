//! Paginated dumps of a single tag.

use log::trace;
use std::ops::Range;

use crate::dat::{find_group, GeoDatabase, Group};
use crate::normalize::{Normalize, OutputItem};
use crate::{Error, Result};

/// Page size used when the caller asks for zero or a negative limit.
pub const DEFAULT_LIMIT: usize = 200;

/// Largest page size ever served.
pub const MAX_LIMIT: usize = 2000;

/// Clamped pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpWindow {
    offset: usize,
    limit: usize,
}

impl DumpWindow {
    /// Clamp raw caller values.
    ///
    /// Negative offsets become 0, limits `<= 0` become [`DEFAULT_LIMIT`]
    /// and limits above [`MAX_LIMIT`] become [`MAX_LIMIT`].
    pub fn clamp(offset: i64, limit: i64) -> Self {
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = if limit <= 0 {
            DEFAULT_LIMIT
        } else {
            usize::try_from(limit).map_or(MAX_LIMIT, |l| l.min(MAX_LIMIT))
        };
        Self { offset, limit }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Slice of `0..total` covered by this window; `None` when the offset is past the end.
    pub fn range(&self, total: usize) -> Option<Range<usize>> {
        if self.offset >= total {
            return None;
        }
        let end = self.offset.saturating_add(self.limit).min(total);
        Some(self.offset..end)
    }
}

impl Default for DumpWindow {
    fn default() -> Self {
        Self::clamp(0, 0)
    }
}

/// One page of a tag's entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Entry count of the whole group, before pagination.
    pub total: usize,
    pub items: Vec<OutputItem>,
}

/// Dump a window of the entries stored under `tag`.
pub fn dump(db: &GeoDatabase, tag: &str, offset: i64, limit: i64) -> Result<Page> {
    dump_window(db, tag, DumpWindow::clamp(offset, limit))
}

/// Dump with an already clamped window.
///
/// The tag is matched ignoring case; the first matching group wins.
pub fn dump_window(db: &GeoDatabase, tag: &str, window: DumpWindow) -> Result<Page> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(Error::TagRequired);
    }

    match db {
        GeoDatabase::SiteList(groups) => page(groups, tag, window),
        GeoDatabase::IpList(groups) => page(groups, tag, window),
    }
}

fn page<G>(groups: &[G], tag: &str, window: DumpWindow) -> Result<Page>
where
    G: Group,
    G::Entry: Normalize,
{
    let group = find_group(groups, tag).ok_or_else(|| Error::TagNotFound(tag.to_string()))?;
    let entries = group.entries();
    let total = entries.len();

    let items = match window.range(total) {
        Some(range) => {
            trace!("dump {}: entries {:?} of {}", tag, range, total);
            entries[range].iter().map(Normalize::normalize).collect()
        }
        None => Vec::new(),
    };

    Ok(Page { total, items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dat::{CidrRule, DomainRule, IpGroup, SiteGroup};

    fn site_db() -> GeoDatabase {
        let group = |tag: &str, n: usize| SiteGroup {
            tag: tag.to_string(),
            domains: (0..n)
                .map(|i| DomainRule {
                    match_type: 2,
                    value: format!("{}{}.com", tag.to_lowercase(), i),
                    attributes: Vec::new(),
                })
                .collect(),
        };
        GeoDatabase::SiteList(vec![group("", 2), group("GOOGLE", 3), group("big", 2500)])
    }

    #[test]
    fn test_window_clamp() {
        assert_eq!(DumpWindow::clamp(-5, 10).offset(), 0);
        assert_eq!(DumpWindow::clamp(7, 10).offset(), 7);
        assert_eq!(DumpWindow::clamp(0, 0).limit(), DEFAULT_LIMIT);
        assert_eq!(DumpWindow::clamp(0, -1).limit(), DEFAULT_LIMIT);
        assert_eq!(DumpWindow::clamp(0, 1).limit(), 1);
        assert_eq!(DumpWindow::clamp(0, 2000).limit(), 2000);
        assert_eq!(DumpWindow::clamp(0, 2001).limit(), MAX_LIMIT);
        assert_eq!(DumpWindow::clamp(0, i64::MAX).limit(), MAX_LIMIT);
        assert_eq!(DumpWindow::clamp(i64::MIN, i64::MIN), DumpWindow::default());
    }

    #[test]
    fn test_window_range() {
        let w = DumpWindow::clamp(2, 5);
        assert_eq!(w.range(10), Some(2..7));
        assert_eq!(w.range(4), Some(2..4));
        assert_eq!(w.range(2), None);
        assert_eq!(w.range(0), None);

        let far = DumpWindow::clamp(i64::MAX, 2000);
        assert_eq!(far.range(usize::MAX).map(|r| r.len()), Some(2000));
    }

    #[test]
    fn test_dump_case_insensitive() {
        let db = site_db();
        let lower = dump(&db, "google", 0, 200).unwrap();
        let mixed = dump(&db, "Google", 0, 200).unwrap();
        let upper = dump(&db, "GOOGLE", 0, 200).unwrap();
        assert_eq!(lower.total, 3);
        assert_eq!(lower.items.len(), 3);
        assert!(lower.items.iter().all(|i| !i.value.is_empty()));
        assert_eq!(lower, mixed);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_dump_trims_tag() {
        let db = site_db();
        assert_eq!(dump(&db, "  google\t", 0, 0).unwrap().total, 3);
    }

    #[test]
    fn test_dump_requires_tag() {
        let db = site_db();
        assert!(matches!(dump(&db, "", 0, 10), Err(Error::TagRequired)));
        assert!(matches!(dump(&db, "   ", 0, 10), Err(Error::TagRequired)));
    }

    #[test]
    fn test_dump_tag_not_found() {
        let db = site_db();
        assert!(matches!(
            dump(&db, "doesnotexist", 0, 10),
            Err(Error::TagNotFound(t)) if t == "doesnotexist"
        ));
    }

    #[test]
    fn test_dump_offset_past_end() {
        let db = site_db();
        let page = dump(&db, "google", 3, 10).unwrap();
        assert_eq!(page.total, 3);
        assert!(page.items.is_empty());

        let page = dump(&db, "google", 1000, 10).unwrap();
        assert_eq!(page.total, 3);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_dump_slice_preserves_order() {
        let db = site_db();
        let page = dump(&db, "big", 10, 3).unwrap();
        assert_eq!(page.total, 2500);
        let values: Vec<_> = page.items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["big10.com", "big11.com", "big12.com"]);
    }

    #[test]
    fn test_dump_limit_capped() {
        let db = site_db();
        assert_eq!(dump(&db, "big", 0, 5000).unwrap().items.len(), MAX_LIMIT);
        assert_eq!(dump(&db, "big", 0, 0).unwrap().items.len(), DEFAULT_LIMIT);
        assert_eq!(dump(&db, "big", 2400, 2000).unwrap().items.len(), 100);
    }

    #[test]
    fn test_dump_pagination_lengths() {
        let db = site_db();
        for offset in [0i64, 1, 499, 2499, 2500, 3000] {
            for limit in [1i64, 7, 200, 2000] {
                let page = dump(&db, "big", offset, limit).unwrap();
                let expected = if (offset as usize) < page.total {
                    (limit as usize).min(page.total - offset as usize)
                } else {
                    0
                };
                assert_eq!(page.items.len(), expected, "offset={} limit={}", offset, limit);
            }
        }
    }

    #[test]
    fn test_dump_first_duplicate_wins() {
        let db = GeoDatabase::IpList(vec![
            IpGroup {
                tag: "cn".to_string(),
                cidrs: vec![CidrRule {
                    ip: vec![1, 0, 1, 0],
                    prefix: 24,
                }],
            },
            IpGroup {
                tag: "CN".to_string(),
                cidrs: vec![CidrRule {
                    ip: vec![2, 0, 0, 0],
                    prefix: 8,
                }],
            },
        ]);
        let page = dump(&db, "Cn", 0, 10).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].value, "1.0.1.0/24");
    }

    #[test]
    fn test_dump_padded_stored_tag_not_matched() {
        let site = |tag: &str, n: usize| SiteGroup {
            tag: tag.to_string(),
            domains: (0..n)
                .map(|i| DomainRule {
                    match_type: 2,
                    value: format!("cn{}.com", i),
                    attributes: Vec::new(),
                })
                .collect(),
        };
        let db = GeoDatabase::SiteList(vec![site(" cn ", 1), site("CN", 2)]);
        assert_eq!(dump(&db, "cn", 0, 10).unwrap().total, 2);
        assert_eq!(dump(&db, " CN ", 0, 10).unwrap().total, 2);

        let padded_only = GeoDatabase::SiteList(vec![site(" cn ", 1)]);
        assert!(matches!(
            dump(&padded_only, "cn", 0, 10),
            Err(Error::TagNotFound(_))
        ));
    }

    #[test]
    fn test_dump_keeps_malformed_entries() {
        let db = GeoDatabase::IpList(vec![IpGroup {
            tag: "bad".to_string(),
            cidrs: vec![
                CidrRule {
                    ip: vec![1, 2, 3, 4, 5],
                    prefix: 8,
                },
                CidrRule {
                    ip: vec![8, 8, 8, 0],
                    prefix: 24,
                },
            ],
        }]);
        let page = dump(&db, "bad", 0, 10).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].value, "");
        assert_eq!(page.items[1].value, "8.8.8.0/24");
    }
}
