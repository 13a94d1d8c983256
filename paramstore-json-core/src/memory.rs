//! In-memory parameter source for testing
//!
//! Stores records in a `BTreeMap` behind `Arc<RwLock>` so clones share the
//! same parameters. Pages are cut at a configurable size and continuation
//! tokens are opaque offsets, which lets tests drive multi-page reads without
//! a network.

use crate::error::{SourceError, SourceResult};
use crate::record::ParameterRecord;
use crate::source::{Page, PageRequest, ParameterSource};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Default page size, matching the parameter store's `MaxResults` ceiling
pub const DEFAULT_PAGE_SIZE: usize = 10;

const TOKEN_PREFIX: &str = "mem:";

/// In-memory parameter source
#[derive(Clone)]
pub struct MemoryParameterSource {
    /// Records keyed by full path
    records: Arc<RwLock<BTreeMap<String, ParameterRecord>>>,
    /// Every request served, in call order
    requests: Arc<RwLock<Vec<PageRequest>>>,
    page_size: usize,
    /// Fail the n-th call (1-based) with this error
    failure: Option<(usize, SourceError)>,
}

impl Default for MemoryParameterSource {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            page_size: DEFAULT_PAGE_SIZE,
            failure: None,
        }
    }
}

impl Debug for MemoryParameterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryParameterSource")
            .field("record_count", &self.records.read().len())
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl MemoryParameterSource {
    /// Create a new empty source
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = ParameterRecord>) -> Self {
        let source = Self::new();
        for record in records {
            source.put(record);
        }
        source
    }

    /// Records per page (at least one)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Fail the `call`-th fetch (1-based) with `error`
    pub fn fail_on_page(mut self, call: usize, error: SourceError) -> Self {
        self.failure = Some((call, error));
        self
    }

    /// Insert or replace a record
    pub fn put(&self, record: ParameterRecord) {
        self.records
            .write()
            .insert(record.full_path.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Requests served so far, in call order
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.read().clone()
    }

    fn matching(&self, request: &PageRequest) -> Vec<ParameterRecord> {
        let base = request.prefix.trim_end_matches('/');
        self.records
            .read()
            .values()
            .filter(|record| {
                let Some(rest) = record.full_path.strip_prefix(base) else {
                    return false;
                };
                let Some(rest) = rest.strip_prefix('/') else {
                    return false;
                };
                !rest.is_empty() && (request.recursive || !rest.contains('/'))
            })
            .cloned()
            .collect()
    }
}

fn parse_token(token: &str) -> SourceResult<usize> {
    token
        .strip_prefix(TOKEN_PREFIX)
        .and_then(|offset| offset.parse().ok())
        .ok_or_else(|| SourceError::invalid_parameter(format!("invalid next token: {}", token)))
}

#[async_trait]
impl ParameterSource for MemoryParameterSource {
    async fn fetch_page(&self, request: &PageRequest) -> SourceResult<Page> {
        let call = {
            let mut requests = self.requests.write();
            requests.push(request.clone());
            requests.len()
        };

        if let Some((fail_call, error)) = &self.failure {
            if *fail_call == call {
                return Err(error.clone());
            }
        }

        let offset = match &request.next_token {
            Some(token) => parse_token(token)?,
            None => 0,
        };

        let matching = self.matching(request);
        if offset > matching.len() {
            return Err(SourceError::invalid_parameter(format!(
                "next token past end of results: {}",
                offset
            )));
        }
        let end = offset.saturating_add(self.page_size).min(matching.len());
        let records = matching[offset..end].to_vec();
        let next_token = (end < matching.len()).then(|| format!("{}{}", TOKEN_PREFIX, end));

        Ok(Page::new(records, next_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> MemoryParameterSource {
        MemoryParameterSource::from_records(vec![
            ParameterRecord::plain("/app/a", "1"),
            ParameterRecord::plain("/app/b/c", "2"),
            ParameterRecord::plain("/application/x", "3"),
            ParameterRecord::plain("/other/y", "4"),
        ])
    }

    #[tokio::test]
    async fn test_memory_prefix_match() {
        let page = source()
            .fetch_page(&PageRequest::first("/app"))
            .await
            .unwrap();
        let paths: Vec<_> = page.records.iter().map(|r| r.full_path.as_str()).collect();
        assert_eq!(paths, vec!["/app/a", "/app/b/c"]);
        assert!(page.is_last());
    }

    #[tokio::test]
    async fn test_memory_root_prefix() {
        for prefix in ["", "/"] {
            let page = source()
                .fetch_page(&PageRequest::first(prefix))
                .await
                .unwrap();
            assert_eq!(page.records.len(), 4);
        }
    }

    #[tokio::test]
    async fn test_memory_non_recursive() {
        let mut request = PageRequest::first("/app");
        request.recursive = false;
        let page = source().fetch_page(&request).await.unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].full_path, "/app/a");
    }

    #[tokio::test]
    async fn test_memory_pages() {
        let source = source().with_page_size(3);
        let first = source.fetch_page(&PageRequest::first("")).await.unwrap();
        assert_eq!(first.records.len(), 3);
        let token = first.next_token.clone().unwrap();

        let second = source
            .fetch_page(&PageRequest::first("").continued(token))
            .await
            .unwrap();
        assert_eq!(second.records.len(), 1);
        assert!(second.is_last());
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_memory_bad_token() {
        let err = source()
            .fetch_page(&PageRequest::first("").continued("bogus".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn test_memory_token_past_end() {
        let source = source();
        for offset in [5, usize::MAX] {
            let token = format!("mem:{}", offset);
            let request = PageRequest::first("/app").continued(token);
            let err = source.fetch_page(&request).await.unwrap_err();
            assert!(matches!(err, SourceError::InvalidParameter(_)));
        }

        // Offset at the end is an empty final page
        let request = PageRequest::first("/app").continued("mem:2".to_string());
        let page = source.fetch_page(&request).await.unwrap();
        assert!(page.records.is_empty());
        assert!(page.is_last());
    }

    #[tokio::test]
    async fn test_memory_injected_failure() {
        let source = source().fail_on_page(1, SourceError::io("connection reset"));
        let err = source
            .fetch_page(&PageRequest::first("/app"))
            .await
            .unwrap_err();
        assert_eq!(err, SourceError::io("connection reset"));
    }
}
