//! The paginated fetch capability a reader is built on
//!
//! A [`ParameterSource`] returns one page of parameters per call. Backends
//! (AWS Systems Manager, the in-memory [`MemoryParameterSource`](crate::MemoryParameterSource))
//! implement it; the pagination driver owns the token threading.

use crate::error::SourceResult;
use crate::record::ParameterRecord;
use async_trait::async_trait;
use std::fmt::Debug;

/// Parameters of a single page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Path prefix under which parameters are enumerated
    pub prefix: String,
    /// Descend into every level below `prefix`, not just direct children
    pub recursive: bool,
    /// Return decrypted values for secret parameters
    pub with_decryption: bool,
    /// Continuation token from the previous page
    ///
    /// `None` on the first call of a read.
    pub next_token: Option<String>,
}

impl PageRequest {
    /// First-page request for a prefix, recursive and decrypting
    pub fn first(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            recursive: true,
            with_decryption: true,
            next_token: None,
        }
    }

    /// Same request, continued from `token`
    pub fn continued(&self, token: String) -> Self {
        Self {
            next_token: Some(token),
            ..self.clone()
        }
    }
}

/// One page of fetched parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub records: Vec<ParameterRecord>,

    /// Continuation token for fetching the next page
    ///
    /// `None` if there are no more results.
    pub next_token: Option<String>,
}

impl Page {
    pub fn new(records: Vec<ParameterRecord>, next_token: Option<String>) -> Self {
        Self {
            records,
            next_token,
        }
    }

    /// Final page with the given records
    pub fn last(records: Vec<ParameterRecord>) -> Self {
        Self::new(records, None)
    }

    pub fn is_last(&self) -> bool {
        self.next_token.is_none()
    }
}

/// Paginated enumeration of parameters by path
///
/// Implementations must not retry or reorder on behalf of the caller: each
/// call is exactly one round trip against the store.
#[async_trait]
pub trait ParameterSource: Debug + Send + Sync {
    /// Fetch one page of parameters
    async fn fetch_page(&self, request: &PageRequest) -> SourceResult<Page>;
}

#[async_trait]
impl<S: ParameterSource + ?Sized> ParameterSource for std::sync::Arc<S> {
    async fn fetch_page(&self, request: &PageRequest) -> SourceResult<Page> {
        (**self).fetch_page(request).await
    }
}

#[async_trait]
impl<S: ParameterSource + ?Sized> ParameterSource for Box<S> {
    async fn fetch_page(&self, request: &PageRequest) -> SourceResult<Page> {
        (**self).fetch_page(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_flags() {
        let request = PageRequest::first("/path");
        assert_eq!(request.prefix, "/path");
        assert!(request.recursive);
        assert!(request.with_decryption);
        assert!(request.next_token.is_none());
    }

    #[test]
    fn test_continued_keeps_prefix() {
        let request = PageRequest::first("/path").continued("token1".to_string());
        assert_eq!(request.prefix, "/path");
        assert_eq!(request.next_token.as_deref(), Some("token1"));
    }
}
