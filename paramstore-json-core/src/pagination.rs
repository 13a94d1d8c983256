//! Sequential pagination over a [`ParameterSource`]
//!
//! Each page request depends on the token returned by the previous one, so
//! pages are fetched strictly one after another. Errors from the source abort
//! the walk unchanged; nothing is retried.

use crate::error::SourceResult;
use crate::record::ParameterRecord;
use crate::source::{PageRequest, ParameterSource};
use crate::tree;
use crate::value::ParamMap;

/// Fetch every record under `prefix`, across all pages
pub async fn fetch_all<S>(source: &S, prefix: &str) -> SourceResult<Vec<ParameterRecord>>
where
    S: ParameterSource + ?Sized,
{
    let mut records = Vec::new();
    for_each_page(source, prefix, |page| records.extend(page)).await?;
    Ok(records)
}

/// Fold every record under `prefix` into `root` as each page arrives
///
/// Returns the number of records written into `root`. On error `root` may
/// hold records from earlier pages; callers discard it.
pub async fn fold_pages<S>(source: &S, prefix: &str, root: &mut ParamMap) -> SourceResult<usize>
where
    S: ParameterSource + ?Sized,
{
    let mut folded = 0;
    for_each_page(source, prefix, |page| {
        folded += tree::fold(root, prefix, page);
    })
    .await?;
    Ok(folded)
}

/// Drive the page loop, handing each page's records to `on_page`
///
/// Returns the number of pages fetched.
async fn for_each_page<S, F>(source: &S, prefix: &str, mut on_page: F) -> SourceResult<usize>
where
    S: ParameterSource + ?Sized,
    F: FnMut(Vec<ParameterRecord>),
{
    let first = PageRequest::first(prefix);
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let request = match next_token.take() {
            Some(token) => first.continued(token),
            None => first.clone(),
        };

        let page = source.fetch_page(&request).await.inspect_err(|e| {
            tracing::debug!(prefix, page = pages + 1, error = %e, "parameter page fetch failed");
        })?;
        pages += 1;

        tracing::debug!(
            prefix,
            page = pages,
            records = page.records.len(),
            has_next = page.next_token.is_some(),
            "parameter page fetched"
        );

        on_page(page.records);

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::source::Page;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Replays canned pages and records every request
    #[derive(Debug)]
    struct ScriptedSource {
        pages: Mutex<VecDeque<SourceResult<Page>>>,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<SourceResult<Page>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ParameterSource for ScriptedSource {
        async fn fetch_page(&self, request: &PageRequest) -> SourceResult<Page> {
            self.requests.lock().push(request.clone());
            self.pages
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(SourceError::other("no more scripted pages")))
        }
    }

    #[tokio::test]
    async fn test_single_page() {
        let source = ScriptedSource::new(vec![Ok(Page::last(vec![ParameterRecord::plain(
            "/path/a", "1",
        )]))]);

        let records = fetch_all(&source, "/path").await.unwrap();
        assert_eq!(records.len(), 1);

        let requests = source.requests.lock();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], PageRequest::first("/path"));
    }

    #[tokio::test]
    async fn test_threads_tokens() {
        let source = ScriptedSource::new(vec![
            Ok(Page::new(
                vec![ParameterRecord::plain("/p/a", "1")],
                Some("token1".to_string()),
            )),
            Ok(Page::new(
                vec![ParameterRecord::plain("/p/b", "2")],
                Some("token2".to_string()),
            )),
            Ok(Page::last(vec![ParameterRecord::plain("/p/c", "3")])),
        ]);

        let records = fetch_all(&source, "/p").await.unwrap();
        assert_eq!(records.len(), 3);

        let tokens: Vec<_> = source
            .requests
            .lock()
            .iter()
            .map(|r| r.next_token.clone())
            .collect();
        assert_eq!(
            tokens,
            vec![None, Some("token1".to_string()), Some("token2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_error_on_later_page_propagates() {
        let source = ScriptedSource::new(vec![
            Ok(Page::new(
                vec![ParameterRecord::plain("/p/a", "1")],
                Some("token1".to_string()),
            )),
            Err(SourceError::throttled("Rate exceeded")),
        ]);

        let mut root = ParamMap::new();
        let err = fold_pages(&source, "/p", &mut root).await.unwrap_err();
        assert_eq!(err, SourceError::throttled("Rate exceeded"));
        assert_eq!(source.requests.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_fold_pages_counts_records() {
        let source = ScriptedSource::new(vec![
            Ok(Page::new(
                vec![
                    ParameterRecord::plain("/p/a", "1"),
                    ParameterRecord::plain("/p", "no key below prefix"),
                    ParameterRecord::plain("/p/b", "2"),
                ],
                Some("t".to_string()),
            )),
            Ok(Page::last(Vec::new())),
        ]);

        let mut root = ParamMap::new();
        let folded = fold_pages(&source, "/p", &mut root).await.unwrap();
        assert_eq!(folded, 2);
        assert_eq!(root.len(), 2);
    }
}
