//! Assembles a complete listing from an offset/limit endpoint.

use log::debug;
use std::future::Future;

use crate::error::Error;

/// Page size used for every paged listing.
pub const PAGE_SIZE: u64 = 50;

/// One slice of a listing together with the metadata the service returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub offset: u64,
    pub total: u64,
}

/// A listing that failed part-way: every item received before the failure,
/// in order, plus the failure itself.
#[derive(Debug)]
pub struct Interrupted<T> {
    pub items: Vec<T>,
    pub error: Error,
}

/// Fetches pages strictly one after another, starting at offset 0, until the
/// next page would start at or past the most recently reported total.
/// A page that would not move the offset forward ends the listing with a
/// `MalformedField` error instead of looping.
///
/// Items are returned in the order received. Each page's continuation is
/// derived from the previous response, so there is no fan-out and no
/// snapshot consistency across pages.
pub async fn paginate<T, F, Fut>(page_size: u64, mut fetch: F) -> Result<Vec<T>, Interrupted<T>>
where
    F: FnMut(u64, u64) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    let mut items = Vec::new();
    let mut offset = 0;

    loop {
        let page = match fetch(offset, page_size).await {
            Ok(page) => page,
            Err(error) => return Err(Interrupted { items, error }),
        };

        debug!(
            "Page at offset {} returned {} items (total {})",
            page.offset,
            page.items.len(),
            page.total
        );
        let next = page.offset.saturating_add(page_size);
        let done = next >= page.total;
        if !done && next <= offset {
            return Err(Interrupted {
                items,
                error: Error::malformed("offset", page.offset),
            });
        }

        items.extend(page.items);
        if done {
            return Ok(items);
        }
        offset = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn backend(total: u64, fail_at: Option<u64>) -> impl Fn(u64, u64) -> Result<Page<u64>, Error> {
        move |offset, limit| {
            if fail_at == Some(offset) {
                return Err(Error::UnexpectedStatus {
                    status: 500,
                    body: String::new(),
                });
            }
            let end = (offset + limit).min(total);
            Ok(Page {
                items: (offset..end).collect(),
                offset,
                total,
            })
        }
    }

    #[tokio::test]
    async fn test_collects_every_page_in_order() {
        let offsets = RefCell::new(Vec::new());
        let serve = backend(120, None);
        let items = paginate(PAGE_SIZE, |offset, limit| {
            offsets.borrow_mut().push(offset);
            let page = serve(offset, limit);
            async move { page }
        })
        .await
        .unwrap();

        assert_eq!(items, (0..120).collect::<Vec<_>>());
        assert_eq!(*offsets.borrow(), vec![0, 50, 100]);
    }

    #[tokio::test]
    async fn test_exact_multiple_stops_without_empty_page() {
        let offsets = RefCell::new(Vec::new());
        let serve = backend(100, None);
        let items = paginate(PAGE_SIZE, |offset, limit| {
            offsets.borrow_mut().push(offset);
            let page = serve(offset, limit);
            async move { page }
        })
        .await
        .unwrap();

        assert_eq!(items.len(), 100);
        assert_eq!(*offsets.borrow(), vec![0, 50]);
    }

    #[tokio::test]
    async fn test_empty_listing_takes_one_request() {
        let calls = RefCell::new(0);
        let serve = backend(0, None);
        let items = paginate(PAGE_SIZE, |offset, limit| {
            *calls.borrow_mut() += 1;
            let page = serve(offset, limit);
            async move { page }
        })
        .await
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(*calls.borrow(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_pages() {
        let serve = backend(100, Some(50));
        let interrupted = paginate(PAGE_SIZE, |offset, limit| {
            let page = serve(offset, limit);
            async move { page }
        })
        .await
        .unwrap_err();

        assert_eq!(interrupted.items, (0..50).collect::<Vec<_>>());
        assert!(interrupted.error.is_transport());
    }

    #[tokio::test]
    async fn test_shrinking_total_uses_latest_value() {
        let offsets = RefCell::new(Vec::new());
        let items = paginate(PAGE_SIZE, |offset, _| {
            offsets.borrow_mut().push(offset);
            // 150 monitors at first, 60 by the time the second page is read.
            let total = if offset == 0 { 150 } else { 60 };
            let end = (offset + PAGE_SIZE).min(total);
            let page = Ok::<_, Error>(Page {
                items: (offset..end).collect::<Vec<u64>>(),
                offset,
                total,
            });
            async move { page }
        })
        .await
        .unwrap();

        assert_eq!(items.len(), 60);
        assert_eq!(*offsets.borrow(), vec![0, 50]);
    }

    #[tokio::test]
    async fn test_offset_that_never_advances_is_an_error() {
        let calls = RefCell::new(0);
        let interrupted = paginate(PAGE_SIZE, |_, limit| {
            *calls.borrow_mut() += 1;
            // Always claims to be the first page of a large listing.
            let page = Ok::<_, Error>(Page {
                items: (0..limit).collect::<Vec<u64>>(),
                offset: 0,
                total: 500,
            });
            async move { page }
        })
        .await
        .unwrap_err();

        assert_eq!(interrupted.items.len(), 50);
        assert!(matches!(
            interrupted.error,
            Error::MalformedField { field: "offset", .. }
        ));
        assert_eq!(*calls.borrow(), 2);
    }

    #[tokio::test]
    async fn test_huge_offset_does_not_overflow() {
        let items = paginate(PAGE_SIZE, |_, _| {
            let page = Ok::<_, Error>(Page {
                items: vec![1u64],
                offset: u64::MAX - 10,
                total: u64::MAX,
            });
            async move { page }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1]);
    }
}
