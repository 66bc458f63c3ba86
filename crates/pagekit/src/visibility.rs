//! Visible-element counting.
//!
//! Every element matching a selector gets its own displayed check. The
//! checks run concurrently on the caller's task and are joined by a
//! countdown: the count resolves once all of them have settled. The first
//! failure observed becomes the result. Checks still in flight at that point
//! are driven to completion rather than cancelled.

use crate::driver::PageDriver;
use crate::result::{PageError, PageResult};
use futures::stream::{FuturesUnordered, StreamExt};

/// Countdown join over per-element displayed checks.
#[derive(Debug)]
struct VisibilityJoin {
    remaining: usize,
    visible: usize,
    first_error: Option<PageError>,
}

impl VisibilityJoin {
    fn new(dispatched: usize) -> Self {
        Self {
            remaining: dispatched,
            visible: 0,
            first_error: None,
        }
    }

    fn settle(&mut self, outcome: PageResult<bool>) {
        self.remaining = self.remaining.saturating_sub(1);
        match outcome {
            Ok(true) => self.visible += 1,
            Ok(false) => {}
            Err(err) => {
                if self.first_error.is_none() {
                    self.first_error = Some(err);
                } else {
                    tracing::trace!(error = %err, "further displayed check failed");
                }
            }
        }
    }

    const fn is_settled(&self) -> bool {
        self.remaining == 0
    }

    fn finish(self) -> PageResult<usize> {
        debug_assert!(self.is_settled(), "join finished with checks outstanding");
        match self.first_error {
            Some(err) => Err(err),
            None => Ok(self.visible),
        }
    }
}

/// Count the elements matching `selector` that are currently displayed.
pub async fn count_visible<D: PageDriver>(driver: &D, selector: &str) -> PageResult<usize> {
    let elements = driver.find_elements(selector).await?;
    tracing::debug!(selector, matched = elements.len(), "counting visible elements");
    count_displayed(driver, &elements).await
}

/// Count how many of `elements` are currently displayed.
pub async fn count_displayed<D: PageDriver>(
    driver: &D,
    elements: &[D::Element],
) -> PageResult<usize> {
    if elements.is_empty() {
        return Ok(0);
    }

    let mut checks: FuturesUnordered<_> = elements
        .iter()
        .enumerate()
        .map(|(index, element)| async move { (index, driver.is_displayed(element).await) })
        .collect();

    let mut join = VisibilityJoin::new(elements.len());
    while let Some((index, outcome)) = checks.next().await {
        join.settle(outcome);
        tracing::trace!(index, remaining = join.remaining, "displayed check settled");
    }
    join.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElementSpec};

    mod join_tests {
        use super::*;

        #[test]
        fn test_counts_true_outcomes() {
            let mut join = VisibilityJoin::new(3);
            join.settle(Ok(true));
            join.settle(Ok(false));
            assert!(!join.is_settled());
            join.settle(Ok(true));
            assert!(join.is_settled());
            assert_eq!(join.finish().unwrap(), 2);
        }

        #[test]
        fn test_first_error_is_kept() {
            let mut join = VisibilityJoin::new(3);
            join.settle(Ok(true));
            join.settle(Err(PageError::driver("first")));
            join.settle(Err(PageError::driver("second")));
            let err = join.finish().unwrap_err();
            assert!(err.to_string().contains("first"));
        }
    }

    mod count_visible_tests {
        use super::*;

        #[tokio::test]
        async fn test_no_matches_is_zero() {
            let driver = MockDriver::new();
            assert_eq!(count_visible(&driver, ".row").await.unwrap(), 0);
            assert!(!driver.was_called("is_displayed"));
        }

        #[tokio::test]
        async fn test_counts_only_displayed() {
            let driver = MockDriver::new().with_elements(
                ".row",
                vec![
                    MockElementSpec::visible("r1"),
                    MockElementSpec::hidden("r2"),
                    MockElementSpec::visible("r3"),
                    MockElementSpec::hidden("r4"),
                ],
            );
            assert_eq!(count_visible(&driver, ".row").await.unwrap(), 2);
        }

        #[tokio::test]
        async fn test_out_of_order_settle() {
            let driver = MockDriver::new().with_elements(
                "li",
                vec![
                    MockElementSpec::visible("slow").settle_after(6),
                    MockElementSpec::hidden("medium").settle_after(3),
                    MockElementSpec::visible("fast"),
                ],
            );
            assert_eq!(count_visible(&driver, "li").await.unwrap(), 2);

            let settled: Vec<String> = driver
                .history()
                .into_iter()
                .filter(|c| c.starts_with("is_displayed"))
                .collect();
            assert_eq!(
                settled,
                vec![
                    "is_displayed:fast".to_string(),
                    "is_displayed:medium".to_string(),
                    "is_displayed:slow".to_string(),
                ]
            );
        }

        #[tokio::test]
        async fn test_failure_is_not_a_partial_count() {
            let driver = MockDriver::new().with_elements(
                "li",
                vec![
                    MockElementSpec::visible("a"),
                    MockElementSpec::failing("b", "stale element"),
                    MockElementSpec::visible("c"),
                ],
            );
            let err = count_visible(&driver, "li").await.unwrap_err();
            assert!(err.to_string().contains("stale element"));
        }

        #[tokio::test]
        async fn test_failure_does_not_cancel_pending_checks() {
            let driver = MockDriver::new().with_elements(
                "li",
                vec![
                    MockElementSpec::failing("early", "boom"),
                    MockElementSpec::visible("late").settle_after(10),
                ],
            );
            assert!(count_visible(&driver, "li").await.is_err());
            assert!(driver.was_called("is_displayed:late"));
        }

        #[tokio::test]
        async fn test_query_failure_propagates() {
            let driver = MockDriver::new();
            driver.fail_queries("session deleted");
            let err = count_visible(&driver, "li").await.unwrap_err();
            assert!(matches!(err, PageError::Driver { .. }));
        }
    }
}
