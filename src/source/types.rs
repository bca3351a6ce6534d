//! Page source trait
//!
//! Defines the collaborator contract consumed by the fetcher.

use crate::error::SourceError;
use crate::types::{Page, PageNumber};
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for paginated data sources
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Item type carried by each page
    type Item: Send;

    /// Fetch one page.
    ///
    /// `None` requests the first page. The returned page carries the total
    /// page count as known at the time of the call.
    async fn get_page(&self, page: Option<PageNumber>) -> Result<Page<Self::Item>, SourceError>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for &S {
    type Item = S::Item;

    async fn get_page(&self, page: Option<PageNumber>) -> Result<Page<Self::Item>, SourceError> {
        (**self).get_page(page).await
    }
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for Arc<S> {
    type Item = S::Item;

    async fn get_page(&self, page: Option<PageNumber>) -> Result<Page<Self::Item>, SourceError> {
        (**self).get_page(page).await
    }
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for Box<S> {
    type Item = S::Item;

    async fn get_page(&self, page: Option<PageNumber>) -> Result<Page<Self::Item>, SourceError> {
        (**self).get_page(page).await
    }
}
