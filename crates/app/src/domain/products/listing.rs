//! Filtered product listing.
//!
//! The record store can filter but cannot order, so a page is produced by
//! scanning the full filtered set, sorting it in memory and slicing out the
//! requested window. The match count comes from a separate count query
//! issued alongside the scan.

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::products::{
    filter::StoreFilter,
    models::Product,
    query::{ProductQuery, SortDirection, SortField},
    store::{ProductStore, StoreError},
};

/// One page of products plus the number of products matching the filter
/// across all pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total_items: u64,
}

/// Run a list query against `store`.
///
/// # Errors
///
/// Returns the first [`StoreError`] raised by either the scan or the count.
pub async fn list_products(
    store: &dyn ProductStore,
    query: &ProductQuery,
) -> Result<ProductPage, StoreError> {
    let filter = StoreFilter::from(query);

    // The scan is deliberately unbounded: a page-sized limit applied before
    // sorting could drop items that belong on the requested page.
    let (mut products, total_items) =
        tokio::try_join!(store.scan(&filter, None), store.count(&filter))?;

    debug!(
        scanned = products.len(),
        total_items,
        sort_by = query.sort_field.as_str(),
        sort_order = query.sort_direction.as_str(),
        "scanned products for listing"
    );

    sort_products(&mut products, query.sort_field, query.sort_direction);

    Ok(ProductPage {
        items: paginate(products, query.offset(), query.page_size),
        total_items,
    })
}

/// Stable sort: products with equal keys keep their scan order.
pub(crate) fn sort_products(products: &mut [Product], field: SortField, direction: SortDirection) {
    products.sort_by(|a, b| {
        let ordering = compare(a, b, field);

        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare(a: &Product, b: &Product, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.as_bytes().cmp(b.name.as_bytes()),
        SortField::Price => a.price.cmp(&b.price),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

pub(crate) fn paginate(products: Vec<Product>, offset: usize, page_size: u32) -> Vec<Product> {
    if offset >= products.len() {
        return Vec::new();
    }

    let page_size = usize::try_from(page_size).unwrap_or(usize::MAX);

    products.into_iter().skip(offset).take(page_size).collect()
}
