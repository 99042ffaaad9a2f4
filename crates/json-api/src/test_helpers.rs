//! Test helpers.

use std::{str::FromStr, sync::Arc};

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;

use catalog_app::{
    context::AppContext,
    domain::products::{
        MockProductsService,
        models::{Product, ProductUuid},
    },
};

use crate::state::State;

/// A product stamped at the Unix epoch so rendered timestamps are stable.
pub(crate) fn make_product(name: &str, price: &str) -> TestResult<Product> {
    Ok(Product {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        description: String::new(),
        price: Decimal::from_str(price)?,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    })
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
    })
}

/// Mount `route` behind injected state backed by `products`.
///
/// Mocks are strict: any call without a matching expectation fails the test.
pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}
