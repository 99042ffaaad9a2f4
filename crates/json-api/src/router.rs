//! App Router

use salvo::Router;

use crate::products;

/// Product routes, mounted under `/api/v1`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api/v1").push(
        Router::with_path("products")
            .get(products::index::handler)
            .post(products::create::handler)
            .push(
                Router::with_path("{id}")
                    .get(products::get::handler)
                    .put(products::update::handler)
                    .delete(products::delete::handler),
            ),
    )
}
