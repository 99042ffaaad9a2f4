//! HTTP span helpers.

use uuid::Uuid;

/// Collapse product ids in a request path so spans and metric labels group
/// by route rather than by record.
pub(super) fn route_template(path: &str) -> String {
    let segments = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_stays_root() {
        assert_eq!(route_template("/"), "/");
    }

    #[test]
    fn product_ids_are_replaced() {
        let id = Uuid::now_v7();

        assert_eq!(
            route_template(&format!("/api/v1/products/{id}")),
            "/api/v1/products/{id}"
        );
    }

    #[test]
    fn non_uuid_segments_are_kept() {
        assert_eq!(route_template("/api/v1/products/"), "/api/v1/products");
        assert_eq!(route_template("/api/v1/products/abc"), "/api/v1/products/abc");
    }
}
