//! Alert and pagination response headers.
//!
//! Alert headers tell the client UI what happened (`blogApp.entry.created`)
//! and to which record (`X-blogApp-params: 42`). Failure alerts carry an
//! error key instead. Pagination headers expose the total count and
//! `first`/`prev`/`next`/`last` links for a page.

use axum::http::header::LINK;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use blog_core::pagination::Page;

/// Prefix of alert message keys.
pub const APPLICATION_NAME: &str = "blogApp";

pub const ALERT_HEADER: HeaderName = HeaderName::from_static("x-blogapp-alert");
pub const ERROR_HEADER: HeaderName = HeaderName::from_static("x-blogapp-error");
pub const PARAMS_HEADER: HeaderName = HeaderName::from_static("x-blogapp-params");
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Insert a header, skipping values that are not valid header text.
fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => tracing::warn!(header = %name, value, "Dropping invalid header value"),
    }
}

pub fn alert(message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, ALERT_HEADER, message);
    insert(&mut headers, PARAMS_HEADER, param);
    headers
}

pub fn entity_creation_alert(entity_name: &str, param: &str) -> HeaderMap {
    alert(&format!("{APPLICATION_NAME}.{entity_name}.created"), param)
}

pub fn entity_update_alert(entity_name: &str, param: &str) -> HeaderMap {
    alert(&format!("{APPLICATION_NAME}.{entity_name}.updated"), param)
}

pub fn entity_deletion_alert(entity_name: &str, param: &str) -> HeaderMap {
    alert(&format!("{APPLICATION_NAME}.{entity_name}.deleted"), param)
}

pub fn failure_alert(entity_name: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, ERROR_HEADER, &format!("error.{error_key}"));
    insert(&mut headers, PARAMS_HEADER, entity_name);
    headers
}

/// `X-Total-Count` and `Link` headers for `page`, with links built on
/// `base_url` (which may already carry query parameters).
pub fn pagination<T>(page: &Page<T>, base_url: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(
        &mut headers,
        TOTAL_COUNT_HEADER,
        &page.total_elements.to_string(),
    );
    insert(&mut headers, LINK, &link_header(page, base_url));
    headers
}

fn page_uri(base_url: &str, page: i64, size: i64) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}page={page}&size={size}")
}

pub fn link_header<T>(page: &Page<T>, base_url: &str) -> String {
    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(format!(
            "<{}>; rel=\"next\"",
            page_uri(base_url, page.number.saturating_add(1), page.size)
        ));
    }
    if page.has_previous() {
        links.push(format!(
            "<{}>; rel=\"prev\"",
            page_uri(base_url, page.number - 1, page.size)
        ));
    }
    let last = (page.total_pages() - 1).max(0);
    links.push(format!(
        "<{}>; rel=\"last\"",
        page_uri(base_url, last, page.size)
    ));
    links.push(format!(
        "<{}>; rel=\"first\"",
        page_uri(base_url, 0, page.size)
    ));
    links.join(",")
}

#[cfg(test)]
mod tests {
    use blog_core::pagination::PageRequest;

    use super::*;

    fn page(number: i64, size: i64, total: i64) -> Page<()> {
        let request = PageRequest {
            page: number,
            size,
            sort: None,
        };
        Page::new(vec![], &request, total)
    }

    #[test]
    fn creation_alert_headers() {
        let headers = entity_creation_alert("entry", "12");
        assert_eq!(headers[ALERT_HEADER], "blogApp.entry.created");
        assert_eq!(headers[PARAMS_HEADER], "12");
    }

    #[test]
    fn failure_alert_headers() {
        let headers = failure_alert("entry", "idexists");
        assert_eq!(headers[ERROR_HEADER], "error.idexists");
        assert_eq!(headers[PARAMS_HEADER], "entry");
    }

    #[test]
    fn first_page_links() {
        let links = link_header(&page(0, 20, 45), "/api/entries?eagerload=false");
        assert_eq!(
            links,
            "</api/entries?eagerload=false&page=1&size=20>; rel=\"next\",\
             </api/entries?eagerload=false&page=2&size=20>; rel=\"last\",\
             </api/entries?eagerload=false&page=0&size=20>; rel=\"first\""
        );
    }

    #[test]
    fn middle_page_has_next_and_prev() {
        let links = link_header(&page(1, 10, 30), "/api/entries");
        assert!(links.contains("</api/entries?page=2&size=10>; rel=\"next\""));
        assert!(links.contains("</api/entries?page=0&size=10>; rel=\"prev\""));
        assert!(links.contains("</api/entries?page=2&size=10>; rel=\"last\""));
    }

    #[test]
    fn empty_result_points_last_at_first_page() {
        let links = link_header(&page(0, 20, 0), "/api/entries");
        assert_eq!(
            links,
            "</api/entries?page=0&size=20>; rel=\"last\",</api/entries?page=0&size=20>; rel=\"first\""
        );
    }

    #[test]
    fn page_far_past_the_end_links_back() {
        let links = link_header(&page(i64::MAX / 20, 20, 1), "/api/entries");
        assert!(!links.contains("rel=\"next\""));
        assert!(links.contains("</api/entries?page=0&size=20>; rel=\"last\""));
    }

    #[test]
    fn pagination_sets_total_count() {
        let headers = pagination(&page(0, 20, 45), "/api/entries");
        assert_eq!(headers[TOTAL_COUNT_HEADER], "45");
        assert!(headers.contains_key(LINK));
    }
}
