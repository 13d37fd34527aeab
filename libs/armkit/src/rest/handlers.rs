use armkit_errors::{ErrorResponse, catalog, finalize};
use armkit_resource_id::ResourceId;
use axum::Json;
use axum::extract::Extension;
use axum::http::{HeaderMap, Uri, header};
use url::Url;

use crate::api::{ArmRequestContext, PaginatedList};
use crate::frontend::is_skip_token_param;
use crate::rest::error::controller_error_to_response;
use crate::rest::routes::{ApiState, PaginationLimits};

const API_VERSION_PARAM: &str = "api-version";
const TOP_PARAM: &str = "top";
const CORRELATION_HEADERS: [&str; 2] = ["x-ms-correlation-request-id", "x-request-id"];

pub async fn list_resources(
    Extension(state): Extension<ApiState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Json<PaginatedList>, ErrorResponse> {
    let path = uri.path();

    let resource_id = ResourceId::parse(path).map_err(|e| {
        let message = format!("'{path}' is not a valid resource id: {e}");
        finalize(catalog::INVALID_RESOURCE_ID.as_response(message), path)
    })?;

    let Some(operation) = state.lists.resolve(&resource_id) else {
        return Err(finalize(
            catalog::NOT_FOUND.as_response(format!("no list operation is registered for '{path}'")),
            path,
        ));
    };

    let params = QueryParams::from_uri(&uri);
    let api_version = params.api_version.ok_or_else(|| {
        finalize(
            catalog::INVALID_API_VERSION
                .as_response("the 'api-version' query parameter is required"),
            path,
        )
    })?;
    let top = parse_top(params.top.as_deref(), state.pagination)
        .map_err(|resp| finalize(resp, path))?;

    let request_url = request_url(&uri, &headers).ok_or_else(|| {
        finalize(
            catalog::BAD_REQUEST.as_response("the request url could not be determined"),
            path,
        )
    })?;

    let ctx = ArmRequestContext::new(resource_id, api_version, request_url)
        .with_skip_token(params.skip_token)
        .with_top(top)
        .with_correlation_id(correlation_id(&headers));

    tracing::debug!(
        resource_type = operation.resource_type(),
        api_version = %ctx.api_version,
        correlation_id = ctx.correlation_id.as_deref().unwrap_or_default(),
        "list request"
    );

    let page = operation
        .run(&ctx)
        .await
        .map_err(|e| controller_error_to_response(&e, ctx.resource_id.as_str()))?;
    Ok(Json(page))
}

#[derive(Debug, Default)]
struct QueryParams {
    api_version: Option<String>,
    skip_token: Option<String>,
    top: Option<String>,
}

impl QueryParams {
    fn from_uri(uri: &Uri) -> Self {
        let mut params = Self::default();
        let Some(query) = uri.query() else {
            return params;
        };
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let bare = key.strip_prefix('$').unwrap_or(&key);
            if key.eq_ignore_ascii_case(API_VERSION_PARAM) {
                params.api_version = Some(value.into_owned()).filter(|v| !v.is_empty());
            } else if is_skip_token_param(&key) {
                params.skip_token = Some(value.into_owned()).filter(|v| !v.is_empty());
            } else if bare.eq_ignore_ascii_case(TOP_PARAM) {
                params.top = Some(value.into_owned());
            }
        }
        params
    }
}

fn parse_top(raw: Option<&str>, limits: PaginationLimits) -> Result<Option<usize>, ErrorResponse> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let out_of_range = || {
        catalog::BAD_REQUEST
            .as_response(format!(
                "top must be an integer between {} and {}",
                limits.min_top, limits.max_top
            ))
            .with_target(TOP_PARAM)
    };
    let top: usize = raw.trim().parse().map_err(|_| out_of_range())?;
    if top < limits.min_top || top > limits.max_top {
        return Err(out_of_range());
    }
    Ok(Some(top))
}

/// The URL the client called. A front door forwards the original URL in `Referer`;
/// otherwise it is rebuilt from `Host`.
fn request_url(uri: &Uri, headers: &HeaderMap) -> Option<Url> {
    let referer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Url::parse(v).ok());
    if let Some(url) = referer {
        return Some(url);
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());
    Url::parse(&format!("http://{host}{path_and_query}")).ok()
}

fn correlation_id(headers: &HeaderMap) -> Option<String> {
    CORRELATION_HEADERS
        .iter()
        .find_map(|name| headers.get(*name))
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn query_params_accept_dollar_prefixes() {
        let uri: Uri = "/x?API-VERSION=v1&$top=10&$skipToken=abc".parse().unwrap();
        let params = QueryParams::from_uri(&uri);
        assert_eq!(params.api_version.as_deref(), Some("v1"));
        assert_eq!(params.top.as_deref(), Some("10"));
        assert_eq!(params.skip_token.as_deref(), Some("abc"));
    }

    #[test]
    fn empty_values_are_absent() {
        let uri: Uri = "/x?api-version=&skipToken=".parse().unwrap();
        let params = QueryParams::from_uri(&uri);
        assert!(params.api_version.is_none());
        assert!(params.skip_token.is_none());
    }

    #[test]
    fn top_is_bounded() {
        let limits = PaginationLimits::default();
        assert_eq!(parse_top(None, limits).unwrap(), None);
        assert_eq!(parse_top(Some("5"), limits).unwrap(), Some(5));
        assert_eq!(parse_top(Some("1000"), limits).unwrap(), Some(1000));

        for bad in ["4", "1001", "-1", "ten"] {
            let resp = parse_top(Some(bad), limits).unwrap_err();
            assert_eq!(resp.status, StatusCode::BAD_REQUEST);
            assert_eq!(resp.error.target.as_deref(), Some("top"));
        }
    }

    #[test]
    fn request_url_prefers_referer() {
        let uri: Uri = "/planes/radius/local/providers/A.B/c?api-version=v1"
            .parse()
            .unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "internal:9443".parse().unwrap());
        assert_eq!(
            request_url(&uri, &headers).unwrap().as_str(),
            "http://internal:9443/planes/radius/local/providers/A.B/c?api-version=v1"
        );

        headers.insert(
            header::REFERER,
            "https://management.example.com/planes/radius/local/providers/A.B/c?api-version=v1"
                .parse()
                .unwrap(),
        );
        assert_eq!(
            request_url(&uri, &headers).unwrap().host_str(),
            Some("management.example.com")
        );
    }

    #[test]
    fn correlation_id_prefers_arm_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "req-1".parse().unwrap());
        assert_eq!(correlation_id(&headers).as_deref(), Some("req-1"));
        headers.insert("x-ms-correlation-request-id", "corr-1".parse().unwrap());
        assert_eq!(correlation_id(&headers).as_deref(), Some("corr-1"));
    }
}
