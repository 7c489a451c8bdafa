use cfg_if::cfg_if;

cfg_if! { if #[cfg(feature = "ssr")] {
    use crate::server::{AppError, AppState};
    use axum::{
        body::Body as AxumBody,
        extract::State,
        http::{header::ACCEPT_ENCODING, HeaderMap, Request, StatusCode, Uri},
        response::{IntoResponse, Response as AxumResponse},
    };
    use tower::ServiceExt;
    use tower_http::services::ServeDir;
}}

/// Serves the built site (the page, the wasm bundle) for anything that is
/// not an API route.
#[cfg(feature = "ssr")]
pub async fn file_and_error_handler(
    uri: Uri,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> AxumResponse {
    match get_static_file(headers, uri.clone(), &state.site_root).await {
        Ok(res) if res.status() == StatusCode::OK => res,
        Ok(res) => {
            log::trace!("no static file for {uri}: {}", res.status());
            AppError::NotFound.into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(feature = "ssr")]
async fn get_static_file(
    headers: HeaderMap,
    uri: Uri,
    root: &str,
) -> Result<AxumResponse, AppError> {
    let mut req = Request::builder().uri(uri);
    if let Some(encodings) = headers.get(ACCEPT_ENCODING) {
        req = req.header(ACCEPT_ENCODING, encodings);
    }
    let req = req.body(AxumBody::empty()).map_err(|e| {
        log::error!("could not build static file request: {e}");
        AppError::InternalServerError
    })?;
    // `ServeDir` implements `tower::Service` so we can call it with `tower::ServiceExt::oneshot`
    match ServeDir::new(root).precompressed_gzip().oneshot(req).await {
        Ok(res) => Ok(res.into_response()),
        Err(e) => {
            log::error!("static file service failed: {e}");
            Err(AppError::InternalServerError)
        }
    }
}
