//! Same-origin check for form submissions.
//!
//! Browsers attach `Origin` (or at least `Referer`) to cross-site form posts.
//! A request carrying either header must name the host it was sent to;
//! requests without both are not browser form posts and pass.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, Uri, header, request::Parts},
};

use crate::error::Error;

/// Present in a handler's arguments: the request came from this site.
pub struct SameOrigin;

/// Compare the `Origin`/`Referer` authority with the `Host` header.
pub fn verify_same_origin(headers: &HeaderMap) -> Result<(), Error> {
  let Some(source) = headers
    .get(header::ORIGIN)
    .or_else(|| headers.get(header::REFERER))
  else {
    return Ok(());
  };

  let source = source
    .to_str()
    .ok()
    .and_then(|s| s.parse::<Uri>().ok())
    .ok_or(Error::Forbidden)?;
  let authority = source.authority().ok_or(Error::Forbidden)?;

  let host = headers
    .get(header::HOST)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Forbidden)?;

  if authority.as_str().eq_ignore_ascii_case(host) {
    Ok(())
  } else {
    Err(Error::Forbidden)
  }
}

impl<S> FromRequestParts<S> for SameOrigin
where
  S: Send + Sync,
{
  type Rejection = Error;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    verify_same_origin(&parts.headers)?;
    Ok(SameOrigin)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::Request;

  async fn extract(req: Request<axum::body::Body>) -> Result<SameOrigin, Error> {
    let (mut parts, _) = req.into_parts();
    SameOrigin::from_request_parts(&mut parts, &()).await
  }

  fn request(headers: &[(header::HeaderName, &str)]) -> Request<axum::body::Body> {
    let mut builder = Request::builder().method("POST").uri("/words/add");
    for (name, value) in headers {
      builder = builder.header(name, *value);
    }
    builder.body(axum::body::Body::empty()).unwrap()
  }

  #[tokio::test]
  async fn matching_origin() {
    let req = request(&[
      (header::HOST, "localhost:5000"),
      (header::ORIGIN, "http://localhost:5000"),
    ]);
    assert!(extract(req).await.is_ok());
  }

  #[tokio::test]
  async fn matching_referer() {
    let req = request(&[
      (header::HOST, "localhost:5000"),
      (header::REFERER, "http://localhost:5000/words/add"),
    ]);
    assert!(extract(req).await.is_ok());
  }

  #[tokio::test]
  async fn foreign_origin() {
    let req = request(&[
      (header::HOST, "localhost:5000"),
      (header::ORIGIN, "https://evil.example"),
    ]);
    assert!(matches!(extract(req).await, Err(Error::Forbidden)));
  }

  #[tokio::test]
  async fn opaque_origin() {
    let req = request(&[(header::HOST, "localhost:5000"), (header::ORIGIN, "null")]);
    assert!(matches!(extract(req).await, Err(Error::Forbidden)));
  }

  #[tokio::test]
  async fn origin_without_host() {
    let req = request(&[(header::ORIGIN, "http://localhost:5000")]);
    assert!(matches!(extract(req).await, Err(Error::Forbidden)));
  }

  #[tokio::test]
  async fn no_browser_headers() {
    assert!(extract(request(&[])).await.is_ok());
  }
}
