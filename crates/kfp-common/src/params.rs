//! Rendering typed parameters onto a request.

use crate::error::{RequestError, WriteError};
use crate::formats::Registry;
use crate::request::ClientRequest;

/// Implemented by every operation's parameter type.
pub trait WriteToRequest {
    /// Apply timeout, query and header parameters to `req`.
    ///
    /// A rejected timeout is returned as-is. Parameter failures are collected
    /// and reported together; parameters attached before a failure stay
    /// attached.
    fn write_to_request(
        &self,
        req: &mut dyn ClientRequest,
        reg: &Registry,
    ) -> Result<(), WriteError>;
}

/// Attach `value` as query parameter `name` unless it is absent or empty.
///
/// A failure is pushed onto `errors` so the caller can keep going.
pub fn write_query_param(
    req: &mut dyn ClientRequest,
    errors: &mut Vec<RequestError>,
    name: &str,
    value: Option<&str>,
) {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return;
    };
    if let Err(e) = req.set_query_param(name, value) {
        errors.push(e);
    }
}

/// Several independent parameter failures reported as one error.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[diagnostic(code(kfp::validation))]
pub struct CompositeValidationError {
    /// Every failure, in the order the parameters were written
    #[related]
    pub errors: Vec<RequestError>,
}

impl CompositeValidationError {
    /// `Ok` when `errors` is empty, otherwise the composite.
    pub fn check(errors: Vec<RequestError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }
}

impl std::fmt::Display for CompositeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failure list:")?;
        for e in &self.errors {
            write!(f, "\n{}", e)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpRequest;
    use http::Method;
    use url::Url;

    fn request() -> HttpRequest {
        HttpRequest::new(
            Method::GET,
            &Url::parse("http://localhost:8888").unwrap(),
            "/x",
        )
    }

    #[test]
    fn absent_and_empty_values_are_skipped() {
        let mut req = request();
        let mut errors = Vec::new();
        write_query_param(&mut req, &mut errors, "a", None);
        write_query_param(&mut req, &mut errors, "b", Some(""));
        write_query_param(&mut req, &mut errors, "c", Some("0"));
        assert!(errors.is_empty());
        assert_eq!(req.query_string().unwrap(), "c=0");
    }

    #[test]
    fn failures_are_collected_not_returned() {
        let mut req = request();
        let mut errors = Vec::new();
        write_query_param(&mut req, &mut errors, "", Some("lost"));
        write_query_param(&mut req, &mut errors, "kept", Some("yes"));
        assert_eq!(errors.len(), 1);
        assert_eq!(req.query_param("kept"), Some("yes"));

        let err = CompositeValidationError::check(errors).unwrap_err();
        assert!(err.to_string().starts_with("validation failure list:\n"));
    }

    #[test]
    fn check_passes_with_no_errors() {
        assert!(CompositeValidationError::check(Vec::new()).is_ok());
    }
}
