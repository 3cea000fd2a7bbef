//! API response type definitions.
//!
//! This module defines the success responses an endpoint can declare. The
//! response determines the `{Name}ApiResponse` alias in generated code.

use crate::schema::TypeRef;

/// Describes the success response of an API endpoint.
///
/// ## Examples
///
/// JSON response (most common):
///
/// ```
/// use splitapi_define::{ApiResponse, TypeRef};
///
/// let response = ApiResponse::json(200, TypeRef::array(TypeRef::named("UserSchema")));
/// assert_eq!(response.status(), 200);
/// ```
///
/// Empty response (for DELETE or 204 responses):
///
/// ```
/// use splitapi_define::ApiResponse;
///
/// let response = ApiResponse::Empty { status: 204 };
/// assert!(response.type_ref().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    /// JSON response with a typed schema.
    Json {
        /// Declared status code (`200` for `default` responses).
        status: u16,
        /// Response body type.
        ty: TypeRef,
    },

    /// No response body expected.
    Empty {
        /// Declared status code.
        status: u16,
    },
}

impl ApiResponse {
    /// Creates a JSON response.
    pub fn json(status: u16, ty: TypeRef) -> Self {
        Self::Json { status, ty }
    }

    /// Declared status code.
    pub fn status(&self) -> u16 {
        match self {
            Self::Json { status, .. } | Self::Empty { status } => *status,
        }
    }

    /// The body type, if any.
    pub fn type_ref(&self) -> Option<&TypeRef> {
        match self {
            Self::Json { ty, .. } => Some(ty),
            Self::Empty { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_response_exposes_type() {
        let response = ApiResponse::json(201, TypeRef::named("UserSchema"));
        assert_eq!(response.status(), 201);
        assert_eq!(response.type_ref(), Some(&TypeRef::named("UserSchema")));
    }

    #[test]
    fn empty_response_has_no_type() {
        let response = ApiResponse::Empty { status: 204 };
        assert_eq!(response.status(), 204);
        assert!(response.type_ref().is_none());
    }
}
