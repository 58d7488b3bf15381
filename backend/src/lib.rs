//! Ski station management backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// OpenAPI document served to Swagger UI and exported for tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
