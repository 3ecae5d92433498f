// Courier - declarative HTTP request assembly
//
// This library turns field-based request descriptions into outbound HTTP
// requests ready for a transport.

// Re-export request assembly
pub use courier_request::*;

// Re-export the request crate itself
pub use courier_request;

/// Prelude for common imports.
pub mod prelude {
    pub use courier_request::prelude::*;
}
