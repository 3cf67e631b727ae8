//! # Módulo HTTP
//!
//! Este módulo implementa el protocolo HTTP/1.1 desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Parsing de requests HTTP/1.1 (bytes → `Request`)
//! - Serialización de responses HTTP (`Response` → bytes)
//! - Manejo de status codes
//!
//! Es un codec puro: no hace I/O. El servidor lee los bytes del socket,
//! los pasa por aquí, y escribe el resultado de vuelta.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc\r\n
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Serialización de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use request::{ParseError, Request};
pub use response::Response;
pub use status::StatusCode;

/// Terminador de línea del protocolo
pub const CRLF: &str = "\r\n";
