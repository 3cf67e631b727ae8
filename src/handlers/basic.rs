//! # Handlers Básicos
//! src/handlers/basic.rs
//!
//! Implementación de las rutas que no tocan el filesystem:
//! - `GET /`: status check, 200 con body vacío
//! - `GET /echo/{rest}`: refleja los segmentos del path concatenados
//! - `GET /user-agent`: refleja el header User-Agent

use crate::http::{Request, Response, StatusCode};

/// Handler para `GET /`
///
/// Status check mínimo: 200 OK con body vacío, sin headers,
/// sin importar qué headers traiga el request.
pub fn root_handler(_req: &Request) -> Response {
    Response::new(StatusCode::Ok)
}

/// Handler para `GET /echo/{rest}`
///
/// El body es el resto del path después de `/echo`, con los separadores
/// `/` internos eliminados: los segmentos se concatenan, no se re-unen.
///
/// - `/echo/abc` → `"abc"`
/// - `/echo/ab/cd` → `"abcd"`
/// - `/echo/` → `""` (200 igualmente)
///
/// `Content-Length` es la longitud en bytes del body.
pub fn echo_handler(req: &Request) -> Response {
    // split('/') de "/echo/ab/cd" da ["", "echo", "ab", "cd"]:
    // los segmentos tras "echo" se concatenan sin separador
    let body: String = req.path().split('/').skip(2).collect();

    Response::new(StatusCode::Ok)
        .with_header("Content-Type", "text/plain")
        .with_body(&body)
}

/// Handler para `GET /user-agent`
///
/// Refleja el valor exacto del header `User-Agent` (lookup sensible a
/// mayúsculas). Si el header no viene, 400.
pub fn user_agent_handler(req: &Request) -> Response {
    match req.header("User-Agent") {
        Some(user_agent) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body(user_agent),
        None => Response::new(StatusCode::BadRequest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request(raw: &[u8]) -> Request {
        Request::parse(raw).unwrap()
    }

    // ==================== ROOT ====================

    #[test]
    fn test_root_handler_empty_ok() {
        let request = make_request(b"GET / HTTP/1.1\r\n\r\n");
        let response = root_handler(&request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body().is_empty());
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_root_handler_ignores_headers() {
        let request = make_request(b"GET / HTTP/1.1\r\nUser-Agent: x\r\nHost: y\r\n\r\n");
        let response = root_handler(&request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body().is_empty());
    }

    // ==================== ECHO ====================

    #[test]
    fn test_echo_handler_single_segment() {
        let request = make_request(b"GET /echo/abc HTTP/1.1\r\n\r\n");
        let response = echo_handler(&request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"abc");
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("Content-Length"), Some("3"));
    }

    #[test]
    fn test_echo_handler_concatenates_segments() {
        let request = make_request(b"GET /echo/ab/cd HTTP/1.1\r\n\r\n");
        let response = echo_handler(&request);

        // Los segmentos se concatenan sin separador
        assert_eq!(response.body(), b"abcd");
        assert_eq!(response.header("Content-Length"), Some("4"));
    }

    #[test]
    fn test_echo_handler_trailing_slash_empty_body() {
        let request = make_request(b"GET /echo/ HTTP/1.1\r\n\r\n");
        let response = echo_handler(&request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body().is_empty());
        assert_eq!(response.header("Content-Length"), Some("0"));
    }

    #[test]
    fn test_echo_handler_many_segments() {
        let request = make_request(b"GET /echo/a/b/c/d HTTP/1.1\r\n\r\n");
        let response = echo_handler(&request);

        assert_eq!(response.body(), b"abcd");
    }

    // ==================== USER-AGENT ====================

    #[test]
    fn test_user_agent_handler_reflects_header() {
        let request =
            make_request(b"GET /user-agent HTTP/1.1\r\nUser-Agent: test-client/1.0\r\n\r\n");
        let response = user_agent_handler(&request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"test-client/1.0");
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("Content-Length"), Some("15"));
    }

    #[test]
    fn test_user_agent_handler_missing_header() {
        let request = make_request(b"GET /user-agent HTTP/1.1\r\nHost: localhost\r\n\r\n");
        let response = user_agent_handler(&request);

        assert_eq!(response.status(), StatusCode::BadRequest);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_user_agent_handler_content_length_in_bytes() {
        // Valor con caracteres multi-byte: Content-Length cuenta bytes
        let request =
            make_request("GET /user-agent HTTP/1.1\r\nUser-Agent: ñandú\r\n\r\n".as_bytes());
        let response = user_agent_handler(&request);

        assert_eq!(response.body(), "ñandú".as_bytes());
        assert_eq!(response.header("Content-Length"), Some("7"));
    }
}
