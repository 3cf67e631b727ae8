//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo decide qué handler atiende cada request parseado.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router::dispatch → Handler → Response
//! ```
//!
//! El router se construye con el directorio de archivos y el colaborador
//! de filesystem: `dispatch` es una función determinista del request más
//! esa configuración, sin estado global. El matching es por segmentos
//! literales del path (primer match gana) y siempre produce exactamente
//! una `Response` bien formada; los fallos nunca escapan como errores.
//!
//! ## Tabla de rutas
//!
//! | Método | Path               | Comportamiento                       |
//! |--------|--------------------|--------------------------------------|
//! | GET    | `/`                | 200, body vacío                      |
//! | GET    | `/user-agent`      | refleja el header, ausente → 400     |
//! | GET    | `/echo/{rest}`     | segmentos concatenados, text/plain   |
//! | GET    | `/files/{name}`    | contenido del archivo o 404          |
//! | POST   | `/files/{name}`    | escribe el body, 200 o 404           |
//! | otro   | (cualquiera)       | 400                                  |

use crate::handlers;
use crate::http::{Request, Response, StatusCode};
use crate::storage::{DiskStore, FileStore};
use std::path::PathBuf;

/// Router del servidor: tabla de rutas + dependencias de las rutas de archivos
pub struct Router {
    /// Directorio raíz para las rutas `/files/*`
    files_dir: PathBuf,

    /// Colaborador de filesystem (inyectable en tests)
    store: Box<dyn FileStore>,
}

impl Router {
    /// Crea un router con un `FileStore` explícito
    pub fn new(files_dir: impl Into<PathBuf>, store: Box<dyn FileStore>) -> Self {
        Self {
            files_dir: files_dir.into(),
            store,
        }
    }

    /// Crea un router que usa el filesystem real
    ///
    /// # Ejemplo
    /// ```
    /// use http_file_server::router::Router;
    /// use http_file_server::http::Request;
    ///
    /// let router = Router::with_disk_store("./data");
    /// let request = Request::parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
    /// let response = router.dispatch(&request);
    /// assert_eq!(response.status().as_u16(), 200);
    /// ```
    pub fn with_disk_store(files_dir: impl Into<PathBuf>) -> Self {
        Self::new(files_dir, Box::new(DiskStore))
    }

    /// Selecciona y ejecuta el handler para un request
    ///
    /// Primer match gana; cualquier combinación método/path fuera de la
    /// tabla produce 400 con body vacío.
    pub fn dispatch(&self, request: &Request) -> Response {
        let path = request.path();
        // El primer segmento del path decide la ruta: "/echo/ab/cd" → "echo"
        let head = path.split('/').nth(1).unwrap_or("");

        match (request.method(), head) {
            ("GET", "") if path == "/" => handlers::root_handler(request),
            ("GET", "user-agent") if path == "/user-agent" => {
                handlers::user_agent_handler(request)
            }
            ("GET", "echo") => handlers::echo_handler(request),
            ("GET", "files") => {
                handlers::read_file_handler(request, self.store.as_ref(), &self.files_dir)
            }
            ("POST", "files") => {
                handlers::write_file_handler(request, self.store.as_ref(), &self.files_dir)
            }
            _ => Response::new(StatusCode::BadRequest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::path::Path;
    use std::sync::Mutex;

    /// FileStore en memoria para probar el router sin tocar el disco
    #[derive(Default)]
    struct MemoryStore {
        files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    }

    impl MemoryStore {
        fn with_file(path: &str, contents: &[u8]) -> Self {
            let store = Self::default();
            store
                .files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), contents.to_vec());
            store
        }
    }

    impl FileStore for MemoryStore {
        fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn write_all(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), contents.to_vec());
            Ok(())
        }

        fn ensure_dir(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }
    }

    /// FileStore que falla en toda operación (simula errores de I/O)
    struct BrokenStore;

    impl FileStore for BrokenStore {
        fn read_all(&self, _path: &Path) -> io::Result<Vec<u8>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "disk on fire"))
        }

        fn write_all(&self, _path: &Path, _contents: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "disk on fire"))
        }

        fn ensure_dir(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "disk on fire"))
        }
    }

    fn memory_router() -> Router {
        Router::new("/root-dir", Box::new(MemoryStore::default()))
    }

    fn parse(raw: &[u8]) -> Request {
        Request::parse(raw).unwrap()
    }

    // ==================== TABLA DE RUTAS ====================

    #[test]
    fn test_dispatch_root() {
        let router = memory_router();
        let response = router.dispatch(&parse(b"GET / HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_dispatch_echo() {
        let router = memory_router();
        let response = router.dispatch(&parse(b"GET /echo/abc HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"abc");
        assert_eq!(response.header("Content-Length"), Some("3"));
    }

    #[test]
    fn test_dispatch_echo_multi_segment() {
        let router = memory_router();
        let response = router.dispatch(&parse(b"GET /echo/ab/cd HTTP/1.1\r\n\r\n"));

        assert_eq!(response.body(), b"abcd");
        assert_eq!(response.header("Content-Length"), Some("4"));
    }

    #[test]
    fn test_dispatch_user_agent() {
        let router = memory_router();
        let response = router.dispatch(&parse(
            b"GET /user-agent HTTP/1.1\r\nUser-Agent: test-client/1.0\r\n\r\n",
        ));

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"test-client/1.0");
    }

    #[test]
    fn test_dispatch_user_agent_missing_header() {
        let router = memory_router();
        let response = router.dispatch(&parse(b"GET /user-agent HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_dispatch_file_read_found() {
        let store = MemoryStore::with_file("/root-dir/foo.txt", b"hello");
        let router = Router::new("/root-dir", Box::new(store));

        let response = router.dispatch(&parse(b"GET /files/foo.txt HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"hello");
        assert_eq!(
            response.header("Content-Type"),
            Some("application/octet-stream")
        );
        assert_eq!(response.header("Content-Length"), Some("5"));
    }

    #[test]
    fn test_dispatch_file_read_missing() {
        let router = memory_router();
        let response = router.dispatch(&parse(b"GET /files/missing.txt HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_dispatch_file_write_then_read() {
        let router = memory_router();

        let post = parse(b"POST /files/foo.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello");
        let response = router.dispatch(&post);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body().is_empty());

        let get = parse(b"GET /files/foo.txt HTTP/1.1\r\n\r\n");
        let response = router.dispatch(&get);
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"hello");
    }

    #[test]
    fn test_dispatch_file_write_binary_body_verbatim() {
        let router = memory_router();
        let mut raw = b"POST /files/bin HTTP/1.1\r\nContent-Length: 6\r\n\r\n".to_vec();
        raw.extend_from_slice(&[0xFF, b'\r', b'\n', 0x00, 0x01, 0x02]);

        let response = router.dispatch(&parse(&raw));
        assert_eq!(response.status(), StatusCode::Ok);

        let response = router.dispatch(&parse(b"GET /files/bin HTTP/1.1\r\n\r\n"));
        assert_eq!(response.body(), &[0xFF, b'\r', b'\n', 0x00, 0x01, 0x02]);
    }

    // ==================== FALLBACKS → 400 ====================

    #[test]
    fn test_dispatch_unknown_path() {
        let router = memory_router();
        let response = router.dispatch(&parse(b"GET /nonexistent HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_dispatch_unknown_method() {
        let router = memory_router();
        let response = router.dispatch(&parse(b"DELETE /files/foo.txt HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_dispatch_post_to_echo() {
        let router = memory_router();
        let response = router.dispatch(&parse(b"POST /echo/abc HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_dispatch_user_agent_with_extra_segment() {
        // "/user-agent/extra" no es la ruta exacta
        let router = memory_router();
        let response = router.dispatch(&parse(
            b"GET /user-agent/extra HTTP/1.1\r\nUser-Agent: x\r\n\r\n",
        ));

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_dispatch_echo_prefix_lookalike() {
        // "/echoXYZ" no matchea el segmento literal "echo"
        let router = memory_router();
        let response = router.dispatch(&parse(b"GET /echoXYZ HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    // ==================== ERRORES DE FILESYSTEM ====================

    #[test]
    fn test_dispatch_file_read_io_error_is_404() {
        let router = Router::new("/root-dir", Box::new(BrokenStore));
        let response = router.dispatch(&parse(b"GET /files/foo.txt HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_dispatch_file_write_io_error_is_404() {
        let router = Router::new("/root-dir", Box::new(BrokenStore));
        let response = router.dispatch(&parse(
            b"POST /files/foo.txt HTTP/1.1\r\nContent-Length: 2\r\n\r\nhi",
        ));

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_dispatch_file_traversal_is_404() {
        let store = MemoryStore::with_file("/etc/passwd", b"secret");
        let router = Router::new("/root-dir", Box::new(store));
        let response = router.dispatch(&parse(b"GET /files/../etc/passwd HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    // ==================== DETERMINISMO ====================

    #[test]
    fn test_dispatch_is_pure() {
        // Mismo request + misma configuración ⇒ misma response,
        // independiente de llamadas anteriores
        let router = memory_router();
        let request = parse(b"GET /echo/repeat HTTP/1.1\r\n\r\n");

        let first = router.dispatch(&request);
        router.dispatch(&parse(b"GET /user-agent HTTP/1.1\r\n\r\n"));
        let second = router.dispatch(&request);

        assert_eq!(first.status(), second.status());
        assert_eq!(first.body(), second.body());
        assert_eq!(first.headers(), second.headers());
    }
}
