//! # Handlers de Archivos
//! src/handlers/files.rs
//!
//! Implementación de las rutas `/files/{name}`:
//! - `GET /files/{name}`: lee el archivo completo del directorio raíz
//! - `POST /files/{name}`: crea el directorio raíz si falta y escribe
//!   el body del request tal cual
//!
//! El filesystem llega como colaborador (`FileStore`): estos handlers
//! no contienen llamadas directas a `std::fs`.

use crate::http::{Request, Response, StatusCode};
use crate::storage::FileStore;
use std::io;
use std::path::Path;

/// Handler para `GET /files/{name}`
///
/// Lee `{root}/{name}` a completitud vía el store. Si el archivo existe,
/// 200 con `Content-Type: application/octet-stream` y el contenido
/// completo como body; si no existe o no se puede leer, 404.
pub fn read_file_handler(req: &Request, store: &dyn FileStore, root: &Path) -> Response {
    let name = match file_name(req.path()) {
        Some(n) => n,
        None => return Response::new(StatusCode::NotFound),
    };

    match store.read_all(&root.join(name)) {
        Ok(contents) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", "application/octet-stream")
            .with_body_bytes(contents),
        // NotFound y cualquier otro error de I/O colapsan en 404
        Err(_) => Response::new(StatusCode::NotFound),
    }
}

/// Handler para `POST /files/{name}`
///
/// Crea el directorio raíz si no existe y escribe el body del request
/// byte a byte en `{root}/{name}`. 200 con body vacío si todo sale bien;
/// cualquier fallo de filesystem es 404.
pub fn write_file_handler(req: &Request, store: &dyn FileStore, root: &Path) -> Response {
    let name = match file_name(req.path()) {
        Some(n) => n,
        None => return Response::new(StatusCode::NotFound),
    };

    if let Err(e) = store.ensure_dir(root) {
        return io_failure("ensure_dir", root, &e);
    }

    let path = root.join(name);
    match store.write_all(&path, req.body()) {
        Ok(()) => Response::new(StatusCode::Ok),
        Err(e) => io_failure("write", &path, &e),
    }
}

/// Extrae el nombre de archivo del target `/files/{name}`
///
/// Rechaza nombres vacíos y nombres con `..` o `\` (no se consulta el
/// filesystem para targets que escapan del directorio raíz).
fn file_name(path: &str) -> Option<&str> {
    let name = path.strip_prefix("/files/")?;

    if name.is_empty() || name.contains("..") || name.contains('\\') {
        return None;
    }

    Some(name)
}

/// Loguea un fallo de filesystem y produce el 404 del contrato
fn io_failure(op: &str, path: &Path, err: &io::Error) -> Response {
    eprintln!("   ❌ fs {} failed for {}: {}", op, path.display(), err);
    Response::new(StatusCode::NotFound)
}
