//! # Colaborador de Filesystem
//! src/storage/mod.rs
//!
//! El router nunca llama al filesystem directamente: depende de este
//! trait. Eso mantiene `dispatch` como una función pura y testeable
//! (los tests del router inyectan un store en memoria).
//!
//! Tres primitivas, alineadas con lo que necesitan las rutas `/files/*`:
//! - `read_all`: lee el contenido COMPLETO de un archivo, sin importar
//!   su tamaño (nada de buffers fijos de 1024 bytes que truncan)
//! - `write_all`: crea/sobrescribe un archivo con los bytes dados
//! - `ensure_dir`: crea el directorio raíz si no existe (idempotente)

use std::fs;
use std::io;
use std::path::Path;

/// Primitivas de filesystem que consume el router
///
/// La distinción NotFound vs otros errores de I/O viaja en
/// `io::ErrorKind`; el router decide el status code.
pub trait FileStore: Send + Sync {
    /// Lee el contenido completo de un archivo
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Crea (o sobrescribe) un archivo con el contenido dado
    fn write_all(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Crea un directorio (y sus padres) si no existe
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;
}

/// Implementación real sobre `std::fs`
#[derive(Debug, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        // fs::read lee hasta EOF: archivos más grandes que cualquier
        // buffer interno llegan completos
        fs::read(path)
    }

    fn write_all(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }
}
