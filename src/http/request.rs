//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa la mitad de decodificación del wire codec:
//! convierte los bytes crudos de una conexión en un `Request` estructurado.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! POST /files/foo.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Start line**: `METHOD /target HTTP/1.1` (exactamente 3 tokens)
//! 2. **Headers**: Pares `Name: Value` (uno por línea, separador `": "`)
//! 3. **Empty line**: `\r\n` que separa headers del body
//! 4. **Body**: bytes opacos, puede contener CRLF sin romper el parsing
//!
//! La separación head/body se hace a nivel de bytes (primer `\r\n\r\n`),
//! de modo que un body binario nunca se re-interpreta como headers.

use std::collections::HashMap;

use super::CRLF;

/// Representa un request HTTP/1.1 parseado
///
/// `method` y `version` se conservan como tokens crudos: un método
/// desconocido no es un error de parsing, es decisión del router (400).
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP tal como llegó (ej: "GET", "POST")
    method: String,

    /// Target de la petición (ej: "/echo/abc", "/files/foo.txt")
    path: String,

    /// Versión del protocolo (ej: "HTTP/1.1")
    version: String,

    /// Headers HTTP; nombres duplicados: gana la última aparición
    headers: HashMap<String, String>,

    /// Body del request, bytes opacos (posiblemente vacío)
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request vacío
    EmptyRequest,

    /// Start line sin exactamente 3 tokens separados por espacio
    InvalidStartLine,

    /// Start line o headers con bytes que no son UTF-8 válido
    InvalidEncoding,

    /// Línea de header sin el separador ": "
    InvalidHeader(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidStartLine => write!(f, "Invalid start line format"),
            ParseError::InvalidEncoding => write!(f, "Request head is not valid UTF-8"),
            ParseError::InvalidHeader(h) => write!(f, "Invalid header: {}", h),
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea un request HTTP/1.1 desde bytes
    ///
    /// # Argumentos
    ///
    /// * `raw` - Buffer conteniendo el request HTTP completo
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Start line o header malformado
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http_file_server::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.path(), "/echo/abc");
    /// ```
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        if raw.is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // Separar head y body en el primer \r\n\r\n, a nivel de bytes.
        // Todo lo que sigue a la línea vacía es body literal: nunca se
        // vuelve a escanear en busca de headers.
        let (head_bytes, body) = match find_blank_line(raw) {
            Some(pos) => (&raw[..pos], raw[pos + 4..].to_vec()),
            None => (raw, Vec::new()),
        };

        // El head (start line + headers) sí debe ser texto
        let head = std::str::from_utf8(head_bytes)
            .map_err(|_| ParseError::InvalidEncoding)?;

        if head.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let mut lines = head.split(CRLF);

        // 1. Parsear la start line (primera línea)
        let (method, path, version) = Self::parse_start_line(lines.next().unwrap_or(""))?;

        // 2. Parsear headers (resto de líneas del head)
        let headers = Self::parse_headers(lines)?;

        Ok(Request {
            method,
            path,
            version,
            headers,
            body,
        })
    }

    /// Parsea la start line (primera línea del request)
    ///
    /// Formato: `GET /path HTTP/1.1` (exactamente 3 tokens separados
    /// por espacios simples, todos no vacíos).
    fn parse_start_line(line: &str) -> Result<(String, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(ParseError::InvalidStartLine);
        }

        Ok((
            parts[0].to_string(),
            parts[1].to_string(),
            parts[2].to_string(),
        ))
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato `Name: Value`, separados por la primera
    /// ocurrencia de `": "`. Nombres duplicados: gana la última.
    fn parse_headers<'a>(
        lines: impl Iterator<Item = &'a str>,
    ) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            if line.is_empty() {
                continue;
            }

            match line.split_once(": ") {
                Some((name, value)) => {
                    headers.insert(name.to_string(), value.to_string());
                }
                None => {
                    // Header sin ": " es inválido
                    return Err(ParseError::InvalidHeader(line.to_string()));
                }
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path (target) del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (lookup exacto, sensible a mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Busca el primer `\r\n\r\n` y retorna el offset donde empieza
fn find_blank_line(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n")
}
