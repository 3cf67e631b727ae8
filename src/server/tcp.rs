//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio
//! thread, sin estado mutable compartido entre conexiones: el único
//! punto serializado es el loop de accept.
//!
//! Dentro de una conexión todo es secuencial:
//! leer → parsear → enrutar → serializar → escribir → cerrar.

use crate::config::Config;
use crate::http::{Request, Response, StatusCode};
use crate::router::Router;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Tamaño del chunk de lectura del socket
///
/// Es solo el paso del loop de lectura: un request más grande se
/// acumula completo en el buffer, nunca se trunca.
const READ_CHUNK_SIZE: usize = 1024;

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor; el directorio de archivos de la configuración
    /// queda inyectado en el Router desde acá
    pub fn new(config: Config) -> Self {
        let router = Router::with_disk_store(config.directory.clone());

        Self {
            config,
            router: Arc::new(router),
            listener: None,
        }
    }

    /// Hace bind del listener y retorna la dirección local real
    ///
    /// Con puerto 0 el sistema asigna uno efímero; la dirección retornada
    /// es la que hay que usar para conectarse (útil en tests).
    pub fn bind(&mut self) -> io::Result<SocketAddr> {
        let address = self.config.address();
        println!("[*] Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address)?;
        let local_addr = listener.local_addr()?;
        println!("[+] Servidor escuchando en {}", local_addr);
        println!("[*] Modo concurrente: un thread por conexión\n");

        self.listener = Some(listener);
        Ok(local_addr)
    }

    /// Loop de accept: una conexión → un thread
    ///
    /// El loop nunca espera a que un thread termine; dos conexiones
    /// pueden completarse en cualquier orden.
    pub fn serve(&mut self) -> io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = self.listener.as_ref().unwrap();

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    println!(" ✅ Nueva conexión desde: {} (spawning thread)", peer_addr);

                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(stream, router) {
                            eprintln!("   ❌ Error en conexión: {}", e);
                        }
                    });
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Bind + serve (bloquea el thread actual)
    pub fn run(&mut self) -> io::Result<()> {
        self.bind()?;
        self.serve()
    }

    /// Maneja una conexión completa: un request, una response, cerrar
    ///
    /// El socket se cierra en todo camino de salida (drop al retornar).
    /// Un request que no parsea recibe `400 Bad Request` con body vacío
    /// y la conexión se cierra; el proceso sigue atendiendo.
    fn handle_connection(mut stream: TcpStream, router: Arc<Router>) -> io::Result<()> {
        let start = Instant::now();

        // Request ID único para correlacionar las líneas de log
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        start.elapsed().as_nanos().hash(&mut hasher);
        thread::current().id().hash(&mut hasher);
        let request_id = format!("{:016x}", hasher.finish());

        let raw = read_request(&mut stream)?;

        if raw.is_empty() {
            println!("   ✅ Conexión cerrada sin datos");
            return Ok(());
        }

        println!("   ✅ {} bytes [req_id: {}]", raw.len(), &request_id[..8]);

        let response = match Request::parse(&raw) {
            Ok(request) => {
                println!("   ✅ {} {}", request.method(), request.path());
                router.dispatch(&request)
            }
            Err(e) => {
                println!("   ❌ Parse error: {}", e);
                Response::new(StatusCode::BadRequest)
            }
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        let latency = start.elapsed();
        println!(
            "   ✅ {} ({:.2}ms) [req_id: {}]\n",
            response.status(),
            latency.as_secs_f64() * 1000.0,
            &request_id[..8]
        );

        Ok(())
    }
}

/// Lee los bytes de exactamente un request
///
/// Lee por chunks acumulando en un buffer hasta tener el head completo
/// (primer `\r\n\r\n`) y, si el request declara `Content-Length`, esa
/// cantidad de bytes de body. También termina en EOF del peer.
fn read_request(stream: &mut TcpStream) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let bytes_read = stream.read(&mut chunk)?;
        if bytes_read == 0 {
            break; // EOF
        }
        buffer.extend_from_slice(&chunk[..bytes_read]);

        if let Some(head_end) = find_blank_line(&buffer) {
            let body_bytes = buffer.len() - (head_end + 4);
            if body_bytes >= declared_content_length(&buffer[..head_end]) {
                break;
            }
        }
    }

    Ok(buffer)
}

/// Busca el primer `\r\n\r\n` en el buffer
fn find_blank_line(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Extrae el valor de `Content-Length` del head, 0 si no viene
///
/// Lookup literal (sensible a mayúsculas), igual que el resto del codec.
fn declared_content_length(head: &[u8]) -> usize {
    let head = match std::str::from_utf8(head) {
        Ok(h) => h,
        Err(_) => return 0,
    };

    head.split("\r\n")
        .skip(1)
        .find_map(|line| line.strip_prefix("Content-Length: "))
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}
