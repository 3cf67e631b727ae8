//! # HTTP File Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 concurrente implementado desde cero: parsea requests
//! a mano, enruta a un conjunto fijo de handlers y serializa responses
//! byte a byte. Una conexión = un request = una response (sin keep-alive).
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing y serialización del protocolo HTTP/1.1 (wire codec)
//! - `router`: Enrutamiento de peticiones a handlers
//! - `handlers`: Implementación de las rutas (root, echo, user-agent, files)
//! - `storage`: Colaborador de filesystem detrás de un trait
//! - `server`: Loop de accept TCP y manejo de conexiones
//! - `config`: Configuración vía CLI y variables de entorno
//!
//! ## Flujo de datos
//!
//! ```text
//! bytes → Request::parse → Request → Router::dispatch → Response
//!       → Response::to_bytes → bytes
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http_file_server::server::Server;
//! use http_file_server::config::Config;
//!
//! let config = Config::default();
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod http;
pub mod config;
pub mod storage;
pub mod handlers;
pub mod router;
pub mod server;
