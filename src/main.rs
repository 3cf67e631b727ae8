//! # HTTP File Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1.
//!
//! La configuración llega por CLI o variables de entorno; el directorio
//! de archivos se inyecta al Router en la construcción del servidor.

use http_file_server::config::Config;
use http_file_server::server::Server;

fn main() {
    println!("=================================");
    println!("  HTTP/1.1 File Server");
    println!("=================================\n");

    // Crear configuración desde CLI args / env
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // Crear el servidor
    let mut server = Server::new(config);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
