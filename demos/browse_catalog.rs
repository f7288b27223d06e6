use std::env;

use tarifario::{CatalogBuilder, QueryParams};
use tracing_subscriber::EnvFilter;

const SAMPLE_CSV: &str = "TUPA/TUSNE,Centro de Costo,Área responsable de brindar el servicio,Proceso,Tarifa,Monto,Requisitos,Correo,N° Celular
TUSNE,Biblioteca Central,Préstamos,Biblioteca,Carné de lector,S/ 10.00,Foto tamaño carné,biblioteca@uni.edu.pe,987 111 222
TUPA,Registros Académicos,Mesa de Partes,Constancias,Constancia de estudios,\"25,50\",Solicitud simple; Copia de DNI,registros@uni.edu.pe,987 333 444
TUPA,Registros Académicos,,Carnés,Duplicado de carné,15.00,Recibo de pago,registros@uni.edu.pe,
TUSNE,Oficina de Admisión,Admisión,Admisión,Examen de admisión,S/ 250.00,Ficha de inscripción,admision@uni.edu.pe,987 555 666
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Usage: browse_catalog [file.csv] [search text]
    let args: Vec<String> = env::args().collect();

    let builder = match args.get(1) {
        Some(path) => CatalogBuilder::new().filename(path),
        None => {
            println!("Using built-in sample catalog\n");
            CatalogBuilder::new().content(SAMPLE_CSV)
        }
    };
    let catalog = builder.build();

    let search = args.get(2).map(String::as_str).unwrap_or("");
    let page = catalog.query(&QueryParams::new().search(search))?;

    let options = catalog.filter_options()?;
    println!("Units: {}", options.units.join(", "));
    println!("Processes: {}\n", options.processes.join(", "));

    println!(
        "Page {} of {} ({} matches)\n",
        page.page, page.total_pages, page.total_items
    );

    for record in &page.items {
        println!("[{}] {}", record.origin, record.process);
        println!("  Tarifa: {}", record.fee_label);
        println!("  Unidad: {}", record.responsible_unit);
        println!("  Área: {}", record.area);
        println!("  Monto: {}", record.display_amount());
        for item in record.requirement_items() {
            println!("    - {}", item);
        }
        if let Some(url) = record.whatsapp_url() {
            println!("  WhatsApp: {}", url);
        }
        println!();
    }

    if page.is_empty() {
        println!("Sin resultados.");
    }

    Ok(())
}
