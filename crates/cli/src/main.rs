fn main() {
    if let Err(e) = jpackstage_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
