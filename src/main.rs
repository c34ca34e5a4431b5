fn main() {
    if let Err(e) = healthbot::run() {
        eprintln!("HealthBot failed to start: {e}");
        std::process::exit(1);
    }
}
