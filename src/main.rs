fn main() {
    if let Err(err) = spec_card_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
