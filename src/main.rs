fn main() {
    if let Err(err) = sharp_fish::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
