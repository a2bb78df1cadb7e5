fn main() {
    if let Err(e) = truthlens_lib::run() {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
