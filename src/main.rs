fn main() {
    if let Err(err) = json_csv::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
