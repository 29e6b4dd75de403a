fn main() {
    if let Err(err) = funnel_chart::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
