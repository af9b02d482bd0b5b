#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = formloom::run_from_env() {
        eprintln!("formloom: {error}");
        std::process::exit(error.exit_code());
    }
}
