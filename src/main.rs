use colored::Colorize;

fn main() {
    if let Err(err) = modkit::run() {
        eprintln!("{} {}", "✗".bright_red().bold(), err);
        std::process::exit(1);
    }
}
