use colored::Colorize;

fn main() {
    if let Err(err) = lore::run() {
        eprintln!("{} {}", "error:".red(), err);
        std::process::exit(1);
    }
}
