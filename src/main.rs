use hubcap::cli;
use hubcap::ui::output;

fn main() {
    if let Err(error) = cli::run() {
        output::error(format!("{:#}", error));
        std::process::exit(1);
    }
}
