use clap::Parser;

fn main() {
    docker_build_action::init_logger();

    if let Err(error) = docker_build_action::cli::Cli::parse().run() {
        docker_build_action::set_failed(&error.to_string());
        std::process::exit(1);
    }
}
