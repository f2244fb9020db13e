use log::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("setlist=info"))
        .format_timestamp(None)
        .init();

    if let Err(e) = setlist::runtime::run() {
        error!("{e}");
        std::process::exit(1);
    }
}
