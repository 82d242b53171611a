#![deny(
    clippy::correctness,
    clippy::style,
    keyword_idents,
    macro_use_extern_crate,
    non_ascii_idents,
    nonstandard_style,
    noop_method_call,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_crate_dependencies
)]
#![warn(
    clippy::cargo,
    clippy::complexity,
    clippy::perf,
    clippy::suspicious,
    rust_2018_idioms,
    unused
)]
#![allow(clippy::multiple_crate_versions)]

use base64::Engine;

mod lib;
mod model;
mod server;

fn main() {
    let config = get_config();

    init_logging(&config);
    log::debug!("{:?}", &config);

    let catalog = match model::Catalog::load(&config.catalog) {
        Ok(catalog) => catalog,
        Err(err) => abort(&format!("'{}'", config.catalog.display()), &err),
    };

    log::info!(
        "loaded {} database(s) from '{}'",
        catalog.databases.len(),
        config.catalog.display()
    );

    let executor = std::sync::Arc::new(lib::ProcessExecutor::new(config.blast_bin_dir.clone()));
    let (state, dispatcher) = match model::AppState::new(&config, catalog, executor) {
        Ok(initialized) => initialized,
        Err(err) => abort("application state", &err),
    };

    server::start_http_service(config, state, dispatcher);
}

fn get_config() -> model::Config<'static> {
    use clap::Parser;

    let args: model::CliArgs = model::CliArgs::parse();

    model::Config {
        admin_token: args.admin_token,
        allow_subject_upload: args.allow_subject_upload,
        blast_bin_dir: args.blast_bin_dir,
        blast_threads: args.blast_threads,
        browser_base_url: args.browser_base_url,
        catalog: args.catalog,
        hmac_secret: std::borrow::Cow::Owned(
            lib::BASE64_ENGINE
                .decode(&args.hmac_secret)
                .expect("HMAC secret couldn't be [base64] decoded"),
        ),
        http_workers: args.http_workers,
        job_workers: args.job_workers,
        listen: parse_socket_listener(&args.listen),
        log_level: args.log_level,
        max_residues: args.max_residues,
        work_dir: args.work_dir,
    }
}

fn parse_socket_listener(input: &str) -> model::SocketListener {
    use std::str::FromStr;

    if let Ok(address) = std::net::SocketAddr::from_str(input) {
        return model::SocketListener::Tcp(address);
    }

    #[cfg(unix)]
    if let Ok(path) = std::path::PathBuf::from_str(input) {
        return model::SocketListener::Unix(path);
    }

    panic!("Listener could not be parsed: '{}'", input)
}

fn init_logging(config: &model::Config<'_>) {
    if config.log_level != log::LevelFilter::Off {
        let mut logger = fern::Dispatch::new().level(config.log_level);

        if config.log_level != log::LevelFilter::Error {
            logger = logger.chain(
                fern::Dispatch::new()
                    .filter(|meta| meta.level() != log::LevelFilter::Error)
                    .chain(std::io::stdout()),
            )
        }

        logger
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Error)
                    .chain(std::io::stderr()),
            )
            .apply()
            .expect("logging subscriber registration failed");
    } else {
        log::set_max_level(config.log_level);
    }
}

fn abort(subject: &str, err: &dyn std::error::Error) -> ! {
    let mut message = format!("Couldn't initialize {}: {}", subject, err);
    let mut source = err.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    log::error!("{}", message);
    std::process::exit(1)
}
