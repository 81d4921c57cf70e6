mod menu;
mod scenarios;
mod util;

use log::info;

use rollbar_demo::{
    add_payload_hook, handle_panics, AppEnvironment, ContextEnricher, Error, LevelFilter, Settings,
};

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let environment = AppEnvironment::detect();
    info!("ENVIRONMENT={}", environment.name);

    // A configuration problem stops us here, before any menu is shown.
    let settings = Settings::resolve(&environment)?;

    rollbar_demo::init(
        settings.rollbar.access_token.clone(),
        environment.name.clone(),
        settings.rollbar.code_version.clone(),
    );

    if settings.rollbar.errors_only {
        add_payload_hook(LevelFilter::errors_only());
    }
    add_payload_hook(ContextEnricher::default());

    handle_panics!();

    println!("\nRollbar initialized successfully!");
    println!(
        "Environment: {} | Code version: {}",
        environment.name, settings.rollbar.code_version
    );
    println!("Starting interactive demo...\n");

    let menu = menu::Menu::new(scenarios::all());
    menu.run();

    Ok(())
}
