mod hooks;

use anyhow::{bail, Context, Result};
use panelnav::config::AppConfig;
use panelnav::dispatch::ActionDispatcher;
use panelnav::input::{InputMultiplexer, MockButtons, SysfsGpio};
use panelnav::menu::load_registry;
use panelnav::nav::NavigationController;
use panelnav::render::TerminalDisplay;
use panelnav::runtime::{ExitReason, TickLoop};
use panelnav::signal::install_interrupt_handler;
use panelnav::{check, init_logging, init_tracing, log_debug, log_file_path};

use crate::hooks::{builtin_capabilities, builtin_tasks};

fn main() -> Result<()> {
    let config = AppConfig::parse_args()?;
    init_logging(&config);
    init_tracing(&config);
    log_debug("=== panelnav started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));

    let registry = load_registry(config.menu_path.as_deref(), &config.root_menu)?;
    let capabilities = builtin_capabilities();
    let tasks = builtin_tasks(&config);

    if config.check {
        let report = check::check_report(&config, &registry, &capabilities, &tasks);
        println!("{}", report.render());
        if report.problems() > 0 {
            bail!("--check found {} problem(s)", report.problems());
        }
        return Ok(());
    }

    install_interrupt_handler()?;

    let mut mux = if config.no_buttons {
        InputMultiplexer::new(config.debounce())
    } else if config.mock_buttons {
        InputMultiplexer::with_hardware(config.debounce(), &mut MockButtons::all())
    } else {
        let mut gpio = SysfsGpio::new(&config.gpio_root, config.pin_map());
        InputMultiplexer::with_hardware(config.debounce(), &mut gpio)
    };

    let dispatcher = ActionDispatcher::new(capabilities, tasks);
    let mut controller = NavigationController::new(registry, dispatcher)
        .context("cannot open the root menu")?
        .with_timing(config.transient_timing())
        .with_volume(config.volume_commands());

    let mut display = TerminalDisplay::new().context("failed to initialise the terminal")?;
    let outcome = TickLoop::new(config.tick()).run(&mut controller, &mut mux, &mut display);
    display.restore();
    drop(display);

    match outcome? {
        ExitReason::Quit => log_debug("=== panelnav exited (quit) ==="),
        ExitReason::Interrupted => log_debug("=== panelnav exited (interrupt) ==="),
    }
    if controller.dispatcher().background_running() {
        log_debug("background task still running at exit; leaving it to the OS");
    }
    Ok(())
}
