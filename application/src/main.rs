use std::{io, sync::OnceLock};

use application::{
    config::Demo,
    demo::{self, Delayed},
    table::{self, Viewport},
    Config, Table,
};
use service::{
    domain::window::{Controller, Direction},
    Service,
};
use tokio::task::LocalSet;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = LocalSet::new().run_until(start()).await;
}

async fn start() -> Result<(), ()> {
    let Config { pager, log, demo } = application::load().map_err(|e| {
        log::error!("failed to start: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let Demo {
        members,
        row_height,
        viewport_height,
        latency,
    } = demo;
    let viewport = Viewport {
        row_height,
        height: viewport_height,
    };

    let controller = Controller::today(table::local_offset());
    let roster = demo::roster(members, controller.window().day);
    log::info!("seeded {} members", roster.len());

    let service = Service::new(pager.into(), Delayed::new(roster, latency));
    let mut table = Table::new(service, controller, viewport);

    _ = table.mount();
    let pages = demo::scroll_to_bottom(&mut table).await;
    log::info!("{} loaded in {pages} pages", table.window().day);

    // Leaving the next day before its first page arrives abandons it.
    for direction in [Direction::Next, Direction::Next, Direction::Previous] {
        let Some(window) = table.navigate(direction) else {
            continue;
        };
        log::info!("navigated {direction} to {}", window.day);
    }
    let pages = demo::scroll_to_bottom(&mut table).await;
    log::info!("{} loaded in {pages} pages", table.window().day);

    Ok(())
}
