use std::{env, path::PathBuf};

use embassy_executor::Spawner;
use log::{debug, error, info, warn};
use quranku_core::{
    app::{ChapterPage, Outcome},
    chapter::{ChapterId, PageProps},
    config::PageConfig,
    content::{ChapterSource, page_props, static_paths, static_source::default_al_fatihah_source},
    input::{EventProvider, PageEvent, ScriptedEvents},
    store::Store,
};

use dir_source::DirectorySource;

#[path = "main/dir_source.rs"]
mod dir_source;
#[path = "main/text_view.rs"]
mod text_view;

const DATA_DIR_VAR: &str = "QURANKU_DATA_DIR";
const LATENCY_VAR: &str = "QURANKU_LATENCY_MS";
const DEFAULT_DATA_DIR: &str = "demos/data";
const DEFAULT_LATENCY_MS: u64 = 120;
const DEFAULT_CHAPTER: &str = "1";
const EXIT_USAGE: i32 = 2;

#[derive(Clone, Debug)]
struct HostSettings {
    data_dir: PathBuf,
    latency_ms: u64,
}

impl HostSettings {
    fn from_env() -> Self {
        let data_dir = env::var_os(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let latency_ms = match env::var(LATENCY_VAR) {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(
                    "{}={:?} is not a number; using {}ms",
                    LATENCY_VAR, raw, DEFAULT_LATENCY_MS
                );
                DEFAULT_LATENCY_MS
            }),
            Err(_) => DEFAULT_LATENCY_MS,
        };

        Self {
            data_dir,
            latency_ms,
        }
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut tokens: Vec<String> = env::args().skip(1).collect();
    if tokens.is_empty() {
        tokens.push(String::from(DEFAULT_CHAPTER));
    }
    let events = match ScriptedEvents::from_tokens(&tokens) {
        Ok(events) => events,
        Err(err) => {
            error!("{}", err);
            std::process::exit(EXIT_USAGE);
        }
    };

    let settings = HostSettings::from_env();
    info!(
        "data_dir={} latency_ms={}",
        settings.data_dir.display(),
        settings.latency_ms
    );

    let summary = match DirectorySource::open(&settings.data_dir, settings.latency_ms) {
        Ok(source) => run_page(source, events).await,
        Err(err) => {
            warn!("{}; falling back to the built-in Al-Fatihah", err);
            run_page(default_al_fatihah_source(), events).await
        }
    };
    info!("loaded={} failed={}", summary.loaded, summary.failed);

    // The std executor never returns on its own.
    std::process::exit(summary.exit_code());
}

/// Tally of one scripted run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct RunSummary {
    loaded: u32,
    failed: u32,
}

impl RunSummary {
    fn exit_code(&self) -> i32 {
        if self.failed == 0 { 0 } else { 1 }
    }
}

async fn run_page<S: ChapterSource>(source: S, mut events: ScriptedEvents) -> RunSummary {
    let mut page = ChapterPage::new(source, PageConfig::default());
    let mut store = Store::new();
    let mut summary = RunSummary::default();

    let paths = match static_paths(page.source()).await {
        Ok(paths) => paths,
        Err(err) => {
            error!("cannot enumerate chapters: {}", err);
            summary.failed += 1;
            return summary;
        }
    };
    info!("serving {} chapter pages", paths.len());

    let mut rendered_revision = None;
    loop {
        let event = match events.poll_event() {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(never) => match never {},
        };

        match event {
            PageEvent::Navigate(requested) => {
                let id = requested.canonical();
                if !paths.contains(&id) {
                    warn!("no page for chapter {:?}", requested.as_str());
                    summary.failed += 1;
                    continue;
                }
                let props = match page_props(page.source(), &id).await {
                    Ok(props) => props,
                    Err(err) => {
                        warn!("page props for chapter {} failed: {}", id, err);
                        summary.failed += 1;
                        continue;
                    }
                };
                match navigate(&mut page, &mut store, props, &mut rendered_revision).await {
                    Ok(Outcome::Applied) => summary.loaded += 1,
                    Ok(_) => {}
                    Err(()) => summary.failed += 1,
                }
            }
            PageEvent::TogglePlayback => {
                if let Err(err) = page
                    .handle_event(PageEvent::TogglePlayback, &mut store)
                    .await
                {
                    warn!("toggle failed: {}", err);
                }
            }
        }

        render_if_changed(&page, &store, &mut rendered_revision);
    }

    summary
}

/// Drive one identifier change step by step so the loading frame is drawn.
async fn navigate<S: ChapterSource>(
    page: &mut ChapterPage<S>,
    store: &mut Store,
    props: PageProps,
    rendered_revision: &mut Option<u32>,
) -> Result<Outcome, ()> {
    let chapter: ChapterId = props.chapter_id.clone();
    let Some(ticket) = page.on_identifier_changed(props, store) else {
        debug!("chapter {} already shown", chapter);
        return Ok(Outcome::Unchanged);
    };
    render_if_changed(page, store, rendered_revision);

    let result = page.fetch(&ticket).await;
    match page.complete(ticket, result, store) {
        Ok(Outcome::Discarded) => {
            warn!("stale result for chapter {} dropped", chapter);
            Ok(Outcome::Discarded)
        }
        Ok(outcome) => {
            debug!("chapter {} {:?}", chapter, outcome);
            Ok(outcome)
        }
        Err(err) => {
            warn!("chapter {} failed to load: {}", chapter, err);
            Err(())
        }
    }
}

fn render_if_changed<S: ChapterSource>(
    page: &ChapterPage<S>,
    store: &Store,
    rendered_revision: &mut Option<u32>,
) {
    if *rendered_revision == Some(store.revision()) {
        return;
    }
    *rendered_revision = Some(store.revision());
    page.with_view(store, |view| text_view::print_page(&view));
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    fn run(tokens: &[&str]) -> RunSummary {
        let events = ScriptedEvents::from_tokens(tokens).unwrap();
        block_on(run_page(default_al_fatihah_source(), events))
    }

    #[test]
    fn clean_run_exits_zero() {
        let summary = run(&["1", "play", "1"]);
        assert_eq!(summary, RunSummary { loaded: 1, failed: 0 });
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn unknown_chapter_fails_the_run() {
        let summary = run(&["1", "bogus", "2"]);
        assert_eq!(summary, RunSummary { loaded: 1, failed: 2 });
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn zero_padded_chapter_resolves_to_its_page() {
        let summary = run(&["01"]);
        assert_eq!(summary, RunSummary { loaded: 1, failed: 0 });
    }
}
