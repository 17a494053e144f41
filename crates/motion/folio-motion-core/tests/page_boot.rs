use std::rc::Rc;

use folio_motion_core::{
    Marker, MotionConfig, MotionError, Page, Platform, ScrollMetrics, Theme, Visibility, THEME_KEY,
};
use folio_test_fixtures::{
    pages, BuiltPage, ManualFrames, ManualObserver, ManualTimer, MemoryStore, RecordingSurface,
};

struct Booted {
    page: Page,
    built: BuiltPage,
    surface: Rc<RecordingSurface>,
    frames: Rc<ManualFrames>,
    timer: Rc<ManualTimer>,
    observer: Rc<ManualObserver>,
    store: Rc<MemoryStore>,
}

impl Booted {
    fn id(&self, name: &str) -> folio_motion_core::ElementId {
        self.built.id(name).unwrap()
    }
}

const TOP: ScrollMetrics = ScrollMetrics {
    scroll_y: 0.0,
    scroll_height: 3000.0,
    viewport_height: 1000.0,
};

fn boot_with(fixture: &str, store: MemoryStore, observed: bool) -> Booted {
    let mut built = pages::load(fixture).unwrap().build();
    let surface = Rc::new(RecordingSurface::new());
    let frames = Rc::new(ManualFrames::new());
    let timer = Rc::new(ManualTimer::new());
    let observer = Rc::new(ManualObserver::new());
    let store = Rc::new(store);
    let platform = Platform {
        surface: surface.clone(),
        visibility: if observed {
            Visibility::observed(observer.clone())
        } else {
            Visibility::Immediate
        },
        frames: Some(frames.clone()),
        timer: timer.clone(),
        store: store.clone(),
    };
    let layout = std::mem::take(&mut built.layout);
    let page = Page::start(platform, layout, MotionConfig::default(), TOP).unwrap();
    Booted {
        page,
        built,
        surface,
        frames,
        timer,
        observer,
        store,
    }
}

fn boot(fixture: &str) -> Booted {
    boot_with(fixture, MemoryStore::new(), true)
}

/// it should list every page fixture in the manifest
#[test]
fn manifest_lists_pages() {
    let mut keys = pages::keys();
    keys.sort();
    assert_eq!(keys, vec!["bare", "malformed-numbers", "portfolio"]);
    assert!(pages::path("portfolio").unwrap().exists());
    assert!(pages::load("missing").is_err());
}

/// it should default to dark and persist it when nothing is stored
#[test]
fn theme_defaults_to_dark_and_persists() {
    let b = boot("portfolio");
    assert_eq!(b.page.theme.current(), Theme::Dark);
    assert_eq!(b.store.value(THEME_KEY).as_deref(), Some("dark"));
    assert_eq!(b.surface.attribute(b.id("body"), "data-theme").as_deref(), Some("dark"));
}

/// it should respect a stored choice without rewriting it, and persist toggles
#[test]
fn theme_respects_stored_choice_and_toggles() {
    let b = boot_with("portfolio", MemoryStore::with(THEME_KEY, "light"), true);
    assert_eq!(b.page.theme.current(), Theme::Light);
    assert_eq!(b.store.writes(), 0);

    assert_eq!(b.page.theme.toggle(), Theme::Dark);
    assert_eq!(b.store.value(THEME_KEY).as_deref(), Some("dark"));
    assert_eq!(b.surface.attribute(b.id("body"), "data-theme").as_deref(), Some("dark"));
    assert_eq!(b.page.theme.toggle(), Theme::Light);
    assert_eq!(b.store.writes(), 2);
}

/// it should treat an unknown stored value as absent
#[test]
fn theme_ignores_garbage_value() {
    let b = boot_with("portfolio", MemoryStore::with(THEME_KEY, "solarized"), true);
    assert_eq!(b.page.theme.current(), Theme::Dark);
    assert_eq!(b.store.value(THEME_KEY).as_deref(), Some("dark"));
}

/// it should keep working when storage is unavailable
#[test]
fn theme_survives_failing_store() {
    let b = boot_with("portfolio", MemoryStore::failing(), true);
    assert_eq!(b.page.theme.current(), Theme::Dark);
    assert_eq!(b.page.theme.toggle(), Theme::Light);
    assert!(matches!(b.page.theme.persist(), Err(MotionError::Store(_))));
}

/// it should highlight exactly the nav buttons of the section on screen
#[test]
fn section_tracking_sets_single_active_button() {
    let b = boot("portfolio");
    let about = b.id("section-about");
    assert_eq!(b.observer.thresholds(about), vec![0.35]);

    b.observer.intersect(about);
    assert!(b.surface.has_marker(b.id("nav-about"), Marker::Active));
    assert!(!b.surface.has_marker(b.id("nav-home"), Marker::Active));

    b.observer.intersect(b.id("section-projects"));
    assert!(b.surface.has_marker(b.id("nav-projects"), Marker::Active));
    assert!(!b.surface.has_marker(b.id("nav-about"), Marker::Active));
    assert!(!b.surface.has_marker(b.id("nav-resume"), Marker::Active));

    // Sections stay observed.
    assert!(b.observer.is_observed(about));
    assert_eq!(b.page.sections.buttons()[3].target, None);
}

/// it should open, close and toggle the mobile menu
#[test]
fn nav_menu_state() {
    let b = boot("portfolio");
    let (body, toggle) = (b.id("body"), b.id("nav-toggle"));
    b.page.nav.toggle();
    assert!(b.page.nav.is_open());
    assert!(b.surface.has_marker(body, Marker::NavOpen));
    assert_eq!(b.surface.attribute(toggle, "aria-expanded").as_deref(), Some("true"));

    b.page.nav.on_link_click();
    assert!(!b.page.nav.is_open());
    assert!(!b.surface.has_marker(body, Marker::NavOpen));
    assert_eq!(b.surface.attribute(toggle, "aria-expanded").as_deref(), Some("false"));

    b.page.nav.on_link_click();
    assert!(!b.page.nav.is_open());
}

/// it should seed the scroll chrome at boot and follow later scrolls
#[test]
fn scroll_chrome_follows_scroll() {
    let b = boot("portfolio");
    let bar = b.id("scroll-progress-bar");
    assert_eq!(b.surface.style(bar, "width").as_deref(), Some("0.00%"));

    let state = b.page.chrome.update(ScrollMetrics {
        scroll_y: 500.0,
        ..TOP
    });
    assert_eq!(state.progress_width, "25.00%");
    assert_eq!(b.surface.style(bar, "width").as_deref(), Some("25.00%"));
    assert!(b.surface.has_marker(b.id("navbar"), Marker::Scrolled));
    assert!(b.surface.has_marker(b.id("back-to-top"), Marker::BackToTopVisible));

    b.page.chrome.update(TOP);
    assert!(!b.surface.has_marker(b.id("navbar"), Marker::Scrolled));
    assert!(!b.surface.has_marker(b.id("back-to-top"), Marker::BackToTopVisible));
}

/// it should reveal, sweep and count only after the relevant intersections
#[test]
fn reveal_and_counters_wait_for_visibility() {
    let b = boot("portfolio");
    let python = b.id("skill-python");
    let stats = b.id("about-stats");
    assert_eq!(b.frames.pending(), 0);
    assert!(b.built.counters.iter().all(|c| !c.is_animated()));

    b.observer.intersect(python);
    b.observer.intersect(stats);
    assert!(b.built.counters.iter().all(|c| c.is_animated()));
    b.frames.run_until_idle(16.0, 1_000);

    assert_eq!(b.surface.text(b.id("skill-python-label")).as_deref(), Some("80%"));
    assert!(b.surface.text(b.id("skill-django-label")).is_none());
    assert_eq!(b.surface.text(b.id("stat-projects")).as_deref(), Some("250+"));
    assert_eq!(b.surface.text(b.id("stat-years")).as_deref(), Some("3"));
    assert_eq!(b.surface.text(b.id("stat-coffee")).as_deref(), Some("1200 cups"));
}

/// it should finish every tagged element immediately when observation is unavailable
#[test]
fn degraded_boot_finishes_everything_without_frames() {
    let b = boot_with("portfolio", MemoryStore::new(), false);
    for name in ["hero-card", "about-card", "skill-python", "skill-django", "skill-orphan"] {
        assert!(b.surface.has_marker(b.id(name), Marker::Visible), "{name}");
    }
    assert_eq!(b.surface.text(b.id("skill-django-label")).as_deref(), Some("65%"));
    assert_eq!(b.surface.text(b.id("stat-projects")).as_deref(), Some("250+"));
    assert_eq!(b.frames.frames_run(), 0);
    assert_eq!(b.frames.pending(), 0);
    // Section tracking needs a real observer.
    assert_eq!(b.observer.observed_count(), 0);
}

/// it should settle malformed numbers at zero
#[test]
fn malformed_numbers_settle_at_zero() {
    let b = boot("malformed-numbers");
    b.observer.intersect(b.id("skill-broken"));
    b.observer.intersect(b.id("about-stats"));
    b.frames.run_until_idle(16.0, 1_000);
    assert_eq!(b.surface.text(b.id("skill-broken-label")).as_deref(), Some("0%"));
    assert_eq!(b.surface.text(b.id("stat-broken")).as_deref(), Some("0+"));
    assert_eq!(b.surface.text(b.id("stat-partial")).as_deref(), Some("12"));
}

/// it should filter project cards by category and reset flips
#[test]
fn project_filter_shows_matching_cards() {
    let b = boot("portfolio");
    let shown = b.page.filter.select(b.id("filter-web"));
    assert_eq!(shown, Some(2));
    assert!(b.surface.has_marker(b.id("filter-web"), Marker::Active));
    assert!(!b.surface.has_marker(b.id("filter-all"), Marker::Active));
    assert!(!b.surface.has_marker(b.id("card-shop"), Marker::FilteredOut));
    assert!(b.surface.has_marker(b.id("card-payments"), Marker::FilteredOut));
    assert!(b.surface.has_marker(b.id("card-untagged"), Marker::FilteredOut));

    assert_eq!(b.page.filter.select(b.id("filter-default")), Some(4));
    assert!(!b.surface.has_marker(b.id("card-payments"), Marker::FilteredOut));
    assert_eq!(b.page.filter.select(b.id("body")), None);
}

/// it should show copy feedback and clear it 1500ms later
#[test]
fn copy_feedback_resets_after_delay() {
    let b = boot("portfolio");
    let copy = b.page.copy.as_ref().expect("copy button in fixture");
    let (button, feedback) = (b.id("copy-email"), b.id("copy-feedback"));

    // Only the typewriter is scheduled so far.
    assert_eq!(b.timer.pending(), 1);
    copy.report(true);
    assert_eq!(b.surface.text(feedback).as_deref(), Some("Copied!"));
    assert!(b.surface.has_marker(feedback, Marker::FeedbackSuccess));
    assert!(b.surface.has_marker(button, Marker::Copied));

    b.timer.advance(1499);
    assert!(b.surface.has_marker(button, Marker::Copied));
    b.timer.advance(1);
    assert!(!b.surface.has_marker(button, Marker::Copied));
    assert_eq!(b.surface.text(feedback).as_deref(), Some(""));
    assert!(!b.surface.has_marker(feedback, Marker::FeedbackSuccess));

    copy.report(false);
    assert_eq!(b.surface.text(feedback).as_deref(), Some("Failed"));
    assert!(b.surface.has_marker(feedback, Marker::FeedbackError));
    assert!(!b.surface.has_marker(feedback, Marker::FeedbackSuccess));
}

/// it should start the typewriter with the default phrases
#[test]
fn typewriter_starts_with_first_phrase() {
    let b = boot("portfolio");
    let typed = b.id("typed-text");
    b.timer.advance(400);
    assert_eq!(b.surface.text(typed).as_deref(), Some("P"));
    assert!(b.page.typewriter.is_some());
}

/// it should boot a page that has none of the optional elements
#[test]
fn bare_page_boots_quietly() {
    let b = boot("bare");
    assert!(b.page.typewriter.is_none());
    assert!(b.page.copy.is_none());
    assert!(!b.page.filter.is_active());
    assert_eq!(b.observer.observed_count(), 0);
    assert_eq!(b.timer.pending(), 0);
    assert_eq!(b.built.element_count(), 1);
}

/// it should refuse an invalid config before touching the page
#[test]
fn invalid_config_is_rejected() {
    let surface = Rc::new(RecordingSurface::new());
    let platform = Platform {
        surface: surface.clone(),
        visibility: Visibility::Immediate,
        frames: None,
        timer: Rc::new(ManualTimer::new()),
        store: Rc::new(MemoryStore::new()),
    };
    let mut cfg = MotionConfig::default();
    cfg.thresholds.reveal = -0.1;
    let layout = pages::load("portfolio").unwrap().build().layout;
    let err = Page::start(platform, layout, cfg, TOP).err().unwrap();
    assert!(matches!(err, MotionError::InvalidConfig(_)));
}
