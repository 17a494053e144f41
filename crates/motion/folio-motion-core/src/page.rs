//! Page bootstrap: builds every behaviour from the platform seams and the
//! element layout an adapter discovered, in the order the page expects.

use std::rc::Rc;

use log::debug;

use crate::clipboard::CopyFeedback;
use crate::config::MotionConfig;
use crate::counter::CounterAnimator;
use crate::element::AnimatableElement;
use crate::error::MotionError;
use crate::filter::{FilterButton, ProjectCard, ProjectFilter};
use crate::ids::ElementId;
use crate::nav::{NavButton, NavMenu, ScrollChrome, ScrollMetrics, SectionTracker};
use crate::radial::RadialMeterAnimator;
use crate::reveal::RevealCoordinator;
use crate::runner::AnimationRunner;
use crate::scheduler::{FrameScheduler, Timer};
use crate::surface::Surface;
use crate::theme::{KeyValueStore, ThemeController};
use crate::typewriter::TypewriterCycler;
use crate::visibility::Visibility;

/// Shown in the contact form's message node while a valid submit goes out.
pub const FORM_SENDING_MESSAGE: &str = "Sending your message...";

/// Platform seams, chosen once at boot.
#[derive(Clone)]
pub struct Platform {
    pub surface: Rc<dyn Surface>,
    pub visibility: Visibility,
    /// `None` when the platform cannot schedule frames; animations then
    /// complete instantly.
    pub frames: Option<Rc<dyn FrameScheduler>>,
    pub timer: Rc<dyn Timer>,
    pub store: Rc<dyn KeyValueStore>,
}

/// Copy-email button and the node its feedback goes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyTarget {
    pub button: ElementId,
    pub feedback: Option<ElementId>,
}

/// Everything the adapter found on the page. Absent elements are `None` or
/// empty and simply disable the behaviour that needs them.
#[derive(Default)]
pub struct PageLayout {
    pub body: Option<ElementId>,
    pub navbar: Option<ElementId>,
    pub nav_toggle: Option<ElementId>,
    pub nav_buttons: Vec<NavButton>,
    pub sections: Vec<(ElementId, String)>,
    pub progress_bar: Option<ElementId>,
    pub back_to_top: Option<ElementId>,
    pub typed_text: Option<ElementId>,
    pub reveals: Vec<Rc<AnimatableElement>>,
    pub counter_container: Option<ElementId>,
    pub counters: Vec<Rc<AnimatableElement>>,
    pub filter_buttons: Vec<FilterButton>,
    pub project_cards: Vec<ProjectCard>,
    pub copy: Option<CopyTarget>,
}

/// The running page. Adapters keep it alive and forward events to it.
pub struct Page {
    pub theme: ThemeController,
    pub nav: NavMenu,
    pub sections: SectionTracker,
    pub chrome: ScrollChrome,
    pub reveal: RevealCoordinator,
    pub typewriter: Option<TypewriterCycler>,
    pub copy: Option<CopyFeedback>,
    pub filter: ProjectFilter,
}

impl Page {
    /// Run every init routine. `initial_scroll` seeds the scroll chrome the
    /// way the first scroll event would.
    pub fn start(
        platform: Platform,
        layout: PageLayout,
        cfg: MotionConfig,
        initial_scroll: ScrollMetrics,
    ) -> Result<Page, MotionError> {
        cfg.validate()?;
        let Platform {
            surface,
            visibility,
            frames,
            timer,
            store,
        } = platform;
        debug!("page start ({visibility:?}, frames: {})", frames.is_some());

        let theme = ThemeController::init(store, Rc::clone(&surface), layout.body);

        let nav = NavMenu::new(Rc::clone(&surface), layout.body, layout.nav_toggle);
        let chrome = ScrollChrome::new(
            Rc::clone(&surface),
            cfg.scroll,
            layout.progress_bar,
            layout.navbar,
            layout.back_to_top,
        );
        chrome.update(initial_scroll);
        let sections = SectionTracker::new(Rc::clone(&surface), layout.nav_buttons);
        sections.wire(&visibility, layout.sections, cfg.thresholds.sections);

        let runner = AnimationRunner::from_option(frames);
        let reveal = RevealCoordinator::new(
            Rc::clone(&surface),
            visibility,
            CounterAnimator::new(Rc::clone(&surface), runner.clone(), cfg.counter_duration_ms),
            RadialMeterAnimator::new(Rc::clone(&surface), runner, cfg.meter_duration_ms),
            cfg.thresholds.reveal,
            cfg.thresholds.counters,
        );
        reveal.wire_reveals(layout.reveals);

        let typewriter = TypewriterCycler::start(
            layout.typed_text,
            cfg.typewriter.clone(),
            Rc::clone(&surface),
            Rc::clone(&timer),
        )?;

        let copy = layout.copy.map(|target| {
            CopyFeedback::new(
                Rc::clone(&surface),
                Rc::clone(&timer),
                target.button,
                target.feedback,
                cfg.copy_feedback_ms,
            )
        });

        reveal.wire_counters(layout.counter_container, layout.counters);

        let filter = ProjectFilter::new(surface, layout.filter_buttons, layout.project_cards);

        Ok(Page {
            theme,
            nav,
            sections,
            chrome,
            reveal,
            typewriter,
            copy,
            filter,
        })
    }
}
