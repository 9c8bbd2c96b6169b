use crate::components::carousel::Carousel;
use crate::components::contact::ContactForm;
use crate::components::counter::CounterAnimator;
use crate::components::faq::FaqAccordion;
use crate::components::nav::{MobileNavToggle, NavHighlighter};
use crate::components::portfolio::PortfolioFilter;
use crate::components::reveal::{reveal_strategy, RevealStrategy};
use crate::components::theme::ThemeStore;
use crate::config::{SelectorConfig, SiteConfig};
use crate::core::events::{EventKind, ListenerTable};
use crate::core::timers::{TimerHandle, Timers};
use crate::domain::model::{
    ElementId, FormStatus, IntersectionEntry, PageEvent, SubmissionOutcome, SubmissionRequest,
    Theme,
};
use crate::domain::ports::{Document, FormTransport, KeyValueStore};
use crate::domain::selector::Selector;
use crate::utils::error::Result;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    ToggleNav,
    ToggleTheme,
    CarouselNext,
    CarouselPrev,
    SelectFilter,
    ToggleFaq(ElementId),
    SubmitContact,
}

/// Parsed forms of every selector in [`SelectorConfig`].
#[derive(Debug, Clone)]
struct Selectors {
    nav_links: Selector,
    nav: Selector,
    nav_toggle: Selector,
    theme_toggle: Selector,
    reveal: Selector,
    counter: Selector,
    testimonial: Selector,
    testimonial_next: Selector,
    testimonial_prev: Selector,
    filter_button: Selector,
    portfolio_item: Selector,
    faq_item: Selector,
    faq_question: Selector,
    contact_form: Selector,
    form_status: Selector,
}

impl Selectors {
    fn parse(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            nav_links: config.nav_links.parse()?,
            nav: config.nav.parse()?,
            nav_toggle: config.nav_toggle.parse()?,
            theme_toggle: config.theme_toggle.parse()?,
            reveal: config.reveal.parse()?,
            counter: config.counter.parse()?,
            testimonial: config.testimonial.parse()?,
            testimonial_next: config.testimonial_next.parse()?,
            testimonial_prev: config.testimonial_prev.parse()?,
            filter_button: config.filter_button.parse()?,
            portfolio_item: config.portfolio_item.parse()?,
            faq_item: config.faq_item.parse()?,
            faq_question: config.faq_question.parse()?,
            contact_form: config.contact_form.parse()?,
            form_status: config.form_status.parse()?,
        })
    }
}

/// The page script: owns the document, every component's state and the
/// listener table, and handles one page event at a time to completion.
pub struct SiteScript<D: Document, S: KeyValueStore> {
    doc: D,
    config: SiteConfig,
    theme: ThemeStore<S>,
    listeners: ListenerTable<Action>,
    timers: Timers,
    active_nav: Option<ElementId>,
    mobile_nav: Option<MobileNavToggle>,
    reveal: Box<dyn RevealStrategy>,
    counters: Option<CounterAnimator>,
    carousel: Option<Carousel>,
    carousel_timer: Option<TimerHandle>,
    portfolio: Option<PortfolioFilter>,
    faq: FaqAccordion,
    contact: Option<ContactForm>,
}

impl<D: Document, S: KeyValueStore> SiteScript<D, S> {
    /// Applies the stored theme, then wires every component present on the
    /// page, in page order.
    pub fn boot(mut doc: D, store: S, config: SiteConfig) -> Result<Self> {
        let selectors = Selectors::parse(&config.selectors)?;

        let theme = ThemeStore::new(store, config.storage.theme_key.clone());
        theme.apply_stored(&mut doc);

        let mut listeners = ListenerTable::new();
        let mut timers = Timers::new();

        let active_nav = NavHighlighter::new(selectors.nav_links.clone()).highlight(&mut doc);

        let mobile_nav = MobileNavToggle::bind(&doc, &selectors.nav_toggle, &selectors.nav);
        if let Some(toggle) = &mobile_nav {
            listeners.add_listener(toggle.trigger(), EventKind::Click, Action::ToggleNav);
        }

        if let Some(button) = doc.query(&selectors.theme_toggle) {
            listeners.add_listener(button, EventKind::Click, Action::ToggleTheme);
        }

        let mut reveal = reveal_strategy(config.capabilities, config.reveal.threshold);
        let reveal_targets = doc.query_all(&selectors.reveal);
        reveal.start(&mut doc, &reveal_targets);

        let counter_targets = doc.query_all(&selectors.counter);
        let counters = if config.capabilities.intersection_observer && !counter_targets.is_empty() {
            let mut animator = CounterAnimator::new(&config.counter);
            animator.start(&counter_targets);
            Some(animator)
        } else {
            None
        };

        let testimonials = doc.query_all(&selectors.testimonial);
        let carousel = Carousel::new(&mut doc, testimonials);
        let mut carousel_timer = None;
        if carousel.is_some() {
            if let Some(next) = doc.query(&selectors.testimonial_next) {
                listeners.add_listener(next, EventKind::Click, Action::CarouselNext);
            }
            if let Some(prev) = doc.query(&selectors.testimonial_prev) {
                listeners.add_listener(prev, EventKind::Click, Action::CarouselPrev);
            }
            carousel_timer = Some(timers.set_interval(config.carousel.interval()));
        }

        let portfolio = PortfolioFilter::new(
            doc.query_all(&selectors.filter_button),
            doc.query_all(&selectors.portfolio_item),
        );
        if let Some(filter) = &portfolio {
            for button in filter.buttons() {
                listeners.add_listener(*button, EventKind::Click, Action::SelectFilter);
            }
        }

        let faq = FaqAccordion::bind(&doc, &selectors.faq_item, &selectors.faq_question);
        for &(question, item) in faq.entries() {
            listeners.add_listener(question, EventKind::Click, Action::ToggleFaq(item));
        }

        let contact = ContactForm::bind(
            &doc,
            &selectors.contact_form,
            &selectors.form_status,
            config.contact.clone(),
        );
        if let Some(form) = &contact {
            listeners.add_listener(form.form(), EventKind::Submit, Action::SubmitContact);
        }

        tracing::info!(
            "Page script ready: {} listeners, reveal strategy `{}`",
            listeners.len(),
            reveal.name()
        );

        Ok(Self {
            doc,
            config,
            theme,
            listeners,
            timers,
            active_nav,
            mobile_nav,
            reveal,
            counters,
            carousel,
            carousel_timer,
            portfolio,
            faq,
            contact,
        })
    }

    /// Handles one event. A submit on the contact form returns the request to
    /// send; pass the transport's answer to
    /// [`complete_submission`](Self::complete_submission).
    pub fn dispatch(&mut self, event: PageEvent) -> Option<SubmissionRequest> {
        match event {
            PageEvent::Click(target) => {
                self.click(target);
                None
            }
            PageEvent::Submit(target) => self.submit(target),
            PageEvent::Intersection(entries) => {
                self.intersect(&entries);
                None
            }
            PageEvent::AnimationFrame(now) => {
                if let Some(counters) = &mut self.counters {
                    counters.on_frame(&mut self.doc, now);
                }
                None
            }
            PageEvent::Clock(now) => {
                self.advance_clock(now);
                None
            }
        }
    }

    fn click(&mut self, target: ElementId) {
        let actions = self
            .listeners
            .propagation(&self.doc, target, EventKind::Click);
        for (current, action) in actions {
            self.run(current, action);
        }
    }

    fn submit(&mut self, target: ElementId) -> Option<SubmissionRequest> {
        let actions = self
            .listeners
            .propagation(&self.doc, target, EventKind::Submit);
        let mut request = None;
        for (_, action) in actions {
            if action == Action::SubmitContact {
                request = self.contact.as_ref().map(|form| form.begin(&mut self.doc));
            }
        }
        request
    }

    fn run(&mut self, current: ElementId, action: Action) {
        tracing::debug!("Running {:?} for {:?}", action, current);
        match action {
            Action::ToggleNav => {
                if let Some(toggle) = &self.mobile_nav {
                    toggle.toggle(&mut self.doc);
                }
            }
            Action::ToggleTheme => {
                self.theme.toggle(&mut self.doc);
            }
            Action::CarouselNext => {
                self.carousel_next();
            }
            Action::CarouselPrev => {
                self.carousel_prev();
            }
            Action::SelectFilter => {
                if let Some(filter) = &mut self.portfolio {
                    filter.select_button(&mut self.doc, current);
                }
            }
            Action::ToggleFaq(item) => {
                self.faq.toggle(&mut self.doc, item);
            }
            Action::SubmitContact => {}
        }
    }

    fn intersect(&mut self, entries: &[IntersectionEntry]) {
        let revealed = self.reveal.on_intersection(&mut self.doc, entries);
        let started = match &mut self.counters {
            Some(counters) => counters.on_intersection(&self.doc, entries),
            None => 0,
        };
        if revealed + started > 0 {
            tracing::debug!("Revealed {} elements, started {} counters", revealed, started);
        }
    }

    fn advance_clock(&mut self, now: Duration) {
        while let Some(handle) = self.timers.pop_due(now) {
            if Some(handle) == self.carousel_timer {
                self.carousel_next();
            }
        }
        self.timers.advance_to(now);
    }

    pub fn complete_submission(&mut self, outcome: &SubmissionOutcome) -> Option<FormStatus> {
        let form = self.contact.as_ref()?;
        Some(form.complete(&mut self.doc, outcome))
    }

    /// Submits the contact form end to end. `None` when the page has no
    /// contact form.
    pub async fn submit_contact<T: FormTransport + ?Sized>(
        &mut self,
        transport: &T,
    ) -> Option<SubmissionOutcome> {
        let form = self.contact.as_ref()?.form();
        let request = self.dispatch(PageEvent::Submit(form))?;
        let outcome = transport.send(&request).await;
        self.complete_submission(&outcome);
        Some(outcome)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle(&mut self.doc)
    }

    pub fn carousel_next(&mut self) -> Option<usize> {
        let carousel = self.carousel.as_mut()?;
        Some(carousel.next(&mut self.doc))
    }

    pub fn carousel_prev(&mut self) -> Option<usize> {
        let carousel = self.carousel.as_mut()?;
        Some(carousel.prev(&mut self.doc))
    }

    /// Stops automatic testimonial rotation. Returns `false` if it was not
    /// running.
    pub fn cancel_carousel_autoplay(&mut self) -> bool {
        match self.carousel_timer.take() {
            Some(handle) => self.timers.clear_interval(handle),
            None => false,
        }
    }

    pub fn set_filter(&mut self, value: &str) -> bool {
        match &mut self.portfolio {
            Some(filter) => {
                filter.set_filter(&mut self.doc, value);
                true
            }
            None => false,
        }
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn into_parts(self) -> (D, S) {
        (self.doc, self.theme.into_store())
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn theme_store(&self) -> &ThemeStore<S> {
        &self.theme
    }

    pub fn active_nav(&self) -> Option<ElementId> {
        self.active_nav
    }

    pub fn reveal(&self) -> &dyn RevealStrategy {
        self.reveal.as_ref()
    }

    pub fn counters(&self) -> Option<&CounterAnimator> {
        self.counters.as_ref()
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn carousel_autoplay(&self) -> Option<TimerHandle> {
        self.carousel_timer
    }

    pub fn portfolio(&self) -> Option<&PortfolioFilter> {
        self.portfolio.as_ref()
    }

    pub fn faq(&self) -> &FaqAccordion {
        &self.faq
    }

    pub fn contact(&self) -> Option<&ContactForm> {
        self.contact.as_ref()
    }
}
