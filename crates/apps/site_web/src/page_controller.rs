//! DOM side of the page: project grid, scroll effects, navigation, filters.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{AnimationFrame, request_animation_frame};
use page::{
    CARD_TRANSITION, CategoryFilter, PageConfig, PageState, ScrollUpdate, card_parallax,
    filter_projects, parse_speed, render_cards, speed_for,
};
use web_sys::{Document, Element, Window};

use crate::dom;
use crate::error::SiteError;

pub const PROJECTS_ID: &str = "projects";

/// Receives document scroll progress once per scroll frame.
pub type ProgressObserver = Box<dyn Fn(f64)>;

pub struct PageController {
    window: Window,
    document: Document,
    config: PageConfig,
    state: PageState,
    container: Option<Element>,
    observer: Option<ProgressObserver>,
    pending_frame: Option<AnimationFrame>,
    listeners: Vec<EventListener>,
}

impl PageController {
    pub fn mount(config: PageConfig) -> Result<Rc<RefCell<Self>>, SiteError> {
        let window = dom::window()?;
        let document = dom::document()?;
        let container = dom::by_id(&document, PROJECTS_ID);
        if container.is_none() {
            tracing::warn!("#{PROJECTS_ID} missing, project grid disabled");
        }
        let initial = config
            .sections
            .first()
            .map(String::as_str)
            .unwrap_or("hero")
            .to_string();

        let controller = Rc::new(RefCell::new(Self {
            window,
            document,
            config,
            state: PageState::new(&initial),
            container,
            observer: None,
            pending_frame: None,
            listeners: Vec::new(),
        }));

        {
            let mut c = controller.borrow_mut();
            c.tag_container();
            c.render_projects();
            c.mark_filter_buttons();
        }
        Self::install_listeners(&controller);
        controller.borrow_mut().run_scroll_frame();

        tracing::info!(
            projects = controller.borrow().config.projects.len(),
            "page controller mounted"
        );
        Ok(controller)
    }

    pub fn set_progress_observer(&mut self, observer: ProgressObserver) {
        observer(self.state.progress());
        self.observer = Some(observer);
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Replace the grid with the cards matching the active filter.
    pub fn render_projects(&mut self) {
        let Some(container) = self.container.as_ref() else {
            return;
        };
        let visible = filter_projects(&self.config.projects, self.state.filter());
        container.set_inner_html(&render_cards(&visible));
        tracing::debug!(filter = self.state.filter().as_str(), cards = visible.len(), "rendered projects");
    }

    pub fn set_filter(&mut self, raw: &str) {
        let filter = CategoryFilter::parse(raw);
        if !self.state.set_filter(filter) {
            return;
        }
        self.tag_container();
        self.render_projects();
        self.mark_filter_buttons();
        // New cards start without a transform.
        self.apply_card_parallax();
    }

    /// Keep exactly one `filter-*` class on the container, matching the
    /// active filter.
    fn tag_container(&self) {
        let Some(container) = self.container.as_ref() else {
            return;
        };
        let classes: Vec<String> = (0..container.class_list().length())
            .filter_map(|i| container.class_list().item(i))
            .collect();
        let filter = self.state.filter();
        for class in filter.stale_classes(classes.iter().map(String::as_str)) {
            dom::toggle_class(container, class, false);
        }
        dom::toggle_class(container, &filter.container_class(), true);
    }

    fn mark_filter_buttons(&self) {
        let active = self.state.filter().as_str();
        for button in dom::query_all(&self.document, ".filter-btn[data-filter]") {
            let value = button.get_attribute("data-filter").unwrap_or_default();
            let on = CategoryFilter::parse(&value).as_str() == active;
            dom::toggle_class(&button, "active", on);
        }
    }

    fn install_listeners(this: &Rc<RefCell<Self>>) {
        let mut listeners = Vec::new();
        let (window, document) = {
            let c = this.borrow();
            (c.window.clone(), c.document.clone())
        };

        let weak = Rc::downgrade(this);
        listeners.push(EventListener::new(&window, "scroll", move |_| {
            if let Some(this) = weak.upgrade() {
                Self::schedule_scroll_frame(&this);
            }
        }));

        let weak = Rc::downgrade(this);
        listeners.push(EventListener::new(&window, "resize", move |_| {
            if let Some(this) = weak.upgrade() {
                Self::schedule_scroll_frame(&this);
            }
        }));

        for link in dom::query_all(&document, ".nav-link") {
            let target = link
                .get_attribute("href")
                .and_then(|href| href.strip_prefix('#').map(str::to_string));
            let doc = document.clone();
            listeners.push(EventListener::new_with_options(
                &link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    if let Some(id) = target.as_deref() {
                        dom::smooth_scroll_to(&doc, id);
                    }
                },
            ));
        }

        if let Some(hint) = document.query_selector(".hero-scroll").ok().flatten() {
            let doc = document.clone();
            listeners.push(EventListener::new(&hint, "click", move |_| {
                dom::smooth_scroll_to(&doc, "work");
            }));
        }

        for button in dom::query_all(&document, ".filter-btn[data-filter]") {
            let value = button.get_attribute("data-filter").unwrap_or_default();
            let weak = Rc::downgrade(this);
            listeners.push(EventListener::new(&button, "click", move |_| {
                if let Some(this) = weak.upgrade() {
                    this.borrow_mut().set_filter(&value);
                }
            }));
        }

        this.borrow_mut().listeners = listeners;
    }

    fn schedule_scroll_frame(this: &Rc<RefCell<Self>>) {
        if !this.borrow_mut().state.request_frame() {
            return;
        }
        let weak = Rc::downgrade(this);
        let handle = request_animation_frame(move |_| {
            if let Some(this) = weak.upgrade() {
                let mut c = this.borrow_mut();
                c.pending_frame = None;
                c.run_scroll_frame();
            }
        });
        this.borrow_mut().pending_frame = Some(handle);
    }

    fn run_scroll_frame(&mut self) {
        let metrics = dom::scroll_metrics(&self.window, &self.document);
        let update = self.state.begin_scroll_frame(metrics);

        self.apply_card_parallax();
        self.apply_hero_parallax(&update);
        self.update_active_section();
        if let Some(hint) = self.document.query_selector(".hero-scroll").ok().flatten() {
            dom::set_style(&hint, "opacity", &update.hint_opacity.to_string());
        }
        if let Some(observer) = self.observer.as_ref() {
            observer(update.progress);
        }
    }

    fn apply_card_parallax(&self) {
        let scroll_y = self.state.scroll_y();
        let viewport_height = dom::inner_height(&self.window);
        for (index, card) in dom::query_all(&self.document, ".project").iter().enumerate() {
            let Some(wrap) = dom::query_within(card, ".project-image-wrap") else {
                continue;
            };
            let rect = card.get_bounding_client_rect();
            let p = card_parallax(
                rect.top() + scroll_y,
                rect.height(),
                viewport_height,
                scroll_y,
                speed_for(&self.config.parallax_speeds, index),
            );
            dom::set_style(&wrap, "transform", &p.css_transform());
            dom::set_style(&wrap, "transition", CARD_TRANSITION);
        }
    }

    fn apply_hero_parallax(&self, update: &ScrollUpdate) {
        for el in dom::query_all(&self.document, "[data-parallax]") {
            let speed = parse_speed(&el.get_attribute("data-parallax").unwrap_or_default());
            let hero = update.hero(speed);
            dom::set_style(&el, "transform", &hero.css_transform());
            dom::set_style(&el, "opacity", &hero.opacity.to_string());
        }
    }

    fn update_active_section(&mut self) {
        let rects: Vec<(&str, Option<page::SectionRect>)> = self
            .config
            .sections
            .iter()
            .map(|id| (id.as_str(), dom::by_id(&self.document, id).map(|el| dom::section_rect(&el))))
            .collect();
        let Some(active) = self.state.update_active_section(&rects) else {
            return;
        };
        for link in dom::query_all(&self.document, ".nav-link[data-section]") {
            let on = link.get_attribute("data-section").as_deref() == Some(active.as_str());
            dom::toggle_class(&link, "active", on);
        }
    }
}
