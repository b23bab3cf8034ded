#![forbid(unsafe_code)]

//! `wasm-bindgen` exports.
//!
//! Owns the live [`Portfolio`], turns DOM events into [`PageEvent`]s and
//! executes the [`HostCommand`]s that come back. Only compiled on `wasm32`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_core::{
    HostCommand, ListenTarget, ObserverOptions, PageEvent, Portfolio, Route, SiteConfig,
    Subscription,
};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

use crate::console;
use crate::dom::{DomDocument, DomNode};
use crate::{load_config, snapshot_json};

thread_local! {
    static HOST: RefCell<Option<Rc<Host>>> = const { RefCell::new(None) };
}

/// Route panics to `console.error`. The hook's `Display` already carries the
/// source location.
fn install_panic_hook() {
    static HOOK: std::sync::Once = std::sync::Once::new();
    HOOK.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            web_sys::console::error_1(&JsValue::from_str(&format!("folio {info}")));
        }));
    });
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Install the page behaviors.
///
/// `config_json` overrides any subset of the default configuration. When the
/// document is still loading, installation waits for `DOMContentLoaded`.
/// Calling `boot` again after a successful install is a no-op.
#[wasm_bindgen]
pub fn boot(config_json: Option<String>) -> Result<(), JsValue> {
    install_panic_hook();
    let config = load_config(config_json.as_deref()).map_err(js_error)?;
    console::init(&config.log_level);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        tracing::debug!(target: "folio.web", "deferring install until DOMContentLoaded");
        let deferred = document.clone();
        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = start(window, deferred, config) {
                tracing::error!(target: "folio.web", error = ?err, "install failed");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        return Ok(());
    }
    start(window, document, config)
}

/// JSON view of component state, or `null` before [`boot`] completes.
#[wasm_bindgen]
#[must_use]
pub fn snapshot() -> String {
    HOST.with(|slot| {
        let slot = slot.borrow();
        let Some(host) = slot.as_ref() else {
            return "null".to_owned();
        };
        let Ok(portfolio) = host.portfolio.try_borrow() else {
            return "null".to_owned();
        };
        snapshot_json(&portfolio.snapshot()).unwrap_or_else(|err| {
            tracing::error!(target: "folio.web", error = %err, "snapshot serialization failed");
            "null".to_owned()
        })
    })
}

fn start(window: Window, document: Document, config: SiteConfig) -> Result<(), JsValue> {
    if HOST.with(|slot| slot.borrow().is_some()) {
        tracing::warn!(target: "folio.web", "page already booted");
        return Ok(());
    }

    let (portfolio, commands) =
        Portfolio::install(DomDocument::new(document.clone()), config).map_err(js_error)?;
    let subscriptions = portfolio.subscriptions();
    let groups = portfolio.reveal().group_count();
    let options = portfolio.reveal().options();

    let host = Rc::new(Host {
        window,
        document,
        portfolio: RefCell::new(portfolio),
        observers: RefCell::new(Vec::with_capacity(groups)),
        frame: RefCell::new(None),
    });
    host.create_observers(groups, options)?;
    host.create_frame_callback();
    for subscription in subscriptions {
        host.wire(subscription)?;
    }
    HOST.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&host)));

    host.run(commands);
    tracing::info!(target: "folio.web", "page booted");
    Ok(())
}

/// Browser-side owner of the installed page.
struct Host {
    window: Window,
    document: Document,
    portfolio: RefCell<Portfolio<DomDocument>>,
    /// One observer per reveal group, indexed by group.
    observers: RefCell<Vec<IntersectionObserver>>,
    frame: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl Host {
    fn create_observers(
        self: &Rc<Self>,
        groups: usize,
        options: ObserverOptions,
    ) -> Result<(), JsValue> {
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);

        let mut observers = self.observers.borrow_mut();
        for group in 0..groups {
            let weak = Rc::downgrade(self);
            let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, _observer: IntersectionObserver| {
                    let Some(host) = weak.upgrade() else {
                        return;
                    };
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        host.dispatch(
                            PageEvent::Intersection {
                                group,
                                target: DomNode(entry.target()),
                                intersecting: entry.is_intersecting(),
                            },
                            None,
                        );
                    }
                },
            );
            observers.push(IntersectionObserver::new_with_options(
                callback.as_ref().unchecked_ref(),
                &init,
            )?);
            callback.forget();
        }
        Ok(())
    }

    fn create_frame_callback(self: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let callback = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            if let Some(host) = weak.upgrade() {
                host.dispatch(PageEvent::AnimationFrame, None);
            }
        });
        *self.frame.borrow_mut() = Some(callback);
    }

    fn wire(self: &Rc<Self>, subscription: Subscription<DomNode>) -> Result<(), JsValue> {
        let Subscription {
            target,
            event,
            route,
        } = subscription;
        let target: EventTarget = match target {
            ListenTarget::Window => self.window.clone().into(),
            ListenTarget::Document => self.document.clone().into(),
            ListenTarget::Node(node) => node.0.into(),
        };
        let weak = Rc::downgrade(self);
        let listener = Closure::<dyn FnMut(Event)>::new(move |dom_event: Event| {
            if let Some(host) = weak.upgrade() {
                host.on_event(&route, &dom_event);
            }
        });
        target.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
        listener.forget();
        Ok(())
    }

    fn on_event(&self, route: &Route, dom_event: &Event) {
        if route.always_prevents_default() {
            dom_event.prevent_default();
        }
        let target = dom_event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .map(DomNode);
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        if let Some(page_event) = route.clone().into_event(target, scroll_y) {
            self.dispatch(page_event, Some(dom_event));
        }
    }

    fn dispatch(&self, page_event: PageEvent<DomNode>, dom_event: Option<&Event>) {
        let result = match self.portfolio.try_borrow_mut() {
            Ok(mut portfolio) => portfolio.dispatch(page_event),
            Err(_) => {
                tracing::warn!(target: "folio.web", "re-entrant event dropped");
                return;
            }
        };
        match result {
            Ok(dispatch) => {
                if dispatch.prevent_default {
                    if let Some(dom_event) = dom_event {
                        dom_event.prevent_default();
                    }
                }
                self.run(dispatch.commands);
            }
            Err(err) => {
                tracing::error!(target: "folio.web", error = %err, "event handling failed");
            }
        }
    }

    fn run(&self, commands: Vec<HostCommand<DomNode>>) {
        for command in commands {
            if let Err(err) = self.execute(command) {
                tracing::error!(target: "folio.web", error = ?err, "host command failed");
            }
        }
    }

    fn execute(&self, command: HostCommand<DomNode>) -> Result<(), JsValue> {
        match command {
            HostCommand::ScrollWindowTo { top, smooth } => {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(if smooth {
                    ScrollBehavior::Smooth
                } else {
                    ScrollBehavior::Auto
                });
                self.window.scroll_to_with_scroll_to_options(&options);
            }
            HostCommand::ObserveAfter {
                group,
                node,
                delay_ms,
            } => {
                let Some(observer) = self.observers.borrow().get(group).cloned() else {
                    tracing::warn!(target: "folio.web", group, "no observer for reveal group");
                    return Ok(());
                };
                if delay_ms == 0 {
                    observer.observe(node.element());
                } else {
                    let observe = Closure::once_into_js(move || observer.observe(node.element()));
                    self.window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(
                            observe.unchecked_ref(),
                            i32::try_from(delay_ms).unwrap_or(i32::MAX),
                        )?;
                }
            }
            HostCommand::Unobserve { group, node } => {
                if let Some(observer) = self.observers.borrow().get(group) {
                    observer.unobserve(node.element());
                }
            }
            HostCommand::RequestFrame => {
                if let Some(callback) = self.frame.borrow().as_ref() {
                    self.window
                        .request_animation_frame(callback.as_ref().unchecked_ref())?;
                }
            }
        }
        Ok(())
    }
}
